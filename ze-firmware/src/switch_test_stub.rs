extern crate alloc;
extern crate std;

use alloc::vec;
use core::cell::{Cell, RefCell};
use embedded_hal::{
    delay::DelayNs,
    digital::{Error, ErrorType, InputPin, OutputPin, PinState},
};
use std::rc::Rc;
use std::vec::Vec;

use crate::key_scanner::MatrixIo;

pub trait Observer {
    fn update(&self, pin: Pin);
}

#[derive(Debug)]
struct KeyMatrixInner {
    switches: Vec<bool>,
    inputs: Vec<Pin>,
    outputs: Vec<Pin>,
}

/// Wires simulated switches between output (row) pins and pulled-up input (column) pins.
#[derive(Clone)]
pub struct KeyMatrix {
    inner: Rc<RefCell<KeyMatrixInner>>,
}
impl KeyMatrix {
    pub fn new(inputs: Vec<Pin>, outputs: Vec<Pin>) -> Self {
        for i in inputs.iter() {
            i.0.set(Some(true));
        }
        let me = Self {
            inner: Rc::new(RefCell::new(KeyMatrixInner {
                switches: vec![false; inputs.len() * outputs.len()],
                inputs,
                outputs,
            })),
        };

        for o in me.inner.borrow().outputs.iter() {
            o.add_observer(Rc::new(me.clone()))
        }

        me
    }

    pub fn down(&self, row: usize, col: usize) {
        self.set_switch(row, col, true);
    }

    pub fn up(&self, row: usize, col: usize) {
        self.set_switch(row, col, false);
    }

    pub fn set_switch(&self, row: usize, col: usize, is_down: bool) {
        let inner = self.inner.borrow();
        let idx = row * inner.inputs.len() + col;
        drop(inner);
        self.inner.borrow_mut().switches[idx] = is_down;
        self.refresh();
    }

    fn refresh(&self) {
        let inner = self.inner.borrow();
        let cols = inner.inputs.len();
        for (col, ip) in inner.inputs.iter().enumerate() {
            let is_low = inner
                .outputs
                .iter()
                .enumerate()
                .any(|(row, op)| op.state() == Some(false) && inner.switches[row * cols + col]);
            ip.0.set(Some(!is_low));
        }
    }
}
impl Observer for KeyMatrix {
    fn update(&self, _pin: Pin) {
        self.refresh();
    }
}

#[derive(Debug)]
pub struct TestError;

impl Error for TestError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

#[derive(Clone)]
pub struct Pin(Rc<PinShared>);
impl core::fmt::Debug for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pin")
            .field("n", &self.0.n)
            .field("state", &self.state())
            .finish()
    }
}
impl Pin {
    pub fn new(n: u8) -> Self {
        Self(Rc::new(PinShared {
            n,
            is_high: Cell::new(None),
            observer: RefCell::new(None),
        }))
    }

    pub fn num(&self) -> u8 {
        self.0.n
    }

    pub fn state(&self) -> Option<bool> {
        self.0.is_high.get()
    }

    fn add_observer(&self, observer: Rc<dyn Observer>) {
        *self.0.observer.borrow_mut() = Some(observer);
    }

    fn drive(&self, is_high: bool) {
        if self.state() != Some(is_high) {
            self.0.set(Some(is_high));
            let observer = self.0.observer.borrow().clone();
            if let Some(o) = observer {
                o.update(self.clone());
            }
        }
    }
}

struct PinShared {
    n: u8,
    is_high: Cell<Option<bool>>,
    observer: RefCell<Option<Rc<dyn Observer>>>,
}
impl PinShared {
    fn set(&self, is_high: Option<bool>) {
        self.is_high.set(is_high);
    }
}

impl ErrorType for Pin {
    type Error = TestError;
}

impl InputPin for Pin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.state().ok_or(TestError)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.state().map(|s| !s).ok_or(TestError)
    }
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

/// A [`MatrixIo`] that needs no pins: switches are a grid of booleans and every electrical call is
/// recorded.
pub struct SimMatrix<const ROWS: usize, const COLS: usize> {
    switches: Rc<RefCell<[[bool; COLS]; ROWS]>>,
    active_row: Option<usize>,
    pub drive_log: Vec<(usize, PinState)>,
    pub reads: usize,
}
impl<const ROWS: usize, const COLS: usize> Default for SimMatrix<ROWS, COLS> {
    fn default() -> Self {
        Self {
            switches: Rc::new(RefCell::new([[false; COLS]; ROWS])),
            active_row: None,
            drive_log: Vec::new(),
            reads: 0,
        }
    }
}
impl<const ROWS: usize, const COLS: usize> SimMatrix<ROWS, COLS> {
    /// A handle for pressing switches after the matrix has been moved into a scanner.
    pub fn switches(&self) -> Switches<ROWS, COLS> {
        Switches(self.switches.clone())
    }
}
impl<const ROWS: usize, const COLS: usize> MatrixIo for SimMatrix<ROWS, COLS> {
    fn drive_row(&mut self, row: usize, level: PinState) {
        self.drive_log.push((row, level));
        self.active_row = match level {
            PinState::Low => Some(row),
            PinState::High if self.active_row == Some(row) => None,
            PinState::High => self.active_row,
        };
    }

    fn read_column(&mut self, column: usize) -> bool {
        self.reads += 1;
        match self.active_row {
            Some(row) => !self.switches.borrow()[row][column],
            None => true,
        }
    }
}

#[derive(Clone)]
pub struct Switches<const ROWS: usize, const COLS: usize>(Rc<RefCell<[[bool; COLS]; ROWS]>>);
impl<const ROWS: usize, const COLS: usize> Switches<ROWS, COLS> {
    pub fn down(&self, row: usize, col: usize) {
        self.0.borrow_mut()[row][col] = true;
    }

    pub fn up(&self, row: usize, col: usize) {
        self.0.borrow_mut()[row][col] = false;
    }

    pub fn release_all(&self) {
        *self.0.borrow_mut() = [[false; COLS]; ROWS];
    }
}

/// Records requested delays instead of waiting.
#[derive(Clone, Default)]
pub struct TestDelay(pub Rc<RefCell<Vec<u32>>>);
impl DelayNs for TestDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(us * 1000);
    }
}
