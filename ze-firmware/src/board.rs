use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::{
    key::{Key, LayerState},
    key_reporter::{Report, ReportEmitter},
    key_scanner::{KeyScanner, MatrixIo},
    layout::{ze60, Layout},
    resolver::CycleState,
    slots::{Slot, SlotAllocator},
};

/// A board wired like the Ze60: 5x14 matrix, 6 report slots.
pub type Ze60Board<'l, M, D, E> =
    Board<'l, M, D, E, { ze60::ROWS }, { ze60::COLS }, { ze60::KEY_SLOTS }, { ze60::RAW_KEYS }>;

/// Runs the scan, resolve, allocate and emit cycle for one keyboard.
///
/// The slot table is the only state carried from one [`Board::update`] to the next; everything
/// else is rebuilt by each cycle.
pub struct Board<
    'l,
    M: MatrixIo,
    D: DelayNs,
    E: ReportEmitter<N>,
    const ROWS: usize,
    const COLS: usize,
    const N: usize,
    const RAW: usize,
> {
    scanner: KeyScanner<M, D>,
    layout: &'l Layout<ROWS, COLS>,
    allocator: SlotAllocator<N>,
    state: CycleState<N, RAW>,
    released: Vec<Key, N>,
    report: Report<N>,
    emitter: E,
}

impl<
        'l,
        M: MatrixIo,
        D: DelayNs,
        E: ReportEmitter<N>,
        const ROWS: usize,
        const COLS: usize,
        const N: usize,
        const RAW: usize,
    > Board<'l, M, D, E, ROWS, COLS, N, RAW>
{
    pub fn new(scanner: KeyScanner<M, D>, layout: &'l Layout<ROWS, COLS>, emitter: E) -> Self {
        Self {
            scanner,
            layout,
            allocator: SlotAllocator::default(),
            state: CycleState::default(),
            released: Vec::new(),
            report: Report::default(),
            emitter,
        }
    }

    /// Run one complete cycle and emit its report.
    pub fn update(&mut self) {
        self.state.reset();
        self.released.clear();

        self.scanner.scan(self.layout, &mut self.state.active);
        self.state.classify();
        self.allocator
            .allocate(self.state.candidates(), self.state.layers(), &mut self.released);

        self.report = Report {
            keys: self.allocator.codes(),
            modifiers: self.state.modifiers(),
            media: self.state.media_usage(),
        };
        self.emitter.emit(&self.report);
    }

    /// Takes effect from the next cycle. Held keys keep their slots if the new table has the same
    /// primary code at their position.
    pub fn set_layout(&mut self, layout: &'l Layout<ROWS, COLS>) {
        crate::info!("layout switched");
        self.layout = layout;
    }

    pub fn layout(&self) -> &'l Layout<ROWS, COLS> {
        self.layout
    }

    /// Every key recorded by the last scan, in scan order.
    pub fn pressed_keys(&self) -> &[Key] {
        self.state.active()
    }

    pub fn num_keys_pressed(&self) -> usize {
        self.state.active().len()
    }

    /// Keys that lost their slot in the last cycle.
    pub fn just_released_keys(&self) -> &[Key] {
        &self.released
    }

    pub fn num_released_keys(&self) -> usize {
        self.released.len()
    }

    pub fn modifiers(&self) -> u8 {
        self.state.modifiers()
    }

    /// Consumer usage of the last cycle; 0 when no media key was down.
    pub fn media(&self) -> u16 {
        self.state.media_usage()
    }

    pub fn layers(&self) -> LayerState {
        self.state.layers()
    }

    pub fn slots(&self) -> &[Slot; N] {
        self.allocator.slots()
    }

    pub fn last_report(&self) -> &Report<N> {
        &self.report
    }

    pub fn scanner(&self) -> &KeyScanner<M, D> {
        &self.scanner
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }
}

#[cfg(test)]
#[path = "board_test.rs"]
mod test;
