use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin, PinState},
};
use heapless::Vec;

use crate::{key::Key, layout::Layout};

/// Time a row line is given to settle after being driven, before its columns are read.
pub const ROW_SETTLE_MICROS: u32 = 5;

/// Electrical access to the switch matrix.
pub trait MatrixIo {
    /// Drive a row line. A row is active while driven [`PinState::Low`].
    fn drive_row(&mut self, row: usize, level: PinState);

    /// Sample a column line; `true` is high. Columns are pulled up so a pressed switch on the
    /// active row reads low.
    fn read_column(&mut self, column: usize) -> bool;
}

/// [`MatrixIo`] over `embedded-hal` pins: rows are outputs, columns are pulled-up inputs.
pub struct PinMatrix<I: InputPin, O: OutputPin, const COLS: usize, const ROWS: usize> {
    input_pins: [I; COLS],
    output_pins: [O; ROWS],
}

impl<I: InputPin, O: OutputPin, const COLS: usize, const ROWS: usize> PinMatrix<I, O, COLS, ROWS> {
    /// All rows are driven inactive.
    pub fn new(input_pins: [I; COLS], mut output_pins: [O; ROWS]) -> Self {
        for out in output_pins.iter_mut() {
            let _ = out.set_high();
        }
        Self {
            input_pins,
            output_pins,
        }
    }
}

impl<I: InputPin, O: OutputPin, const COLS: usize, const ROWS: usize> MatrixIo
    for PinMatrix<I, O, COLS, ROWS>
{
    fn drive_row(&mut self, row: usize, level: PinState) {
        if let Some(op) = self.output_pins.get_mut(row) {
            let _ = op.set_state(level);
        }
    }

    fn read_column(&mut self, column: usize) -> bool {
        // a pin that cannot be read counts as released
        self.input_pins
            .get_mut(column)
            .map(|ip| ip.is_high().unwrap_or(true))
            .unwrap_or(true)
    }
}

/// Produces the keys that are down for one cycle. Every scan is an independent snapshot; there is
/// no debouncing.
pub struct KeyScanner<M: MatrixIo, D: DelayNs> {
    matrix: M,
    delay: D,
    settle_micros: u32,
}

impl<M: MatrixIo, D: DelayNs> KeyScanner<M, D> {
    pub fn new(matrix: M, delay: D) -> Self {
        Self {
            matrix,
            delay,
            settle_micros: ROW_SETTLE_MICROS,
        }
    }

    pub fn settle_micros(mut self, micros: u32) -> Self {
        self.settle_micros = micros;
        self
    }

    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    /// Append every pressed, non-dummy key of `layout` to `active` in row-major then column-major
    /// order. Keys that do not fit in `active` are not recorded.
    pub fn scan<const ROWS: usize, const COLS: usize, const RAW: usize>(
        &mut self,
        layout: &Layout<ROWS, COLS>,
        active: &mut Vec<Key, RAW>,
    ) {
        for row in 0..ROWS {
            self.matrix.drive_row(row, PinState::Low);
            self.delay.delay_us(self.settle_micros);

            for (col, key) in layout.row(row).iter().enumerate() {
                if key.is_dummy() || self.matrix.read_column(col) {
                    continue;
                }
                if active.push(*key).is_err() {
                    crate::debug!("raw key dropped at {}x{}", row, col);
                }
            }

            self.matrix.drive_row(row, PinState::High);
        }
    }
}

#[cfg(test)]
#[path = "key_scanner_test.rs"]
mod test;
