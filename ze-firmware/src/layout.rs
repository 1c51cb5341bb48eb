use crate::key::Key;

pub mod ze60;

/// A fixed mapping from matrix position to [`Key`]. Positions without a switch hold
/// [`Key::DUMMY`].
#[derive(Debug)]
pub struct Layout<const ROWS: usize, const COLS: usize> {
    keys: [[Key; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Layout<ROWS, COLS> {
    pub const fn new(keys: [[Key; COLS]; ROWS]) -> Self {
        Self { keys }
    }

    /// Out-of-range positions read as [`Key::DUMMY`].
    pub fn get(&self, row: usize, column: usize) -> Key {
        self.keys
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(Key::DUMMY)
    }

    pub fn row(&self, row: usize) -> &[Key] {
        self.keys.get(row).map(|r| r.as_slice()).unwrap_or(&[])
    }

    pub fn switch_count(&self) -> usize {
        self.keys.iter().flatten().filter(|k| !k.is_dummy()).count()
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod test;
