use heapless::Vec;
use ze_common::keycodes::key_range::NO_KEY;

use crate::key::{Key, LayerState};

/// One report position: the key that owns it and the code it currently reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    key: Key,
    code: u16,
}

impl Slot {
    pub const EMPTY: Self = Self {
        key: Key::DUMMY,
        code: NO_KEY,
    };

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_dummy()
    }
}

/// Outcome of offering a key to the slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Placement {
    /// Assigned to the lowest free slot.
    Placed(usize),
    /// Already resident; its code was refreshed in place.
    AlreadyPresent(usize),
    /// Every slot is taken. The key is not reported this cycle.
    Dropped,
}

/// Assigns keys to `N` report slots.
///
/// A key keeps its slot for as long as it is held. Freed slots are refilled lowest index first.
/// A key is never resident in two slots.
pub struct SlotAllocator<const N: usize> {
    slots: [Slot; N],
}

impl<const N: usize> Default for SlotAllocator<N> {
    fn default() -> Self {
        Self {
            slots: [Slot::EMPTY; N],
        }
    }
}

impl<const N: usize> SlotAllocator<N> {
    pub fn slots(&self) -> &[Slot; N] {
        &self.slots
    }

    pub fn codes(&self) -> [u16; N] {
        core::array::from_fn(|i| self.slots[i].code)
    }

    pub fn position(&self, key: &Key) -> Option<usize> {
        if key.is_dummy() {
            return None;
        }
        self.slots.iter().position(|s| s.key == *key)
    }

    /// Run both phases for one cycle. Keys evicted by the release phase are appended to
    /// `released`.
    pub fn allocate(
        &mut self,
        candidates: &[Key],
        layers: LayerState,
        released: &mut Vec<Key, N>,
    ) {
        self.release(candidates, released);
        for key in candidates {
            if let Placement::Dropped = self.place(*key, layers.resolve(key)) {
                crate::debug!("no free slot for {}", key.code());
            }
        }
    }

    /// Clear every slot whose key is not among `candidates`.
    pub fn release(&mut self, candidates: &[Key], released: &mut Vec<Key, N>) {
        for slot in self.slots.iter_mut() {
            if slot.is_empty() || candidates.contains(&slot.key) {
                continue;
            }
            // at most N slots can be freed so this never overflows
            let _ = released.push(slot.key);
            *slot = Slot::EMPTY;
        }
    }

    /// Offer `key`, resolved to `code`, to the table.
    pub fn place(&mut self, key: Key, code: u16) -> Placement {
        if key.is_dummy() {
            return Placement::Dropped;
        }

        let mut free = None;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_empty() {
                if free.is_none() {
                    free = Some(i);
                }
            } else if slot.key == key {
                slot.code = code;
                return Placement::AlreadyPresent(i);
            }
        }

        match free {
            Some(i) => {
                self.slots[i] = Slot { key, code };
                Placement::Placed(i)
            }
            None => Placement::Dropped,
        }
    }
}

#[cfg(test)]
#[path = "slots_test.rs"]
mod test;
