use heapless::Vec;
use ze_common::keycodes::key_range::CONSUMER_MIN;

use crate::key::{Key, KeyClass, LayerState};

/// Everything learned from one scan. Rebuilt every cycle.
///
/// `RAW` bounds the keys a scan can record; `N` bounds the ordinary keys handed on to slot
/// allocation and is the report's slot count.
pub struct CycleState<const N: usize, const RAW: usize> {
    pub(crate) active: Vec<Key, RAW>,
    candidates: Vec<Key, N>,
    ordinary_count: usize,
    modifiers: u8,
    layers: LayerState,
    media: Option<Key>,
}

impl<const N: usize, const RAW: usize> Default for CycleState<N, RAW> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            candidates: Vec::new(),
            ordinary_count: 0,
            modifiers: 0,
            layers: LayerState::default(),
            media: None,
        }
    }
}

impl<const N: usize, const RAW: usize> CycleState<N, RAW> {
    pub fn reset(&mut self) {
        self.active.clear();
        self.candidates.clear();
        self.ordinary_count = 0;
        self.modifiers = 0;
        self.layers = LayerState::default();
        self.media = None;
    }

    /// Partition [`Self::active`] in scan order.
    pub fn classify(&mut self) {
        for key in self.active.iter() {
            match key.class() {
                KeyClass::Dummy => {}
                KeyClass::Layer(layer) => self.layers.set(layer),
                KeyClass::Modifier(bit) => self.modifiers |= bit,
                KeyClass::Media(_) => self.media = Some(*key),
                KeyClass::Ordinary(_) => {
                    if self.candidates.push(*key).is_err() {
                        crate::debug!("ordinary key {} over slot capacity", key.code());
                    }
                    self.ordinary_count += 1;
                }
            }
        }
    }

    /// Keys recorded by the scan, in scan order.
    pub fn active(&self) -> &[Key] {
        &self.active
    }

    /// Ordinary keys eligible for a report slot, in scan order.
    pub fn candidates(&self) -> &[Key] {
        &self.candidates
    }

    /// Ordinary keys seen this cycle, including those over capacity.
    pub fn ordinary_count(&self) -> usize {
        self.ordinary_count
    }

    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    pub fn layers(&self) -> LayerState {
        self.layers
    }

    pub fn media_key(&self) -> Option<Key> {
        self.media
    }

    /// The consumer usage to report, 0 when no media key is down.
    pub fn media_usage(&self) -> u16 {
        self.media
            .map(|key| self.layers.resolve_media(&key).saturating_sub(CONSUMER_MIN))
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod test;
