use ze_common::keycodes::{
    key_range::{CONSUMER_MAX, CONSUMER_MIN, FN, FN2, NO_KEY},
    modifiers::modifier_bit,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    Fn,
    Fn2,
}

/// How a key takes part in a cycle. Produced by [`Key::class`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyClass {
    Dummy,
    /// The report bit for the modifier.
    Modifier(u8),
    Layer(Layer),
    Media(u16),
    Ordinary(u16),
}

/// The semantics of one physical switch: a primary code and optional codes for the FN and FN2
/// layers.
///
/// Two keys are equal when their primary codes are equal; the layer codes are not compared.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Key {
    primary: u16,
    secondary: Option<u16>,
    tertiary: Option<u16>,
}

impl Key {
    pub const DUMMY: Self = Self::new(NO_KEY);

    pub const fn new(code: u16) -> Self {
        Self {
            primary: code,
            secondary: None,
            tertiary: None,
        }
    }

    /// Build a key from authored codes where [`NO_KEY`] in `second` or `third` means the layer has
    /// no code for this key.
    pub const fn from_codes(code: u16, second: u16, third: u16) -> Self {
        Self {
            primary: code,
            secondary: if second == NO_KEY { None } else { Some(second) },
            tertiary: if third == NO_KEY { None } else { Some(third) },
        }
    }

    pub const fn with_second(self, code: u16) -> Self {
        Self::from_codes(self.primary, code, self.third_code())
    }

    pub const fn with_third(self, code: u16) -> Self {
        Self::from_codes(self.primary, self.second_code(), code)
    }

    const fn second_code(&self) -> u16 {
        match self.secondary {
            Some(c) => c,
            None => NO_KEY,
        }
    }

    const fn third_code(&self) -> u16 {
        match self.tertiary {
            Some(c) => c,
            None => NO_KEY,
        }
    }

    pub fn code(&self) -> u16 {
        self.primary
    }

    pub fn secondary(&self) -> Option<u16> {
        self.secondary
    }

    pub fn tertiary(&self) -> Option<u16> {
        self.tertiary
    }

    pub fn is_dummy(&self) -> bool {
        self.primary == NO_KEY
    }

    pub fn class(&self) -> KeyClass {
        match self.primary {
            NO_KEY => KeyClass::Dummy,
            FN => KeyClass::Layer(Layer::Fn),
            FN2 => KeyClass::Layer(Layer::Fn2),
            code @ CONSUMER_MIN..=CONSUMER_MAX => KeyClass::Media(code),
            code => match modifier_bit(code) {
                Some(bit) => KeyClass::Modifier(bit),
                None => KeyClass::Ordinary(code),
            },
        }
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::DUMMY
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.primary == other.primary
    }
}
impl Eq for Key {}

/// Which layer-select keys are held this cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerState {
    pub fn_active: bool,
    pub fn2_active: bool,
}

impl LayerState {
    pub fn set(&mut self, layer: Layer) {
        match layer {
            Layer::Fn => self.fn_active = true,
            Layer::Fn2 => self.fn2_active = true,
        }
    }

    /// The code an ordinary key reports given the held layers. FN2 takes precedence over FN; a
    /// layer with no code for the key falls through to the next.
    pub fn resolve(&self, key: &Key) -> u16 {
        match (self.fn2_active, key.tertiary, self.fn_active, key.secondary) {
            (true, Some(code), _, _) => code,
            (_, _, true, Some(code)) => code,
            _ => key.primary,
        }
    }

    /// Media keys only look at the FN layer.
    pub fn resolve_media(&self, key: &Key) -> u16 {
        match key.secondary {
            Some(code) if self.fn_active => code,
            _ => key.primary,
        }
    }
}

#[cfg(test)]
#[path = "key_test.rs"]
mod test;
