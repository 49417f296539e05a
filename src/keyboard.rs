/// Input Oracle: reports which of the 16 keys are currently held down.
/// Bit `15 - k` of the mask is set while key `k` is down.
pub trait Keypad {
    fn pressed_keys(&mut self) -> u16;
}

impl<F: FnMut() -> u16> Keypad for F {
    fn pressed_keys(&mut self) -> u16 {
        self()
    }
}

/// A keypad with nothing ever pressed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoKeys;

impl Keypad for NoKeys {
    fn pressed_keys(&mut self) -> u16 {
        0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyMask(pub u16);

impl KeyMask {
    // key 0 is the most significant bit
    pub fn key_bit(key: u8) -> u16 {
        1 << (0xF - (key & 0xF))
    }

    pub fn from_keys(keys: &[u8]) -> Self {
        Self(keys.iter().fold(0, |mask, k| mask | Self::key_bit(*k)))
    }

    pub fn press(&mut self, key: u8) {
        self.0 |= Self::key_bit(key);
    }

    pub fn is_down(&self, key: u8) -> bool {
        self.0 & Self::key_bit(key) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Lowest-numbered key held down.
    pub fn lowest_pressed(&self) -> Option<u8> {
        (0..=0xF).find(|k| self.is_down(*k))
    }
}
