use crate::constants::KEY_COUNT;

/// # Input
/// The hexadecimal keypad, polled by the CPU.
///
/// Keys are identified by their value 0x0..=0xF. Both queries are level-triggered snapshots of
/// what is held right now; nothing is queued between polls.
pub trait Input {
    fn is_key_down(&self, key: u8) -> bool;

    /// The lowest-numbered key currently held
    fn current_key_down(&self) -> Option<u8>;
}

/// An in-memory Input whose keys are pressed and released by the frontend.
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys above 0xF are ignored
    pub fn press(&mut self, key: u8) {
        if let Some(held) = self.keys.get_mut(usize::from(key)) {
            *held = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(held) = self.keys.get_mut(usize::from(key)) {
            *held = false;
        }
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }
}

impl Input for Keypad {
    fn is_key_down(&self, key: u8) -> bool {
        self.keys.get(usize::from(key)).copied().unwrap_or(false)
    }

    fn current_key_down(&self) -> Option<u8> {
        self.keys.iter().position(|&held| held).map(|key| key as u8)
    }
}

#[cfg(test)]
mod test_keypad {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xA);
        assert!(keypad.is_key_down(0xA));
        keypad.release(0xA);
        assert!(!keypad.is_key_down(0xA));
    }

    #[test]
    fn test_current_key_down_is_lowest_held() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.current_key_down(), None);
        keypad.press(0xC);
        keypad.press(0x3);
        assert_eq!(keypad.current_key_down(), Some(0x3));
        keypad.release_all();
        assert_eq!(keypad.current_key_down(), None);
    }

    #[test]
    fn test_keys_out_of_range_are_never_down() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert!(!keypad.is_key_down(0x10));
        assert_eq!(keypad.current_key_down(), None);
    }
}
