//! Input payload types for keyboard, mouse, wheel, and touch

/// Interaction state carried by key, mouse, and touch events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputState {
    /// Key or button went down / touch started
    Down,
    /// Key or button went up / touch ended
    Up,
    /// Pointer or touch moved
    Move,
    /// Key auto-repeat while held
    Repeat,
}

impl InputState {
    /// Whether this state begins an interaction
    pub fn is_down(&self) -> bool {
        matches!(self, InputState::Down)
    }
}

/// Modifier key state
///
/// Hosts frequently deliver modifiers as a bitmask; [`Modifiers::bits`] and
/// [`Modifiers::from_bits`] convert to and from that representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
    /// First press of a key, as opposed to an auto-repeat
    pub first_press: bool,
}

impl Modifiers {
    pub const SHIFT: u32 = 1 << 0;
    pub const CTRL: u32 = 1 << 1;
    pub const ALT: u32 = 1 << 2;
    pub const META: u32 = 1 << 3;
    pub const FIRST_PRESS: u32 = 1 << 4;

    /// Decode a host bitmask; unknown bits are ignored
    pub fn from_bits(bits: u32) -> Self {
        Self {
            shift: bits & Self::SHIFT != 0,
            ctrl: bits & Self::CTRL != 0,
            alt: bits & Self::ALT != 0,
            meta: bits & Self::META != 0,
            first_press: bits & Self::FIRST_PRESS != 0,
        }
    }

    /// Encode as a host bitmask
    pub fn bits(&self) -> u32 {
        let mut bits = 0;
        if self.shift {
            bits |= Self::SHIFT;
        }
        if self.ctrl {
            bits |= Self::CTRL;
        }
        if self.alt {
            bits |= Self::ALT;
        }
        if self.meta {
            bits |= Self::META;
        }
        if self.first_press {
            bits |= Self::FIRST_PRESS;
        }
        bits
    }

    /// Check if no modifier keys are held (`first_press` is not a key)
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

/// Key codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,

    // Editing
    Tab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Space,

    // Modifiers (for tracking state)
    Shift,
    Ctrl,
    Alt,
    Meta,

    // History navigation
    Back,
    Forward,

    /// Printable key, reported by its unshifted character
    Char(char),

    /// Unmapped key
    Unknown,
}

/// Identity of the pointer that owns a touch sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bits_roundtrip() {
        let mods = Modifiers::default().shift().ctrl();
        assert_eq!(mods.bits(), Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(Modifiers::from_bits(mods.bits()), mods);
    }

    #[test]
    fn test_from_bits_ignores_unknown() {
        let mods = Modifiers::from_bits(Modifiers::META | 0x8000);
        assert!(mods.meta);
        assert_eq!(mods.bits(), Modifiers::META);
    }

    #[test]
    fn test_first_press_is_not_a_modifier_key() {
        let mods = Modifiers::from_bits(Modifiers::FIRST_PRESS);
        assert!(mods.is_empty());
        assert!(mods.first_press);
    }
}
