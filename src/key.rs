/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A character key, including `\t`.
    Char(char),
    /// The Escape key, used to exit modes and cancel pending commands.
    Esc,
    /// The Enter/Return key.
    Enter,
    /// The Backspace key.
    Backspace,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    /// A plain character key with no modifiers.
    pub fn char(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: Modifiers::empty(),
        }
    }

    /// A character key with CTRL held.
    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: Modifiers::CTRL,
        }
    }

    /// The Escape key.
    pub fn esc() -> Self {
        Self {
            code: KeyCode::Esc,
            mods: Modifiers::empty(),
        }
    }

    /// The raw character this event contributes to the command stream.
    ///
    /// Ctrl combinations map to their ASCII control characters (Ctrl-D is
    /// `\x04`, Ctrl-R is `\x12`), Enter to `\n` and Backspace to `\x7f`, so
    /// the dispatcher sees the same byte stream a raw terminal would
    /// deliver. Escape has no raw form; it is handled before dispatch.
    pub fn raw_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.mods.contains(Modifiers::CTRL) => {
                let c = c.to_ascii_lowercase();
                if c.is_ascii_lowercase() {
                    Some(((c as u8) & 0x1f) as char)
                } else {
                    None
                }
            }
            KeyCode::Char(c) => Some(c),
            KeyCode::Enter => Some('\n'),
            KeyCode::Backspace => Some('\x7f'),
            KeyCode::Esc => None,
        }
    }
}
