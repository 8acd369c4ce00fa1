const CTRL_C: u32 = 0x03;
const BACKSPACE: u32 = 0x7f;

/// Symbolic keys a caller can match on after a read.
///
/// Only `CtrlC` and `Backspace` are ever detected. The escape and arrow
/// variants arrive as multi-byte escape sequences, which are not decoded.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SpecialKey {
    CtrlC,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Backspace,
}

impl std::fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CtrlC => write!(f, "Ctrl-C"),
            Self::Esc => write!(f, "Esc"),
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
            Self::Backspace => write!(f, "Backspace"),
        }
    }
}

/// Outcome of the most recent poll.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct LastKey {
    ch: Option<char>,
    code: Option<u32>,
}

impl LastKey {
    pub fn record(&mut self, ch: Option<char>) {
        self.ch = ch;
        self.code = ch.map(|c| c as u32);
    }

    pub fn ch(&self) -> Option<char> {
        self.ch
    }

    pub fn code(&self) -> Option<u32> {
        self.code
    }

    pub fn special_key(&self) -> Option<SpecialKey> {
        match self.code? {
            CTRL_C => Some(SpecialKey::CtrlC),
            BACKSPACE => Some(SpecialKey::Backspace),
            _ => None,
        }
    }
}
