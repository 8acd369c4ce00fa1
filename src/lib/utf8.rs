use std::char::REPLACEMENT_CHARACTER;

/// Incremental decoder fed one byte per read.
#[derive(Debug, Default)]
pub(crate) struct Utf8Decoder {
    pending: Vec<u8>,
    expected: usize,
    ready: Option<char>,
}

fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

impl Utf8Decoder {
    /// A character decoded earlier but not yet handed out.
    pub fn take_ready(&mut self) -> Option<char> {
        self.ready.take()
    }

    pub fn push(&mut self, byte: u8) -> Option<char> {
        if self.pending.is_empty() {
            return self.start(byte);
        }

        if is_continuation(byte) {
            self.pending.push(byte);
            if self.pending.len() < self.expected {
                return None;
            }
            let ch = std::str::from_utf8(&self.pending)
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(REPLACEMENT_CHARACTER);
            self.pending.clear();
            return Some(ch);
        }

        // sequence cut short, the interrupting byte starts the next char
        self.pending.clear();
        self.ready = self.start(byte);
        Some(REPLACEMENT_CHARACTER)
    }

    fn start(&mut self, byte: u8) -> Option<char> {
        match sequence_len(byte) {
            0 => Some(REPLACEMENT_CHARACTER),
            1 => Some(char::from(byte)),
            n => {
                self.pending.push(byte);
                self.expected = n;
                None
            }
        }
    }
}
