use super::KeySource;
use crate::error::Result;
use crate::options::Options;
use crate::utf8::Utf8Decoder;

use log::{debug, trace};
use std::os::raw::c_int;

extern "C" {
    fn _kbhit() -> c_int;
    fn _getch() -> c_int;
}

/// Console input through the CRT. The console already delivers unbuffered,
/// unechoed keys to `_getch`, so there is nothing to configure or restore.
#[derive(Debug, Default)]
pub struct ConsoleTerminal {
    decoder: Utf8Decoder,
}

impl ConsoleTerminal {
    pub fn open(_options: &Options) -> Result<Self> {
        debug!("console input needs no setup");
        Ok(Self::default())
    }
}

impl KeySource for ConsoleTerminal {
    fn poll_char(&mut self) -> Result<Option<char>> {
        if let Some(ch) = self.decoder.take_ready() {
            return Ok(Some(ch));
        }
        while unsafe { _kbhit() } != 0 {
            let byte = unsafe { _getch() } as u8;
            if let Some(ch) = self.decoder.push(byte) {
                trace!("read {ch:?}");
                return Ok(Some(ch));
            }
        }
        Ok(None)
    }

    fn restore(&mut self) -> Result<()> {
        Ok(())
    }
}
