//! Non-blocking single keystroke input for terminal programs.
//!
//! [`KeyReader`] puts the terminal into raw, unechoed, non-blocking mode
//! for as long as it lives and hands out one key per [`KeyReader::getch`].

pub mod error;
pub mod key;
pub mod logger;
pub mod options;
pub mod reader;
pub mod terminal;

mod utf8;

#[cfg(all(test, unix))]
mod test_pty;

pub use error::{Error, Result, SetupStep};
pub use key::SpecialKey;
pub use options::{InputSource, Options};
pub use reader::KeyReader;
pub use terminal::KeySource;
#[cfg(any(unix, windows))]
pub use terminal::Terminal;

pub fn exit_with_error(err: impl std::fmt::Display) -> ! {
    eprintln!("{err}");
    std::process::exit(1)
}
