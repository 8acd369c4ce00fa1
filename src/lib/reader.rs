use crate::error::Result;
use crate::key::{LastKey, SpecialKey};
use crate::terminal::KeySource;

#[cfg(any(unix, windows))]
use crate::{options::Options, terminal::Terminal};

/// Polls single keystrokes and remembers the last one for special-key
/// detection.
///
/// ```no_run
/// use kbhit::{KeyReader, SpecialKey};
/// use std::{thread, time::Duration};
///
/// let mut kb = KeyReader::new()?;
/// loop {
///     match kb.getch()? {
///         None => thread::sleep(Duration::from_millis(10)),
///         Some(_) if kb.detect_special_key() == Some(SpecialKey::CtrlC) => break,
///         Some(ch) => println!("{ch:?}"),
///     }
/// }
/// # Ok::<(), kbhit::Error>(())
/// ```
pub struct KeyReader<S: KeySource> {
    source: S,
    last: LastKey,
}

#[cfg(any(unix, windows))]
impl KeyReader<Terminal> {
    /// Takes over the terminal with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Result<Self> {
        Ok(Self::from_source(Terminal::open(&options)?))
    }
}

impl<S: KeySource> KeyReader<S> {
    pub fn from_source(source: S) -> Self {
        KeyReader {
            source,
            last: LastKey::default(),
        }
    }

    /// Returns the next key if one is waiting, without blocking. An error
    /// is recorded as no key.
    pub fn getch(&mut self) -> Result<Option<char>> {
        let res = self.source.poll_char();
        self.last.record(res.as_ref().ok().copied().flatten());
        res
    }

    /// Interprets the result of the immediately preceding `getch`.
    pub fn detect_special_key(&self) -> Option<SpecialKey> {
        self.last.special_key()
    }

    pub fn last_char(&self) -> Option<char> {
        self.last.ch()
    }

    pub fn last_code(&self) -> Option<u32> {
        self.last.code()
    }

    pub fn restore(&mut self) -> Result<()> {
        self.source.restore()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        polls: VecDeque<Result<Option<char>>>,
        restores: usize,
    }

    impl Scripted {
        fn new(polls: Vec<Result<Option<char>>>) -> Self {
            Scripted {
                polls: polls.into(),
                restores: 0,
            }
        }
    }

    impl KeySource for Scripted {
        fn poll_char(&mut self) -> Result<Option<char>> {
            self.polls.pop_front().unwrap_or(Ok(None))
        }

        fn restore(&mut self) -> Result<()> {
            self.restores += 1;
            Ok(())
        }
    }

    #[test]
    fn test_detect_before_read() {
        let kb = KeyReader::from_source(Scripted::default());
        assert_eq!(None, kb.detect_special_key());
        assert_eq!(None, kb.last_code());
    }

    #[test]
    fn test_records_last_char() {
        let mut kb = KeyReader::from_source(Scripted::new(vec![Ok(Some('a'))]));
        assert_eq!(Some('a'), kb.getch().unwrap());
        assert_eq!(Some('a'), kb.last_char());
        assert_eq!(Some(97), kb.last_code());
        assert_eq!(None, kb.detect_special_key());
    }

    #[test]
    fn test_detects_after_read() {
        let mut kb = KeyReader::from_source(Scripted::new(vec![
            Ok(Some('\x03')),
            Ok(Some('\x7f')),
            Ok(Some('x')),
        ]));
        kb.getch().unwrap();
        assert_eq!(Some(SpecialKey::CtrlC), kb.detect_special_key());
        kb.getch().unwrap();
        assert_eq!(Some(SpecialKey::Backspace), kb.detect_special_key());
        kb.getch().unwrap();
        assert_eq!(None, kb.detect_special_key());
    }

    #[test]
    fn test_empty_poll_clears_last() {
        let mut kb = KeyReader::from_source(Scripted::new(vec![Ok(Some('\x03'))]));
        kb.getch().unwrap();
        assert_eq!(None, kb.getch().unwrap());
        assert_eq!(None, kb.last_char());
        assert_eq!(None, kb.detect_special_key());
    }

    #[test]
    fn test_error_is_surfaced_and_clears_last() {
        let mut kb =
            KeyReader::from_source(Scripted::new(vec![Ok(Some('\x03')), Err(Error::Closed)]));
        kb.getch().unwrap();
        assert!(matches!(kb.getch(), Err(Error::Closed)));
        assert_eq!(None, kb.last_code());
    }

    #[test]
    fn test_restore_delegates() {
        let mut kb = KeyReader::from_source(Scripted::default());
        kb.restore().unwrap();
        kb.restore().unwrap();
        assert_eq!(2, kb.source().restores);
    }

    #[cfg(unix)]
    mod pty {
        use crate::key::SpecialKey;
        use crate::options::{InputSource, Options};
        use crate::reader::KeyReader;
        use crate::terminal::Terminal;
        use crate::test_pty::Pty;
        use serial_test::serial;
        use std::thread;
        use std::time::{Duration, Instant};

        fn reader(pty: &Pty) -> KeyReader<Terminal> {
            KeyReader::with_options(Options::new().input(InputSource::Fd(pty.slave))).unwrap()
        }

        fn wait_key(kb: &mut KeyReader<Terminal>) -> Option<char> {
            let start = Instant::now();
            while start.elapsed() < Duration::from_secs(1) {
                if let Some(ch) = kb.getch().unwrap() {
                    return Some(ch);
                }
                thread::sleep(Duration::from_millis(5));
            }
            None
        }

        #[test]
        #[serial]
        fn test_typed_a() {
            let pty = Pty::open();
            let mut kb = reader(&pty);
            pty.feed(b"a");
            assert_eq!(Some('a'), wait_key(&mut kb));
            assert_eq!(Some(97), kb.last_code());
        }

        #[test]
        #[serial]
        fn test_typed_ctrl_c() {
            let pty = Pty::open();
            let mut kb = reader(&pty);
            pty.feed(&[0x03]);
            wait_key(&mut kb);
            assert_eq!(Some(SpecialKey::CtrlC), kb.detect_special_key());
        }

        #[test]
        #[serial]
        fn test_typed_backspace() {
            let pty = Pty::open();
            let mut kb = reader(&pty);
            pty.feed(&[0x7f]);
            wait_key(&mut kb);
            assert_eq!(Some(SpecialKey::Backspace), kb.detect_special_key());
        }

        #[test]
        #[serial]
        fn test_typed_x() {
            let pty = Pty::open();
            let mut kb = reader(&pty);
            pty.feed(b"x");
            assert_eq!(Some('x'), wait_key(&mut kb));
            assert_eq!(None, kb.detect_special_key());
        }

        #[test]
        #[serial]
        fn test_restore_twice() {
            let pty = Pty::open();
            let mut kb = reader(&pty);
            kb.restore().unwrap();
            kb.restore().unwrap();
            assert!(kb.source().is_restored());
            assert!(!pty.nonblocking());
        }
    }
}
