#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

use crate::error::Result;

#[cfg(unix)]
pub use unix::PosixTerminal;
#[cfg(windows)]
pub use windows::ConsoleTerminal;

/// The key source for the platform being built.
#[cfg(unix)]
pub type Terminal = PosixTerminal;
#[cfg(windows)]
pub type Terminal = ConsoleTerminal;

/// A platform's way of handing out single keystrokes without blocking.
pub trait KeySource {
    /// Returns `Ok(None)` right away when no key is waiting.
    fn poll_char(&mut self) -> Result<Option<char>>;

    /// Puts the input back the way it was found. Calling it again is a no-op.
    fn restore(&mut self) -> Result<()>;
}

#[cfg(unix)]
mod session {
    use crate::error::{Error, Result};
    use std::sync::atomic::{AtomicBool, Ordering};

    static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

    /// Held by whoever currently owns the terminal configuration.
    #[derive(Debug)]
    pub(crate) struct SessionToken(());

    impl SessionToken {
        pub fn acquire() -> Result<Self> {
            SESSION_ACTIVE
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .map(|_| SessionToken(()))
                .map_err(|_| Error::SessionActive)
        }
    }

    impl Drop for SessionToken {
        fn drop(&mut self) {
            SESSION_ACTIVE.store(false, Ordering::Release);
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serial_test::serial;

        #[test]
        #[serial]
        fn test_single_owner() {
            let token = SessionToken::acquire().unwrap();
            assert!(matches!(SessionToken::acquire(), Err(Error::SessionActive)));
            drop(token);
            assert!(SessionToken::acquire().is_ok());
        }
    }
}

#[cfg(unix)]
pub(crate) use session::SessionToken;
