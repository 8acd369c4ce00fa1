//! Pseudo-terminal fixture for driving a session without a real tty.

use crate::terminal::KeySource;
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::pty::openpty;
use nix::sys::termios::{tcgetattr, LocalFlags, OutputFlags};
use nix::unistd::{close, write};
use std::os::unix::io::RawFd;
use std::thread;
use std::time::{Duration, Instant};

pub struct Pty {
    pub master: RawFd,
    pub slave: RawFd,
}

impl Pty {
    pub fn open() -> Self {
        let pty = openpty(None, None).expect("openpty");
        Pty {
            master: pty.master,
            slave: pty.slave,
        }
    }

    /// Types `bytes` as if from the keyboard.
    pub fn feed(&self, bytes: &[u8]) {
        assert_eq!(bytes.len(), write(self.master, bytes).expect("write to master"));
    }

    pub fn hang_up(&mut self) {
        let _ = close(self.master);
        self.master = -1;
    }

    pub fn local_flags(&self) -> LocalFlags {
        tcgetattr(self.slave).expect("tcgetattr").local_flags
    }

    pub fn output_flags(&self) -> OutputFlags {
        tcgetattr(self.slave).expect("tcgetattr").output_flags
    }

    pub fn nonblocking(&self) -> bool {
        let bits = fcntl(self.slave, FcntlArg::F_GETFL).expect("F_GETFL");
        OFlag::from_bits_truncate(bits).contains(OFlag::O_NONBLOCK)
    }
}

impl Drop for Pty {
    fn drop(&mut self) {
        if self.master >= 0 {
            let _ = close(self.master);
        }
        let _ = close(self.slave);
    }
}

/// Polls until a character shows up; bytes written to the master take a
/// moment to reach the slave.
pub fn poll_until<S: KeySource>(source: &mut S, timeout: Duration) -> Option<char> {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if let Some(ch) = source.poll_char().expect("poll_char") {
            return Some(ch);
        }
        thread::sleep(Duration::from_millis(5));
    }
    None
}
