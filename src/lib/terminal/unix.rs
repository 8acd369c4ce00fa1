use super::{KeySource, SessionToken};
use crate::error::{Error, Result, SetupStep};
use crate::options::{InputSource, Options};
use crate::utf8::Utf8Decoder;

use log::{debug, trace, warn};
use nix::errno::Errno;
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::sys::termios::{
    cfmakeraw, tcgetattr, tcsetattr, LocalFlags, OutputFlags, SetArg::*, Termios,
};
use nix::unistd::{isatty, read};
use std::fs::File;
use std::os::unix::io::{AsRawFd, RawFd};

const STDIN: RawFd = libc::STDIN_FILENO;

/// A tty switched to raw, unechoed, non-blocking input for the lifetime of
/// the value. Dropping it (or calling `restore`) puts back the attributes and
/// file status flags captured when it was opened.
pub struct PosixTerminal {
    fd: RawFd,
    attr_origin: Termios,
    orig_fl: OFlag,
    decoder: Utf8Decoder,
    session: Option<SessionToken>,
    // keeps /dev/tty open; dropped after `Drop::drop` has restored it
    _tty: Option<File>,
}

fn open_input(input: InputSource) -> Result<(RawFd, Option<File>)> {
    match input {
        InputSource::Stdin => Ok((STDIN, None)),
        InputSource::Fd(fd) => Ok((fd, None)),
        InputSource::Auto => {
            if isatty(STDIN).unwrap_or(false) {
                return Ok((STDIN, None));
            }
            let tty = File::options()
                .read(true)
                .write(true)
                .open("/dev/tty")
                .map_err(Error::NoTerminal)?;
            Ok((tty.as_raw_fd(), Some(tty)))
        }
    }
}

/// Raw mode with output processing and echo as configured, then
/// `O_NONBLOCK`. Returns the file status flags found before the change.
fn enter_raw_mode(fd: RawFd, attr_origin: &Termios, options: &Options) -> Result<OFlag> {
    let mut raw = attr_origin.clone();
    cfmakeraw(&mut raw);
    tcsetattr(fd, TCSANOW, &raw).map_err(|e| Error::setup(SetupStep::SetRaw, e))?;

    let mut attr_new = tcgetattr(fd).map_err(|e| Error::setup(SetupStep::GetAttributes, e))?;
    if options.output_processing {
        attr_new.output_flags |= OutputFlags::OPOST;
    }
    if options.echo {
        attr_new.local_flags |= LocalFlags::ECHO;
    } else {
        attr_new.local_flags &= !LocalFlags::ECHO;
    }
    tcsetattr(fd, TCSANOW, &attr_new).map_err(|e| Error::setup(SetupStep::SetAttributes, e))?;

    let bits = fcntl(fd, FcntlArg::F_GETFL).map_err(|e| Error::setup(SetupStep::GetFlags, e))?;
    let orig_fl = OFlag::from_bits_truncate(bits);
    fcntl(fd, FcntlArg::F_SETFL(orig_fl | OFlag::O_NONBLOCK))
        .map_err(|e| Error::setup(SetupStep::SetFlags, e))?;
    Ok(orig_fl)
}

impl PosixTerminal {
    pub fn open(options: &Options) -> Result<Self> {
        let session = SessionToken::acquire()?;
        let (fd, tty) = open_input(options.input)?;

        let attr_origin =
            tcgetattr(fd).map_err(|e| Error::setup(SetupStep::GetAttributes, e))?;
        let orig_fl = match enter_raw_mode(fd, &attr_origin, options) {
            Ok(fl) => fl,
            Err(e) => {
                if let Err(err) = tcsetattr(fd, TCSANOW, &attr_origin) {
                    warn!("terminal: rollback after failed setup: {err}");
                }
                return Err(e);
            }
        };
        debug!("terminal: fd {fd} is raw and non-blocking");

        Ok(PosixTerminal {
            fd,
            attr_origin,
            orig_fl,
            decoder: Utf8Decoder::default(),
            session: Some(session),
            _tty: tty,
        })
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }

    pub fn is_restored(&self) -> bool {
        self.session.is_none()
    }
}

impl KeySource for PosixTerminal {
    fn poll_char(&mut self) -> Result<Option<char>> {
        if self.is_restored() {
            return Err(Error::Restored);
        }
        if let Some(ch) = self.decoder.take_ready() {
            return Ok(Some(ch));
        }

        let mut buf = [0u8; 1];
        loop {
            match read(self.fd, &mut buf) {
                Ok(0) => return Err(Error::Closed),
                Ok(_) => {
                    if let Some(ch) = self.decoder.push(buf[0]) {
                        trace!("terminal: read {ch:?}");
                        return Ok(Some(ch));
                    }
                }
                Err(Errno::EAGAIN) | Err(Errno::EINTR) => return Ok(None),
                Err(e) => return Err(Error::Read(e.into())),
            }
        }
    }

    fn restore(&mut self) -> Result<()> {
        if self.is_restored() {
            return Ok(());
        }
        tcsetattr(self.fd, TCSANOW, &self.attr_origin).map_err(|e| Error::Restore(e.into()))?;
        fcntl(self.fd, FcntlArg::F_SETFL(self.orig_fl)).map_err(|e| Error::Restore(e.into()))?;
        self.session = None;
        debug!("terminal: fd {} restored", self.fd);
        Ok(())
    }
}

impl Drop for PosixTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("{e}");
        }
    }
}
