use std::fmt;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SetupStep {
    GetAttributes,
    SetRaw,
    SetAttributes,
    GetFlags,
    SetFlags,
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetAttributes => write!(f, "get attributes"),
            Self::SetRaw => write!(f, "enter raw mode"),
            Self::SetAttributes => write!(f, "set attributes"),
            Self::GetFlags => write!(f, "get file status flags"),
            Self::SetFlags => write!(f, "set file status flags"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal: another key reader session is already active")]
    SessionActive,
    #[error("terminal: no controlling terminal: {0}")]
    NoTerminal(#[source] io::Error),
    #[error("terminal: failed to {step}: {source}")]
    Setup {
        step: SetupStep,
        #[source]
        source: io::Error,
    },
    #[error("terminal: failed to restore: {0}")]
    Restore(#[source] io::Error),
    #[error("terminal: input stream closed")]
    Closed,
    #[error("terminal: read failed: {0}")]
    Read(#[source] io::Error),
    #[error("terminal: session already restored")]
    Restored,
}

impl Error {
    pub(crate) fn setup(step: SetupStep, source: impl Into<io::Error>) -> Self {
        Error::Setup {
            step,
            source: source.into(),
        }
    }
}
