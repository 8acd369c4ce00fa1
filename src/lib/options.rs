#[cfg(unix)]
use std::os::unix::io::RawFd;

/// Where keystrokes are read from.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputSource {
    /// Stdin when it is a terminal, otherwise `/dev/tty`.
    Auto,
    Stdin,
    /// A descriptor owned by the caller, e.g. the slave side of a pty.
    #[cfg(unix)]
    Fd(RawFd),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Options {
    pub input: InputSource,
    /// Keep output post-processing so `\n` still moves to column 0.
    pub output_processing: bool,
    pub echo: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            input: InputSource::Auto,
            output_processing: true,
            echo: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: InputSource) -> Self {
        self.input = input;
        self
    }

    pub fn output_processing(mut self, enabled: bool) -> Self {
        self.output_processing = enabled;
        self
    }

    pub fn echo(mut self, enabled: bool) -> Self {
        self.echo = enabled;
        self
    }
}
