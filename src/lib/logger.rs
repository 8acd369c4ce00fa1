use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum LogLevel {
    Crit = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LogLevel::Debug => "DEBG",
                LogLevel::Info => "INFO",
                LogLevel::Warn => "WARN",
                LogLevel::Crit => "CRIT",
            }
        )
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => LogLevel::Crit,
            Level::Warn => LogLevel::Warn,
            Level::Info => LogLevel::Info,
            Level::Debug | Level::Trace => LogLevel::Debug,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Crit => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Trace,
        }
    }
}

/// Writes `timestamp LEVEL message` lines to stderr.
pub struct Logger(pub LogLevel);

/// Installs a [`Logger`] as the global `log` backend.
pub fn init(level: LogLevel) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger(level)))?;
    log::set_max_level(level.into());
    Ok(())
}

impl Logger {
    fn get_epoch_time() -> (i64, i64) {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        ((millis / 1000) as i64, (millis % 1000) as i64)
    }

    #[cfg(unix)]
    fn get_formated_timestamp() -> String {
        use libc::{c_char, localtime_r, strftime, time_t, tm};
        use std::mem::MaybeUninit;

        let (seconds, millis) = Self::get_epoch_time();
        let seconds = seconds as time_t;

        let mut datetime = unsafe { MaybeUninit::<tm>::zeroed().assume_init() };
        unsafe { localtime_r(&seconds, &mut datetime) };

        let mut buf: [u8; 64] = [0; 64];
        let length = unsafe {
            strftime(
                buf.as_mut_ptr() as *mut c_char,
                buf.len(),
                b"%Y-%m-%d %H:%M:%S.\0".as_ptr() as *const c_char,
                &datetime,
            )
        };

        match std::str::from_utf8(&buf[..length]) {
            Ok(s) if length > 0 => format!("{s}{millis:03}"),
            _ => format!("{seconds}.{millis:03}"),
        }
    }

    #[cfg(not(unix))]
    fn get_formated_timestamp() -> String {
        let (seconds, millis) = Self::get_epoch_time();
        format!("{seconds}.{millis:03}")
    }

    fn format(record: &Record) -> String {
        format!(
            "{} {} {}",
            Self::get_formated_timestamp(),
            LogLevel::from(record.level()),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.0 >= LogLevel::from(metadata.level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {}
}
