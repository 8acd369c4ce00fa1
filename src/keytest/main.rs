use kbhit::logger::{self, LogLevel};
use kbhit::{KeyReader, SpecialKey};

use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() {
    if let Err(e) = logger::init(LogLevel::Info) {
        kbhit::exit_with_error(e);
    }

    let mut kb = match KeyReader::new() {
        Ok(kb) => kb,
        Err(e) => kbhit::exit_with_error(e),
    };

    println!("Hit any key, or ctrl-c to exit");

    loop {
        let ch = match kb.getch() {
            Ok(Some(ch)) => ch,
            Ok(None) => {
                thread::sleep(POLL_INTERVAL);
                continue;
            }
            Err(e) => {
                log::error!("{e}");
                break;
            }
        };

        println!("{ch:?}");
        if kb.detect_special_key() == Some(SpecialKey::CtrlC) {
            break;
        }
    }

    if let Err(e) = kb.restore() {
        kbhit::exit_with_error(e);
    }
}
