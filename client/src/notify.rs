//! Blocking user notifications.

use std::io::{
    BufRead,
    Write,
};

use anyhow::Context;
use colored::Colorize;

use crate::{
    logs::log_failure,
    print_kv,
    LogColor,
};

pub trait Notifier {
    /// Shows `message` and returns once the user has acknowledged it.
    fn alert(&self, message: &str);
}

/// Prints the message to stderr and waits for Enter on stdin.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", format!("! {message}").color(LogColor::Warning).bold());
        eprint!("{}", "(press Enter)".color(LogColor::FadedGray));
        if let Err(e) = std::io::stderr().flush() {
            log_failure("Couldn't flush stderr", &e.into());
        }

        match read_acknowledgement(std::io::stdin().lock()) {
            Ok(true) => {}
            Ok(false) => print_kv!("Alert", "stdin closed, not waiting", LogColor::Warning),
            Err(e) => log_failure("Alert", &e),
        }
    }
}

/// Consumes one line of `input`. `Ok(false)` means the input is already closed.
fn read_acknowledgement(mut input: impl BufRead) -> anyhow::Result<bool> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Couldn't read acknowledgement")?;
    Ok(read > 0)
}
