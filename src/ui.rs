//! Terminal output: spinner and status lines.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const SHOW_CURSOR: &str = "\x1b[?25h";

/// A flag that reports `true` exactly once.
pub struct OnceFlag(AtomicBool);

impl OnceFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn first(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }
}

impl Default for OnceFlag {
    fn default() -> Self {
        Self::new()
    }
}

static CANCEL_OUTRO: OnceFlag = OnceFlag::new();

/// Spinner shown while waiting on the model. Cleared when dropped.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(&["◐", "◓", "◑", "◒", "●"])
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

pub fn print_staged_files(files: &[String]) {
    let noun = if files.len() == 1 { "file" } else { "files" };
    println!("Detected {} staged {}:", files.len(), noun);
    for file in files {
        println!("     {file}");
    }
}

pub fn print_success(message: &str) {
    println!("{GREEN}✔{RESET} {message}");
}

/// Cancellation outro. Printed at most once per process, since the prompt
/// path and the interrupt handler can both reach it.
pub fn print_cancelled() {
    if CANCEL_OUTRO.first() {
        println!("{DIM}Commit cancelled{RESET}");
    }
}

/// Make the cursor visible again after a menu was interrupted.
pub fn restore_cursor() {
    let mut stderr = std::io::stderr();
    let _ = stderr.write_all(SHOW_CURSOR.as_bytes());
    let _ = stderr.flush();
}

/// Fatal error line on stderr. Multi-line messages keep their layout.
pub fn print_error(message: &str) {
    eprintln!("{RED}✖{RESET} {message}");
}
