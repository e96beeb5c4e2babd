//! ANSI color helpers for the terminal surface.

use std::io::Write;

pub const RESET: &str = "\x1b[0m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn print_cyan(text: &str) {
    println!("{}{}{}", CYAN, text, RESET);
}

pub fn print_yellow(text: &str) {
    println!("{}{}{}", YELLOW, text, RESET);
}

/// Prompt-style output: no trailing newline, flushed immediately.
pub fn print_yellow_no_newline(text: &str) {
    print!("{}{}{}", YELLOW, text, RESET);
    let _ = std::io::stdout().flush();
}

pub fn print_green(text: &str) {
    println!("{}{}{}", GREEN, text, RESET);
}

pub fn print_red(text: &str) {
    eprintln!("{}{}{}", RED, text, RESET);
}
