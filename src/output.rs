//! Colored terminal output for the CLI
//!
//! Uses owo-colors for terminal colors.

use owo_colors::OwoColorize;

/// Print an action header (blue, bold)
/// Example: "==> Compiling com.example.Hello"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a detail line (dimmed)
/// Example: "     script /out/ggl.hello.script.run"
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a success message (green)
/// Example: "==> ggl.hello.service written"
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Print a skip message (dimmed)
/// Example: "==> hello skipped: no run phase"
pub fn skip(message: &str) {
    println!("{} {}", "==>".dimmed(), message.dimmed());
}
