//! Shared CLI output helpers for consistent terminal text.

use std::fmt::Display;

const RULE_WIDTH: usize = 64;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("  {label:<18} {value}");
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("✓ {message}");
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("⚠ {message}");
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("✗ {message}");
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("  {message}");
}

/// Print a rendered table indented under the current section.
pub fn table(rendered: &str) {
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Format a fraction as a percentage, e.g. `0.0412` as `4.12%`.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format an optional value, `-` when absent.
#[must_use]
pub fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_two_places() {
        assert_eq!(percent(0.04123), "4.12%");
        assert_eq!(percent(-0.5), "-50.00%");
    }

    #[test]
    fn or_dash_fills_missing() {
        assert_eq!(or_dash(Some(3)), "3");
        assert_eq!(or_dash::<i32>(None), "-");
    }
}
