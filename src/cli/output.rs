use std::fmt;
use std::io::{self, Write};

use colored::Colorize;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Section,
    Separator,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Separator => String::from("----------------------------------------"),
        MessageKind::Warning => format!("WARNING: [!] {text}").bright_yellow().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(out: &mut dyn Write, kind: MessageKind, message: impl fmt::Display) -> io::Result<()> {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section | MessageKind::Separator => writeln!(out, "\n{formatted}"),
        _ => writeln!(out, "{formatted}"),
    }
}

pub fn section(out: &mut dyn Write, title: impl fmt::Display) -> io::Result<()> {
    print(out, MessageKind::Section, title)
}

pub fn warning(out: &mut dyn Write, message: impl fmt::Display) -> io::Result<()> {
    print(out, MessageKind::Warning, message)
}

pub fn separator(out: &mut dyn Write) -> io::Result<()> {
    print(out, MessageKind::Separator, "")
}

/// Writes an aligned `label: value` row.
pub fn field(out: &mut dyn Write, label: &str, value: impl fmt::Display) -> io::Result<()> {
    print(out, MessageKind::Info, format!("{label:<24} {value}"))
}

/// Two decimals, green when positive and red when negative.
pub fn amount(value: f64) -> String {
    let text = format!("{value:.2}");
    if value > 0.0 {
        text.green().to_string()
    } else if value < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}
