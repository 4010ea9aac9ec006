use colored::Colorize;
use std::fmt;
use std::sync::RwLock;

use once_cell::sync::Lazy;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// No colours and no icons, for pipes and screen readers.
    pub plain_mode: bool,
    pub quiet_mode: bool,
}

static PREFERENCES: Lazy<RwLock<OutputPreferences>> =
    Lazy::new(|| RwLock::new(OutputPreferences::default()));

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
    if prefs.plain_mode {
        colored::control::set_override(false);
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES.read().map(|guard| *guard).unwrap_or_default()
}

/// Renders a message the way [`print`] would, without writing it.
pub fn styled(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    if prefs.plain_mode {
        return match kind {
            MessageKind::Section => format!("=== {} ===", text.trim()),
            MessageKind::Success => format!("OK: {text}"),
            MessageKind::Warning => format!("WARNING: {text}"),
            MessageKind::Error => format!("ERROR: {text}"),
            MessageKind::Info => text,
        };
    }
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => format!("✔ {text}").green().to_string(),
        MessageKind::Warning => format!("⚠ {text}").yellow().to_string(),
        MessageKind::Error => format!("✖ {text}").red().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    if prefs.quiet_mode && matches!(kind, MessageKind::Info | MessageKind::Section) {
        return;
    }
    let formatted = styled(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        MessageKind::Error => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}
