//! Console presentation layer
//!
//! Every user-facing line goes through the [`Reporter`] trait so the
//! acquisition engine and the asset synchronizer never print directly. The
//! terminal implementation prefixes each line with [`PREFIX`] and colors it
//! by severity; tests use [`RecordingReporter`] to assert on what was said.

use console::Style;
use std::fmt::Display;

/// Prefix of every console line
pub const PREFIX: &str = "> [civicrm-ext]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Sub-step of the previous message (e.g. a patch being applied)
    Step,
    /// Only shown with --verbose
    Detail,
}

/// Sink for user-facing progress messages
pub trait Reporter {
    fn report(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }

    fn step(&self, label: &str, value: &dyn Display) {
        self.report(Severity::Step, &format!("{label}: {value}"));
    }

    fn detail(&self, message: &str) {
        self.report(Severity::Detail, message);
    }
}

/// Terminal reporter: info and warnings on stdout, errors on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => println!("{PREFIX} {}", Style::new().green().apply_to(message)),
            Severity::Warning => {
                println!("{PREFIX} {}", Style::new().yellow().apply_to(message));
            }
            Severity::Error => {
                eprintln!("{PREFIX} {}", Style::new().red().bold().apply_to(message));
            }
            Severity::Step => println!("{PREFIX} \t|-> {}", Style::new().cyan().apply_to(message)),
            Severity::Detail if self.verbose => {
                println!("{PREFIX} {}", Style::new().dim().apply_to(message));
            }
            Severity::Detail => {}
        }
    }
}

/// Reporter that keeps every message in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: std::cell::RefCell<Vec<(Severity, String)>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.messages(severity).iter().any(|m| m.contains(needle))
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn report(&self, severity: Severity, message: &str) {
        self.messages
            .borrow_mut()
            .push((severity, message.to_string()));
    }
}
