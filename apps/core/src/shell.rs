//! Seam between the launcher core and the native window shell.
//!
//! The window itself (widgets, layout, animation) is an external
//! collaborator; the core only drives it through this trait.

use crate::logging;
use crate::model::{ActionDescription, ResultEntry};

pub trait LauncherShell {
    /// Clear the query box and results, shrink to the minimal height and
    /// recenter. Always runs before `show`.
    fn reset_session(&mut self);
    fn show(&mut self);
    fn hide(&mut self);
    fn present_results(&mut self, entries: &[ResultEntry]);
    fn present_action(&mut self, action: &ActionDescription);
    fn set_status(&mut self, text: &str);
}

/// Shell used by the headless binary: every UI effect becomes a log line.
#[derive(Debug, Default)]
pub struct LoggingShell;

impl LauncherShell for LoggingShell {
    fn reset_session(&mut self) {
        logging::debug("shell: session reset");
    }

    fn show(&mut self) {
        logging::info("shell: window shown");
    }

    fn hide(&mut self) {
        logging::info("shell: window hidden");
    }

    fn present_results(&mut self, entries: &[ResultEntry]) {
        logging::debug(&format!("shell: {} result(s)", entries.len()));
    }

    fn present_action(&mut self, action: &ActionDescription) {
        logging::debug(&format!("shell: action '{}'", action.title));
    }

    fn set_status(&mut self, text: &str) {
        if !text.is_empty() {
            logging::debug(&format!("shell: status '{text}'"));
        }
    }
}

/// Test shell that records every effect in order.
#[derive(Debug, Default)]
pub struct RecordingShell {
    pub effects: Vec<String>,
}

impl LauncherShell for RecordingShell {
    fn reset_session(&mut self) {
        self.effects.push("reset".to_string());
    }

    fn show(&mut self) {
        self.effects.push("show".to_string());
    }

    fn hide(&mut self) {
        self.effects.push("hide".to_string());
    }

    fn present_results(&mut self, entries: &[ResultEntry]) {
        self.effects.push(format!("results:{}", entries.len()));
    }

    fn present_action(&mut self, action: &ActionDescription) {
        self.effects.push(format!("action:{}", action.kind.as_str()));
    }

    fn set_status(&mut self, text: &str) {
        self.effects.push(format!("status:{text}"));
    }
}
