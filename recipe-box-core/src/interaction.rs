//! Blocking prompts raised by views (confirmation before delete, failure alerts).

use std::sync::Mutex;

pub trait Interaction {
    /// Ask a yes/no question. `false` aborts the action.
    fn confirm(&self, message: &str) -> bool;

    /// Show a message the user must acknowledge.
    fn alert(&self, message: &str);
}

/// Scripted answers, recording everything it was asked.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answer: bool,
    confirmations: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl ScriptedInteraction {
    /// Answer every confirmation with yes.
    pub fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    /// Answer every confirmation with no.
    pub fn declining() -> Self {
        Self::default()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Interaction for ScriptedInteraction {
    fn confirm(&self, message: &str) -> bool {
        if let Ok(mut confirmations) = self.confirmations.lock() {
            confirmations.push(message.to_string());
        }
        self.answer
    }

    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}
