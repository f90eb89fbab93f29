//! Terminal implementation of confirmation prompts and alerts.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use recipe_box_core::Interaction;

pub struct TerminalInteraction {
    theme: ColorfulTheme,
    /// Answer yes without prompting (`--yes`).
    assume_yes: bool,
}

impl TerminalInteraction {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            assume_yes,
        }
    }
}

impl Interaction for TerminalInteraction {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        // A closed or non-interactive terminal counts as "no".
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}
