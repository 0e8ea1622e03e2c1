use dialoguer::console::Term;
use dialoguer::{Input, Password};

use crate::error::Result;

/// Reads login secrets from the controlling terminal. Prompts go to stdout.
pub struct Prompter {
    term: Term,
}

impl Prompter {
    pub fn stdout() -> Self {
        Self { term: Term::stdout() }
    }

    pub fn password(&self, hint: Option<&str>) -> Result<String> {
        if let Some(hint) = hint.filter(|hint| !hint.trim().is_empty()) {
            self.term.write_line(&format!("Password hint: {hint}"))?;
        }
        let password = Password::new()
            .with_prompt("Enter 2FA password")
            .allow_empty_password(true)
            .interact_on(&self.term)?;
        Ok(normalize(&password))
    }

    pub fn code(&self) -> Result<String> {
        let code: String = Input::new()
            .with_prompt("Enter code")
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(normalize(&code))
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_string()
}
