//! Interactive prompts
//!
//! Uses dialoguer for terminal input.

use std::io::IsTerminal;

use dialoguer::Input;
use wp_manifest::Prompt;

/// Prompt backed by the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, question: &str, default: Option<&str>) -> wp_manifest::Result<String> {
        let mut input = Input::<String>::new().with_prompt(question);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input
            .interact_text()
            .map_err(|e| wp_manifest::Error::prompt(e.to_string()))
    }
}

/// Whether prompting makes sense for this process.
pub fn is_interactive(no_interaction: bool) -> bool {
    !no_interaction && std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_interaction_flag_wins() {
        assert!(!is_interactive(true));
    }
}
