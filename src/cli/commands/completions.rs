//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::LockinError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, LockinError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "lockin", &mut buf);
    String::from_utf8(buf)
        .map_err(|e| LockinError::InvalidInput(format!("Completion script is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_mention_commands() {
        let script = completions(Shell::Bash).unwrap();
        assert!(script.contains("lockin"));
        assert!(script.contains("toggle"));
    }

    #[test]
    fn test_zsh_completions() {
        assert!(completions(Shell::Zsh).unwrap().contains("#compdef lockin"));
    }
}
