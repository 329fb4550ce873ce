//! Tokenizing the mypy command setting.

use crate::ConfigError;

/// Shell control operators. The command is executed directly, not through a
/// shell, so a word like `|` or `&&` can only be a mistake.
const CONTROL_OPERATORS: &[&str] = &[
    "|", "||", "|&", "&", "&&", ";", ";;", "(", ")", "<", ">", ">>", "<<", "<&", ">&", "&>",
];

/// Split a command string into words using POSIX shell quoting rules.
///
/// ```
/// use mypy_config::parse_command;
///
/// let words = parse_command("'/opt/my env/python' -m mypy").unwrap();
/// assert_eq!(words, ["/opt/my env/python", "-m", "mypy"]);
/// ```
pub fn parse_command(command: &str) -> Result<Vec<String>, ConfigError> {
    let Some(words) = shlex::split(command) else {
        return Err(ConfigError::InvalidCommand {
            command: command.to_string(),
            reason: "unbalanced quotes or trailing escape",
        });
    };

    if words.iter().any(|w| CONTROL_OPERATORS.contains(&w.as_str())) {
        return Err(ConfigError::InvalidCommand {
            command: command.to_string(),
            reason: "shell operators are not supported",
        });
    }

    if words.is_empty() {
        return Err(ConfigError::EmptyCommand);
    }

    Ok(words)
}

#[cfg(test)]
mod tests;
