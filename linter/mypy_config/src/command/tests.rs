#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_default_command() {
    assert_eq!(
        parse_command("python3 -m mypy").unwrap(),
        ["python3", "-m", "mypy"]
    );
}

#[test]
fn test_quoted_words() {
    assert_eq!(
        parse_command(r#"env "A=b c" mypy --config-file='x y.ini'"#).unwrap(),
        ["env", "A=b c", "mypy", "--config-file=x y.ini"]
    );
}

#[test]
fn test_empty_command() {
    assert!(matches!(parse_command(""), Err(ConfigError::EmptyCommand)));
    assert!(matches!(parse_command("   \t "), Err(ConfigError::EmptyCommand)));
}

#[test]
fn test_unbalanced_quote() {
    let err = parse_command("python3 -m 'mypy").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCommand { .. }));
    assert!(err.is_user_facing());
}

#[test]
fn test_shell_operators_rejected() {
    for command in ["mypy | cat", "cd src && mypy", "mypy > out.txt", "mypy ; true"] {
        assert!(
            matches!(parse_command(command), Err(ConfigError::InvalidCommand { .. })),
            "{command}"
        );
    }
}

proptest! {
    #[test]
    fn prop_plain_words_always_parse(words in prop::collection::vec("[A-Za-z0-9_./=-]{1,12}", 1..6)) {
        let parsed = parse_command(&words.join(" ")).unwrap();
        prop_assert_eq!(parsed, words);
    }

    #[test]
    fn prop_quoted_words_round_trip(words in prop::collection::vec("[a-z ]{0,8}[a-z]", 1..4)) {
        let quoted: Vec<String> = words
            .iter()
            .map(|w| shlex::try_quote(w).unwrap().into_owned())
            .collect();
        let parsed = parse_command(&quoted.join(" ")).unwrap();
        prop_assert_eq!(parsed, words);
    }
}
