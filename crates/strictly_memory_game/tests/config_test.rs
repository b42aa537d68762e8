//! Tests for configuration loading and board construction.

use std::io::Write;
use std::path::PathBuf;
use strictly_memory::{MemoryErrorKind, DEFAULT_DIMENSION};
use strictly_memory_game::AppConfig;

#[test]
fn test_defaults_when_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(*config.dimension(), DEFAULT_DIMENSION);
    assert_eq!(config.alphabet_values().len(), 11);
}

#[test]
fn test_file_values_are_read() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
dimension = 2
alphabet = ["x", "y", "z"]
seed = 17
log_file = "game.log"
"#
    )
    .unwrap();

    let config = AppConfig::load(file.path()).unwrap();

    assert_eq!(*config.dimension(), 2);
    assert_eq!(*config.seed(), Some(17));
    assert_eq!(config.log_file(), &PathBuf::from("game.log"));
    assert_eq!(config.alphabet_values().len(), 3);
}

#[test]
fn test_cli_overrides_win() {
    let config = AppConfig::from_toml_str("dimension = 2\nseed = 1").unwrap();

    let config = config.with_overrides(Some(4), None, None);

    assert_eq!(*config.dimension(), 4);
    assert_eq!(*config.seed(), Some(1));
}

#[test]
fn test_malformed_file_is_an_error() {
    let err = AppConfig::from_toml_str("dimension = \"four\"").unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_seeded_boards_repeat() {
    let config = AppConfig::default().with_overrides(None, Some(5), None);
    assert_eq!(config.build_board().unwrap(), config.build_board().unwrap());
}

#[test]
fn test_invalid_dimension_fails_before_play() {
    let config = AppConfig::default().with_overrides(Some(5), Some(1), None);
    let err = config.build_board().unwrap_err();
    assert_eq!(err.kind, MemoryErrorKind::InvalidDimension { dimension: 5 });
}

#[test]
fn test_small_custom_alphabet_rejected() {
    let config = AppConfig::from_toml_str("dimension = 4\nalphabet = [\"a\", \"b\"]").unwrap();
    let err = config.build_board().unwrap_err();
    assert_eq!(
        err.kind,
        MemoryErrorKind::InsufficientAlphabet {
            needed: 8,
            available: 2
        }
    );
}
