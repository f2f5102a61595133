use crate::config::types::Config;
use crate::error::{RenamerError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| RenamerError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| RenamerError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate(path)?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::Precedence;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("", &path).unwrap();

		assert!(!config.root);
		assert!(config.presets.is_empty());
	}

	#[test]
	fn test_parse_basic_config() {
		let content = r#"
root = true
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.root);
		assert!(config.presets.is_empty());
	}

	#[test]
	fn test_parse_presets_array_of_tables() {
		let content = r#"
[[presets]]
name = "boss"
pattern = "Enemy"
replacement = "Boss"

[[presets]]
name = "lod"
replacement = "_LOD0"
postfix = true
precedence = "chain"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.presets.len(), 2);

		let boss = &config.presets[0];
		assert_eq!(boss.name, "boss");
		assert_eq!(boss.pattern, Some("Enemy".to_string()));
		assert_eq!(boss.replacement, Some("Boss".to_string()));
		assert!(!boss.prefix);
		assert!(!boss.postfix);
		assert_eq!(boss.precedence, None);

		let lod = &config.presets[1];
		assert!(lod.postfix);
		assert_eq!(lod.precedence, Some(Precedence::Chain));
		assert_eq!(lod.to_rule().precedence, Precedence::Chain);
	}

	#[test]
	fn test_parse_presets_inline_tables() {
		let content = r#"
presets = [
    { name = "old", replacement = "Old_", prefix = true },
    { name = "boss", pattern = "Enemy", replacement = "Boss" },
]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.presets.len(), 2);
		assert!(config.presets[0].prefix);
	}

	#[test]
	fn test_duplicate_preset_names() {
		let content = r#"
[[presets]]
name = "boss"
replacement = "Boss"

[[presets]]
name = "boss"
replacement = "BigBoss"
"#;
		let path = PathBuf::from("test.toml");
		match parse_config_str(content, &path).unwrap_err() {
			RenamerError::DuplicatePreset { name, path } => {
				assert_eq!(name, "boss");
				assert_eq!(path, PathBuf::from("test.toml"));
			}
			other => panic!("Expected DuplicatePreset error, got {other:?}"),
		}
	}

	#[test]
	fn test_invalid_preset_pattern() {
		let content = r#"
[[presets]]
name = "broken"
pattern = "[unclosed"
replacement = "x"
"#;
		let path = PathBuf::from("test.toml");
		match parse_config_str(content, &path).unwrap_err() {
			RenamerError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[unclosed"),
			other => panic!("Expected InvalidPattern error, got {other:?}"),
		}
	}

	#[test]
	fn test_exclusive_preset_with_pattern_and_prefix() {
		let content = r#"
[[presets]]
name = "strict"
pattern = "Enemy"
replacement = "Boss"
prefix = true
precedence = "exclusive"
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		match result.unwrap_err() {
			RenamerError::MutuallyExclusive { option1, option2 } => {
				assert_eq!(option1, "pattern");
				assert_eq!(option2, "prefix");
			}
			other => panic!("Expected MutuallyExclusive error, got {other:?}"),
		}
	}

	#[test]
	fn test_unknown_precedence_is_parse_error() {
		let content = r#"
[[presets]]
name = "odd"
replacement = "x"
precedence = "sideways"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_config_str(content, &path),
			Err(RenamerError::ConfigParseError { .. })
		));
	}
}
