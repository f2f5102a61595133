/// Template written by `renamer --init`.
pub fn generate_init_template() -> &'static str {
	r#"# renamer configuration
#
# Files named .renamer.toml are read from the current directory upwards,
# then from ~/.renamer.toml. Presets found first win.

# Stop looking in parent directories after this file.
root = true

# Replace a regex pattern. $1 / ${name} refer to capture groups.
[[presets]]
name = "boss"
pattern = "Enemy_(\\d+)"
replacement = "Boss_$1"

# Use the replacement as a prefix and/or postfix instead of a full name.
# With precedence = "affix-overrides" (the default) a pattern is ignored
# whenever prefix or postfix is set. "chain" wraps the pattern's result,
# "exclusive" rejects presets that set both.
[[presets]]
name = "lod0"
replacement = "_LOD0"
postfix = true
"#
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parse_config_str;
	use std::path::Path;

	#[test]
	fn test_template_is_valid_config() {
		let config = parse_config_str(generate_init_template(), Path::new(".renamer.toml")).unwrap();
		assert!(config.root);
		assert_eq!(config.presets.len(), 2);
		assert_eq!(config.presets[0].to_rule().pattern.as_deref(), Some(r"Enemy_(\d+)"));
	}
}
