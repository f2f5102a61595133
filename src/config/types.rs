use crate::error::{RenamerError, Result};
use crate::rules::{Precedence, RenameRule};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Top-level configuration from a `.renamer.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop directory cascade and jump directly to ~/.renamer.toml.
	#[serde(default)]
	pub root: bool,

	/// Named rename rules.
	#[serde(default)]
	pub presets: Vec<Preset>,
}

/// A named rename rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Preset {
	/// Name used with `--preset`.
	pub name: String,

	/// Regex pattern to replace within each name.
	pub pattern: Option<String>,

	/// Replacement template, full name, or prefix/postfix text.
	pub replacement: Option<String>,

	#[serde(default)]
	pub prefix: bool,

	#[serde(default)]
	pub postfix: bool,

	/// How the pattern combines with prefix/postfix. Defaults to affix-overrides.
	pub precedence: Option<Precedence>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// All presets from all configs, in cascade order (first match wins).
	pub presets: Vec<PresetWithSource>,
}

/// A preset with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct PresetWithSource {
	/// The preset itself.
	pub preset: Preset,

	/// The config file this preset came from.
	pub source: PathBuf,
}

impl Preset {
	/// The rule this preset describes on its own.
	pub fn to_rule(&self) -> RenameRule {
		RenameRule {
			pattern: self.pattern.clone(),
			replacement: self.replacement.clone().unwrap_or_default(),
			prefix: self.prefix,
			postfix: self.postfix,
			precedence: self.precedence.unwrap_or_default(),
		}
	}

	/// Check that the preset's pattern compiles under its precedence.
	pub fn validate(&self) -> Result<()> {
		self.to_rule().compile().map(|_| ())
	}
}

impl Config {
	/// Validate all presets in this config.
	pub fn validate(&self, path: &Path) -> Result<()> {
		let mut seen = HashSet::new();
		for preset in &self.presets {
			if !seen.insert(preset.name.as_str()) {
				return Err(RenamerError::DuplicatePreset {
					name: preset.name.clone(),
					path: path.to_path_buf(),
				});
			}
			preset.validate()?;
		}
		Ok(())
	}
}

impl MergedConfig {
	/// Find the first preset named `name` in cascade order.
	pub fn find_preset(&self, name: &str) -> Option<&PresetWithSource> {
		self.presets.iter().find(|p| p.preset.name == name)
	}
}
