use crate::error::{RenamerError, Result};
use crate::rules::rewriter::brace_group_numbers;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a regex pattern combines with the prefix/postfix flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
	/// Prefix/postfix wrap the original name and the regex result is discarded.
	///
	/// Setting a pattern together with either flag silently ignores the
	/// pattern. Kept as the default for compatibility.
	#[default]
	AffixOverrides,

	/// The regex result (or the original name when no pattern is set) is
	/// wrapped by the prefix/postfix text.
	Chain,

	/// A pattern combined with either flag is rejected when compiling.
	Exclusive,
}

impl Precedence {
	/// Get the kebab-case name used in config files and on the command line.
	pub fn as_str(&self) -> &'static str {
		match self {
			Precedence::AffixOverrides => "affix-overrides",
			Precedence::Chain => "chain",
			Precedence::Exclusive => "exclusive",
		}
	}
}

impl fmt::Display for Precedence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Precedence {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"affix-overrides" => Ok(Precedence::AffixOverrides),
			"chain" => Ok(Precedence::Chain),
			"exclusive" => Ok(Precedence::Exclusive),
			other => Err(format!(
				"unknown precedence '{}' (expected affix-overrides, chain or exclusive)",
				other
			)),
		}
	}
}

/// A rename rule: pattern, replacement text and the prefix/postfix flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameRule {
	/// Regex pattern to replace within each name. Empty or absent means
	/// "no regex replacement".
	pub pattern: Option<String>,

	/// Regex replacement template, full replacement name, or prefix/postfix text.
	pub replacement: String,

	/// Prepend `replacement` to the original name.
	pub prefix: bool,

	/// Append `replacement` to the original name.
	pub postfix: bool,

	pub precedence: Precedence,
}

impl RenameRule {
	/// A rule that replaces every name with `replacement`.
	pub fn literal(replacement: impl Into<String>) -> Self {
		RenameRule {
			replacement: replacement.into(),
			..Default::default()
		}
	}

	/// A rule that replaces matches of `pattern` with `replacement`.
	pub fn regex(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
		RenameRule {
			pattern: Some(pattern.into()),
			replacement: replacement.into(),
			..Default::default()
		}
	}

	/// The pattern, if one is set and non-empty.
	pub fn active_pattern(&self) -> Option<&str> {
		self.pattern.as_deref().filter(|p| !p.is_empty())
	}

	/// Whether either the prefix or postfix flag is set.
	pub fn has_affix(&self) -> bool {
		self.prefix || self.postfix
	}

	/// Check that the flags are allowed under the rule's precedence.
	pub fn validate(&self) -> Result<()> {
		if self.precedence == Precedence::Exclusive
			&& self.active_pattern().is_some()
			&& self.has_affix()
		{
			let flag = if self.prefix { "prefix" } else { "postfix" };
			return Err(RenamerError::MutuallyExclusive {
				option1: "pattern".to_string(),
				option2: flag.to_string(),
			});
		}
		Ok(())
	}

	/// Validate the rule and compile its pattern.
	pub fn compile(&self) -> Result<CompiledRule> {
		self.validate()?;

		let pattern = self.active_pattern().map(compile_pattern).transpose()?;

		Ok(CompiledRule {
			template: brace_group_numbers(&self.replacement),
			rule: self.clone(),
			pattern,
		})
	}
}

/// A rule with its pattern compiled, ready to be applied to many names.
#[derive(Debug, Clone)]
pub struct CompiledRule {
	/// The original rule.
	pub rule: RenameRule,

	/// Compiled pattern regex.
	pub pattern: Option<Regex>,

	/// The replacement as handed to [`Regex::replace_all`].
	pub template: String,
}

/// Compile a regex pattern string.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| RenamerError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_compile_valid_pattern() {
		let compiled = RenameRule::regex("Enemy_(\\d+)", "Boss_$1").compile().unwrap();
		assert!(compiled.pattern.is_some());
	}

	#[test]
	fn test_compile_invalid_pattern() {
		let result = RenameRule::regex("(", "x").compile();
		match result.unwrap_err() {
			RenamerError::InvalidPattern { pattern, .. } => {
				assert_eq!(pattern, "(");
			}
			other => panic!("Expected InvalidPattern error, got {other:?}"),
		}
	}

	#[test]
	fn test_empty_pattern_is_no_pattern() {
		let rule = RenameRule::regex("", "x");
		assert!(rule.active_pattern().is_none());
		assert!(rule.compile().unwrap().pattern.is_none());
	}

	#[test]
	fn test_exclusive_rejects_pattern_with_affix() {
		let rule = RenameRule {
			pattern: Some("Enemy".to_string()),
			replacement: "Boss".to_string(),
			postfix: true,
			precedence: Precedence::Exclusive,
			..Default::default()
		};
		match rule.compile().unwrap_err() {
			RenamerError::MutuallyExclusive { option1, option2 } => {
				assert_eq!(option1, "pattern");
				assert_eq!(option2, "postfix");
			}
			other => panic!("Expected MutuallyExclusive error, got {other:?}"),
		}
	}

	#[test]
	fn test_exclusive_allows_affix_without_pattern() {
		let rule = RenameRule {
			replacement: "Boss".to_string(),
			prefix: true,
			precedence: Precedence::Exclusive,
			..Default::default()
		};
		assert!(rule.compile().is_ok());
	}

	#[test]
	fn test_precedence_from_str() {
		assert_eq!("chain".parse::<Precedence>(), Ok(Precedence::Chain));
		assert_eq!(
			"affix-overrides".parse::<Precedence>(),
			Ok(Precedence::AffixOverrides)
		);
		assert!("sideways".parse::<Precedence>().is_err());
		assert_eq!(Precedence::Exclusive.to_string(), "exclusive");
	}
}
