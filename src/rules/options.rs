use crate::config::Preset;
use crate::error::{RenamerError, Result};
use crate::rules::rule::{Precedence, RenameRule};

/// Rule settings given explicitly (e.g. on the command line).
///
/// Unset fields fall back to a preset, and the replacement finally falls back
/// to a suggested name such as the first selected entity's.
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
	pub pattern: Option<String>,
	pub replacement: Option<String>,
	pub prefix: bool,
	pub postfix: bool,
	pub precedence: Option<Precedence>,
}

impl RuleOptions {
	/// Build the effective rule.
	///
	/// Flags are OR-ed with the preset's; every other explicit field replaces
	/// the preset's value.
	pub fn resolve(
		self,
		preset: Option<&Preset>,
		suggested_replacement: Option<&str>,
	) -> Result<RenameRule> {
		let base = preset.map(RuleOptions::from).unwrap_or_default();

		let replacement = self
			.replacement
			.or(base.replacement)
			.or_else(|| suggested_replacement.map(str::to_string))
			.ok_or(RenamerError::MissingReplacement)?;

		Ok(RenameRule {
			pattern: self.pattern.or(base.pattern),
			replacement,
			prefix: self.prefix || base.prefix,
			postfix: self.postfix || base.postfix,
			precedence: self.precedence.or(base.precedence).unwrap_or_default(),
		})
	}
}

impl From<&Preset> for RuleOptions {
	fn from(preset: &Preset) -> Self {
		RuleOptions {
			pattern: preset.pattern.clone(),
			replacement: preset.replacement.clone(),
			prefix: preset.prefix,
			postfix: preset.postfix,
			precedence: preset.precedence,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn boss_preset() -> Preset {
		Preset {
			name: "boss".to_string(),
			pattern: Some("Enemy".to_string()),
			replacement: Some("Boss".to_string()),
			..Default::default()
		}
	}

	#[test]
	fn test_resolve_without_preset() {
		let options = RuleOptions {
			pattern: Some("a".to_string()),
			replacement: Some("b".to_string()),
			postfix: true,
			..Default::default()
		};
		let rule = options.resolve(None, None).unwrap();
		assert_eq!(rule.pattern.as_deref(), Some("a"));
		assert_eq!(rule.replacement, "b");
		assert!(rule.postfix);
		assert_eq!(rule.precedence, Precedence::AffixOverrides);
	}

	#[test]
	fn test_resolve_explicit_overrides_preset() {
		let options = RuleOptions {
			replacement: Some("Villain".to_string()),
			prefix: true,
			..Default::default()
		};
		let rule = options.resolve(Some(&boss_preset()), Some("Cube")).unwrap();
		assert_eq!(rule.pattern.as_deref(), Some("Enemy"));
		assert_eq!(rule.replacement, "Villain");
		assert!(rule.prefix);
		assert!(!rule.postfix);
	}

	#[test]
	fn test_resolve_uses_preset_replacement_before_suggestion() {
		let rule = RuleOptions::default()
			.resolve(Some(&boss_preset()), Some("Cube"))
			.unwrap();
		assert_eq!(rule.replacement, "Boss");
	}

	#[test]
	fn test_resolve_falls_back_to_suggestion() {
		let rule = RuleOptions::default().resolve(None, Some("Cube")).unwrap();
		assert_eq!(rule, RenameRule::literal("Cube"));
	}

	#[test]
	fn test_resolve_missing_replacement() {
		assert!(matches!(
			RuleOptions::default().resolve(None, None),
			Err(RenamerError::MissingReplacement)
		));
	}
}
