use crate::error::Result;
use crate::rules::rule::{CompiledRule, Precedence, RenameRule};
use std::borrow::Cow;

impl CompiledRule {
	/// Compute the proposed name for `original`.
	///
	/// Resolution order:
	/// 1. Start from the replacement text.
	/// 2. With a pattern, replace every match in `original` (`$1` / `${name}`
	///    back-references are expanded, and `$1_Low` means group 1 then `_Low`).
	/// 3. With a prefix or postfix flag, wrap the stem in the replacement text.
	///    Under [`Precedence::AffixOverrides`] the stem is always `original`,
	///    so step 2's result is thrown away.
	pub fn apply(&self, original: &str) -> String {
		let rule = &self.rule;

		if !rule.has_affix() {
			return match self.pattern {
				Some(ref regex) => regex
					.replace_all(original, self.template.as_str())
					.into_owned(),
				None => rule.replacement.clone(),
			};
		}

		let stem: Cow<'_, str> = match (rule.precedence, &self.pattern) {
			(Precedence::Chain, Some(regex)) => {
				regex.replace_all(original, self.template.as_str())
			}
			_ => Cow::Borrowed(original),
		};

		let prefix = if rule.prefix { rule.replacement.as_str() } else { "" };
		let postfix = if rule.postfix { rule.replacement.as_str() } else { "" };

		format!("{prefix}{stem}{postfix}")
	}
}

/// Wrap numbered group references in braces where the next character would
/// otherwise extend the group name, so `$1_Low` expands group 1 followed by
/// `_Low` instead of the (missing) group `1_Low`. `$$` is left as an escape.
pub(crate) fn brace_group_numbers(template: &str) -> String {
	let mut out = String::with_capacity(template.len());
	let mut chars = template.chars().peekable();

	while let Some(c) = chars.next() {
		out.push(c);
		if c != '$' {
			continue;
		}
		if chars.next_if_eq(&'$').is_some() {
			out.push('$');
			continue;
		}

		let mut digits = String::new();
		while let Some(d) = chars.next_if(char::is_ascii_digit) {
			digits.push(d);
		}
		if digits.is_empty() {
			continue;
		}

		let extends_name = chars.peek().is_some_and(|&n| n == '_' || n.is_alphabetic());
		if extends_name {
			out.push('{');
			out.push_str(&digits);
			out.push('}');
		} else {
			out.push_str(&digits);
		}
	}

	out
}

/// Compute the new name for a single entity.
///
/// Compiles the rule on every call; use [`RenameRule::compile`] and
/// [`CompiledRule::apply`] when renaming many names.
pub fn compute_new_name(original: &str, rule: &RenameRule) -> Result<String> {
	Ok(rule.compile()?.apply(original))
}
