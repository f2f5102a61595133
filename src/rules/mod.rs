//! Rename rules for renamer.
//!
//! This module handles:
//! - Rule definition, validation and pattern compilation
//! - Computing a proposed name from a rule
//! - Resolving explicit options against a preset

pub mod options;
pub mod rewriter;
pub mod rule;

pub use options::RuleOptions;
pub use rewriter::compute_new_name;
pub use rule::{CompiledRule, Precedence, RenameRule, compile_pattern};
