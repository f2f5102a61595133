//! Batch preview and commit for renamer.
//!
//! This module handles:
//! - Previewing a rule against an ordered batch of entities
//! - Committing a batch through a [`RenameHost`] with confirmation, a single
//!   undo boundary and best-effort per-entity failure collection

use crate::error::{RenameError, RenamerError, Result};
use crate::host::RenameHost;
use crate::rules::{CompiledRule, RenameRule};
use serde::Serialize;

/// Undo description used for a committed batch.
pub const UNDO_DESCRIPTION: &str = "Rename";

/// An entity handle together with its current name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntity<E> {
	pub handle: E,
	pub name: String,
}

/// One row of a preview: the current name and the name the rule proposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePreviewEntry {
	pub original_name: String,
	pub proposed_name: String,
}

impl RenamePreviewEntry {
	/// Whether the rule leaves this name as it is.
	pub fn is_unchanged(&self) -> bool {
		self.original_name == self.proposed_name
	}
}

/// An entity that was renamed by a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedEntity<E> {
	pub handle: E,
	pub old_name: String,
	pub new_name: String,
}

/// An entity the host refused to rename.
#[derive(Debug)]
pub struct RenameFailure<E> {
	pub handle: E,
	pub old_name: String,
	pub attempted_name: String,
	pub error: RenameError,
}

/// What a commit did, in batch order.
#[derive(Debug)]
pub struct CommitResult<E> {
	pub renamed: Vec<RenamedEntity<E>>,
	pub failures: Vec<RenameFailure<E>>,
}

impl<E> CommitResult<E> {
	fn new() -> Self {
		CommitResult {
			renamed: Vec::new(),
			failures: Vec::new(),
		}
	}

	/// True when every entity in the batch was renamed.
	pub fn is_complete(&self) -> bool {
		self.failures.is_empty()
	}
}

/// Outcome of [`commit_batch`].
#[derive(Debug)]
pub enum CommitOutcome<E> {
	/// The host's confirmation returned false; nothing was written.
	Declined,

	Applied(CommitResult<E>),
}

/// Text shown by the host before a commit.
pub fn confirmation_message(count: usize) -> String {
	format!("Are you sure you want to rename these {count} objects?")
}

/// The replacement text to pre-fill: the name of the first entity.
pub fn suggest_replacement<E>(entities: &[NamedEntity<E>]) -> Option<&str> {
	entities.first().map(|entity| entity.name.as_str())
}

/// Preview `rule` against a batch, in input order.
///
/// Fails for the whole batch if the rule does not compile.
pub fn compute_batch<E>(
	entities: &[NamedEntity<E>],
	rule: &RenameRule,
) -> Result<Vec<RenamePreviewEntry>> {
	let compiled = rule.compile()?;
	Ok(preview_compiled(&compiled, entities))
}

fn preview_compiled<E>(
	compiled: &CompiledRule,
	entities: &[NamedEntity<E>],
) -> Vec<RenamePreviewEntry> {
	entities
		.iter()
		.map(|entity| RenamePreviewEntry {
			original_name: entity.name.clone(),
			proposed_name: compiled.apply(&entity.name),
		})
		.collect()
}

/// Rename a batch through `host`.
///
/// The rule is resolved for the whole batch before anything is written, so an
/// invalid pattern leaves every entity untouched. Host refusals for single
/// entities are collected and the rest of the batch still proceeds.
pub fn commit_batch<H: RenameHost>(
	host: &mut H,
	entities: &[NamedEntity<H::Entity>],
	rule: &RenameRule,
) -> Result<CommitOutcome<H::Entity>> {
	if entities.is_empty() {
		return Err(RenamerError::EmptySelection);
	}

	let preview = compute_batch(entities, rule)?;

	if !host.confirm(&confirmation_message(entities.len())) {
		tracing::info!(count = entities.len(), "rename declined");
		return Ok(CommitOutcome::Declined);
	}

	let mut result = CommitResult::new();
	{
		let mut tx = host.begin_transaction(UNDO_DESCRIPTION);

		for (entity, entry) in entities.iter().zip(preview) {
			match tx.set_name(&entity.handle, &entry.proposed_name) {
				Ok(()) => {
					tx.notify_entity_changed(&entity.handle);
					result.renamed.push(RenamedEntity {
						handle: entity.handle.clone(),
						old_name: entry.original_name,
						new_name: entry.proposed_name,
					});
				}
				Err(error) => {
					tracing::debug!(
						entity = ?entity.handle,
						name = %entry.proposed_name,
						%error,
						"rename refused"
					);
					result.failures.push(RenameFailure {
						handle: entity.handle.clone(),
						old_name: entry.original_name,
						attempted_name: entry.proposed_name,
						error,
					});
				}
			}
		}
	}

	if result.is_complete() {
		tracing::info!(renamed = result.renamed.len(), "rename batch committed");
	} else {
		tracing::warn!(
			renamed = result.renamed.len(),
			failed = result.failures.len(),
			"rename batch committed with failures"
		);
	}

	Ok(CommitOutcome::Applied(result))
}

/// Commit `rule` against the host's current selection.
pub fn commit_selection<H: RenameHost>(
	host: &mut H,
	rule: &RenameRule,
) -> Result<CommitOutcome<H::Entity>> {
	let entities = host.list_selected_entities();
	commit_batch(host, &entities, rule)
}
