use crate::error::RenameError;
use crate::host::RenameHost;
use std::collections::HashSet;

/// One undo boundary recorded by [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
	pub description: String,

	/// `(entity, old name, new name)` for every rename inside the boundary.
	pub changes: Vec<(usize, String, String)>,

	pub closed: bool,
}

/// In-memory host: entities are indices into an ordered list of names.
///
/// Records every undo boundary, change notification and confirmation
/// prompt, and can be told to refuse particular renames.
#[derive(Debug, Clone)]
pub struct MemoryHost {
	names: Vec<String>,
	selection: Vec<usize>,
	destroyed: HashSet<usize>,
	rejected_names: HashSet<String>,
	unique_names: bool,
	confirm_answer: bool,
	undo_groups: Vec<UndoRecord>,
	notified: Vec<usize>,
	prompts: Vec<String>,
}

impl MemoryHost {
	/// Create a host holding `names`, all selected in order.
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let names: Vec<String> = names.into_iter().map(Into::into).collect();
		let selection = (0..names.len()).collect();
		MemoryHost {
			names,
			selection,
			destroyed: HashSet::new(),
			rejected_names: HashSet::new(),
			unique_names: false,
			confirm_answer: true,
			undo_groups: Vec::new(),
			notified: Vec::new(),
			prompts: Vec::new(),
		}
	}

	/// Refuse renames that would give two entities the same name.
	pub fn with_unique_names(mut self) -> Self {
		self.unique_names = true;
		self
	}

	/// Answer every confirmation prompt with `answer`.
	pub fn with_confirm_answer(mut self, answer: bool) -> Self {
		self.confirm_answer = answer;
		self
	}

	/// Refuse any rename to `name`.
	pub fn reject_name(&mut self, name: impl Into<String>) {
		self.rejected_names.insert(name.into());
	}

	/// Replace the selection.
	pub fn select(&mut self, entities: impl IntoIterator<Item = usize>) {
		self.selection = entities.into_iter().collect();
	}

	/// Destroy an entity; later renames of it fail with `EntityMissing`.
	pub fn destroy(&mut self, entity: usize) {
		self.destroyed.insert(entity);
	}

	pub fn names(&self) -> &[String] {
		&self.names
	}

	pub fn undo_groups(&self) -> &[UndoRecord] {
		&self.undo_groups
	}

	/// Entities passed to `notify_entity_changed`, in call order.
	pub fn notified(&self) -> &[usize] {
		&self.notified
	}

	/// Messages passed to `confirm`, in call order.
	pub fn prompts(&self) -> &[String] {
		&self.prompts
	}

	pub fn has_open_group(&self) -> bool {
		self.undo_groups.last().is_some_and(|group| !group.closed)
	}

	fn is_live(&self, entity: usize) -> bool {
		entity < self.names.len() && !self.destroyed.contains(&entity)
	}
}

impl RenameHost for MemoryHost {
	type Entity = usize;
	type UndoGroup = usize;

	fn selection(&self) -> Vec<usize> {
		self.selection
			.iter()
			.copied()
			.filter(|&entity| self.is_live(entity))
			.collect()
	}

	fn get_name(&self, entity: &usize) -> String {
		self.names.get(*entity).cloned().unwrap_or_default()
	}

	fn set_name(&mut self, entity: &usize, new_name: &str) -> Result<(), RenameError> {
		let entity = *entity;
		if !self.is_live(entity) {
			return Err(RenameError::EntityMissing {
				entity: format!("#{entity}"),
			});
		}

		if self.rejected_names.contains(new_name) {
			return Err(RenameError::Rejected {
				reason: format!("'{new_name}' is reserved"),
			});
		}

		if self.unique_names
			&& self
				.names
				.iter()
				.enumerate()
				.any(|(i, name)| i != entity && self.is_live(i) && name == new_name)
		{
			return Err(RenameError::NameCollision {
				name: new_name.to_string(),
			});
		}

		let old_name = std::mem::replace(&mut self.names[entity], new_name.to_string());
		if let Some(group) = self.undo_groups.last_mut().filter(|group| !group.closed) {
			group
				.changes
				.push((entity, old_name, new_name.to_string()));
		}
		Ok(())
	}

	fn begin_undoable_change(&mut self, description: &str) -> usize {
		self.undo_groups.push(UndoRecord {
			description: description.to_string(),
			changes: Vec::new(),
			closed: false,
		});
		self.undo_groups.len() - 1
	}

	fn end_undoable_change(&mut self, group: usize) {
		if let Some(record) = self.undo_groups.get_mut(group) {
			record.closed = true;
		}
	}

	fn notify_entity_changed(&mut self, entity: &usize) {
		self.notified.push(*entity);
	}

	fn confirm(&mut self, message: &str) -> bool {
		self.prompts.push(message.to_string());
		self.confirm_answer
	}
}
