//! Host bindings for renamer.
//!
//! The engine never touches entities directly. Everything it needs from the
//! environment that owns them (selection, names, undo boundaries, change
//! notification, confirmation) goes through [`RenameHost`].

pub mod fs;
pub mod memory;

pub use fs::FsHost;
pub use memory::{MemoryHost, UndoRecord};

use crate::batch::NamedEntity;
use crate::error::RenameError;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// The environment that owns the entities being renamed.
pub trait RenameHost {
	/// Opaque handle to one entity.
	type Entity: Clone + fmt::Debug;

	/// Token for an open undo boundary.
	type UndoGroup;

	/// Handles of the currently selected entities, in selection order.
	fn selection(&self) -> Vec<Self::Entity>;

	/// Current display name of an entity.
	fn get_name(&self, entity: &Self::Entity) -> String;

	/// Rename an entity. May be refused by the host.
	fn set_name(&mut self, entity: &Self::Entity, new_name: &str) -> Result<(), RenameError>;

	/// Open an undo boundary. Prefer [`RenameHost::begin_transaction`],
	/// which closes it again on drop.
	fn begin_undoable_change(&mut self, description: &str) -> Self::UndoGroup;

	/// Close an undo boundary opened by `begin_undoable_change`.
	fn end_undoable_change(&mut self, group: Self::UndoGroup);

	/// Host-side bookkeeping after a successful rename.
	fn notify_entity_changed(&mut self, _entity: &Self::Entity) {}

	/// Ask the user before a destructive change.
	fn confirm(&mut self, message: &str) -> bool;

	/// The current selection paired with each entity's name.
	fn list_selected_entities(&self) -> Vec<NamedEntity<Self::Entity>> {
		self.selection()
			.into_iter()
			.map(|handle| {
				let name = self.get_name(&handle);
				NamedEntity { handle, name }
			})
			.collect()
	}

	/// Open an undo boundary that is closed when the returned guard drops.
	fn begin_transaction(&mut self, description: &str) -> ScopedTransaction<'_, Self>
	where
		Self: Sized,
	{
		ScopedTransaction::begin(self, description)
	}
}

/// An open undo boundary on a host.
///
/// Derefs to the host so renames can be issued through it; the boundary is
/// closed exactly once, when the guard is dropped.
pub struct ScopedTransaction<'h, H: RenameHost> {
	host: &'h mut H,
	group: Option<H::UndoGroup>,
}

impl<'h, H: RenameHost> ScopedTransaction<'h, H> {
	pub fn begin(host: &'h mut H, description: &str) -> Self {
		let group = host.begin_undoable_change(description);
		ScopedTransaction {
			host,
			group: Some(group),
		}
	}
}

impl<H: RenameHost> Deref for ScopedTransaction<'_, H> {
	type Target = H;

	fn deref(&self) -> &H {
		self.host
	}
}

impl<H: RenameHost> DerefMut for ScopedTransaction<'_, H> {
	fn deref_mut(&mut self) -> &mut H {
		self.host
	}
}

impl<H: RenameHost> Drop for ScopedTransaction<'_, H> {
	fn drop(&mut self) {
		if let Some(group) = self.group.take() {
			self.host.end_undoable_change(group);
		}
	}
}
