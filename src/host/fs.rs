use crate::error::{RenameError, RenamerError, Result};
use crate::host::RenameHost;
use crate::prompt::PromptEngine;
use std::path::{Path, PathBuf};

/// Token for an open change set on the filesystem.
#[derive(Debug)]
pub struct FsChangeSet {
	description: String,
}

/// Filesystem host: each entity is a path, its name the final path component.
///
/// Renames stay within the entity's parent directory. The filesystem has no
/// undo stack, so undo boundaries are only logged.
#[derive(Debug)]
pub struct FsHost {
	selection: Vec<PathBuf>,
	prompt: PromptEngine,
	auto_confirm: bool,
	renamed_in_change_set: usize,
}

impl FsHost {
	/// Create a host selecting `paths`, in the given order.
	///
	/// Every path must exist and end in a UTF-8 file name; names are edited as
	/// strings, so anything lossy would be written back altered.
	pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Result<Self> {
		let selection = paths
			.into_iter()
			.map(|path| check_selectable(&path).map(|()| path))
			.collect::<Result<Vec<_>>>()?;

		Ok(FsHost {
			selection,
			prompt: PromptEngine::new(),
			auto_confirm: false,
			renamed_in_change_set: 0,
		})
	}

	/// Answer yes to every confirmation without prompting.
	pub fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
		self.auto_confirm = auto_confirm;
		self
	}

	/// Use a specific prompt engine for confirmations.
	pub fn with_prompt(mut self, prompt: PromptEngine) -> Self {
		self.prompt = prompt;
		self
	}
}

fn check_selectable(path: &Path) -> Result<()> {
	let reason = if path.symlink_metadata().is_err() {
		"path does not exist"
	} else if path.file_name().is_none() {
		"path has no file name"
	} else if path.file_name().and_then(|name| name.to_str()).is_none() {
		"name is not valid UTF-8"
	} else {
		return Ok(());
	};

	Err(RenamerError::InvalidSelection {
		path: path.to_path_buf(),
		reason: reason.to_string(),
	})
}

/// Check that `name` can be used as a single path component.
fn validate_file_name(name: &str) -> std::result::Result<(), RenameError> {
	let reason = if name.is_empty() {
		"name is empty"
	} else if name == "." || name == ".." {
		"name is reserved"
	} else if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
		"name contains a path separator"
	} else if name.contains('\0') {
		"name contains a NUL byte"
	} else {
		return Ok(());
	};

	Err(RenameError::InvalidName {
		name: name.to_string(),
		reason: reason.to_string(),
	})
}

impl RenameHost for FsHost {
	type Entity = PathBuf;
	type UndoGroup = FsChangeSet;

	fn selection(&self) -> Vec<PathBuf> {
		self.selection.clone()
	}

	fn get_name(&self, entity: &PathBuf) -> String {
		entity
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default()
	}

	/// Rename `entity` within its directory.
	///
	/// The collision check and the rename are two separate steps, and
	/// `fs::rename` replaces an existing target on Unix. A file created at the
	/// target in between is overwritten.
	fn set_name(
		&mut self,
		entity: &PathBuf,
		new_name: &str,
	) -> std::result::Result<(), RenameError> {
		validate_file_name(new_name)?;

		if let Some(name) = entity.file_name()
			&& name.to_str().is_none()
		{
			return Err(RenameError::InvalidName {
				name: name.to_string_lossy().into_owned(),
				reason: "current name is not valid UTF-8".to_string(),
			});
		}

		if entity.symlink_metadata().is_err() {
			return Err(RenameError::EntityMissing {
				entity: entity.display().to_string(),
			});
		}

		let target = entity.with_file_name(new_name);
		if &target == entity {
			return Ok(());
		}

		if target.symlink_metadata().is_ok() {
			return Err(RenameError::NameCollision {
				name: new_name.to_string(),
			});
		}

		std::fs::rename(entity, &target).map_err(|source| RenameError::Io {
			entity: entity.display().to_string(),
			source,
		})?;

		tracing::debug!(from = %entity.display(), to = %target.display(), "renamed");

		if let Some(slot) = self.selection.iter_mut().find(|path| **path == *entity) {
			*slot = target;
		}
		self.renamed_in_change_set += 1;
		Ok(())
	}

	fn begin_undoable_change(&mut self, description: &str) -> FsChangeSet {
		tracing::debug!(description, "begin change set");
		self.renamed_in_change_set = 0;
		FsChangeSet {
			description: description.to_string(),
		}
	}

	fn end_undoable_change(&mut self, group: FsChangeSet) {
		tracing::info!(
			description = %group.description,
			renamed = self.renamed_in_change_set,
			"change set complete (filesystem renames cannot be undone)"
		);
		self.renamed_in_change_set = 0;
	}

	fn notify_entity_changed(&mut self, entity: &PathBuf) {
		tracing::debug!(path = %entity.display(), "entity changed");
	}

	fn confirm(&mut self, message: &str) -> bool {
		if self.auto_confirm {
			return true;
		}
		self.prompt.yes_no(message, false)
	}
}
