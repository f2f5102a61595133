use std::path::PathBuf;

/// Library-level structured errors for renamer.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RenamerError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive { option1: String, option2: String },

	#[error("Duplicate preset name: {name} (in {path})")]
	DuplicatePreset { name: String, path: PathBuf },

	#[error("Preset not found: {name}")]
	PresetNotFound { name: String },

	#[error("No replacement text given and nothing selected to take it from")]
	MissingReplacement,

	#[error("Cannot select {path}: {reason}")]
	InvalidSelection { path: PathBuf, reason: String },

	#[error("Nothing selected to rename")]
	EmptySelection,

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Why the host refused to rename a single entity.
///
/// These never abort a batch; they are collected into
/// [`CommitResult`](crate::batch::CommitResult).
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
	#[error("an entity named '{name}' already exists")]
	NameCollision { name: String },

	#[error("'{name}' is not a valid name: {reason}")]
	InvalidName { name: String, reason: String },

	#[error("entity no longer exists: {entity}")]
	EntityMissing { entity: String },

	#[error("rename rejected by host: {reason}")]
	Rejected { reason: String },

	#[error("I/O error while renaming {entity}")]
	Io {
		entity: String,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using RenamerError.
pub type Result<T> = std::result::Result<T, RenamerError>;
