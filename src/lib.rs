//! Renamer - batch rename tool driven by regex, prefix and postfix rules.
//!
//! This library provides the core functionality for renamer, including:
//! - Rename rules and name computation
//! - Batch preview and commit through a host environment
//! - Filesystem and in-memory hosts
//! - Configuration presets with cascade discovery
//!
//! # Example
//!
//! ```
//! use renamer_cli::batch::{CommitOutcome, commit_selection, compute_batch};
//! use renamer_cli::host::{MemoryHost, RenameHost};
//! use renamer_cli::rules::RenameRule;
//!
//! let mut host = MemoryHost::new(["Enemy_01", "Enemy_02"]);
//! let rule = RenameRule::regex("Enemy", "Boss");
//!
//! let preview = compute_batch(&host.list_selected_entities(), &rule).unwrap();
//! assert_eq!(preview[0].proposed_name, "Boss_01");
//!
//! if let CommitOutcome::Applied(result) = commit_selection(&mut host, &rule).unwrap() {
//!     assert!(result.is_complete());
//! }
//! assert_eq!(host.names(), ["Boss_01", "Boss_02"]);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod host;
pub mod prompt;
pub mod rules;

pub use error::{RenameError, RenamerError, Result};
