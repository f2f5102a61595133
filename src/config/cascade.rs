use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig, PresetWithSource};
use crate::error::{RenamerError, Result};
use std::path::{Path, PathBuf};

/// File name looked up in every directory of the cascade and in the home directory.
pub const CONFIG_FILE_NAME: &str = ".renamer.toml";

/// Discover and load all config files in the cascade.
///
/// Walks from `start_dir` towards the filesystem root, stopping after a file
/// with `root = true`, then appends `~/.renamer.toml` if it exists.
/// Returns configs most specific first.
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let home_dir = dirs::home_dir().ok_or(RenamerError::HomeDirectoryNotFound)?;
	discover_configs_with_home(start_dir, &home_dir)
}

/// Same as [`discover_configs`], with an explicit home directory.
pub fn discover_configs_with_home(start_dir: &Path, home_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let user_config = home_dir.join(CONFIG_FILE_NAME);
	let mut configs = Vec::new();

	for dir in start_dir.ancestors() {
		let path = dir.join(CONFIG_FILE_NAME);
		// The user config always comes last, even when the walk passes home
		if path == user_config || !path.is_file() {
			continue;
		}

		let loaded = load(path)?;
		let is_root = loaded.config.root;
		configs.push(loaded);
		if is_root {
			break;
		}
	}

	if user_config.is_file() {
		configs.push(load(user_config)?);
	}

	Ok(configs)
}

fn load(path: PathBuf) -> Result<LoadedConfig> {
	let config = parse_config_file(&path)?;
	tracing::debug!(path = %path.display(), presets = config.presets.len(), "loaded config");
	Ok(LoadedConfig { config, path })
}

/// Flatten the cascade into one preset list, keeping each preset's source.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let presets = configs
		.iter()
		.flat_map(|loaded| {
			loaded.config.presets.iter().map(|preset| PresetWithSource {
				preset: preset.clone(),
				source: loaded.path.clone(),
			})
		})
		.collect();

	MergedConfig { presets }
}

/// Discover and merge the presets visible from `start_dir`.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	Ok(merge_configs(&discover_configs(start_dir)?))
}

/// Path of the per-user config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(RenamerError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn write_config(dir: &Path, content: &str) {
		fs::write(dir.join(CONFIG_FILE_NAME), content).unwrap();
	}

	#[test]
	fn test_user_config_path() {
		let path = user_config_path().unwrap();
		assert!(path.ends_with(CONFIG_FILE_NAME));
	}

	#[test]
	fn test_cascade_walks_up_until_root() {
		let temp_dir = tempfile::tempdir().unwrap();
		let home = temp_dir.path().join("home");
		let top = temp_dir.path().join("top");
		let project = top.join("project");
		let nested = project.join("nested");
		fs::create_dir_all(&home).unwrap();
		fs::create_dir_all(&nested).unwrap();

		write_config(&top, "[[presets]]\nname = \"ignored\"\nreplacement = \"x\"\n");
		write_config(&project, "root = true\n[[presets]]\nname = \"outer\"\nreplacement = \"o\"\n");
		write_config(&nested, "[[presets]]\nname = \"inner\"\nreplacement = \"i\"\n");

		let configs = discover_configs_with_home(&nested, &home).unwrap();
		let paths: Vec<_> = configs.iter().map(|c| c.path.clone()).collect();
		assert_eq!(
			paths,
			vec![nested.join(CONFIG_FILE_NAME), project.join(CONFIG_FILE_NAME)]
		);
	}

	#[test]
	fn test_cascade_appends_user_config() {
		let temp_dir = tempfile::tempdir().unwrap();
		let home = temp_dir.path().join("home");
		let project = temp_dir.path().join("project");
		fs::create_dir_all(&home).unwrap();
		fs::create_dir_all(&project).unwrap();

		write_config(&project, "root = true\n");
		write_config(&home, "[[presets]]\nname = \"mine\"\nreplacement = \"m\"\n");

		let configs = discover_configs_with_home(&project, &home).unwrap();
		assert_eq!(configs.len(), 2);
		assert_eq!(configs[1].path, home.join(CONFIG_FILE_NAME));
	}

	#[test]
	fn test_user_config_loaded_once_when_walk_passes_home() {
		let temp_dir = tempfile::tempdir().unwrap();
		let home = temp_dir.path().join("home");
		let project = home.join("project");
		fs::create_dir_all(&project).unwrap();

		write_config(&project, "[[presets]]\nname = \"local\"\nreplacement = \"l\"\n");
		write_config(&home, "[[presets]]\nname = \"mine\"\nreplacement = \"m\"\n");

		let configs = discover_configs_with_home(&project, &home).unwrap();
		let paths: Vec<_> = configs.iter().map(|c| c.path.clone()).collect();
		assert_eq!(
			paths,
			vec![project.join(CONFIG_FILE_NAME), home.join(CONFIG_FILE_NAME)]
		);
	}

	#[test]
	fn test_no_configs_found() {
		let temp_dir = tempfile::tempdir().unwrap();
		let home = temp_dir.path().join("home");
		let project = temp_dir.path().join("project");
		fs::create_dir_all(&home).unwrap();
		fs::create_dir_all(&project).unwrap();

		let merged = merge_configs(&discover_configs_with_home(&project, &home).unwrap());
		assert!(merged.presets.is_empty());
	}

	#[test]
	fn test_merge_first_preset_wins() {
		let temp_dir = tempfile::tempdir().unwrap();
		let home = temp_dir.path().join("home");
		let project = temp_dir.path().join("project");
		fs::create_dir_all(&home).unwrap();
		fs::create_dir_all(&project).unwrap();

		write_config(&project, "root = true\n[[presets]]\nname = \"boss\"\nreplacement = \"Local\"\n");
		write_config(&home, "[[presets]]\nname = \"boss\"\nreplacement = \"User\"\n");

		let merged = merge_configs(&discover_configs_with_home(&project, &home).unwrap());
		assert_eq!(merged.presets.len(), 2);

		let found = merged.find_preset("boss").unwrap();
		assert_eq!(found.preset.replacement, Some("Local".to_string()));
		assert_eq!(found.source, project.join(CONFIG_FILE_NAME));
		assert!(merged.find_preset("missing").is_none());
	}
}
