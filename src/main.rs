use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use renamer_cli::RenamerError;
use renamer_cli::batch::{
	CommitOutcome, NamedEntity, RenamePreviewEntry, commit_batch, compute_batch,
	suggest_replacement,
};
use renamer_cli::config::{
	CONFIG_FILE_NAME, discover_configs, generate_init_template, load_merged_config,
	user_config_path,
};
use renamer_cli::host::{FsHost, RenameHost};
use renamer_cli::rules::{Precedence, RenameRule, RuleOptions};

#[derive(Parser)]
#[command(name = "renamer")]
#[command(
	author,
	version,
	about = "Batch rename files using regex, prefix and postfix rules"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .renamer.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .renamer.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Print debug logs to stderr
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Show the proposed names without renaming anything
	Preview {
		#[command(flatten)]
		rule: RuleArgs,

		/// Print the preview as JSON
		#[arg(long)]
		json: bool,

		/// Files or directories to rename, in order
		#[arg(required = true)]
		paths: Vec<PathBuf>,
	},
	/// Rename the given paths
	Apply {
		#[command(flatten)]
		rule: RuleArgs,

		/// Skip the confirmation prompt
		#[arg(short, long)]
		yes: bool,

		/// Files or directories to rename, in order
		#[arg(required = true)]
		paths: Vec<PathBuf>,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display presets from every config file with source annotations
	Show,
	/// Check all config files for errors without renaming anything
	Validate,
}

#[derive(Args)]
struct RuleArgs {
	/// Regex pattern; matches are replaced with the replacement
	#[arg(short, long)]
	pattern: Option<String>,

	/// New name, regex replacement, prefix or postfix text
	/// (defaults to the name of the first path)
	#[arg(short, long, allow_hyphen_values = true)]
	replacement: Option<String>,

	/// Use the replacement as a prefix instead of a full replacement
	#[arg(long)]
	prefix: bool,

	/// Use the replacement as a postfix instead of a full replacement
	#[arg(long)]
	postfix: bool,

	/// How --pattern combines with --prefix/--postfix:
	/// affix-overrides, chain or exclusive
	#[arg(long, value_name = "MODE")]
	precedence: Option<Precedence>,

	/// Start from a preset defined in .renamer.toml
	#[arg(long, value_name = "NAME")]
	preset: Option<String>,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_env("RENAMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	if cli.init {
		return handle_init(cli.force);
	}

	match cli.command {
		Some(Commands::Preview { rule, json, paths }) => handle_preview(rule, json, paths),
		Some(Commands::Apply { rule, yes, paths }) => handle_apply(rule, yes, paths),
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show => handle_config_show(),
			ConfigAction::Validate => handle_config_validate(),
		},
		// Unreachable with arg_required_else_help unless only -v was given
		None => Ok(ExitCode::SUCCESS),
	}
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{} already exists. Use --force to overwrite.", CONFIG_FILE_NAME);
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {}", CONFIG_FILE_NAME);
	Ok(ExitCode::SUCCESS)
}

fn handle_preview(args: RuleArgs, json: bool, paths: Vec<PathBuf>) -> Result<ExitCode> {
	let host = FsHost::new(paths).context("Invalid selection")?;
	let entities = host.list_selected_entities();
	let rule = resolve_rule(args, &entities)?;

	let preview = compute_batch(&entities, &rule).context("Failed to compute new names")?;

	if json {
		let output =
			serde_json::to_string_pretty(&preview).context("Failed to serialize preview")?;
		println!("{}", output);
	} else {
		print_preview(&preview);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_apply(args: RuleArgs, yes: bool, paths: Vec<PathBuf>) -> Result<ExitCode> {
	let mut host = FsHost::new(paths)
		.context("Invalid selection")?
		.with_auto_confirm(yes);
	let entities = host.list_selected_entities();
	let rule = resolve_rule(args, &entities)?;

	let preview = compute_batch(&entities, &rule).context("Failed to compute new names")?;
	print_preview(&preview);

	let outcome = commit_batch(&mut host, &entities, &rule).context("Rename failed")?;

	let result = match outcome {
		CommitOutcome::Declined => {
			eprintln!("Rename cancelled.");
			return Ok(ExitCode::FAILURE);
		}
		CommitOutcome::Applied(result) => result,
	};

	for renamed in &result.renamed {
		println!("renamed: {} -> {}", renamed.old_name, renamed.new_name);
	}
	for failure in &result.failures {
		eprintln!(
			"failed: {} -> {}: {}",
			failure.old_name, failure.attempted_name, failure.error
		);
	}

	println!(
		"Renamed {} of {} objects.",
		result.renamed.len(),
		entities.len()
	);

	if result.is_complete() {
		Ok(ExitCode::SUCCESS)
	} else {
		Ok(ExitCode::FAILURE)
	}
}

fn resolve_rule(args: RuleArgs, entities: &[NamedEntity<PathBuf>]) -> Result<RenameRule> {
	let preset = match args.preset {
		Some(ref name) => {
			let cwd = std::env::current_dir().context("Failed to get current directory")?;
			let config = load_merged_config(&cwd).context("Failed to load configuration")?;
			let found = config
				.find_preset(name)
				.ok_or_else(|| RenamerError::PresetNotFound { name: name.clone() })?;
			tracing::debug!(preset = %name, source = %found.source.display(), "using preset");
			Some(found.preset.clone())
		}
		None => None,
	};

	let options = RuleOptions {
		pattern: args.pattern,
		replacement: args.replacement,
		prefix: args.prefix,
		postfix: args.postfix,
		precedence: args.precedence,
	};

	Ok(options.resolve(preset.as_ref(), suggest_replacement(entities))?)
}

fn print_preview(preview: &[RenamePreviewEntry]) {
	for entry in preview {
		if entry.is_unchanged() {
			println!("{} -> {} (unchanged)", entry.original_name, entry.proposed_name);
		} else {
			println!("{} -> {}", entry.original_name, entry.proposed_name);
		}
	}
	println!("Selected objects: {}", preview.len());
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", loaded.config.root);
		println!("# presets: {}", loaded.config.presets.len());
		println!();

		for preset in &loaded.config.presets {
			println!("  Preset {}:", preset.name);
			if let Some(ref pattern) = preset.pattern {
				println!("    pattern: {}", pattern);
			}
			if let Some(ref replacement) = preset.replacement {
				println!("    replacement: {}", replacement);
			}
			if preset.prefix {
				println!("    prefix: true");
			}
			if preset.postfix {
				println!("    postfix: true");
			}
			if let Some(precedence) = preset.precedence {
				println!("    precedence: {}", precedence);
			}
			println!();
		}
	}

	print_user_config_status();

	Ok(ExitCode::SUCCESS)
}

fn print_user_config_status() {
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match discover_configs(&cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} presets)",
						loaded.path.display(),
						loaded.config.presets.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {:?}", anyhow::Error::from(e));
			Ok(ExitCode::FAILURE)
		}
	}
}
