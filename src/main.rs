use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

use pathfix_cli::config::{
	CONFIG_FILE_NAME, INIT_TEMPLATE, LoadedConfig, discover_configs, merge_configs,
	parse_config_file, user_config_path,
};
use pathfix_cli::rules::Rewriter;
use pathfix_cli::scan::{FileOutcome, ScanMode, scan_tree};

#[derive(Parser)]
#[command(name = "pathfix")]
#[command(
	author,
	version,
	about = "CLI tool for normalizing CSS/JS asset paths and component loader globals in static HTML"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Directory to scan for HTML files [default: frontend/public].
	/// Discovered .pathfix.toml files are still loaded for the rewrite
	/// targets, so an invalid config aborts the scan even with --root
	#[arg(long, value_name = "DIR")]
	root: Option<PathBuf>,

	/// Use this config file instead of discovering .pathfix.toml files
	#[arg(long, value_name = "FILE", global = true)]
	config: Option<PathBuf>,

	/// Report files that would change without writing them
	#[arg(long)]
	dry_run: bool,

	/// Create a template .pathfix.toml in the current directory
	#[arg(long, conflicts_with = "dry_run")]
	init: bool,

	/// Overwrite existing .pathfix.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Increase diagnostic logging on stderr (-v, -vv, -vvv)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display discovered config files and the effective settings
	Show,
	/// Check all config files for errors without scanning anything
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	if cli.init {
		return handle_init(&cwd, cli.force);
	}

	if let Some(command) = cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(&cwd, cli.config.as_deref()),
				ConfigAction::Validate => handle_config_validate(&cwd, cli.config.as_deref()),
			},
		};
	}

	let mode = if cli.dry_run {
		ScanMode::DryRun
	} else {
		ScanMode::Write
	};
	handle_scan(&cwd, cli.root.as_deref(), cli.config.as_deref(), mode)
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => Level::WARN,
		1 => Level::INFO,
		2 => Level::DEBUG,
		_ => Level::TRACE,
	};

	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.without_time()
		.init();
}

/// Load the explicit config file, or discover the cascade from `cwd`.
fn load_configs(cwd: &Path, explicit: Option<&Path>) -> Result<Vec<LoadedConfig>> {
	match explicit {
		Some(path) => {
			let path = cwd.join(path);
			let config = parse_config_file(&path)?;
			Ok(vec![LoadedConfig { config, path }])
		}
		None => Ok(discover_configs(cwd)?),
	}
}

fn handle_init(cwd: &Path, force: bool) -> Result<ExitCode> {
	let config_path = cwd.join(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, INIT_TEMPLATE)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_scan(
	cwd: &Path,
	cli_root: Option<&Path>,
	config_path: Option<&Path>,
	mode: ScanMode,
) -> Result<ExitCode> {
	let configs = load_configs(cwd, config_path).context("Failed to load configuration")?;
	let merged = merge_configs(&configs);
	let root = merged.scan_root(cli_root, cwd);

	let rewriter = Rewriter::new(&merged.rewrite).context("Failed to compile rewrite rules")?;

	if !root.is_dir() {
		eprintln!("Error: Directory not found: {}", root.display());
		return Ok(ExitCode::FAILURE);
	}

	println!("Scanning for HTML files in: {}", root.display());

	let label = match mode {
		ScanMode::Write => "Fixed",
		ScanMode::DryRun => "Would fix",
	};

	let summary = scan_tree(&root, &rewriter, mode, |outcome| match outcome {
		FileOutcome::Fixed { relative, .. } => println!("{label}: {}", relative.display()),
		FileOutcome::Unchanged { .. } => {}
		FileOutcome::Failed { path, error } => {
			eprintln!("Error processing {}: {}", path.display(), error_chain(error))
		}
	})
	.with_context(|| format!("Failed to scan {}", root.display()))?;

	tracing::info!(
		fixed = summary.fixed,
		unchanged = summary.unchanged,
		failed = summary.failed,
		"scan summary"
	);
	println!("Path correction complete.");
	Ok(ExitCode::SUCCESS)
}

/// Render an error and its sources as `outer: inner: ...`.
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
	std::iter::successors(Some(error), |e| e.source())
		.map(|e| e.to_string())
		.collect::<Vec<_>>()
		.join(": ")
}

fn handle_config_show(cwd: &Path, config_path: Option<&Path>) -> Result<ExitCode> {
	let configs = load_configs(cwd, config_path).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");

		for loaded in &configs {
			let config = &loaded.config;
			println!("# Source: {}", loaded.path.display());
			println!("# root: {}", config.root);
			if let Some(ref dir) = config.public_dir {
				println!("  public-dir: {}", dir.display());
			}
			if let Some(ref prefix) = config.css_prefix {
				println!("  css-prefix: {}", prefix);
			}
			if let Some(ref prefix) = config.js_prefix {
				println!("  js-prefix: {}", prefix);
			}
			if let Some(ref value) = config.frontend_root {
				println!("  frontend-root: {}", value);
			}
			if let Some(ref value) = config.component_root {
				println!("  component-root: {}", value);
			}
			println!();
		}
	}

	let merged = merge_configs(&configs);
	println!("Effective settings:");
	println!("  scan root: {}", merged.scan_root(None, cwd).display());
	println!("  css-prefix: {}", merged.rewrite.css_prefix);
	println!("  js-prefix: {}", merged.rewrite.js_prefix);
	println!("  frontend-root: {}", merged.rewrite.frontend_root);
	println!("  component-root: {}", merged.rewrite.component_root);

	if let Ok(user_path) = user_config_path() {
		println!("\nUser config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(cwd: &Path, config_path: Option<&Path>) -> Result<ExitCode> {
	match load_configs(cwd, config_path) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!("  {}", loaded.path.display());
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e:#}");
			Ok(ExitCode::FAILURE)
		}
	}
}
