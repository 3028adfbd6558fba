use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig};
use crate::error::{PathfixError, Result};
use crate::rules::RewriteSettings;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in each directory of the cascade.
pub const CONFIG_FILE_NAME: &str = ".pathfix.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.pathfix.toml`
/// 2. If found and `root = true`, stop walking up
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.pathfix.toml
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = Some(start_dir);

	while let Some(dir) = current_dir {
		let config_path = dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() {
			debug!("loading config {}", config_path.display());
			let config = parse_config_file(&config_path)?;
			let stop = config.root;

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if stop {
				break;
			}
		}

		current_dir = dir.parent();
	}

	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.pathfix.toml if it exists and was not already picked up.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	let Some(home_dir) = dirs::home_dir() else {
		debug!("no home directory, skipping user config");
		return Ok(None);
	};
	let user_config_path = home_dir.join(CONFIG_FILE_NAME);

	if !user_config_path.is_file() || existing_configs.iter().any(|c| c.path == user_config_path)
	{
		return Ok(None);
	}

	let config = parse_config_file(&user_config_path)?;
	Ok(Some(LoadedConfig {
		config,
		path: user_config_path,
	}))
}

/// Merge multiple configs into a single effective config.
///
/// Configs are given most specific first; a value set in a more specific
/// file wins over the same value further down the cascade.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut rewrite = RewriteSettings::default();
	for loaded in configs.iter().rev() {
		loaded.config.apply_to(&mut rewrite);
	}

	MergedConfig {
		public_dir: configs.iter().find_map(LoadedConfig::resolved_public_dir),
		rewrite,
	}
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(PathfixError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
