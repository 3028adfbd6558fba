use crate::rules::RewriteSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Scan root used when neither the CLI nor a config file names one.
pub const DEFAULT_PUBLIC_DIR: &str = "frontend/public";

/// Top-level configuration from a `.pathfix.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// If true, stop searching parent directories and jump to ~/.pathfix.toml.
	#[serde(default)]
	pub root: bool,

	/// Directory to scan, relative to the directory holding this file.
	pub public_dir: Option<PathBuf>,

	/// Absolute directory stylesheet references are moved to.
	pub css_prefix: Option<String>,

	/// Absolute directory script references are moved to.
	pub js_prefix: Option<String>,

	/// Value assigned to `window.FRONTEND_ROOT`.
	pub frontend_root: Option<String>,

	/// Value assigned to `window.COMPONENT_ROOT`.
	pub component_root: Option<String>,
}

impl Config {
	/// Overlay the values set in this file on top of `settings`.
	pub fn apply_to(&self, settings: &mut RewriteSettings) {
		if let Some(ref v) = self.css_prefix {
			settings.css_prefix = v.clone();
		}
		if let Some(ref v) = self.js_prefix {
			settings.js_prefix = v.clone();
		}
		if let Some(ref v) = self.frontend_root {
			settings.frontend_root = v.clone();
		}
		if let Some(ref v) = self.component_root {
			settings.component_root = v.clone();
		}
	}

	/// Validate the rewrite values set in this file.
	pub fn validate(&self) -> Result<(), crate::error::PathfixError> {
		let mut settings = RewriteSettings::default();
		self.apply_to(&mut settings);
		settings.validate()
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

impl LoadedConfig {
	/// The configured scan directory, resolved against this file's directory.
	pub fn resolved_public_dir(&self) -> Option<PathBuf> {
		let dir = self.config.public_dir.as_ref()?;
		let base = self.path.parent().unwrap_or(Path::new("."));
		Some(base.join(dir))
	}
}

/// Effective configuration merged from every file in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// Scan directory from the most specific file that sets one.
	pub public_dir: Option<PathBuf>,

	/// Rewrite targets, defaults overlaid by each file.
	pub rewrite: RewriteSettings,
}

impl MergedConfig {
	/// Resolve the scan root: explicit CLI value, then config, then the default under `cwd`.
	pub fn scan_root(&self, cli_root: Option<&Path>, cwd: &Path) -> PathBuf {
		if let Some(root) = cli_root {
			return cwd.join(root);
		}
		self.public_dir
			.clone()
			.unwrap_or_else(|| cwd.join(DEFAULT_PUBLIC_DIR))
	}
}
