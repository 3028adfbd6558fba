use crate::config::types::Config;
use crate::error::{PathfixError, Result};
use std::path::Path;

/// Template written by `pathfix --init`.
pub const INIT_TEMPLATE: &str = r#"# pathfix configuration
# Stop looking for .pathfix.toml files in parent directories.
root = true

# Directory scanned for HTML files, relative to this file.
public-dir = "frontend/public"

# Absolute directories stylesheet and script references are moved to.
css-prefix = "/css/"
js-prefix = "/js/"

# Values assigned to the component loader globals.
frontend-root = "/"
component-root = "/components/"
"#;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| PathfixError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| PathfixError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate()?;

	Ok(config)
}
