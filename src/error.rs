use std::path::PathBuf;

/// Library-level structured errors for pathfix.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum PathfixError {
	#[error("Directory not found: {path}")]
	RootNotFound { path: PathBuf },

	#[error("Failed to read {path}")]
	FileReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write {path}")]
	FileWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to walk directory entry under {root}")]
	WalkError {
		root: PathBuf,
		#[source]
		source: walkdir::Error,
	},

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

	#[error("Invalid value for {field}: {value:?} ({reason})")]
	InvalidSetting {
		field: &'static str,
		value: String,
		reason: &'static str,
	},

	#[error("Invalid rewrite pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using PathfixError.
pub type Result<T> = std::result::Result<T, PathfixError>;
