//! Configuration loading and parsing for pathfix.
//!
//! This module handles:
//! - TOML config file parsing
//! - Directory cascade discovery
//! - Config merging into effective settings

pub mod cascade;
pub mod parser;
pub mod types;

pub use cascade::{CONFIG_FILE_NAME, discover_configs, merge_configs, user_config_path};
pub use parser::{INIT_TEMPLATE, parse_config_file, parse_config_str};
pub use types::{Config, DEFAULT_PUBLIC_DIR, LoadedConfig, MergedConfig};
