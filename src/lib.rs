//! Pathfix - CLI tool for normalizing asset paths in static HTML.
//!
//! This library provides the core functionality for pathfix, including:
//! - Lexical rewriting of `href`/`src` stylesheet and script references
//! - Normalization of the component loader globals
//! - Recursive HTML discovery with per-file fault isolation
//! - Configuration file parsing and cascade discovery
//!
//! # Example
//!
//! ```no_run
//! use pathfix_cli::rules::{RewriteSettings, Rewriter};
//! use pathfix_cli::scan::{FileOutcome, ScanMode, scan_tree};
//! use std::path::Path;
//!
//! let rewriter = Rewriter::new(&RewriteSettings::default()).unwrap();
//! let root = Path::new("frontend/public");
//!
//! scan_tree(root, &rewriter, ScanMode::Write, |outcome| {
//!     if let FileOutcome::Fixed { relative, .. } = outcome {
//!         println!("Fixed: {}", relative.display());
//!     }
//! })
//! .unwrap();
//! ```

pub mod config;
pub mod error;
pub mod rules;
pub mod scan;

pub use error::{PathfixError, Result};
