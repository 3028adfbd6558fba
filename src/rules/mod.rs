//! Lexical rewrite rules for pathfix.
//!
//! This module handles:
//! - Capturing `href`/`src` asset references and extracting their filenames
//! - Rewriting them into fixed absolute directories
//! - Normalizing the component loader globals
//!
//! Matching is pattern based, not a DOM parse: anything that looks like
//! `href="...css"` is rewritten, including commented-out or scripted markup.

pub mod matcher;
pub mod rewriter;

pub use matcher::{AssetMatch, extract_filename};
pub use rewriter::{AssetRule, FRONTEND_ROOT_MARKER, GlobalsRule, RewriteSettings, Rewriter};
