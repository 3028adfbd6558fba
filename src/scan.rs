//! Directory walking and per-file processing.
//!
//! Files are handled strictly one after another: read fully, rewrite in
//! memory, and written back only when the content changed. A failure on one
//! file is reported through its [`FileOutcome`] and never stops the scan.

use crate::error::{PathfixError, Result};
use crate::rules::Rewriter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Whether changed files are written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanMode {
	/// Overwrite files whose content changed.
	#[default]
	Write,

	/// Report files that would change, touch nothing.
	DryRun,
}

/// What happened to a single file.
#[derive(Debug)]
pub enum FileOutcome {
	/// Content changed (and was written, unless dry-running).
	Fixed { path: PathBuf, relative: PathBuf },

	/// Content already in corrected form.
	Unchanged { path: PathBuf },

	/// The file (or directory entry) could not be processed.
	Failed { path: PathBuf, error: PathfixError },
}

/// Counts collected over a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
	pub fixed: usize,
	pub unchanged: usize,
	pub failed: usize,
}

impl ScanSummary {
	fn record(&mut self, outcome: &FileOutcome) {
		match outcome {
			FileOutcome::Fixed { .. } => self.fixed += 1,
			FileOutcome::Unchanged { .. } => self.unchanged += 1,
			FileOutcome::Failed { .. } => self.failed += 1,
		}
	}
}

/// Check a file name for the `.html` suffix, ignoring case.
pub fn is_html_file_name(name: &str) -> bool {
	name.to_lowercase().ends_with(".html")
}

/// Recursively collect HTML files under `root`, sorted by file name per directory.
///
/// Symlinked files are included; symlinked directories are not descended into.
/// Entries that cannot be read are returned as errors in walk order.
pub fn find_html_files(root: &Path) -> Vec<Result<PathBuf>> {
	WalkDir::new(root)
		.sort_by_file_name()
		.into_iter()
		.filter_map(|entry| match entry {
			Ok(entry) => {
				let file_type = entry.file_type();
				let is_file = file_type.is_file()
					|| (file_type.is_symlink() && entry.path().is_file());
				let is_html = is_html_file_name(&entry.file_name().to_string_lossy());

				(is_file && is_html).then(|| Ok(entry.into_path()))
			}
			Err(source) => Some(Err(PathfixError::WalkError {
				root: root.to_path_buf(),
				source,
			})),
		})
		.collect()
}

/// Rewrite one file in place. Returns whether its content changed.
///
/// A failed read never proceeds to a write.
pub fn process_file(path: &Path, rewriter: &Rewriter, mode: ScanMode) -> Result<bool> {
	let content = fs::read_to_string(path).map_err(|source| PathfixError::FileReadError {
		path: path.to_path_buf(),
		source,
	})?;

	let updated = rewriter.apply(&content);
	if updated == content {
		return Ok(false);
	}

	if mode == ScanMode::Write {
		fs::write(path, updated).map_err(|source| PathfixError::FileWriteError {
			path: path.to_path_buf(),
			source,
		})?;
	}

	Ok(true)
}

/// Scan `root` for HTML files and rewrite each of them.
///
/// Every outcome is handed to `on_outcome` as soon as the file is done.
/// Fails only when `root` is not an existing directory, in which case nothing
/// is walked.
pub fn scan_tree<F>(
	root: &Path,
	rewriter: &Rewriter,
	mode: ScanMode,
	mut on_outcome: F,
) -> Result<ScanSummary>
where
	F: FnMut(&FileOutcome),
{
	if !root.is_dir() {
		return Err(PathfixError::RootNotFound {
			path: root.to_path_buf(),
		});
	}

	let mut summary = ScanSummary::default();

	for entry in find_html_files(root) {
		let outcome = match entry {
			Ok(path) => {
				debug!("processing {}", path.display());
				match process_file(&path, rewriter, mode) {
					Ok(true) => {
						let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
						FileOutcome::Fixed { path, relative }
					}
					Ok(false) => {
						trace!("unchanged {}", path.display());
						FileOutcome::Unchanged { path }
					}
					Err(error) => FileOutcome::Failed { path, error },
				}
			}
			Err(error) => {
				let path = match &error {
					PathfixError::WalkError { source, .. } => {
						source.path().unwrap_or(root).to_path_buf()
					}
					_ => root.to_path_buf(),
				};
				warn!("skipping unreadable entry {}: {}", path.display(), error);
				FileOutcome::Failed { path, error }
			}
		};

		summary.record(&outcome);
		on_outcome(&outcome);
	}

	debug!(?summary, "scan finished");
	Ok(summary)
}
