use crate::error::{MigrateError, Result};
use crate::rules::RuleSet;
use std::path::{Path, PathBuf};

/// Whether a batch writes its results back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
	/// Overwrite every processed file with its migrated text.
	#[default]
	Write,

	/// Leave files untouched and only report which ones would change.
	Check,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
	/// Files that existed and went through the rule set.
	pub processed: usize,

	/// Files whose text differs after migration, in list order.
	pub changed: Vec<PathBuf>,

	/// Listed paths that did not name an existing file.
	pub skipped: usize,
}

/// Drives a [`RuleSet`] over a list of files, one file at a time.
#[derive(Debug)]
pub struct BatchRewriter<'a> {
	rules: &'a RuleSet,
	mode: Mode,
}

impl<'a> BatchRewriter<'a> {
	pub fn new(rules: &'a RuleSet) -> Self {
		BatchRewriter {
			rules,
			mode: Mode::Write,
		}
	}

	pub fn with_mode(mut self, mode: Mode) -> Self {
		self.mode = mode;
		self
	}

	/// Migrate each existing file in `paths`, in order.
	///
	/// Missing paths are skipped silently. The first read, write or rule
	/// failure aborts the batch; files rewritten before it stay rewritten.
	pub fn run(&self, paths: &[PathBuf]) -> Result<BatchSummary> {
		let mut summary = BatchSummary::default();

		for path in paths {
			if !path.is_file() {
				tracing::debug!(path = %path.display(), "skipping missing file");
				summary.skipped += 1;
				continue;
			}

			if self.mode == Mode::Write {
				println!("Fixing {}...", path.display());
			}

			let changed = self.migrate_file(path)?;
			summary.processed += 1;
			if changed {
				summary.changed.push(path.clone());
			}

			match self.mode {
				Mode::Write => println!("Fixed {}", path.display()),
				Mode::Check if changed => println!("Would fix {}", path.display()),
				Mode::Check => {}
			}
		}

		match self.mode {
			Mode::Write => println!("All files processed!"),
			Mode::Check => println!("{} file(s) would be fixed", summary.changed.len()),
		}

		Ok(summary)
	}

	/// Read, migrate and (in write mode) overwrite one file.
	fn migrate_file(&self, path: &Path) -> Result<bool> {
		let original = std::fs::read_to_string(path).map_err(|source| MigrateError::ReadFailed {
			path: path.to_path_buf(),
			source,
		})?;

		let migrated = self.rules.apply_all(&original)?;
		let changed = migrated != original;
		tracing::debug!(path = %path.display(), changed, "migrated");

		if self.mode == Mode::Write {
			std::fs::write(path, &migrated).map_err(|source| MigrateError::WriteFailed {
				path: path.to_path_buf(),
				source,
			})?;
		}

		Ok(changed)
	}
}
