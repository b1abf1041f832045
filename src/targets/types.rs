use crate::error::MigrateError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A target manifest loaded from a TOML file.
///
/// ```toml
/// files = [
///     "tests/e2e/accessibility.test.ts",
///     "tests/e2e/dashboard.test.ts",
/// ]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
	/// Paths to migrate, in reporting order.
	#[serde(default)]
	pub files: Vec<PathBuf>,
}

impl Manifest {
	/// Reject entries that cannot name a file.
	pub fn validate(&self, source: &Path) -> Result<(), MigrateError> {
		if self.files.iter().any(|file| file.as_os_str().is_empty()) {
			return Err(MigrateError::EmptyTarget {
				path: source.to_path_buf(),
			});
		}
		Ok(())
	}
}
