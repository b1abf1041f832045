//! Target file lists for fixture-migrate.
//!
//! This module handles:
//! - The built-in list of e2e test files for this migration batch
//! - Loading an alternative list from a TOML manifest
//! - Resolving relative targets against a root directory

pub mod parser;
pub mod types;

pub use parser::{parse_manifest_file, parse_manifest_str};
pub use types::Manifest;

use std::path::{Path, PathBuf};

/// The e2e test files migrated by a no-argument run, relative to the app root.
pub const DEFAULT_TARGETS: &[&str] = &[
	"tests/e2e/accessibility.test.ts",
	"tests/e2e/command-menu.test.ts",
	"tests/e2e/dashboard.test.ts",
	"tests/e2e/file-operations.test.ts",
	"tests/e2e/mobile-responsiveness.test.ts",
	"tests/e2e/notes-crud.test.ts",
	"tests/e2e/notifications.test.ts",
	"tests/e2e/organization-invitations.test.ts",
	"tests/e2e/organization-management.test.ts",
	"tests/e2e/search-functionality.test.ts",
	"tests/e2e/theme-switching.test.ts",
];

/// The built-in target list as paths.
pub fn default_targets() -> Vec<PathBuf> {
	DEFAULT_TARGETS.iter().map(PathBuf::from).collect()
}

/// Join relative targets onto `root`; absolute targets are kept as given.
pub fn resolve_targets(root: &Path, targets: &[PathBuf]) -> Vec<PathBuf> {
	targets.iter().map(|target| root.join(target)).collect()
}
