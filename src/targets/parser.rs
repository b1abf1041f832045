use crate::error::{MigrateError, Result};
use crate::targets::types::Manifest;
use std::path::Path;

/// Parse a manifest file from the given path.
pub fn parse_manifest_file(path: &Path) -> Result<Manifest> {
	let content = std::fs::read_to_string(path).map_err(|source| MigrateError::ManifestReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_manifest_str(&content, path)
}

/// Parse a manifest from a string (useful for testing).
pub fn parse_manifest_str(content: &str, path: &Path) -> Result<Manifest> {
	let manifest: Manifest =
		toml::from_str(content).map_err(|source| MigrateError::ManifestParseError {
			path: path.to_path_buf(),
			source,
		})?;

	manifest.validate(path)?;

	Ok(manifest)
}
