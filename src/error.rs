use std::path::PathBuf;

/// Library-level structured errors for fixture-migrate.
///
/// The CLI binary wraps these with `anyhow` for context chains.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
	#[error("Invalid pattern for rule {rule}")]
	InvalidPattern {
		rule: String,
		#[source]
		source: regex::Error,
	},

	#[error("Rule {rule} referenced capture group `{group}`, which did not participate in the match")]
	MissingCapture { rule: String, group: String },

	#[error("Failed to read file: {path}")]
	ReadFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read manifest: {path}")]
	ManifestReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse manifest: {path}")]
	ManifestParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Manifest {path} lists an empty target path")]
	EmptyTarget { path: PathBuf },
}

/// Result type alias using MigrateError.
pub type Result<T> = std::result::Result<T, MigrateError>;
