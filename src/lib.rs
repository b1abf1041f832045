//! fixture-migrate - batch rewriter that moves e2e tests from inline
//! Prisma/faker organization fixtures to the `#tests/test-utils.ts` helpers.
//!
//! This library provides:
//! - An ordered set of whitespace-tolerant find-and-replace rules
//! - A batch driver that applies them to files in place
//! - The built-in target list and TOML target manifests
//!
//! # Example
//!
//! ```
//! use fixture_migrate::rules::fixture_migration_rules;
//!
//! let rules = fixture_migration_rules().unwrap();
//! let migrated = rules
//!     .apply_all("await expect(a).toHaveAttribute('aria-label').or(expect(b).toBeVisible())")
//!     .unwrap();
//!
//! assert!(migrated.ends_with("expect(hasAriaLabel || hasLabel).toBeTruthy()"));
//! ```

pub mod batch;
pub mod error;
pub mod rules;
pub mod targets;

pub use error::{MigrateError, Result};
