//! Rewrite rules for fixture-migrate.
//!
//! This module handles:
//! - Compiling whitespace-tolerant matchers from code templates
//! - Applying find-and-replace rules as an ordered fold over a document
//! - The concrete rules of the fixture migration

pub mod matcher;
pub mod migration;
pub mod rewriter;

pub use matcher::{MatchOptions, Shape, compile_pattern};
pub use migration::{fixture_migration_rules, role_name};
pub use rewriter::{BuildReplacement, Captured, Rewrite, RewriteRule, RuleSet};
