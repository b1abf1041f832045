use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use fixture_migrate::batch::{BatchRewriter, Mode};
use fixture_migrate::rules::fixture_migration_rules;
use fixture_migrate::targets::{default_targets, parse_manifest_file, resolve_targets};

#[derive(Parser)]
#[command(name = "fixture-migrate")]
#[command(
	author,
	version,
	about = "Migrate e2e tests from inline Prisma fixtures to test-utils helpers"
)]
struct Cli {
	/// Read the target list from a TOML manifest (`files = [...]`)
	#[arg(long, value_name = "FILE", conflicts_with = "paths")]
	manifest: Option<PathBuf>,

	/// Resolve relative targets against this directory
	#[arg(short = 'C', long, value_name = "DIR")]
	root: Option<PathBuf>,

	/// Report files that would change without writing them
	#[arg(long)]
	check: bool,

	/// Print the rewrite rules in application order and exit
	#[arg(long)]
	list_rules: bool,

	/// Files to migrate instead of the built-in list
	paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
	init_tracing();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
		)
		.init();
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	let rules = fixture_migration_rules().context("Failed to compile rewrite rules")?;

	if cli.list_rules {
		for (i, rule) in rules.rules().iter().enumerate() {
			let flags = rule.options.flags();
			if flags.is_empty() {
				println!("{}. {}", i + 1, rule.name);
			} else {
				println!("{}. {} ({})", i + 1, rule.name, flags.join(", "));
			}
		}
		return Ok(ExitCode::SUCCESS);
	}

	let targets = if let Some(ref manifest_path) = cli.manifest {
		parse_manifest_file(manifest_path)
			.with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?
			.files
	} else if !cli.paths.is_empty() {
		cli.paths.clone()
	} else {
		default_targets()
	};

	let targets = match cli.root {
		Some(ref root) => resolve_targets(root, &targets),
		None => targets,
	};

	let mode = if cli.check { Mode::Check } else { Mode::Write };
	let summary = BatchRewriter::new(&rules)
		.with_mode(mode)
		.run(&targets)
		.context("Migration aborted")?;

	if mode == Mode::Check && !summary.changed.is_empty() {
		return Ok(ExitCode::FAILURE);
	}

	Ok(ExitCode::SUCCESS)
}
