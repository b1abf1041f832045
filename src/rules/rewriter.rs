use crate::error::{MigrateError, Result};
use crate::rules::matcher::{MatchOptions, compile_pattern};
use regex::{Captures, Regex};

/// Produces the replacement text for one match.
pub type BuildReplacement = fn(&Captured<'_>) -> Result<String>;

/// The captures of a single match, tagged with the rule that produced them.
pub struct Captured<'a> {
	rule: &'a str,
	captures: Captures<'a>,
	line_ending: &'static str,
}

impl<'a> Captured<'a> {
	/// Text of the named group, or `MissingCapture` if it did not participate.
	pub fn group(&self, name: &str) -> Result<&'a str> {
		self.captures
			.name(name)
			.map(|m| m.as_str())
			.ok_or_else(|| MigrateError::MissingCapture {
				rule: self.rule.to_string(),
				group: name.to_string(),
			})
	}

	/// Text of the named group, if it participated in the match.
	pub fn optional_group(&self, name: &str) -> Option<&'a str> {
		self.captures.name(name).map(|m| m.as_str())
	}

	/// The document's line terminator: `"\r\n"` for CRLF documents, otherwise `"\n"`.
	pub fn line_ending(&self) -> &'static str {
		self.line_ending
	}
}

/// A compiled find-and-replace rule.
#[derive(Debug)]
pub struct RewriteRule {
	/// Short identifier used in logs and `--list-rules`.
	pub name: &'static str,

	/// Compiled matcher.
	pub matcher: Regex,

	/// Flags the matcher was compiled with.
	pub options: MatchOptions,

	build_replacement: BuildReplacement,
}

/// Result of applying one rule to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
	pub text: String,
	pub replacements: usize,
}

impl RewriteRule {
	/// Compile a rule from its pattern source.
	pub fn new(
		name: &'static str,
		pattern: &str,
		options: MatchOptions,
		build_replacement: BuildReplacement,
	) -> Result<Self> {
		Ok(RewriteRule {
			name,
			matcher: compile_pattern(name, pattern, options)?,
			options,
			build_replacement,
		})
	}

	/// Replace every leftmost-first, non-overlapping match in `document`.
	///
	/// A document without matches comes back unchanged with zero replacements.
	pub fn apply(&self, document: &str) -> Result<Rewrite> {
		let mut text = String::with_capacity(document.len());
		let mut last_end = 0;
		let mut replacements = 0;
		let line_ending = if document.contains("\r\n") { "\r\n" } else { "\n" };

		for captures in self.matcher.captures_iter(document) {
			let Some(whole) = captures.get(0) else {
				continue;
			};
			let captured = Captured {
				rule: self.name,
				captures,
				line_ending,
			};
			text.push_str(&document[last_end..whole.start()]);
			text.push_str(&(self.build_replacement)(&captured)?);
			last_end = whole.end();
			replacements += 1;
		}
		text.push_str(&document[last_end..]);

		Ok(Rewrite { text, replacements })
	}
}

/// An ordered list of rules applied as a left fold.
#[derive(Debug)]
pub struct RuleSet {
	rules: Vec<RewriteRule>,
}

impl RuleSet {
	pub fn new(rules: Vec<RewriteRule>) -> Self {
		RuleSet { rules }
	}

	/// Rules in application order.
	pub fn rules(&self) -> &[RewriteRule] {
		&self.rules
	}

	/// Apply every rule in order; each rule sees the previous rule's output.
	pub fn apply_all(&self, document: &str) -> Result<String> {
		self.rules
			.iter()
			.try_fold(document.to_string(), |current, rule| {
				let rewrite = rule.apply(&current)?;
				if rewrite.replacements > 0 {
					tracing::debug!(
						rule = rule.name,
						replacements = rewrite.replacements,
						"rule applied"
					);
				}
				Ok(rewrite.text)
			})
	}
}
