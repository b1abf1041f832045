use crate::error::{MigrateError, Result};
use regex::{Regex, RegexBuilder};

/// Flags a rule's matcher is compiled with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
	/// `^` and `$` match at line boundaries instead of only at the ends of the document.
	pub multi_line: bool,

	/// `.` also matches `\n`.
	pub dot_matches_new_line: bool,
}

impl MatchOptions {
	/// Names of the enabled flags, for display.
	pub fn flags(&self) -> Vec<&'static str> {
		let mut flags = Vec::new();
		if self.multi_line {
			flags.push("multi-line");
		}
		if self.dot_matches_new_line {
			flags.push("dot-matches-newline");
		}
		flags
	}

	/// No flags. Used for single-line import patterns.
	pub const PLAIN: Self = MatchOptions {
		multi_line: false,
		dot_matches_new_line: false,
	};

	/// Both flags. Used for statements spread over many lines.
	pub const STRUCTURAL: Self = MatchOptions {
		multi_line: true,
		dot_matches_new_line: true,
	};
}

/// Compile a rule's pattern with the given options.
pub fn compile_pattern(rule: &str, pattern: &str, options: MatchOptions) -> Result<Regex> {
	RegexBuilder::new(pattern)
		.multi_line(options.multi_line)
		.dot_matches_new_line(options.dot_matches_new_line)
		.build()
		.map_err(|source| MigrateError::InvalidPattern {
			rule: rule.to_string(),
			source,
		})
}

/// A whitespace-tolerant pattern assembled from code templates and capture slots.
///
/// Each code template is split into tokens (words, quoted string literals and
/// single punctuation characters). Every token is escaped and adjacent pieces
/// are joined with `\s*`, so the pattern recognizes the code shape regardless
/// of how it was line-wrapped or indented. Words are bounded by `\b`; string
/// literals are kept whole, so module specifiers and role ids still have to
/// match exactly.
#[derive(Debug, Default, Clone)]
pub struct Shape {
	pieces: Vec<Piece>,
}

#[derive(Debug, Clone)]
struct Piece {
	regex: String,
	/// Whether whitespace may appear between this piece and the next one.
	loose_after: bool,
}

impl Shape {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append the tokens of a code template.
	pub fn code(mut self, template: &str) -> Self {
		for token in tokenize(template) {
			self.pieces.push(Piece {
				regex: token,
				loose_after: true,
			});
		}
		self
	}

	/// Append a named capture group matching `pattern`.
	pub fn capture(mut self, name: &str, pattern: &str) -> Self {
		self.pieces.push(Piece {
			regex: format!("(?P<{name}>{pattern})"),
			loose_after: true,
		});
		self
	}

	/// Capture the line's indentation as `name` when the next piece starts a line.
	///
	/// Needs [`MatchOptions::multi_line`]. The group is optional: mid-line
	/// occurrences still match, without `name`. Nothing may follow the
	/// indentation but the next piece, so blank lines above are never eaten.
	pub fn line_indent(mut self, name: &str) -> Self {
		self.pieces.push(Piece {
			regex: format!("(?:^(?P<{name}>[ \\t]*))?"),
			loose_after: false,
		});
		self
	}

	/// Render the regex source.
	pub fn build(&self) -> String {
		let mut out = String::new();
		for (i, piece) in self.pieces.iter().enumerate() {
			if i > 0 && self.pieces[i - 1].loose_after {
				out.push_str(r"\s*");
			}
			out.push_str(&piece.regex);
		}
		out
	}
}

fn is_word_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

/// Split a code template into escaped regex tokens.
fn tokenize(template: &str) -> Vec<String> {
	let mut tokens = Vec::new();
	let mut chars = template.char_indices().peekable();

	while let Some(&(start, c)) = chars.peek() {
		if c.is_whitespace() {
			chars.next();
		} else if matches!(c, '\'' | '"' | '`') {
			chars.next();
			let mut end = template.len();
			for (i, d) in chars.by_ref() {
				if d == c {
					end = i + d.len_utf8();
					break;
				}
			}
			tokens.push(regex::escape(&template[start..end]));
		} else if is_word_char(c) {
			let mut end = start;
			while let Some(&(i, d)) = chars.peek() {
				if !is_word_char(d) {
					break;
				}
				end = i + d.len_utf8();
				chars.next();
			}
			tokens.push(format!(r"\b{}\b", regex::escape(&template[start..end])));
		} else {
			chars.next();
			tokens.push(regex::escape(&template[start..start + c.len_utf8()]));
		}
	}

	tokens
}
