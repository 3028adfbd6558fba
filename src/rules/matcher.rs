use regex::Captures;

/// A single attribute reference found by an asset rule.
///
/// Lives only for the duration of one substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMatch<'a> {
	/// Attribute name, `=` and the opening quote, e.g. `href="`.
	pub prefix: &'a str,

	/// The raw path value between the quotes.
	pub path: &'a str,

	/// Final segment of `path`.
	pub filename: &'a str,

	/// The opening quote character.
	pub quote: char,
}

impl<'a> AssetMatch<'a> {
	/// Build a match from the captures of an asset rule pattern.
	///
	/// Group 1 is the prefix ending in the opening quote, group 2 is the path.
	pub fn from_captures(caps: &Captures<'a>) -> Option<Self> {
		let prefix = caps.get(1)?.as_str();
		let path = caps.get(2)?.as_str();
		let quote = prefix.chars().last()?;

		Some(AssetMatch {
			prefix,
			path,
			filename: extract_filename(path),
			quote,
		})
	}

	/// Whether the path starts with any of the given prefixes.
	pub fn is_excluded(&self, excluded: &[String]) -> bool {
		excluded.iter().any(|p| self.path.starts_with(p.as_str()))
	}

	/// Render the attribute pointing at `target_dir` + filename, keeping the opening quote.
	pub fn render(&self, target_dir: &str) -> String {
		format!(
			"{}{}{}{}",
			self.prefix, target_dir, self.filename, self.quote
		)
	}
}

/// Extract the last path segment, treating `/` and `\` as separators.
pub fn extract_filename(path: &str) -> &str {
	path.rsplit(&['/', '\\'][..]).next().unwrap_or(path)
}
