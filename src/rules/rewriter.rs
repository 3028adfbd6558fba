use crate::error::{PathfixError, Result};
use crate::rules::matcher::AssetMatch;
use regex::{Captures, NoExpand, Regex};

/// Marker whose presence enables the component loader globals rewrite.
pub const FRONTEND_ROOT_MARKER: &str = "window.FRONTEND_ROOT";

/// Target locations used by the rewrite rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSettings {
	/// Absolute directory stylesheets are served from.
	pub css_prefix: String,

	/// Absolute directory scripts are served from.
	pub js_prefix: String,

	/// Value assigned to `window.FRONTEND_ROOT`.
	pub frontend_root: String,

	/// Value assigned to `window.COMPONENT_ROOT`.
	pub component_root: String,
}

impl Default for RewriteSettings {
	fn default() -> Self {
		Self {
			css_prefix: "/css/".into(),
			js_prefix: "/js/".into(),
			frontend_root: "/".into(),
			component_root: "/components/".into(),
		}
	}
}

impl RewriteSettings {
	/// Reject values that would make the rewrite non-idempotent.
	pub fn validate(&self) -> Result<()> {
		check_dir_prefix("css-prefix", &self.css_prefix)?;
		check_dir_prefix("js-prefix", &self.js_prefix)?;
		check_unquoted("frontend-root", &self.frontend_root)?;
		check_unquoted("component-root", &self.component_root)?;
		Ok(())
	}
}

fn check_dir_prefix(field: &'static str, value: &str) -> Result<()> {
	check_unquoted(field, value)?;
	if !value.starts_with('/') || !value.ends_with('/') {
		return Err(PathfixError::InvalidSetting {
			field,
			value: value.to_string(),
			reason: "must start and end with '/'",
		});
	}
	Ok(())
}

fn check_unquoted(field: &'static str, value: &str) -> Result<()> {
	if value.contains(&['"', '\''][..]) {
		return Err(PathfixError::InvalidSetting {
			field,
			value: value.to_string(),
			reason: "must not contain quote characters",
		});
	}
	Ok(())
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| PathfixError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// Lexical rule moving `attr="...ext"` references into a fixed directory.
///
/// Paths starting with any excluded prefix are left untouched. The opening
/// quote is reused for the replacement, whatever closing quote matched.
#[derive(Debug)]
pub struct AssetRule {
	pattern: Regex,
	excluded: Vec<String>,
	target_dir: String,
}

impl AssetRule {
	/// Build a rule for `attribute` values ending in `extension`.
	pub fn new(
		attribute: &str,
		extension: &str,
		excluded: &[&str],
		target_dir: &str,
	) -> Result<Self> {
		let pattern = compile_regex(&format!(
			r#"({}=["'])([^"']*{})["']"#,
			regex::escape(attribute),
			regex::escape(extension)
		))?;

		let mut excluded: Vec<String> = excluded.iter().map(|p| p.to_string()).collect();
		excluded.push(target_dir.to_string());

		Ok(AssetRule {
			pattern,
			excluded,
			target_dir: target_dir.to_string(),
		})
	}

	/// Rule for stylesheet links: `href` ending in `.css`.
	pub fn stylesheets(target_dir: &str) -> Result<Self> {
		Self::new("href", ".css", &["http", "#"], target_dir)
	}

	/// Rule for script sources: `src` ending in `.js`.
	pub fn scripts(target_dir: &str) -> Result<Self> {
		Self::new("src", ".js", &["http"], target_dir)
	}

	/// Apply this rule to every occurrence in `input`.
	pub fn apply(&self, input: &str) -> String {
		self.pattern
			.replace_all(input, |caps: &Captures| match AssetMatch::from_captures(caps) {
				Some(m) if !m.is_excluded(&self.excluded) => m.render(&self.target_dir),
				_ => caps[0].to_string(),
			})
			.into_owned()
	}
}

/// Rewrites the component loader globals.
///
/// Only fires when the content mentions `window.FRONTEND_ROOT`; a lone
/// `window.COMPONENT_ROOT` assignment is left alone.
#[derive(Debug)]
pub struct GlobalsRule {
	frontend_pattern: Regex,
	frontend_replacement: String,
	component_pattern: Regex,
	component_replacement: String,
}

impl GlobalsRule {
	pub fn new(frontend_root: &str, component_root: &str) -> Result<Self> {
		Ok(GlobalsRule {
			frontend_pattern: compile_regex(r#"window\.FRONTEND_ROOT\s*=\s*["'][^"']*["']"#)?,
			frontend_replacement: format!("window.FRONTEND_ROOT = \"{}\"", frontend_root),
			component_pattern: compile_regex(r#"window\.COMPONENT_ROOT\s*=\s*["'][^"']*["']"#)?,
			component_replacement: format!("window.COMPONENT_ROOT = \"{}\"", component_root),
		})
	}

	pub fn apply(&self, input: &str) -> String {
		if !input.contains(FRONTEND_ROOT_MARKER) {
			return input.to_string();
		}

		let content = self
			.frontend_pattern
			.replace_all(input, NoExpand(&self.frontend_replacement));
		self.component_pattern
			.replace_all(&content, NoExpand(&self.component_replacement))
			.into_owned()
	}
}

/// The full ordered rewrite: stylesheets, then scripts, then globals.
#[derive(Debug)]
pub struct Rewriter {
	css: AssetRule,
	js: AssetRule,
	globals: GlobalsRule,
}

impl Rewriter {
	/// Compile the rules for the given settings.
	pub fn new(settings: &RewriteSettings) -> Result<Self> {
		settings.validate()?;

		Ok(Rewriter {
			css: AssetRule::stylesheets(&settings.css_prefix)?,
			js: AssetRule::scripts(&settings.js_prefix)?,
			globals: GlobalsRule::new(&settings.frontend_root, &settings.component_root)?,
		})
	}

	/// Apply every rule in order.
	pub fn apply(&self, input: &str) -> String {
		let content = self.css.apply(input);
		let content = self.js.apply(&content);
		self.globals.apply(&content)
	}
}
