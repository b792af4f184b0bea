//! Template settings
//!
//! Settings for the default Tera renderer. They can be built in code, parsed
//! from a TOML document, or read from the environment.
//!
//! ```toml
//! dirs = ["templates", "shared/templates"]
//! debug = true
//! static_url = "/static/"
//! media_url = "/media/"
//! autoescape = true
//! strict = false
//! ```

use crate::error::{TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the template directory.
pub const TEMPLATE_DIR_ENV: &str = "TEMPLATABLE_TEMPLATE_DIR";

/// Environment variable enabling debug mode (`1`/`true`).
pub const DEBUG_ENV: &str = "TEMPLATABLE_DEBUG";

/// Template engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
	/// Directories to search for templates, in priority order
	pub dirs: Vec<PathBuf>,

	/// Expose `DEBUG` to templates
	pub debug: bool,

	/// Static files URL prefix, exposed as `STATIC_URL`
	pub static_url: String,

	/// Media files URL prefix, exposed as `MEDIA_URL`
	pub media_url: String,

	/// HTML-escape variables in `.html`, `.htm` and `.xml` templates
	pub autoescape: bool,

	/// Add `strict = true` to every context rendered from a mapping
	pub strict: bool,
}

impl Default for TemplateSettings {
	fn default() -> Self {
		Self {
			dirs: vec![PathBuf::from("templates")],
			debug: false,
			static_url: "/static/".to_string(),
			media_url: "/media/".to_string(),
			autoescape: true,
			strict: false,
		}
	}
}

impl TemplateSettings {
	/// Settings searching a single template directory
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::TemplateSettings;
	/// use std::path::PathBuf;
	///
	/// let settings = TemplateSettings::with_dir("/app/templates");
	/// assert_eq!(settings.dirs, vec![PathBuf::from("/app/templates")]);
	/// assert!(settings.autoescape);
	/// ```
	pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
		Self {
			dirs: vec![dir.into()],
			..Self::default()
		}
	}

	/// Append a template directory
	pub fn add_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.dirs.push(dir.into());
		self
	}

	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	pub fn with_strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// Parse settings from a TOML document; missing keys take their defaults
	///
	/// # Errors
	///
	/// Returns [`TemplateError::Settings`] if the document is not valid TOML
	/// or has fields of the wrong type.
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::TemplateSettings;
	///
	/// let settings = TemplateSettings::from_toml_str(r#"
	///     dirs = ["site/templates"]
	///     debug = true
	/// "#).unwrap();
	/// assert!(settings.debug);
	/// assert_eq!(settings.static_url, "/static/");
	/// ```
	pub fn from_toml_str(source: &str) -> TemplateResult<Self> {
		toml::from_str(source).map_err(|e| TemplateError::Settings(e.to_string()))
	}

	/// Read and parse a TOML settings file
	///
	/// # Errors
	///
	/// Returns [`TemplateError::Settings`] if the file cannot be read or parsed.
	pub fn from_file(path: &Path) -> TemplateResult<Self> {
		let source = std::fs::read_to_string(path)
			.map_err(|e| TemplateError::Settings(format!("{}: {}", path.display(), e)))?;
		Self::from_toml_str(&source)
	}

	/// Build settings from `TEMPLATABLE_TEMPLATE_DIR` and `TEMPLATABLE_DEBUG`
	///
	/// Unset variables fall back to the defaults (`./templates`, debug off).
	pub fn from_env() -> Self {
		let mut settings = Self::default();

		if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV)
			&& !dir.is_empty()
		{
			settings.dirs = vec![PathBuf::from(dir)];
		}

		if let Ok(debug) = std::env::var(DEBUG_ENV) {
			settings.debug = matches!(debug.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
		}

		settings
	}
}
