//! Template error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors raised while loading, configuring or rendering templates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TemplateError {
	/// The renderer has no template under this name.
	#[error("template not found: {0}")]
	NotFound(String),

	/// A template source could not be parsed.
	#[error("failed to parse template '{template}'")]
	Parse {
		template: String,
		#[source]
		source: tera::Error,
	},

	/// The template exists but rendering it failed.
	#[error("failed to render template '{template}'")]
	Render {
		template: String,
		#[source]
		source: tera::Error,
	},

	/// Templates could not be loaded from a directory.
	#[error("failed to load templates from {}: {message}", path.display())]
	Load { path: PathBuf, message: String },

	/// Template settings could not be read or parsed.
	#[error("invalid template settings: {0}")]
	Settings(String),

	/// A value that had to be a mapping of template variables was not one.
	#[error("invalid template context: {0}")]
	InvalidContext(String),
}

impl TemplateError {
	/// Whether this error is the "template not found" signal.
	pub fn is_not_found(&self) -> bool {
		matches!(self, TemplateError::NotFound(_))
	}
}
