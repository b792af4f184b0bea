//! View error types.

use templatable_http::Response;
use templatable_templates::TemplateError;
use thiserror::Error;

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors surfaced by views and by the templatable adapter
///
/// The adapter never recovers from an error; renderer failures and view
/// failures reach the caller unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ViewError {
	/// Rendering failed, including the "template not found" signal.
	#[error(transparent)]
	Template(#[from] TemplateError),

	/// A reserved keyword argument had the wrong shape.
	#[error("keyword argument `{name}` must be {expected}, got {actual}")]
	InvalidArgument {
		name: &'static str,
		expected: &'static str,
		actual: &'static str,
	},

	/// The view could not find the object it was asked for.
	#[error("Not found: {0}")]
	NotFound(String),

	/// Any other failure inside a view.
	#[error("Internal error: {0}")]
	Internal(String),
}

impl ViewError {
	/// Whether the view reported a missing object; surfaces as a 404.
	pub fn is_not_found(&self) -> bool {
		matches!(self, ViewError::NotFound(_))
	}

	/// Whether rendering failed because the template does not exist
	///
	/// This is a server misconfiguration and surfaces as a 500.
	pub fn is_template_missing(&self) -> bool {
		matches!(self, ViewError::Template(e) if e.is_not_found())
	}
}

impl From<ViewError> for Response {
	/// Internal details are not written into the response body.
	fn from(error: ViewError) -> Self {
		if error.is_not_found() {
			return Response::not_found().with_body("Not found");
		}
		match error {
			ViewError::InvalidArgument { .. } => {
				Response::internal_server_error().with_body("Invalid view arguments")
			}
			_ => Response::internal_server_error().with_body("Internal server error"),
		}
	}
}
