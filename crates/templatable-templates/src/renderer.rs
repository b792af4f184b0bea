//! The renderer capability used by templatable views.

use crate::context::Context;
use crate::error::TemplateResult;
use templatable_http::{Request, Response};

/// Produces a response from a template name and a context
///
/// Any closure of the shape `Fn(&Request, &str, Context) -> TemplateResult<Response>`
/// is a renderer, which makes one-off render overrides easy:
///
/// ```
/// use templatable_templates::{Context, TemplateRenderer, TemplateResult};
/// use templatable_http::{Request, Response};
///
/// let renderer = |_request: &Request, template: &str, context: Context| {
///     TemplateResult::Ok(Response::ok().with_body(format!("{} ({} vars)", template, context.len())))
/// };
///
/// let request = Request::builder().build().unwrap();
/// let response = renderer
///     .render(&request, "index.html", Context::new().with("a", 1))
///     .unwrap();
/// assert_eq!(response.body_text(), "index.html (1 vars)");
/// ```
pub trait TemplateRenderer: Send + Sync {
	/// Render `template_name` with `context` for `request`
	///
	/// # Errors
	///
	/// Returns [`crate::TemplateError::NotFound`] when the template does not
	/// exist, or another [`crate::TemplateError`] when rendering fails.
	fn render(
		&self,
		request: &Request,
		template_name: &str,
		context: Context,
	) -> TemplateResult<Response>;
}

impl<F> TemplateRenderer for F
where
	F: Fn(&Request, &str, Context) -> TemplateResult<Response> + Send + Sync,
{
	fn render(
		&self,
		request: &Request,
		template_name: &str,
		context: Context,
	) -> TemplateResult<Response> {
		self(request, template_name, context)
	}
}
