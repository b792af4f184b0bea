//! View abstraction
//!
//! A [`View`] receives a request plus call arguments and returns a
//! [`ViewOutcome`]: page data to render, page data with a template override,
//! or a finished response.

use crate::args::ViewArgs;
use crate::error::ViewResult;
use std::fmt;
use templatable_http::{Request, Response};
use templatable_templates::Context;

/// What a view hands back to the templatable adapter
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
	/// Render the effective template with this context merged in
	Context(Context),
	/// Render the named template (ignoring the effective template) with this
	/// context merged in
	TemplateOverride(String, Context),
	/// Return this response as-is; nothing is rendered
	Response(Response),
}

impl ViewOutcome {
	/// Shorthand for [`ViewOutcome::TemplateOverride`]
	pub fn template(name: impl Into<String>, context: Context) -> Self {
		ViewOutcome::TemplateOverride(name.into(), context)
	}
}

impl From<Context> for ViewOutcome {
	fn from(context: Context) -> Self {
		ViewOutcome::Context(context)
	}
}

impl From<Response> for ViewOutcome {
	fn from(response: Response) -> Self {
		ViewOutcome::Response(response)
	}
}

impl<S: Into<String>> From<(S, Context)> for ViewOutcome {
	fn from((template, context): (S, Context)) -> Self {
		ViewOutcome::TemplateOverride(template.into(), context)
	}
}

/// Application request handler
pub trait View: Send + Sync {
	/// Name used in logs and registry listings
	fn name(&self) -> &str;

	/// Handle one call
	///
	/// # Errors
	///
	/// Returns a [`crate::ViewError`] when the view cannot produce an outcome.
	fn call(&self, request: &Request, args: ViewArgs) -> ViewResult<ViewOutcome>;
}

/// A named function or closure acting as a [`View`]
pub struct FnView<F> {
	name: String,
	func: F,
}

impl<F> View for FnView<F>
where
	F: Fn(&Request, ViewArgs) -> ViewResult<ViewOutcome> + Send + Sync,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn call(&self, request: &Request, args: ViewArgs) -> ViewResult<ViewOutcome> {
		(self.func)(request, args)
	}
}

impl<F> fmt::Debug for FnView<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnView").field("name", &self.name).finish()
	}
}

/// Turn a function or closure into a named [`View`]
///
/// # Examples
///
/// ```
/// use templatable_views::{fn_view, View, ViewArgs, ViewOutcome};
/// use templatable_templates::Context;
/// use templatable_http::Request;
///
/// let view = fn_view("article_detail", |_request, args| {
///     let slug = args.get_str("slug").unwrap_or_default().to_string();
///     Ok(ViewOutcome::Context(Context::new().with("slug", slug)))
/// });
///
/// let request = Request::builder().build().unwrap();
/// let outcome = view.call(&request, ViewArgs::new().kwarg("slug", "intro")).unwrap();
/// assert_eq!(view.name(), "article_detail");
/// assert!(matches!(outcome, ViewOutcome::Context(_)));
/// ```
pub fn fn_view<F>(name: impl Into<String>, func: F) -> FnView<F>
where
	F: Fn(&Request, ViewArgs) -> ViewResult<ViewOutcome> + Send + Sync,
{
	FnView {
		name: name.into(),
		func,
	}
}
