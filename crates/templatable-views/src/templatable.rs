//! Templatable views
//!
//! [`Templatable`] is the decorator factory: a configuration of default
//! template, default context and renderer that wraps a [`View`] into a
//! [`TemplatableView`]. Wrapping registers the default template and the view
//! in the [`TemplateRegistry`].
//!
//! On every call the wrapped view:
//!
//! 1. starts from a copy of the default context,
//! 2. removes the `context` keyword argument and merges it in,
//! 3. removes the `template_name` keyword argument, falling back to the
//!    default template,
//! 4. calls the inner view with the remaining arguments,
//! 5. renders [`ViewOutcome::Context`] with the effective template,
//!    renders [`ViewOutcome::TemplateOverride`] with the template it names,
//!    and returns [`ViewOutcome::Response`] untouched.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use templatable_views::{fn_view, Templatable, TemplateRegistry, ViewArgs, ViewOutcome};
//! use templatable_templates::{Context, TeraTemplateRenderer};
//! use templatable_http::Request;
//!
//! let renderer = TeraTemplateRenderer::from_raw_templates([
//!     ("greeting.html", "{{ greeting }}, {{ name }}!"),
//! ]).unwrap();
//! let registry = Arc::new(TemplateRegistry::new());
//!
//! let view = Templatable::new("greeting.html")
//!     .with_default_context(Context::new().with("greeting", "Hello"))
//!     .with_renderer(renderer)
//!     .with_registry(Arc::clone(&registry))
//!     .wrap(fn_view("greet", |_request, args| {
//!         let name = args.get_str("name").unwrap_or("stranger").to_string();
//!         Ok(ViewOutcome::Context(Context::new().with("name", name)))
//!     }));
//!
//! let request = Request::builder().build().unwrap();
//! let response = view.respond(&request, ViewArgs::new().kwarg("name", "Ada")).unwrap();
//!
//! assert_eq!(response.body_text(), "Hello, Ada!");
//! assert!(registry.contains("greeting.html"));
//! ```

use crate::args::ViewArgs;
use crate::error::ViewResult;
use crate::registry::TemplateRegistry;
use crate::view::{View, ViewOutcome};
use std::fmt;
use std::sync::Arc;
use templatable_http::{Request, Response};
use templatable_templates::{
	Context, TemplateRenderer, TemplateResult, TemplateSettings, TeraTemplateRenderer,
	default_renderer,
};

/// Context key set to `true` by strict mode
pub const STRICT_CONTEXT_KEY: &str = "strict";

/// Configuration for wrapping views into [`TemplatableView`]s
#[derive(Clone)]
pub struct Templatable {
	default_template: String,
	default_context: Context,
	renderer: Option<Arc<dyn TemplateRenderer>>,
	registry: Arc<TemplateRegistry>,
	strict: bool,
}

impl Templatable {
	/// Wrap views rendering `default_template` unless overridden
	///
	/// Uses the global registry and the default renderer until configured
	/// otherwise. An empty name disables registration; such views must
	/// return a template override or pass one per call.
	pub fn new(default_template: impl Into<String>) -> Self {
		Self {
			default_template: default_template.into(),
			default_context: Context::new(),
			renderer: None,
			registry: TemplateRegistry::global(),
			strict: false,
		}
	}

	/// Build from settings: a Tera renderer over `settings.dirs` and
	/// strict mode from `settings.strict`
	///
	/// # Errors
	///
	/// Returns the renderer's load error if the template directories cannot
	/// be loaded.
	pub fn with_settings(
		default_template: impl Into<String>,
		settings: &TemplateSettings,
	) -> TemplateResult<Self> {
		let renderer = TeraTemplateRenderer::from_settings(settings)?;
		Ok(Self::new(default_template)
			.with_renderer(renderer)
			.strict(settings.strict))
	}

	/// Context every call starts from; each call gets its own copy
	pub fn with_default_context(mut self, context: Context) -> Self {
		self.default_context = context;
		self
	}

	/// Render through `renderer` instead of the default renderer
	pub fn with_renderer<R>(mut self, renderer: R) -> Self
	where
		R: TemplateRenderer + 'static,
	{
		self.renderer = Some(Arc::new(renderer));
		self
	}

	/// Render through an already shared renderer
	pub fn with_shared_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
		self.renderer = Some(renderer);
		self
	}

	/// Render through a closure
	///
	/// # Examples
	///
	/// ```
	/// use templatable_views::{fn_view, Templatable, TemplateRegistry, ViewOutcome};
	/// use templatable_templates::Context;
	/// use templatable_http::{Request, Response};
	/// use std::sync::Arc;
	///
	/// let view = Templatable::new("card.html")
	///     .with_registry(Arc::new(TemplateRegistry::new()))
	///     .with_render_fn(|_request, template, context| {
	///         Ok(Response::ok().with_body(format!("{}:{}", template, context.len())))
	///     })
	///     .wrap(fn_view("card", |_, _| Ok(ViewOutcome::Context(Context::new().with("id", 1)))));
	///
	/// let request = Request::builder().build().unwrap();
	/// assert_eq!(view.handle(&request).unwrap().body_text(), "card.html:1");
	/// ```
	pub fn with_render_fn<F>(self, render: F) -> Self
	where
		F: Fn(&Request, &str, Context) -> TemplateResult<Response> + Send + Sync + 'static,
	{
		self.with_renderer(render)
	}

	/// Register templates in `registry` instead of the global registry
	pub fn with_registry(mut self, registry: Arc<TemplateRegistry>) -> Self {
		self.registry = registry;
		self
	}

	/// Add `strict = true` to contexts rendered from [`ViewOutcome::Context`]
	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	pub fn default_template(&self) -> &str {
		&self.default_template
	}

	/// Registry that wrapping records templates in
	pub fn registry(&self) -> &Arc<TemplateRegistry> {
		&self.registry
	}

	/// Wrap `view`, registering it under the default template
	pub fn wrap<V>(&self, view: V) -> TemplatableView
	where
		V: View + 'static,
	{
		self.wrap_shared(Arc::new(view))
	}

	/// Wrap an already shared view, registering it under the default template
	pub fn wrap_shared(&self, view: Arc<dyn View>) -> TemplatableView {
		if !self.default_template.is_empty() {
			self.registry
				.register(&self.default_template, Some(Arc::clone(&view)));
		}

		TemplatableView {
			view,
			default_template: self.default_template.clone(),
			default_context: self.default_context.clone(),
			renderer: self.renderer.clone(),
			strict: self.strict,
		}
	}
}

impl fmt::Debug for Templatable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Templatable")
			.field("default_template", &self.default_template)
			.field("default_context", &self.default_context)
			.field("custom_renderer", &self.renderer.is_some())
			.field("strict", &self.strict)
			.finish()
	}
}

/// A view whose page data is rendered through a template
#[derive(Clone)]
pub struct TemplatableView {
	view: Arc<dyn View>,
	default_template: String,
	default_context: Context,
	renderer: Option<Arc<dyn TemplateRenderer>>,
	strict: bool,
}

impl TemplatableView {
	/// Name of the wrapped view
	pub fn name(&self) -> &str {
		self.view.name()
	}

	pub fn inner(&self) -> &Arc<dyn View> {
		&self.view
	}

	pub fn default_template(&self) -> &str {
		&self.default_template
	}

	/// Handle a call and produce the final response
	///
	/// # Errors
	///
	/// Returns [`crate::ViewError::InvalidArgument`] when the reserved
	/// keyword arguments have the wrong shape (the inner view is then not
	/// called), and passes through errors from the inner view and the
	/// renderer unchanged.
	pub fn respond(&self, request: &Request, mut args: ViewArgs) -> ViewResult<Response> {
		let mut context = self.default_context.clone();
		context.update(args.take_context()?);
		let template_name = args
			.take_template_name()?
			.unwrap_or_else(|| self.default_template.clone());

		match self.view.call(request, args)? {
			ViewOutcome::Context(view_context) => {
				context.update(view_context);
				if self.strict {
					context.set(STRICT_CONTEXT_KEY, true);
				}
				tracing::debug!(
					view = self.name(),
					template = %template_name,
					"Rendering view context"
				);
				self.render(request, &template_name, context)
			}
			ViewOutcome::TemplateOverride(template_override, view_context) => {
				context.update(view_context);
				tracing::debug!(
					view = self.name(),
					template = %template_override,
					"Rendering view template override"
				);
				self.render(request, &template_override, context)
			}
			ViewOutcome::Response(response) => {
				tracing::debug!(
					view = self.name(),
					status = %response.status,
					"Passing view response through"
				);
				Ok(response)
			}
		}
	}

	/// [`TemplatableView::respond`] without call arguments
	pub fn handle(&self, request: &Request) -> ViewResult<Response> {
		self.respond(request, ViewArgs::new())
	}

	fn render(
		&self,
		request: &Request,
		template_name: &str,
		context: Context,
	) -> ViewResult<Response> {
		let response = match &self.renderer {
			Some(renderer) => renderer.render(request, template_name, context)?,
			None => default_renderer().render(request, template_name, context)?,
		};
		Ok(response)
	}
}

impl View for TemplatableView {
	fn name(&self) -> &str {
		self.view.name()
	}

	fn call(&self, request: &Request, args: ViewArgs) -> ViewResult<ViewOutcome> {
		self.respond(request, args).map(ViewOutcome::Response)
	}
}

impl fmt::Debug for TemplatableView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TemplatableView")
			.field("view", &self.view.name())
			.field("default_template", &self.default_template)
			.field("strict", &self.strict)
			.finish()
	}
}
