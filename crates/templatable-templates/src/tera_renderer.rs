//! Tera-based default renderer
//!
//! [`TeraTemplateRenderer`] is the renderer templatable views use when no
//! override is configured. Rendering a template:
//!
//! 1. builds a request-scoped context from the registered context processors,
//! 2. merges the view's assembled context on top (view values win),
//! 3. renders the template with Tera,
//! 4. wraps the output in an HTML `200 OK` response.
//!
//! # Examples
//!
//! ```
//! use templatable_templates::{Context, TemplateRenderer, TeraTemplateRenderer};
//! use templatable_http::Request;
//!
//! let renderer = TeraTemplateRenderer::from_raw_templates([
//!     ("hello.html", "Hello {{ name }}!"),
//! ]).unwrap();
//!
//! let request = Request::builder().build().unwrap();
//! let response = renderer
//!     .render(&request, "hello.html", Context::new().with("name", "World"))
//!     .unwrap();
//! assert_eq!(response.body_text(), "Hello World!");
//! ```

use crate::context::Context;
use crate::context_processors::{
	ContextProcessorRegistry, debug_context_processor, media_context_processor,
	request_context_processor, static_context_processor,
};
use crate::error::{TemplateError, TemplateResult};
use crate::renderer::TemplateRenderer;
use crate::settings::TemplateSettings;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use templatable_http::{Request, Response};
use tera::Tera;

/// Content type of rendered template responses
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

static DEFAULT_RENDERER: Lazy<Arc<TeraTemplateRenderer>> = Lazy::new(|| {
	let settings = TemplateSettings::from_env();
	match TeraTemplateRenderer::from_settings(&settings) {
		Ok(renderer) => Arc::new(renderer),
		Err(e) => {
			tracing::warn!(
				"Failed to initialize default template renderer, no templates will resolve: {}",
				e
			);
			Arc::new(
				TeraTemplateRenderer::new().with_processors(settings_processors(&settings)),
			)
		}
	}
});

/// Process-wide default renderer
///
/// Built on first use from [`TemplateSettings::from_env`]. If the template
/// directory cannot be loaded a warning is logged and an empty renderer is
/// used, so every render reports [`TemplateError::NotFound`].
pub fn default_renderer() -> Arc<TeraTemplateRenderer> {
	Arc::clone(&DEFAULT_RENDERER)
}

/// Renderer backed by a Tera engine and a context processor registry
pub struct TeraTemplateRenderer {
	tera: Tera,
	processors: ContextProcessorRegistry,
}

impl TeraTemplateRenderer {
	/// Create a renderer with no templates and no context processors
	pub fn new() -> Self {
		Self {
			tera: Tera::default(),
			processors: ContextProcessorRegistry::new(),
		}
	}

	/// Load every file under the configured directories
	///
	/// Each directory is loaded with the glob `<dir>/**/*`. Template names are
	/// paths relative to their directory, using `/` separators
	/// (`blog/detail.html`). When two directories contain the same name, the
	/// directory listed first wins. Templates may extend templates from any
	/// directory listed after their own. The built-in request, static, media
	/// and debug context processors are registered.
	///
	/// # Errors
	///
	/// Returns [`TemplateError::Load`] if a directory is missing and
	/// [`TemplateError::Parse`] if a template does not parse or extends an
	/// unknown parent.
	pub fn from_settings(settings: &TemplateSettings) -> TemplateResult<Self> {
		if let Some(missing) = settings.dirs.iter().find(|dir| !dir.is_dir()) {
			return Err(TemplateError::Load {
				path: missing.clone(),
				message: "not a directory".to_string(),
			});
		}

		// Later directories are loaded first; `extend` keeps existing names.
		let mut merged: Option<Tera> = None;
		for dir in settings.dirs.iter().rev() {
			let glob_pattern = format!("{}/**/*", dir.display());
			let mut tera = Tera::parse(&glob_pattern).map_err(|e| parse_error(dir, e))?;
			if let Some(later) = &merged {
				tera.extend(later).map_err(|e| parse_error(dir, e))?;
			}
			merged = Some(tera);
		}

		let mut tera = merged.unwrap_or_default();
		tera.build_inheritance_chains()
			.map_err(|e| TemplateError::Parse {
				template: join_dirs(&settings.dirs),
				source: e,
			})?;
		if !settings.autoescape {
			tera.autoescape_on(vec![]);
		}

		tracing::info!(
			templates = tera.get_template_names().count(),
			dirs = settings.dirs.len(),
			"Loaded templates"
		);

		Ok(Self {
			tera,
			processors: settings_processors(settings),
		})
	}

	/// Build a renderer from in-memory `(name, source)` pairs
	///
	/// # Errors
	///
	/// Returns [`TemplateError::Parse`] if any template does not parse.
	pub fn from_raw_templates<I, N, S>(templates: I) -> TemplateResult<Self>
	where
		I: IntoIterator<Item = (N, S)>,
		N: AsRef<str>,
		S: AsRef<str>,
	{
		let templates: Vec<(N, S)> = templates.into_iter().collect();
		let mut renderer = Self::new();
		renderer
			.tera
			.add_raw_templates(
				templates
					.iter()
					.map(|(name, source)| (name.as_ref(), source.as_ref())),
			)
			.map_err(|e| TemplateError::Parse {
				template: templates
					.iter()
					.map(|(name, _)| name.as_ref())
					.collect::<Vec<_>>()
					.join(", "),
				source: e,
			})?;
		Ok(renderer)
	}

	/// Add or replace a single template from source
	///
	/// # Errors
	///
	/// Returns [`TemplateError::Parse`] if the template does not parse.
	pub fn add_raw_template(&mut self, name: &str, source: &str) -> TemplateResult<()> {
		self.tera
			.add_raw_template(name, source)
			.map_err(|e| TemplateError::Parse {
				template: name.to_string(),
				source: e,
			})
	}

	/// Replace the context processors consulted on every render
	pub fn with_processors(mut self, processors: ContextProcessorRegistry) -> Self {
		self.processors = processors;
		self
	}

	pub fn processors(&self) -> &ContextProcessorRegistry {
		&self.processors
	}

	/// Whether a template with this name is loaded
	pub fn has_template(&self, name: &str) -> bool {
		self.tera.get_template_names().any(|loaded| loaded == name)
	}

	/// Names of all loaded templates, sorted
	pub fn template_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self
			.tera
			.get_template_names()
			.map(str::to_string)
			.collect();
		names.sort();
		names
	}

	/// Render a template to a string
	///
	/// Context processor values are computed for `request` first and
	/// `context` is merged over them.
	///
	/// # Errors
	///
	/// Returns [`TemplateError::NotFound`] for unknown templates and
	/// [`TemplateError::Render`] when Tera fails to render.
	pub fn render_to_string(
		&self,
		request: &Request,
		template_name: &str,
		context: Context,
	) -> TemplateResult<String> {
		let mut full_context = self.processors.get_context(request);
		full_context.update(context);
		let tera_context = full_context.to_tera()?;

		self.tera
			.render(template_name, &tera_context)
			.map_err(|e| match e.kind {
				tera::ErrorKind::TemplateNotFound(_) => {
					TemplateError::NotFound(template_name.to_string())
				}
				_ => TemplateError::Render {
					template: template_name.to_string(),
					source: e,
				},
			})
	}
}

impl Default for TeraTemplateRenderer {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for TeraTemplateRenderer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TeraTemplateRenderer")
			.field("templates", &self.template_names())
			.field("processors", &self.processors)
			.finish()
	}
}

impl TemplateRenderer for TeraTemplateRenderer {
	fn render(
		&self,
		request: &Request,
		template_name: &str,
		context: Context,
	) -> TemplateResult<Response> {
		let html = self.render_to_string(request, template_name, context)?;
		Ok(Response::ok()
			.with_content_type(HTML_CONTENT_TYPE)
			.with_body(html))
	}
}

fn settings_processors(settings: &TemplateSettings) -> ContextProcessorRegistry {
	let processors = ContextProcessorRegistry::new();

	let static_url = settings.static_url.clone();
	let media_url = settings.media_url.clone();
	let debug = settings.debug;

	processors.register(request_context_processor);
	processors.register(move |_| static_context_processor(&static_url));
	processors.register(move |_| media_context_processor(&media_url));
	processors.register(move |_| debug_context_processor(debug));
	processors
}

fn parse_error(dir: &Path, source: tera::Error) -> TemplateError {
	TemplateError::Parse {
		template: dir.display().to_string(),
		source,
	}
}

fn join_dirs(dirs: &[PathBuf]) -> String {
	dirs.iter()
		.map(|dir| dir.display().to_string())
		.collect::<Vec<_>>()
		.join(", ")
}
