//! Context processors for templates
//!
//! Context processors contribute request-scoped variables that the default
//! renderer makes available to every template before the view's own context
//! is merged in. This is useful for:
//! - Request information (path, method)
//! - Site-wide settings (static and media URLs, debug flag)

use crate::context::Context;
use std::sync::{Arc, RwLock};
use templatable_http::Request;

/// Context processor function type
///
/// A context processor receives the current request and returns the
/// variables it contributes.
pub type ContextProcessor = Arc<dyn Fn(&Request) -> Context + Send + Sync>;

/// Registry for context processors
#[derive(Clone)]
pub struct ContextProcessorRegistry {
	processors: Arc<RwLock<Vec<ContextProcessor>>>,
}

impl ContextProcessorRegistry {
	/// Create a new context processor registry
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::ContextProcessorRegistry;
	///
	/// let registry = ContextProcessorRegistry::new();
	/// assert!(registry.is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			processors: Arc::new(RwLock::new(Vec::new())),
		}
	}

	/// Register a context processor
	///
	/// Processors run in registration order; later processors override keys
	/// set by earlier ones.
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::{Context, ContextProcessorRegistry};
	///
	/// let registry = ContextProcessorRegistry::new();
	/// registry.register(|_request| Context::new().with("site_name", "My Site"));
	/// assert_eq!(registry.len(), 1);
	/// ```
	pub fn register<F>(&self, processor: F)
	where
		F: Fn(&Request) -> Context + Send + Sync + 'static,
	{
		let mut processors = self.processors.write().unwrap_or_else(|e| e.into_inner());
		processors.push(Arc::new(processor));
	}

	/// Get all context variables from registered processors for `request`
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::{Context, ContextProcessorRegistry};
	/// use templatable_http::Request;
	///
	/// let registry = ContextProcessorRegistry::new();
	/// registry.register(|request| Context::new().with("path", request.path()));
	///
	/// let request = Request::builder().uri("/about/").build().unwrap();
	/// let context = registry.get_context(&request);
	/// assert_eq!(context.get("path").unwrap(), "/about/");
	/// ```
	pub fn get_context(&self, request: &Request) -> Context {
		let processors = self.processors.read().unwrap_or_else(|e| e.into_inner());

		let mut context = Context::new();
		for processor in processors.iter() {
			context.update(processor(request));
		}
		context
	}

	pub fn len(&self) -> usize {
		self.processors
			.read()
			.unwrap_or_else(|e| e.into_inner())
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Clear all registered processors
	pub fn clear(&self) {
		self.processors
			.write()
			.unwrap_or_else(|e| e.into_inner())
			.clear();
	}
}

impl Default for ContextProcessorRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ContextProcessorRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContextProcessorRegistry")
			.field("processors", &self.len())
			.finish()
	}
}

/// Built-in context processor for debug information
///
/// Provides:
/// - `DEBUG`: Whether debug mode is enabled
///
/// # Examples
///
/// ```
/// use templatable_templates::debug_context_processor;
///
/// let context = debug_context_processor(true);
/// assert_eq!(context.get("DEBUG").unwrap(), &serde_json::json!(true));
/// ```
pub fn debug_context_processor(debug: bool) -> Context {
	Context::new().with("DEBUG", debug)
}

/// Built-in context processor for static files
///
/// Provides:
/// - `STATIC_URL`: Base URL for static files
pub fn static_context_processor(static_url: &str) -> Context {
	Context::new().with("STATIC_URL", static_url)
}

/// Built-in context processor for media files
///
/// Provides:
/// - `MEDIA_URL`: Base URL for media files
pub fn media_context_processor(media_url: &str) -> Context {
	Context::new().with("MEDIA_URL", media_url)
}

/// Built-in context processor for request information
///
/// Provides:
/// - `REQUEST_PATH`: Current request path
/// - `REQUEST_METHOD`: HTTP method (GET, POST, etc.)
pub fn request_context_processor(request: &Request) -> Context {
	Context::new()
		.with("REQUEST_PATH", request.path())
		.with("REQUEST_METHOD", request.method.as_str())
}
