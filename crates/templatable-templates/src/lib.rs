//! # Templatable Templates
//!
//! Template context, context processors and renderers used by templatable
//! views.
//!
//! ## Overview
//!
//! - [`Context`]: mapping of template variables, merged last-write-wins
//! - [`ContextProcessorRegistry`]: request-aware processors contributing
//!   variables to every render
//! - [`TemplateRenderer`]: the `(request, template, context) -> response`
//!   capability; closures of that shape qualify
//! - [`TeraTemplateRenderer`]: the default renderer, built from
//!   [`TemplateSettings`]
//! - [`TemplateError`]: error type, including the "template not found" signal

pub mod context;
pub mod context_processors;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod tera_renderer;

pub use context::{Context, value_kind};
pub use context_processors::{
	ContextProcessor, ContextProcessorRegistry, debug_context_processor, media_context_processor,
	request_context_processor, static_context_processor,
};
pub use error::{TemplateError, TemplateResult};
pub use renderer::TemplateRenderer;
pub use settings::{DEBUG_ENV, TEMPLATE_DIR_ENV, TemplateSettings};
pub use tera_renderer::{HTML_CONTENT_TYPE, TeraTemplateRenderer, default_renderer};
