//! # Templatable Views
//!
//! Adapter letting views return plain page data instead of building
//! responses.
//!
//! A view wrapped by [`Templatable`] returns one of three outcomes:
//!
//! - [`ViewOutcome::Context`]: rendered with the effective template
//! - [`ViewOutcome::TemplateOverride`]: rendered with the template it names
//! - [`ViewOutcome::Response`]: returned unchanged
//!
//! Callers may pass `context` and `template_name` keyword arguments to
//! adjust a single call. Wrapping a view records its default template in the
//! [`TemplateRegistry`] so tooling can discover every template in use.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use templatable_views::{fn_view, Templatable, TemplateRegistry, ViewArgs, ViewOutcome};
//! use templatable_templates::{Context, TeraTemplateRenderer};
//! use templatable_http::Request;
//!
//! let renderer = TeraTemplateRenderer::from_raw_templates([
//!     ("list.html", "{{ title }}: {{ items | length }}"),
//!     ("empty.html", "{{ title }}: nothing here"),
//! ]).unwrap();
//!
//! let view = Templatable::new("list.html")
//!     .with_default_context(Context::new().with("title", "Inbox"))
//!     .with_renderer(renderer)
//!     .with_registry(Arc::new(TemplateRegistry::new()))
//!     .wrap(fn_view("inbox", |_request, _args| {
//!         let items: Vec<u32> = Vec::new();
//!         if items.is_empty() {
//!             return Ok(ViewOutcome::template("empty.html", Context::new()));
//!         }
//!         Ok(ViewOutcome::Context(Context::new().with("items", items)))
//!     }));
//!
//! let request = Request::builder().build().unwrap();
//! let response = view.respond(&request, ViewArgs::new()).unwrap();
//! assert_eq!(response.body_text(), "Inbox: nothing here");
//! ```

pub mod args;
pub mod error;
pub mod registry;
pub mod templatable;
pub mod view;

pub use args::{CONTEXT_KWARG, TEMPLATE_NAME_KWARG, ViewArgs};
pub use error::{ViewError, ViewResult};
pub use registry::{MissingTemplate, TemplateCheckReport, TemplateRegistry};
pub use templatable::{STRICT_CONTEXT_KEY, Templatable, TemplatableView};
pub use view::{FnView, View, ViewOutcome, fn_view};
