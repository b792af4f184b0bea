//! # Templatable View
//!
//! Let views return page data and have a template render it.
//!
//! A view wrapped by [`Templatable`] may return:
//!
//! - a [`Context`], rendered with the view's default template
//! - a template name paired with a [`Context`], rendered with that template
//! - a finished [`Response`], passed through untouched
//!
//! Callers can add `context` and swap `template_name` per call without the
//! view knowing. Every wrapped view records its default template in the
//! [`TemplateRegistry`], so tooling can list every template the application
//! uses and check that each one loads.
//!
//! ## Crates
//!
//! - [`http`]: minimal request and response types
//! - [`templates`]: context, context processors, settings and the Tera renderer
//! - [`views`]: the view trait, the templatable adapter and the registry
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//! use templatable_view::prelude::*;
//!
//! let renderer = TeraTemplateRenderer::from_raw_templates([
//!     ("profile.html", "{{ user }} ({{ role }})"),
//! ]).unwrap();
//!
//! let profile = Templatable::new("profile.html")
//!     .with_default_context(Context::new().with("role", "member"))
//!     .with_renderer(renderer)
//!     .with_registry(Arc::new(TemplateRegistry::new()))
//!     .wrap(fn_view("profile", |_request, args| {
//!         let user = args.get_str("user").unwrap_or("anonymous").to_string();
//!         Ok(ViewOutcome::Context(Context::new().with("user", user)))
//!     }));
//!
//! let request = Request::builder().uri("/profile/").build().unwrap();
//! let response = profile
//!     .respond(&request, ViewArgs::new().kwarg("user", "ada").with_context(
//!         Context::new().with("role", "admin"),
//!     ))
//!     .unwrap();
//! assert_eq!(response.body_text(), "ada (admin)");
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

pub use templatable_http as http;
pub use templatable_templates as templates;
pub use templatable_views as views;

pub use templatable_http::{Request, RequestBuilder, Response};
pub use templatable_templates::{
	Context, ContextProcessorRegistry, TemplateError, TemplateRenderer, TemplateResult,
	TemplateSettings, TeraTemplateRenderer, default_renderer,
};
pub use templatable_views::{
	FnView, MissingTemplate, Templatable, TemplatableView, TemplateCheckReport, TemplateRegistry,
	View, ViewArgs, ViewError, ViewOutcome, ViewResult, fn_view,
};

/// Record `template` in the global registry, optionally as used by `view`
///
/// Empty template names are not recorded as templates.
pub fn register_template(template: &str, view: Option<Arc<dyn View>>) {
	TemplateRegistry::global().register(template, view);
}

/// Every template in the global registry, sorted
pub fn get_registered_templates() -> BTreeSet<String> {
	TemplateRegistry::global().registered_templates()
}

/// Views registered for `template` in the global registry
///
/// Unknown templates yield an empty list.
pub fn get_registered_template_views(template: &str) -> Vec<Arc<dyn View>> {
	TemplateRegistry::global().registered_views_for_template(template)
}

/// Commonly used types
pub mod prelude {
	pub use crate::{
		Context, Request, Response, Templatable, TemplatableView, TemplateError,
		TemplateRegistry, TemplateRenderer, TemplateSettings, TeraTemplateRenderer, View,
		ViewArgs, ViewError, ViewOutcome, ViewResult, fn_view, get_registered_template_views,
		get_registered_templates, register_template,
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	fn stub_view(name: &str) -> Arc<dyn View> {
		Arc::new(fn_view(name, |_request, _args| {
			Ok(ViewOutcome::Context(Context::new()))
		}))
	}

	#[rstest]
	#[serial(global_registry)]
	fn test_register_template_is_visible_through_free_functions() {
		// Arrange
		let view = stub_view("facade_view");

		// Act
		register_template("facade/page.html", Some(Arc::clone(&view)));
		register_template("facade/page.html", None);

		// Assert
		assert!(get_registered_templates().contains("facade/page.html"));
		let views = get_registered_template_views("facade/page.html");
		assert_eq!(views.len(), 1);
		assert!(Arc::ptr_eq(&views[0], &view));
	}

	#[rstest]
	#[serial(global_registry)]
	fn test_unknown_template_has_no_views() {
		assert!(get_registered_template_views("facade/never.html").is_empty());
	}

	#[rstest]
	#[serial(global_registry)]
	fn test_empty_template_name_is_ignored() {
		// Act
		register_template("", None);

		// Assert
		assert!(!get_registered_templates().contains(""));
	}
}
