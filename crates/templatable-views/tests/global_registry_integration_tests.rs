//! Tests against the process-wide template registry
//!
//! The global registry is shared by every test in this binary, so template
//! names are unique per test and the tests run serially.

use rstest::rstest;
use serial_test::serial;
use std::sync::Arc;
use templatable_http::{Request, Response};
use templatable_templates::Context;
use templatable_views::{Templatable, TemplateRegistry, ViewOutcome, fn_view};

#[rstest]
#[serial(global_registry)]
fn test_templatable_uses_global_registry_by_default() {
	// Act
	Templatable::new("global/dashboard.html")
		.with_render_fn(|_, _, _| Ok(Response::ok()))
		.wrap(fn_view("dashboard", |_, _| Ok(ViewOutcome::Context(Context::new()))));

	// Assert
	let registry = TemplateRegistry::global();
	assert!(registry.contains("global/dashboard.html"));
	assert_eq!(
		registry.registered_view_names("global/dashboard.html"),
		vec!["dashboard"]
	);
}

#[rstest]
#[serial(global_registry)]
fn test_global_registry_is_shared() {
	// Arrange
	let first = TemplateRegistry::global();
	let second = TemplateRegistry::global();

	// Act
	first.register("global/shared.html", None);

	// Assert
	assert!(Arc::ptr_eq(&first, &second));
	assert!(second.contains("global/shared.html"));
}

#[rstest]
#[serial(global_registry)]
fn test_explicit_registry_leaves_global_untouched() {
	// Arrange
	let local = Arc::new(TemplateRegistry::new());

	// Act
	let view = Templatable::new("global/local_only.html")
		.with_registry(Arc::clone(&local))
		.with_render_fn(|_request: &Request, template: &str, _context: Context| {
			Ok(Response::ok().with_body(template.to_string()))
		})
		.wrap(fn_view("local", |_, _| Ok(ViewOutcome::Context(Context::new()))));

	// Assert
	assert!(local.contains("global/local_only.html"));
	assert!(!TemplateRegistry::global().contains("global/local_only.html"));
	let request = Request::builder().build().unwrap();
	assert_eq!(
		view.handle(&request).unwrap().body_text(),
		"global/local_only.html"
	);
}
