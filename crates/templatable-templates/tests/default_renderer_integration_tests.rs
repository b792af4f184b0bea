//! Integration tests for the process-wide default renderer
//!
//! The default renderer is built once per process, so this binary holds a
//! single test that configures the environment before first use.

use hyper::StatusCode;
use rstest::rstest;
use serial_test::serial;
use std::fs;
use templatable_http::Request;
use templatable_templates::{
	Context, DEBUG_ENV, HTML_CONTENT_TYPE, TEMPLATE_DIR_ENV, TemplateRenderer, default_renderer,
};

#[rstest]
#[serial(template_env)]
fn test_default_renderer_reads_template_dir_from_env() {
	// Arrange
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir_all(dir.path().join("pages")).unwrap();
	fs::write(
		dir.path().join("pages").join("hello.html"),
		"<p>{{ greeting }} {{ REQUEST_METHOD }} {{ DEBUG }}</p>",
	)
	.unwrap();
	unsafe {
		std::env::set_var(TEMPLATE_DIR_ENV, dir.path());
		std::env::set_var(DEBUG_ENV, "true");
	}
	let request = Request::builder().uri("/hello/").build().unwrap();

	// Act
	let renderer = default_renderer();
	let response = renderer
		.render(
			&request,
			"pages/hello.html",
			Context::new().with("greeting", "Hello"),
		)
		.unwrap();
	let missing = renderer.render(&request, "pages/missing.html", Context::new());

	// Assert
	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		response.headers.get("content-type").unwrap(),
		HTML_CONTENT_TYPE
	);
	assert_eq!(response.body_text(), "<p>Hello GET true</p>");
	assert!(missing.unwrap_err().is_not_found());
	assert!(std::sync::Arc::ptr_eq(&renderer, &default_renderer()));

	unsafe {
		std::env::remove_var(TEMPLATE_DIR_ENV);
		std::env::remove_var(DEBUG_ENV);
	}
}
