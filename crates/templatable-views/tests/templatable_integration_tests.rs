//! Integration tests for templatable views
//!
//! Covers context merging, template overrides, response pass-through and
//! registration on wrap, using both a recording renderer and Tera.

use hyper::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use templatable_http::{Request, Response};
use templatable_templates::{
	Context, HTML_CONTENT_TYPE, TemplateRenderer, TemplateResult, TemplateSettings,
	TeraTemplateRenderer,
};
use templatable_views::{
	CONTEXT_KWARG, Templatable, TemplateRegistry, View, ViewArgs, ViewError, ViewOutcome, fn_view,
};

/// One renderer invocation
#[derive(Debug, Clone)]
struct RenderCall {
	template: String,
	context: Context,
}

/// Renderer that records its calls and answers with the template name
#[derive(Clone, Default)]
struct RecordingRenderer {
	calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl RecordingRenderer {
	fn calls(&self) -> Vec<RenderCall> {
		self.calls.lock().unwrap().clone()
	}

	fn last(&self) -> RenderCall {
		self.calls().pop().expect("renderer was not called")
	}
}

impl TemplateRenderer for RecordingRenderer {
	fn render(
		&self,
		_request: &Request,
		template_name: &str,
		context: Context,
	) -> TemplateResult<Response> {
		self.calls.lock().unwrap().push(RenderCall {
			template: template_name.to_string(),
			context,
		});
		Ok(Response::ok().with_body(format!("rendered {}", template_name)))
	}
}

fn create_test_request(path: &str) -> Request {
	Request::builder().uri(path).build().unwrap()
}

fn context_of(value: Value) -> Context {
	Context::try_from(value).unwrap()
}

#[fixture]
fn registry() -> Arc<TemplateRegistry> {
	Arc::new(TemplateRegistry::new())
}

#[fixture]
fn renderer() -> RecordingRenderer {
	RecordingRenderer::default()
}

#[rstest]
fn test_wrap_registers_default_template(registry: Arc<TemplateRegistry>) {
	// Arrange
	let view = fn_view("page", |_, _| Ok(ViewOutcome::Context(Context::new())));

	// Act
	let wrapped = Templatable::new("page.tmpl")
		.with_registry(Arc::clone(&registry))
		.wrap(view);

	// Assert
	assert!(registry.contains("page.tmpl"));
	let views = registry.registered_views_for_template("page.tmpl");
	assert_eq!(views.len(), 1);
	assert!(Arc::ptr_eq(&views[0], wrapped.inner()));
}

#[rstest]
fn test_wrap_without_default_template_registers_nothing(registry: Arc<TemplateRegistry>) {
	// Act
	Templatable::new("")
		.with_registry(Arc::clone(&registry))
		.wrap(fn_view("bare", |_, _| Ok(ViewOutcome::Context(Context::new()))));

	// Assert
	assert!(registry.is_empty());
	assert!(registry.registered_views_for_template("").is_empty());
}

#[rstest]
fn test_calling_views_does_not_register(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view = Templatable::new("page.tmpl")
		.with_registry(Arc::clone(&registry))
		.with_renderer(renderer)
		.wrap(fn_view("page", |_, _| Ok(ViewOutcome::Context(Context::new()))));
	let request = create_test_request("/");

	// Act
	view.handle(&request).unwrap();
	view.respond(&request, ViewArgs::new().with_template_name("other.tmpl"))
		.unwrap();

	// Assert
	assert_eq!(
		registry.registered_templates().into_iter().collect::<Vec<_>>(),
		vec!["page.tmpl"]
	);
}

#[rstest]
fn test_view_context_merges_over_default_context(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view = Templatable::new("page.tmpl")
		.with_default_context(context_of(json!({"b": 2})))
		.with_registry(registry)
		.with_renderer(renderer.clone())
		.wrap(fn_view("page", |_, _| {
			Ok(ViewOutcome::Context(context_of(json!({"a": 1}))))
		}));

	// Act
	let response = view.handle(&create_test_request("/")).unwrap();

	// Assert
	let call = renderer.last();
	assert_eq!(call.template, "page.tmpl");
	assert_eq!(call.context, context_of(json!({"a": 1, "b": 2})));
	assert_eq!(response.body_text(), "rendered page.tmpl");
}

#[rstest]
fn test_view_context_wins_over_default_context(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view = Templatable::new("page.tmpl")
		.with_default_context(context_of(json!({"title": "Default", "lang": "en"})))
		.with_registry(registry)
		.with_renderer(renderer.clone())
		.wrap(fn_view("page", |_, _| {
			Ok(ViewOutcome::Context(context_of(json!({"title": "Mine"}))))
		}));

	// Act
	view.handle(&create_test_request("/")).unwrap();

	// Assert
	assert_eq!(
		renderer.last().context,
		context_of(json!({"title": "Mine", "lang": "en"}))
	);
}

#[rstest]
fn test_template_override_replaces_default_template(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view = Templatable::new("page.tmpl")
		.with_registry(Arc::clone(&registry))
		.with_renderer(renderer.clone())
		.wrap(fn_view("page", |_, _| {
			Ok(ViewOutcome::template("other.tmpl", context_of(json!({"x": 9}))))
		}));

	// Act
	view.handle(&create_test_request("/")).unwrap();

	// Assert
	let call = renderer.last();
	assert_eq!(call.template, "other.tmpl");
	assert_eq!(call.context, context_of(json!({"x": 9})));
	assert!(!registry.contains("other.tmpl"));
}

#[rstest]
fn test_template_override_beats_per_call_template_name(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view = Templatable::new("page.tmpl")
		.with_registry(registry)
		.with_renderer(renderer.clone())
		.wrap(fn_view("page", |_, _| {
			Ok(ViewOutcome::from(("from_view.tmpl", Context::new())))
		}));

	// Act
	view.respond(
		&create_test_request("/"),
		ViewArgs::new().with_template_name("from_caller.tmpl"),
	)
	.unwrap();

	// Assert
	assert_eq!(renderer.last().template, "from_view.tmpl");
}

#[rstest]
fn test_response_passes_through_without_rendering(registry: Arc<TemplateRegistry>) {
	// Arrange
	let render_count = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&render_count);
	let view = Templatable::new("page.tmpl")
		.with_registry(registry)
		.with_render_fn(move |_request, _template, _context| {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(Response::ok())
		})
		.wrap(fn_view("legacy", |_, _| {
			Ok(ViewOutcome::Response(Response::temporary_redirect("/login/")))
		}));

	// Act
	let response = view.handle(&create_test_request("/account/")).unwrap();

	// Assert
	assert_eq!(response, Response::temporary_redirect("/login/"));
	assert_eq!(render_count.load(Ordering::SeqCst), 0);
}

#[rstest]
fn test_per_call_context_and_template_name_are_consumed(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let seen_args = Arc::new(Mutex::new(None));
	let sink = Arc::clone(&seen_args);
	let view = Templatable::new("page.tmpl")
		.with_registry(registry)
		.with_renderer(renderer.clone())
		.wrap(fn_view("page", move |_, args: ViewArgs| {
			*sink.lock().unwrap() = Some(args);
			Ok(ViewOutcome::Context(Context::new()))
		}));
	let args = ViewArgs::new()
		.arg("intro")
		.kwarg("page", 2)
		.with_context(context_of(json!({"c": 3})))
		.with_template_name("override.tmpl");

	// Act
	view.respond(&create_test_request("/"), args).unwrap();

	// Assert
	let call = renderer.last();
	assert_eq!(call.template, "override.tmpl");
	assert_eq!(call.context, context_of(json!({"c": 3})));
	let received = seen_args.lock().unwrap().clone().unwrap();
	assert_eq!(received.args, vec![json!("intro")]);
	assert_eq!(received.kwargs.len(), 1);
	assert_eq!(received.get("page"), Some(&json!(2)));
}

#[rstest]
fn test_context_layers_apply_in_order(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view = Templatable::new("page.tmpl")
		.with_default_context(context_of(json!({"k": "default", "d": 1})))
		.with_registry(registry)
		.with_renderer(renderer.clone())
		.wrap(fn_view("page", |_, _| {
			Ok(ViewOutcome::Context(context_of(json!({"k": "view"}))))
		}));

	// Act
	view.respond(
		&create_test_request("/"),
		ViewArgs::new().with_context(context_of(json!({"k": "call", "c": 2}))),
	)
	.unwrap();

	// Assert
	assert_eq!(
		renderer.last().context,
		context_of(json!({"k": "view", "d": 1, "c": 2}))
	);
}

#[rstest]
fn test_default_context_does_not_leak_between_calls(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view = Templatable::new("page.tmpl")
		.with_default_context(context_of(json!({"base": true})))
		.with_registry(registry)
		.with_renderer(renderer.clone())
		.wrap(fn_view("page", |_, args: ViewArgs| {
			let mut context = Context::new();
			if let Some(id) = args.get("id") {
				context.set("id", id.clone());
			}
			Ok(ViewOutcome::Context(context))
		}));
	let request = create_test_request("/");

	// Act
	view.respond(
		&request,
		ViewArgs::new()
			.kwarg("id", 1)
			.with_context(context_of(json!({"once": "yes"}))),
	)
	.unwrap();
	view.handle(&request).unwrap();

	// Assert
	let calls = renderer.calls();
	assert_eq!(calls.len(), 2);
	assert_eq!(
		calls[0].context,
		context_of(json!({"base": true, "once": "yes", "id": 1}))
	);
	assert_eq!(calls[1].context, context_of(json!({"base": true})));
}

#[rstest]
#[case(CONTEXT_KWARG, json!("not a mapping"))]
#[case(CONTEXT_KWARG, json!(null))]
#[case("template_name", json!(["a.tmpl"]))]
fn test_malformed_reserved_kwargs_fail_before_view_runs(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
	#[case] name: &str,
	#[case] value: Value,
) {
	// Arrange
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let view = Templatable::new("page.tmpl")
		.with_registry(registry)
		.with_renderer(renderer.clone())
		.wrap(fn_view("page", move |_, _| {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(ViewOutcome::Context(Context::new()))
		}));

	// Act
	let result = view.respond(&create_test_request("/"), ViewArgs::new().kwarg(name, value));

	// Assert
	assert!(matches!(result, Err(ViewError::InvalidArgument { .. })));
	assert_eq!(calls.load(Ordering::SeqCst), 0);
	assert!(renderer.calls().is_empty());
}

#[rstest]
fn test_view_errors_propagate_unchanged(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view = Templatable::new("article.tmpl")
		.with_registry(registry)
		.with_renderer(renderer.clone())
		.wrap(fn_view("article", |_, _| {
			Err(ViewError::NotFound("article 7".to_string()))
		}));

	// Act
	let error = view.handle(&create_test_request("/articles/7/")).unwrap_err();

	// Assert
	assert!(matches!(&error, ViewError::NotFound(what) if what == "article 7"));
	assert!(renderer.calls().is_empty());
	assert_eq!(Response::from(error).status, StatusCode::NOT_FOUND);
}

#[rstest]
fn test_wrapped_view_as_trait_object_returns_response_outcome(
	registry: Arc<TemplateRegistry>,
	renderer: RecordingRenderer,
) {
	// Arrange
	let view: Arc<dyn View> = Arc::new(
		Templatable::new("page.tmpl")
			.with_registry(registry)
			.with_renderer(renderer)
			.wrap(fn_view("page", |_, _| Ok(ViewOutcome::Context(Context::new())))),
	);

	// Act
	let outcome = view.call(&create_test_request("/"), ViewArgs::new()).unwrap();

	// Assert
	assert_eq!(view.name(), "page");
	match outcome {
		ViewOutcome::Response(response) => assert_eq!(response.body_text(), "rendered page.tmpl"),
		other => panic!("expected a response, got {:?}", other),
	}
}

#[rstest]
fn test_tera_end_to_end_with_template_directory(registry: Arc<TemplateRegistry>) {
	// Arrange
	let dir = tempfile::tempdir().unwrap();
	fs::write(
		dir.path().join("base.html"),
		"<h1>{{ site }}</h1>{% block content %}{% endblock %}",
	)
	.unwrap();
	fs::create_dir_all(dir.path().join("articles")).unwrap();
	fs::write(
		dir.path().join("articles").join("detail.html"),
		"{% extends \"base.html\" %}{% block content %}<p>{{ title }}</p>{% endblock %}",
	)
	.unwrap();
	let renderer = TeraTemplateRenderer::from_settings(&TemplateSettings::with_dir(dir.path()))
		.unwrap();
	let view = Templatable::new("articles/detail.html")
		.with_default_context(Context::new().with("site", "Newsroom"))
		.with_registry(Arc::clone(&registry))
		.with_renderer(renderer)
		.wrap(fn_view("article_detail", |_, args: ViewArgs| {
			let title = args.get_str("slug").unwrap_or_default().replace('-', " ");
			Ok(ViewOutcome::Context(Context::new().with("title", title)))
		}));

	// Act
	let response = view
		.respond(
			&create_test_request("/articles/big-news/"),
			ViewArgs::new().kwarg("slug", "big-news"),
		)
		.unwrap();

	// Assert
	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		response.headers.get("content-type").unwrap(),
		HTML_CONTENT_TYPE
	);
	assert_eq!(response.body_text(), "<h1>Newsroom</h1><p>big news</p>");
	let report = registry.check_templates(
		&TeraTemplateRenderer::from_settings(&TemplateSettings::with_dir(dir.path())).unwrap(),
	);
	assert!(report.is_ok());
	assert_eq!(report.found, vec!["articles/detail.html"]);
}
