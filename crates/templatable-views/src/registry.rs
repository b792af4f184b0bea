//! Template usage registry
//!
//! Remembers which templates are rendered by which views. Entries are added
//! when a view is wrapped, never when it handles a request, and are never
//! removed. Precompilation and deployment tooling reads the registry to find
//! every template the application relies on.
//!
//! Most applications use the process-wide [`TemplateRegistry::global`]
//! instance. Tests construct their own with [`TemplateRegistry::new`] and
//! pass it to [`crate::Templatable::with_registry`].

use crate::view::View;
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock};
use templatable_templates::TeraTemplateRenderer;

static GLOBAL_REGISTRY: Lazy<Arc<TemplateRegistry>> =
	Lazy::new(|| Arc::new(TemplateRegistry::new()));

/// Registry of templates in use and the views referencing them
#[derive(Default)]
pub struct TemplateRegistry {
	templates: RwLock<HashSet<String>>,
	views: RwLock<HashMap<String, Vec<Arc<dyn View>>>>,
}

impl TemplateRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// The process-wide registry, created on first use
	pub fn global() -> Arc<TemplateRegistry> {
		Arc::clone(&GLOBAL_REGISTRY)
	}

	/// Record that `template` is in use, optionally by `view`
	///
	/// A non-empty template name is added to the set of registered templates;
	/// adding it again has no effect. A given view is appended to the list
	/// kept for `template`, so registering the same pairing twice lists the
	/// view twice.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use templatable_views::{fn_view, TemplateRegistry, View};
	/// use templatable_templates::Context;
	///
	/// let registry = TemplateRegistry::new();
	/// let view: Arc<dyn View> = Arc::new(fn_view("home", |_, _| Ok(Context::new().into())));
	///
	/// registry.register("home.html", Some(view));
	/// registry.register("base.html", None);
	///
	/// assert!(registry.contains("home.html"));
	/// assert!(registry.contains("base.html"));
	/// assert_eq!(registry.registered_view_names("home.html"), vec!["home"]);
	/// ```
	pub fn register(&self, template: &str, view: Option<Arc<dyn View>>) {
		if !template.is_empty() {
			let mut templates = self.templates.write().unwrap_or_else(|e| e.into_inner());
			templates.insert(template.to_string());
		}

		if let Some(view) = view {
			tracing::debug!(template, view = view.name(), "Registered template view");
			let mut views = self.views.write().unwrap_or_else(|e| e.into_inner());
			views.entry(template.to_string()).or_default().push(view);
		}
	}

	/// Snapshot of every registered template name, sorted
	pub fn registered_templates(&self) -> BTreeSet<String> {
		let templates = self.templates.read().unwrap_or_else(|e| e.into_inner());
		templates.iter().cloned().collect()
	}

	/// Views registered for `template`, in registration order
	pub fn registered_views_for_template(&self, template: &str) -> Vec<Arc<dyn View>> {
		let views = self.views.read().unwrap_or_else(|e| e.into_inner());
		views.get(template).cloned().unwrap_or_default()
	}

	/// Names of the views registered for `template`, in registration order
	pub fn registered_view_names(&self, template: &str) -> Vec<String> {
		self.registered_views_for_template(template)
			.iter()
			.map(|view| view.name().to_string())
			.collect()
	}

	pub fn contains(&self, template: &str) -> bool {
		self.templates
			.read()
			.unwrap_or_else(|e| e.into_inner())
			.contains(template)
	}

	/// Number of registered templates
	pub fn len(&self) -> usize {
		self.templates
			.read()
			.unwrap_or_else(|e| e.into_inner())
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Compare the registered templates against what `renderer` can load
	///
	/// # Examples
	///
	/// ```
	/// use templatable_views::TemplateRegistry;
	/// use templatable_templates::TeraTemplateRenderer;
	///
	/// let registry = TemplateRegistry::new();
	/// registry.register("index.html", None);
	/// registry.register("about.html", None);
	///
	/// let renderer = TeraTemplateRenderer::from_raw_templates([("index.html", "hi")]).unwrap();
	/// let report = registry.check_templates(&renderer);
	///
	/// assert_eq!(report.found, vec!["index.html"]);
	/// assert_eq!(report.missing[0].template, "about.html");
	/// assert!(!report.is_ok());
	/// ```
	pub fn check_templates(&self, renderer: &TeraTemplateRenderer) -> TemplateCheckReport {
		let mut report = TemplateCheckReport::default();

		for template in self.registered_templates() {
			if renderer.has_template(&template) {
				report.found.push(template);
			} else {
				tracing::warn!(template = %template, "Registered template is not loadable");
				let views = self.registered_view_names(&template);
				report.missing.push(MissingTemplate { template, views });
			}
		}

		report
	}
}

impl fmt::Debug for TemplateRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TemplateRegistry")
			.field("templates", &self.registered_templates())
			.finish()
	}
}

/// Result of [`TemplateRegistry::check_templates`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCheckReport {
	/// Registered templates the renderer has loaded
	pub found: Vec<String>,
	/// Registered templates the renderer does not know
	pub missing: Vec<MissingTemplate>,
}

impl TemplateCheckReport {
	/// True when every registered template is loadable
	pub fn is_ok(&self) -> bool {
		self.missing.is_empty()
	}
}

/// A registered template the renderer cannot load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTemplate {
	pub template: String,
	/// Views that declared the template as their default
	pub views: Vec<String>,
}
