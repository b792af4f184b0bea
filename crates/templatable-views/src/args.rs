//! Call arguments passed to views
//!
//! A view call carries positional arguments (typically captured URL
//! segments) and keyword arguments. Two keyword names are reserved for the
//! templatable adapter and never reach the wrapped view:
//!
//! - [`CONTEXT_KWARG`]: an object merged into the template context
//! - [`TEMPLATE_NAME_KWARG`]: a string overriding the default template

use crate::error::{ViewError, ViewResult};
use serde_json::{Map, Value};
use templatable_templates::{Context, value_kind};

/// Reserved keyword argument carrying extra template context
pub const CONTEXT_KWARG: &str = "context";

/// Reserved keyword argument overriding the template name
pub const TEMPLATE_NAME_KWARG: &str = "template_name";

/// Positional and keyword arguments of a view call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewArgs {
	pub args: Vec<Value>,
	pub kwargs: Map<String, Value>,
}

impl ViewArgs {
	/// Empty argument list
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a positional argument
	pub fn arg(mut self, value: impl Into<Value>) -> Self {
		self.args.push(value.into());
		self
	}

	/// Set a keyword argument
	///
	/// # Examples
	///
	/// ```
	/// use templatable_views::ViewArgs;
	///
	/// let args = ViewArgs::new().arg(42).kwarg("slug", "hello-world");
	/// assert_eq!(args.get_str("slug"), Some("hello-world"));
	/// assert_eq!(args.positional(0).and_then(|v| v.as_i64()), Some(42));
	/// ```
	pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.kwargs.insert(name.into(), value.into());
		self
	}

	/// Pass extra template context for this call
	pub fn with_context(self, context: Context) -> Self {
		self.kwarg(CONTEXT_KWARG, Value::Object(context.into_inner()))
	}

	/// Override the template used for this call
	pub fn with_template_name(self, template_name: impl Into<String>) -> Self {
		self.kwarg(TEMPLATE_NAME_KWARG, template_name.into())
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.kwargs.get(name)
	}

	pub fn get_str(&self, name: &str) -> Option<&str> {
		self.kwargs.get(name).and_then(Value::as_str)
	}

	pub fn positional(&self, index: usize) -> Option<&Value> {
		self.args.get(index)
	}

	/// Remove the reserved `context` keyword argument
	///
	/// A missing argument yields an empty context.
	pub(crate) fn take_context(&mut self) -> ViewResult<Context> {
		match self.kwargs.remove(CONTEXT_KWARG) {
			None => Ok(Context::new()),
			Some(Value::Object(vars)) => Ok(Context::from(vars)),
			Some(other) => Err(ViewError::InvalidArgument {
				name: CONTEXT_KWARG,
				expected: "an object",
				actual: value_kind(&other),
			}),
		}
	}

	/// Remove the reserved `template_name` keyword argument
	pub(crate) fn take_template_name(&mut self) -> ViewResult<Option<String>> {
		match self.kwargs.remove(TEMPLATE_NAME_KWARG) {
			None => Ok(None),
			Some(Value::String(name)) => Ok(Some(name)),
			Some(other) => Err(ViewError::InvalidArgument {
				name: TEMPLATE_NAME_KWARG,
				expected: "a string",
				actual: value_kind(&other),
			}),
		}
	}
}
