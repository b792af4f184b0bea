//! Template context
//!
//! A [`Context`] is the mapping of variable names to values handed to a
//! renderer together with a template name. Values are `serde_json::Value`s so
//! any `Serialize` type can be placed in a context.

use crate::error::{TemplateError, TemplateResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Mapping of template variable names to values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
	vars: Map<String, Value>,
}

impl Context {
	/// Create an empty context
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::Context;
	///
	/// let context = Context::new();
	/// assert!(context.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a serializable value, replacing any existing value for `key`
	///
	/// # Errors
	///
	/// Returns [`TemplateError::InvalidContext`] if `value` cannot be
	/// serialized.
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::Context;
	///
	/// let mut context = Context::new();
	/// context.insert("title", &"Welcome").unwrap();
	/// assert_eq!(context.get("title").unwrap(), "Welcome");
	/// ```
	pub fn insert<T: Serialize + ?Sized>(
		&mut self,
		key: impl Into<String>,
		value: &T,
	) -> TemplateResult<()> {
		let key = key.into();
		let value = serde_json::to_value(value)
			.map_err(|e| TemplateError::InvalidContext(format!("{}: {}", key, e)))?;
		self.vars.insert(key, value);
		Ok(())
	}

	/// Insert an already converted JSON value
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.vars.insert(key.into(), value.into());
	}

	/// Builder-style [`Context::set`]
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::Context;
	///
	/// let context = Context::new().with("page", 2).with("title", "Archive");
	/// assert_eq!(context.len(), 2);
	/// ```
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.set(key, value);
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.vars.get(key)
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.vars.remove(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.vars.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.vars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vars.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.vars.iter()
	}

	/// Merge `other` into this context; keys from `other` win
	///
	/// # Examples
	///
	/// ```
	/// use templatable_templates::Context;
	/// use serde_json::json;
	///
	/// let mut context = Context::new().with("a", 1).with("b", 2);
	/// context.update(Context::new().with("b", 3).with("c", 4));
	///
	/// assert_eq!(context.get("a"), Some(&json!(1)));
	/// assert_eq!(context.get("b"), Some(&json!(3)));
	/// assert_eq!(context.get("c"), Some(&json!(4)));
	/// ```
	pub fn update(&mut self, other: Context) {
		self.vars.extend(other.vars);
	}

	pub fn into_inner(self) -> Map<String, Value> {
		self.vars
	}

	/// Convert into a Tera rendering context
	///
	/// # Errors
	///
	/// Returns [`TemplateError::InvalidContext`] if Tera rejects the mapping.
	pub fn to_tera(&self) -> TemplateResult<tera::Context> {
		tera::Context::from_serialize(&self.vars)
			.map_err(|e| TemplateError::InvalidContext(e.to_string()))
	}
}

impl From<Map<String, Value>> for Context {
	fn from(vars: Map<String, Value>) -> Self {
		Self { vars }
	}
}

impl TryFrom<Value> for Context {
	type Error = TemplateError;

	/// Only JSON objects convert; anything else is not a mapping.
	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(vars) => Ok(Self { vars }),
			other => Err(TemplateError::InvalidContext(format!(
				"expected an object, got {}",
				value_kind(&other)
			))),
		}
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			vars: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl IntoIterator for Context {
	type Item = (String, Value);
	type IntoIter = serde_json::map::IntoIter;

	fn into_iter(self) -> Self::IntoIter {
		self.vars.into_iter()
	}
}

/// Short description of a JSON value's kind, for error messages
pub fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
