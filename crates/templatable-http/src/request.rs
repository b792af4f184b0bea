//! HTTP request representation handed to views and renderers.

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};
use thiserror::Error;

/// Errors raised while assembling a [`Request`] through [`RequestBuilder`].
#[derive(Debug, Error)]
pub enum RequestError {
	#[error("invalid request URI '{uri}': {message}")]
	InvalidUri { uri: String, message: String },
}

/// HTTP Request representation
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Request {
	/// Create a new request from its raw parts
	///
	/// # Examples
	///
	/// ```
	/// use templatable_http::Request;
	/// use hyper::{HeaderMap, Method, Uri, Version};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	/// assert_eq!(request.method, Method::GET);
	/// ```
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
		}
	}

	/// Start building a request. Defaults to `GET /` over HTTP/1.1.
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// Returns the path component of the request URI
	///
	/// # Examples
	///
	/// ```
	/// use templatable_http::Request;
	///
	/// let request = Request::builder().uri("/users/42/?tab=posts").build().unwrap();
	/// assert_eq!(request.path(), "/users/42/");
	/// ```
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Returns the raw query string, if any
	///
	/// # Examples
	///
	/// ```
	/// use templatable_http::Request;
	///
	/// let request = Request::builder().uri("/search?q=rust").build().unwrap();
	/// assert_eq!(request.query_string(), Some("q=rust"));
	/// ```
	pub fn query_string(&self) -> Option<&str> {
		self.uri.query()
	}
}

/// Builder for [`Request`]
#[derive(Debug)]
pub struct RequestBuilder {
	method: Method,
	uri: String,
	version: Version,
	headers: HeaderMap,
	body: Bytes,
}

impl Default for RequestBuilder {
	fn default() -> Self {
		Self {
			method: Method::GET,
			uri: "/".to_string(),
			version: Version::HTTP_11,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = version;
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Finish the request, validating the URI
	///
	/// # Errors
	///
	/// Returns [`RequestError::InvalidUri`] when the URI cannot be parsed.
	pub fn build(self) -> Result<Request, RequestError> {
		let uri = self
			.uri
			.parse::<Uri>()
			.map_err(|e| RequestError::InvalidUri {
				uri: self.uri.clone(),
				message: e.to_string(),
			})?;

		Ok(Request::new(
			self.method,
			uri,
			self.version,
			self.headers,
			self.body,
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_builder_defaults() {
		// Act
		let request = Request::builder().build().unwrap();

		// Assert
		assert_eq!(request.method, Method::GET);
		assert_eq!(request.path(), "/");
		assert_eq!(request.version, Version::HTTP_11);
		assert!(request.body.is_empty());
		assert_eq!(request.query_string(), None);
	}

	#[rstest]
	fn test_builder_sets_method_and_body() {
		// Act
		let request = Request::builder()
			.method(Method::POST)
			.uri("/comments/")
			.body("text=hi")
			.build()
			.unwrap();

		// Assert
		assert_eq!(request.method, Method::POST);
		assert_eq!(request.body, Bytes::from("text=hi"));
	}

	#[rstest]
	fn test_builder_rejects_invalid_uri() {
		// Act
		let result = Request::builder().uri("http://[bad").build();

		// Assert
		assert!(matches!(result, Err(RequestError::InvalidUri { .. })));
	}
}
