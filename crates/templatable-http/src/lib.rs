//! # Templatable HTTP
//!
//! Minimal request and response types shared by the template renderer and
//! the view adapter. Both are plain values built on `hyper` header, method and
//! status types, so views can be exercised without a running server.
//!
//! ## Example
//!
//! ```
//! use templatable_http::{Request, Response};
//! use hyper::{Method, StatusCode};
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/articles/?page=2")
//!     .build()
//!     .unwrap();
//! assert_eq!(request.path(), "/articles/");
//!
//! let response = Response::ok().with_body("Hello");
//! assert_eq!(response.status, StatusCode::OK);
//! ```

pub mod request;
pub mod response;

pub use request::{Request, RequestBuilder, RequestError};
pub use response::Response;
