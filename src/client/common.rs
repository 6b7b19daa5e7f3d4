//! Shared request parameters and normalization helpers for client operations.

// self
use crate::{
	_prelude::*,
	http::{Headers, Method},
};

/// Header carrying the CSRF protection token on state-mutating requests.
pub const CSRF_HEADER: &str = "X-CSRF-Token";
/// Header carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Per-call description of an outbound request.
///
/// Every optional part follows the same presence rule: `None` and empty values are treated as
/// absent (an empty string for text fields; `null`, `false`, `""`, or `0` for the body).
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Request path; a leading `/` is added when missing.
	pub path: String,
	/// CSRF token attached to non-read methods.
	pub csrf_token: Option<String>,
	/// Caller-supplied headers, copied before composition.
	pub headers: Option<Headers>,
	/// JSON body.
	pub body: Option<Value>,
	/// Origin used instead of the client's base URL for this call only.
	pub base_url: Option<String>,
}
impl ApiRequest {
	/// Creates a request with no token, headers, body, or override.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			csrf_token: None,
			headers: None,
			body: None,
			base_url: None,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Sets the CSRF token applied to non-read methods.
	pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
		self.csrf_token = Some(token.into());

		self
	}

	/// Replaces the caller header mapping.
	pub fn with_headers(mut self, headers: Headers) -> Self {
		self.headers = Some(headers);

		self
	}

	/// Adds a single caller header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.get_or_insert_with(Headers::new).insert(name.into(), value.into());

		self
	}

	/// Attaches a JSON body.
	pub fn with_body(mut self, body: impl Into<Value>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Serializes `payload` into the JSON body.
	pub fn with_json<P>(self, payload: &P) -> serde_json::Result<Self>
	where
		P: ?Sized + Serialize,
	{
		Ok(self.with_body(serde_json::to_value(payload)?))
	}

	/// Overrides the base URL for this request only.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());

		self
	}
}

/// Fixed target of the CSRF token fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrfEndpoint {
	/// HTTP method used for the fetch.
	pub method: Method,
	/// Path appended to the client's base URL.
	pub path: String,
}
impl CsrfEndpoint {
	const DEFAULT_PATH: &'static str = "/session/token";

	/// Creates an endpoint from its parts.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into() }
	}
}
impl Default for CsrfEndpoint {
	fn default() -> Self {
		Self::new(Method::Get, Self::DEFAULT_PATH)
	}
}

/// Returns `value` when it holds a non-empty string.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.is_empty())
}

/// Returns `body` unless it is `null`, `false`, an empty string, or numeric zero.
pub(crate) fn present_body(body: Option<&Value>) -> Option<&Value> {
	body.filter(|body| match body {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::String(text) => !text.is_empty(),
		Value::Number(number) => number.as_f64() != Some(0.),
		Value::Array(_) | Value::Object(_) => true,
	})
}

/// Joins an origin and a path, inserting the leading `/` when the path lacks one.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
	if path.starts_with('/') { format!("{base_url}{path}") } else { format!("{base_url}/{path}") }
}

/// Renders a CSRF response body as the cached token string.
pub(crate) fn token_text(body: Value) -> String {
	match body {
		Value::String(token) => token,
		other => other.to_string(),
	}
}
