//! Transport primitives for outbound API calls.
//!
//! The module exposes [`Transport`] alongside the wire shapes it exchanges with
//! [`ApiClient`](crate::client::ApiClient): [`OutboundRequest`] on the way out, and either a
//! [`RawResponse`] or a [`Transport::Failure`] on the way back. Downstream crates can integrate
//! any HTTP stack by implementing [`Transport`] and describing their failure type through
//! [`TransportFailure`], which is all the composer needs to normalize errors.

#[cfg(feature = "reqwest")] mod reqwest_transport;
#[cfg(feature = "reqwest")] pub use reqwest_transport::*;

// self
use crate::_prelude::*;

/// Header mapping sent with every outbound request. Keys are compared exactly.
pub type Headers = BTreeMap<String, String>;

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a, F> =
	Pin<Box<dyn Future<Output = std::result::Result<RawResponse, F>> + 'a + Send>>;

/// HTTP methods understood by the composer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	/// Read method; never receives an automatic CSRF header.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
	/// `HEAD`.
	Head,
	/// `OPTIONS`.
	Options,
}
impl Method {
	/// Returns the uppercase wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
			Method::Head => "HEAD",
			Method::Options => "OPTIONS",
		}
	}

	/// Returns `true` for the read method (`GET`).
	pub const fn is_read(self) -> bool {
		matches!(self, Method::Get)
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Method {
	type Err = UnknownMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(Method::Get),
			"POST" => Ok(Method::Post),
			"PUT" => Ok(Method::Put),
			"PATCH" => Ok(Method::Patch),
			"DELETE" => Ok(Method::Delete),
			"HEAD" => Ok(Method::Head),
			"OPTIONS" => Ok(Method::Options),
			_ => Err(UnknownMethod(s.to_owned())),
		}
	}
}

/// Raised when a string does not name a supported [`Method`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unsupported HTTP method `{0}`.")]
pub struct UnknownMethod(pub String);

/// Fully composed call handed to a [`Transport`].
///
/// `body` is omitted from the serialized form when absent so an absent body is never confused
/// with an empty one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutboundRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL.
	pub url: String,
	/// Composed headers.
	pub headers: Headers,
	/// JSON body, attached only when present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub body: Option<Value>,
}

/// Successful transport response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
	/// Decoded response body.
	pub body: Value,
}
impl RawResponse {
	/// Wraps a response body.
	pub fn new(body: impl Into<Value>) -> Self {
		Self { body: body.into() }
	}
}

/// Failed HTTP exchange that still produced a response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ThisError)]
#[error("Request failed with HTTP status {status}.")]
pub struct FailedResponse {
	/// HTTP status code.
	pub status: u16,
	/// Decoded response body.
	pub body: Value,
}
impl FailedResponse {
	/// Creates a failed response from its parts.
	pub fn new(status: u16, body: impl Into<Value>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Describes what the composer can learn from a transport failure.
///
/// Both accessors are optional so failures that never reached the server (or that arrive in an
/// arbitrary shape) remain representable.
pub trait TransportFailure
where
	Self: 'static + Debug + Display + Send + Sync,
{
	/// HTTP status of the failed response, if one was received.
	fn status(&self) -> Option<u16>;

	/// Decoded body of the failed response, if one was received.
	fn body(&self) -> Option<&Value>;
}
impl TransportFailure for FailedResponse {
	fn status(&self) -> Option<u16> {
		Some(self.status)
	}

	fn body(&self) -> Option<&Value> {
		Some(&self.body)
	}
}
impl TransportFailure for String {
	fn status(&self) -> Option<u16> {
		None
	}

	fn body(&self) -> Option<&Value> {
		None
	}
}
impl TransportFailure for &'static str {
	fn status(&self) -> Option<u16> {
		None
	}

	fn body(&self) -> Option<&Value> {
		None
	}
}
/// Reads `{"response": {"status": .., "data": ..}}`-shaped values; `body` is accepted in place of
/// `data`.
impl TransportFailure for Value {
	fn status(&self) -> Option<u16> {
		self.pointer("/response/status")?.as_u64().and_then(|status| u16::try_from(status).ok())
	}

	fn body(&self) -> Option<&Value> {
		self.pointer("/response/data").or_else(|| self.pointer("/response/body"))
	}
}

/// Abstraction over HTTP stacks able to execute one [`OutboundRequest`].
///
/// The trait is the helper's only dependency on an HTTP stack. Implementations must issue exactly
/// one call per [`send`](Transport::send) and leave retries, pooling, and timeouts to their own
/// configuration. Returned futures must be `Send` so client futures can hop executors.
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Failure emitted by the transport.
	type Failure: TransportFailure;

	/// Sends the request and resolves with the decoded response envelope.
	fn send(&self, request: OutboundRequest) -> TransportFuture<'_, Self::Failure>;
}
