//! Error types surfaced by the request composer and transport configuration.
//!
//! Two error shapes coexist. [`RequestError`] is the normalized failure returned by
//! [`ApiClient::issue_request`](crate::client::ApiClient::issue_request): it always carries a
//! status and a message regardless of what the transport produced. The CSRF token cache returns
//! the transport's own [`Transport::Failure`](crate::http::Transport::Failure) untouched, so those
//! callers see whatever shape the transport emitted.

// self
use crate::{_prelude::*, http::TransportFailure};

/// Crate-wide result type alias returning [`RequestError`] by default.
pub type Result<T, E = RequestError> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message used when a failed response carries no usable `message` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error.";

/// Normalized failure produced by the request composer.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct RequestError {
	/// HTTP status reported by the failed response (`0` when the transport supplied none).
	pub status: u16,
	/// Server-supplied message, or [`UNKNOWN_ERROR_MESSAGE`].
	pub message: String,
}
impl RequestError {
	/// Creates a new error from explicit parts.
	pub fn new(status: u16, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}

	/// Normalizes an arbitrary transport failure.
	///
	/// The status comes from [`TransportFailure::status`]. The message is the `message` field of
	/// [`TransportFailure::body`] when it is present and non-empty; string values are used as-is
	/// and other JSON values as their JSON text.
	pub fn from_failure<F>(failure: &F) -> Self
	where
		F: ?Sized + TransportFailure,
	{
		let status = failure.status().unwrap_or_default();
		let message = failure
			.body()
			.and_then(|body| body.get("message"))
			.and_then(message_text)
			.unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned());

		Self { status, message }
	}
}

fn message_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) if text.is_empty() => None,
		Value::String(text) => Some(text.to_owned()),
		other => Some(other.to_string()),
	}
}

/// Configuration failures raised while assembling a transport.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
