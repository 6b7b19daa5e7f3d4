//! The stateful API client: request composer plus CSRF token cache.

pub mod common;

mod compose;
mod csrf;

pub use common::*;

// self
use crate::{_prelude::*, auth::Credentials, http::Transport};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Composes authenticated calls against a single API origin.
///
/// The client owns the transport, the configured base URL, and the credentials so each call
/// only has to describe its own method, path, and payload. The cached CSRF token is the only
/// state mutated after construction and is written exclusively by
/// [`ApiClient::get_x_csrf_token`] or an explicit seed.
pub struct ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Transport used for every outbound call.
	pub transport: Arc<T>,
	/// Origin prefixed to every request path, used verbatim.
	pub base_url: String,
	/// Credentials applied by the composer on every call.
	pub credentials: Credentials,
	/// Target used when fetching a fresh CSRF token.
	pub csrf_endpoint: CsrfEndpoint,
	csrf_token: RwLock<Option<String>>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		base_url: impl Into<String>,
		credentials: Credentials,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			base_url: base_url.into(),
			credentials,
			csrf_endpoint: CsrfEndpoint::default(),
			csrf_token: RwLock::new(None),
		}
	}

	/// Overrides the CSRF token endpoint (defaults to `GET /session/token`).
	pub fn with_csrf_endpoint(mut self, endpoint: CsrfEndpoint) -> Self {
		self.csrf_endpoint = endpoint;

		self
	}

	/// Pre-seeds the CSRF token cache.
	pub fn with_csrf_token(self, token: impl Into<String>) -> Self {
		self.seed_csrf_token(token);

		self
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a new client for the provided origin and credentials.
	///
	/// The client provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly. Use [`ApiClient::with_transport`] to supply a configured
	/// [`ReqwestTransport`] or any other [`Transport`].
	pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
		Self::with_transport(base_url, credentials, ReqwestTransport::default())
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.base_url)
			.field("credentials", &self.credentials)
			.field("csrf_endpoint", &self.csrf_endpoint)
			.field("csrf_token_cached", &self.csrf_token.read().is_some())
			.finish()
	}
}
