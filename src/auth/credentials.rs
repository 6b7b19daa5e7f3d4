//! Instance-level credentials applied by the request composer.

// self
use crate::{_prelude::*, auth::BearerToken};

/// Credentials held by an [`ApiClient`](crate::client::ApiClient) for its lifetime.
///
/// The composer reads these on every call, so removing the OAuth token switches subsequent
/// requests to unauthenticated mode without rebuilding the client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// OAuth bearer token sent as `Authorization: Bearer <oauth>`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub oauth: Option<BearerToken>,
}
impl Credentials {
	/// Credentials carrying no token.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// Credentials carrying an OAuth bearer token.
	pub fn oauth(token: impl Into<String>) -> Self {
		Self { oauth: Some(BearerToken::new(token)) }
	}

	/// Removes the OAuth token, returning the previous value.
	pub fn clear_oauth(&mut self) -> Option<BearerToken> {
		self.oauth.take()
	}

	/// Returns the bearer token when present and non-empty.
	pub fn bearer(&self) -> Option<&BearerToken> {
		self.oauth.as_ref().filter(|token| !token.expose().is_empty())
	}
}
