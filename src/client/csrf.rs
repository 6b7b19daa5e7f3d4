//! CSRF protection token cache.
//!
//! The first successful fetch is memoized for the client's lifetime; there is no TTL and no
//! invalidation. Fetches bypass the composer entirely: no caller headers, no credentials, and
//! no error normalization, so failures reach the caller exactly as the transport produced them.
//! Concurrent cache misses may each issue a fetch; the last writer wins.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, common},
	http::{Headers, OutboundRequest, Transport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<T> ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Returns the cached CSRF token, fetching it once on a cache miss.
	///
	/// A failed fetch leaves the cache untouched and returns the transport failure unmodified.
	pub async fn get_x_csrf_token(&self) -> Result<String, T::Failure> {
		const KIND: CallKind = CallKind::CsrfToken;

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		if let Some(token) = self.cached_csrf_token() {
			obs::record_call_outcome(KIND, CallOutcome::CacheHit);

			return Ok(token);
		}

		let span = CallSpan::new(KIND, "get_x_csrf_token");
		let result = span
			.instrument(async move {
				let request = OutboundRequest {
					method: self.csrf_endpoint.method,
					url: common::join_url(&self.base_url, &self.csrf_endpoint.path),
					headers: Headers::new(),
					body: None,
				};
				let response = self.transport.send(request).await?;
				let token = common::token_text(response.body);

				self.seed_csrf_token(token.clone());

				Ok::<_, T::Failure>(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Returns the cached token without performing I/O.
	pub fn cached_csrf_token(&self) -> Option<String> {
		self.csrf_token.read().clone()
	}

	/// Stores `token` in the cache, replacing any previous value.
	pub fn seed_csrf_token(&self, token: impl Into<String>) {
		*self.csrf_token.write() = Some(token.into());
	}
}
