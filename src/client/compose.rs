//! Request composition and error normalization.
//!
//! [`ApiClient::issue_request`] turns an [`ApiRequest`] into one [`OutboundRequest`], hands it
//! to the transport, and unwraps the response envelope. Headers are layered in a fixed order:
//! the caller's mapping is copied first, the CSRF token is added for non-read methods, and the
//! bearer credential is added last, so the composer's values win over colliding caller keys.

// self
use crate::{
	_prelude::*,
	client::{
		ApiClient,
		common::{self, ApiRequest, AUTHORIZATION_HEADER, CSRF_HEADER},
	},
	http::{Headers, OutboundRequest, Transport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<T> ApiClient<T>
where
	T: ?Sized + Transport,
{
	/// Builds the outbound call for `request` without sending it.
	pub fn compose(&self, request: &ApiRequest) -> OutboundRequest {
		let base_url =
			common::present(request.base_url.as_deref()).unwrap_or(self.base_url.as_str());
		let mut headers = request.headers.clone().unwrap_or_default();

		if let Some(token) = common::present(request.csrf_token.as_deref())
			.filter(|_| !request.method.is_read())
		{
			headers.insert(CSRF_HEADER.into(), token.into());
		}

		self.apply_credentials(&mut headers);

		OutboundRequest {
			method: request.method,
			url: common::join_url(base_url, &request.path),
			headers,
			body: common::present_body(request.body.as_ref()).cloned(),
		}
	}

	/// Sends one composed request and resolves with the response body.
	///
	/// Transport failures are normalized into [`RequestError`]; the transport is called exactly
	/// once and never retried.
	pub async fn issue_request(&self, request: ApiRequest) -> Result<Value> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "issue_request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let outbound = self.compose(&request);

				match self.transport.send(outbound).await {
					Ok(response) => Ok(response.body),
					Err(failure) => Err(RequestError::from_failure(&failure)),
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	fn apply_credentials(&self, headers: &mut Headers) {
		if let Some(token) = self.credentials.bearer() {
			headers.insert(AUTHORIZATION_HEADER.into(), token.authorization());
		}
	}
}
