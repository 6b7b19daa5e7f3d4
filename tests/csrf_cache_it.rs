// std
use std::sync::atomic::{AtomicUsize, Ordering};
// crates.io
use serde_json::json;
// self
use authed_request::{
	auth::Credentials,
	client::ApiClient,
	http::{FailedResponse, OutboundRequest, RawResponse, Transport, TransportFuture},
};

struct PanickingTransport;
impl Transport for PanickingTransport {
	type Failure = String;

	fn send(&self, request: OutboundRequest) -> TransportFuture<'_, Self::Failure> {
		panic!("Cached lookups must not reach the transport: {request:?}.");
	}
}

#[derive(Default)]
struct ScriptedTransport {
	calls: AtomicUsize,
}
impl ScriptedTransport {
	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

// Fails on the first call and succeeds afterwards.
impl Transport for ScriptedTransport {
	type Failure = String;

	fn send(&self, _request: OutboundRequest) -> TransportFuture<'_, Self::Failure> {
		let call = self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			if call == 0 { Err("offline".to_owned()) } else { Ok(RawResponse::new("foo")) }
		})
	}
}

struct RejectingTransport;
impl Transport for RejectingTransport {
	type Failure = &'static str;

	fn send(&self, _request: OutboundRequest) -> TransportFuture<'_, Self::Failure> {
		Box::pin(async { Err("bar") })
	}
}

struct StatusTransport;
impl Transport for StatusTransport {
	type Failure = FailedResponse;

	fn send(&self, _request: OutboundRequest) -> TransportFuture<'_, Self::Failure> {
		Box::pin(async { Err(FailedResponse::new(403, json!({ "message": "denied" }))) })
	}
}

fn credentials() -> Credentials {
	Credentials::oauth("123456")
}

#[tokio::test]
async fn fetch_stores_and_returns_token() {
	let client = ApiClient::with_transport("http://foo.dev", credentials(), ScriptedTransport {
		calls: AtomicUsize::new(1),
	});
	let token = client.get_x_csrf_token().await.expect("Fetch should succeed.");

	assert_eq!(token, "foo");
	assert_eq!(client.cached_csrf_token().as_deref(), Some("foo"));
}

#[tokio::test]
async fn failure_passes_through_unmodified() {
	let client = ApiClient::with_transport("http://foo.dev", credentials(), RejectingTransport);
	let err = client.get_x_csrf_token().await.expect_err("Fetch should fail.");

	assert_eq!(err, "bar");
	assert_eq!(client.cached_csrf_token(), None);
}

#[tokio::test]
async fn structured_failure_is_not_normalized() {
	let client = ApiClient::with_transport("http://foo.dev", credentials(), StatusTransport);
	let err = client.get_x_csrf_token().await.expect_err("Fetch should fail.");

	assert_eq!(err, FailedResponse::new(403, json!({ "message": "denied" })));
}

#[tokio::test]
async fn seeded_cache_skips_transport() {
	let client = ApiClient::with_transport("http://foo.dev", credentials(), PanickingTransport)
		.with_csrf_token("1234");
	let token = client.get_x_csrf_token().await.expect("Cache hit should succeed.");

	assert_eq!(token, "1234");
}

#[tokio::test]
async fn failed_fetch_keeps_cache_empty_until_success() {
	let client =
		ApiClient::with_transport("http://foo.dev", credentials(), ScriptedTransport::default());
	let err = client.get_x_csrf_token().await.expect_err("First fetch should fail.");

	assert_eq!(err, "offline");
	assert_eq!(client.cached_csrf_token(), None);

	let token = client.get_x_csrf_token().await.expect("Second fetch should succeed.");
	let cached = client.get_x_csrf_token().await.expect("Third lookup should hit the cache.");

	assert_eq!(token, "foo");
	assert_eq!(cached, "foo");
	assert_eq!(client.transport.calls(), 2);
}
