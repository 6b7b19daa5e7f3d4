#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use authed_request::{
	auth::Credentials,
	client::{ApiClient, ApiRequest, CsrfEndpoint},
	http::{Method, ReqwestFailure, TransportFailure},
};

#[tokio::test]
async fn composed_request_reaches_server() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/entity/1")
				.header("authorization", "Bearer 123456")
				.header("x-csrf-token", "34567")
				.header("foo", "bar")
				.json_body(json!({ "body": "content" }));
			then.status(200).header("content-type", "application/json").body("{\"id\":1}");
		})
		.await;
	let client = ApiClient::new(server.base_url(), Credentials::oauth("123456"));
	let body = client
		.issue_request(
			ApiRequest::new(Method::Patch, "entity/1")
				.with_csrf_token("34567")
				.with_header("foo", "bar")
				.with_body(json!({ "body": "content" })),
		)
		.await
		.expect("PATCH request should succeed.");

	assert_eq!(body, json!({ "id": 1 }));

	mock.assert_async().await;
}

#[tokio::test]
async fn error_status_is_normalized() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/entity/404");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"message\":\"The requested entity was not found.\"}");
		})
		.await;
	let client = ApiClient::new(server.base_url(), Credentials::oauth("123456"));
	let err = client
		.issue_request(ApiRequest::get("/entity/404"))
		.await
		.expect_err("Missing entities should fail.");

	assert_eq!(err.status, 404);
	assert_eq!(err.message, "The requested entity was not found.");

	mock.assert_async().await;
}

#[tokio::test]
async fn plain_text_error_body_falls_back_to_unknown() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/entity/1");
			then.status(500).body("Internal Server Error");
		})
		.await;
	let client = ApiClient::new(server.base_url(), Credentials::anonymous());
	let err = client
		.issue_request(ApiRequest::new(Method::Delete, "/entity/1"))
		.await
		.expect_err("Server errors should fail.");

	assert_eq!(err.status, 500);
	assert_eq!(err.message, "Unknown error.");
}

#[tokio::test]
async fn csrf_token_is_fetched_once_as_plain_text() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/session/token");
			then.status(200).header("content-type", "text/plain").body("plain-token");
		})
		.await;
	let client = ApiClient::new(server.base_url(), Credentials::oauth("123456"));
	let first = client.get_x_csrf_token().await.expect("Token fetch should succeed.");
	let second = client.get_x_csrf_token().await.expect("Cached token should be returned.");

	assert_eq!(first, "plain-token");
	assert_eq!(second, "plain-token");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn csrf_failure_keeps_transport_shape() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/rest/session/token");
			then.status(403).body("Forbidden");
		})
		.await;
	let client = ApiClient::new(server.base_url(), Credentials::anonymous())
		.with_csrf_endpoint(CsrfEndpoint::new(Method::Post, "/rest/session/token"));
	let err = client.get_x_csrf_token().await.expect_err("Forbidden fetch should fail.");

	assert!(matches!(&err, ReqwestFailure::Status(response) if response.status == 403));
	assert_eq!(err.body(), Some(&json!("Forbidden")));
	assert_eq!(client.cached_csrf_token(), None);
}
