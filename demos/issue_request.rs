//! Fetches a CSRF token and issues an authenticated write against a live API.
//!
//! ```sh
//! API_BASE_URL=https://cms.example.com API_OAUTH_TOKEN=... cargo run --example issue_request
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
use serde_json::json;
// self
use authed_request::{
	auth::Credentials,
	client::{ApiClient, ApiRequest},
	http::Method,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let base_url = env::var("API_BASE_URL")?;
	let credentials = match env::var("API_OAUTH_TOKEN") {
		Ok(token) => Credentials::oauth(token),
		Err(_) => Credentials::anonymous(),
	};
	let client = ApiClient::new(base_url, credentials);
	let token = client.get_x_csrf_token().await?;

	println!("Fetched CSRF token of {} characters.", token.len());

	let body = client
		.issue_request(
			ApiRequest::new(Method::Post, "node?_format=json")
				.with_csrf_token(token)
				.with_header("Content-Type", "application/json")
				.with_body(json!({
					"type": [{ "target_id": "article" }],
					"title": [{ "value": "Hello" }]
				})),
		)
		.await
		.map_err(|err| eyre!("Request failed with HTTP {}: {err}", err.status))?;

	println!("Created: {body}");

	Ok(())
}
