//! Default [`Transport`] backed by [`ReqwestClient`].

// std
use std::ops::Deref;
// crates.io
use reqwest::{
	ClientBuilder, Method as ReqwestMethod, Response,
	header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::{
		FailedResponse, Method, OutboundRequest, RawResponse, Transport, TransportFailure,
		TransportFuture,
	},
};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapper issues exactly one request per [`Transport::send`]. Timeouts, proxies, and TLS
/// options belong to the wrapped client; configure them through [`ReqwestTransport::from_builder`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the wrapped client from a caller-configured [`ClientBuilder`].
	pub fn from_builder(builder: ClientBuilder) -> Result<Self, ConfigError> {
		Ok(Self(builder.build()?))
	}
}
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl Transport for ReqwestTransport {
	type Failure = ReqwestFailure;

	fn send(&self, request: OutboundRequest) -> TransportFuture<'_, Self::Failure> {
		let client = self.0.clone();

		Box::pin(async move {
			let url = Url::parse(&request.url).map_err(ReqwestFailure::InvalidUrl)?;
			let headers = header_map(&request.headers)?;
			let mut builder = client.request(reqwest_method(request.method), url).headers(headers);

			if let Some(body) = &request.body {
				builder = builder.json(body);
			}

			let response = builder.send().await.map_err(ReqwestFailure::Network)?;
			let status = response.status();
			let body = decode_body(response).await?;

			if status.is_success() {
				Ok(RawResponse { body })
			} else {
				Err(ReqwestFailure::Status(FailedResponse { status: status.as_u16(), body }))
			}
		})
	}
}

/// Failures emitted by [`ReqwestTransport`].
#[derive(Debug, ThisError)]
pub enum ReqwestFailure {
	/// Server answered with a non-success status.
	#[error(transparent)]
	Status(FailedResponse),
	/// Composed URL could not be parsed.
	#[error("Request URL is invalid.")]
	InvalidUrl(#[source] url::ParseError),
	/// Header name or value is not valid HTTP.
	#[error("Header `{name}` is invalid.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
	/// Network, TLS, or body-read failure.
	#[error("Network error occurred while sending the request.")]
	Network(#[source] ReqwestError),
}
impl TransportFailure for ReqwestFailure {
	fn status(&self) -> Option<u16> {
		match self {
			Self::Status(response) => Some(response.status),
			_ => None,
		}
	}

	fn body(&self) -> Option<&Value> {
		match self {
			Self::Status(response) => Some(&response.body),
			_ => None,
		}
	}
}

fn reqwest_method(method: Method) -> ReqwestMethod {
	match method {
		Method::Get => ReqwestMethod::GET,
		Method::Post => ReqwestMethod::POST,
		Method::Put => ReqwestMethod::PUT,
		Method::Patch => ReqwestMethod::PATCH,
		Method::Delete => ReqwestMethod::DELETE,
		Method::Head => ReqwestMethod::HEAD,
		Method::Options => ReqwestMethod::OPTIONS,
	}
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, ReqwestFailure> {
	let mut map = HeaderMap::with_capacity(headers.len());

	for (name, value) in headers {
		let invalid = || ReqwestFailure::InvalidHeader { name: name.to_owned() };
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		map.insert(header_name, header_value);
	}

	Ok(map)
}

async fn decode_body(response: Response) -> Result<Value, ReqwestFailure> {
	let is_json = response
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.contains("json"));
	let text = response.text().await.map_err(ReqwestFailure::Network)?;

	if text.is_empty() {
		return Ok(Value::Null);
	}

	let parsed = if is_json { serde_json::from_str(&text).ok() } else { None };

	Ok(parsed.unwrap_or(Value::String(text)))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn invalid_headers_are_rejected() {
		let mut headers = BTreeMap::new();

		headers.insert("bad header".to_owned(), "value".to_owned());

		let err = header_map(&headers).expect_err("Header names with spaces must be rejected.");

		assert!(matches!(err, ReqwestFailure::InvalidHeader { name } if name == "bad header"));
	}

	#[tokio::test]
	async fn invalid_url_surfaces_without_status() {
		let transport = ReqwestTransport::default();
		let request = OutboundRequest {
			method: Method::Get,
			url: "not a url/entity/1".into(),
			headers: BTreeMap::new(),
			body: None,
		};
		let err = transport.send(request).await.expect_err("Relative URLs must be rejected.");

		assert!(matches!(err, ReqwestFailure::InvalidUrl(_)));
		assert_eq!(err.status(), None);
	}
}
