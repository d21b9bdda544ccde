//! Shared fixtures for integration tests: provider config, descriptors, and a scripted
//! in-process transport that records every outbound request.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
#[cfg(feature = "reqwest")] use std::time::Duration;
// crates.io
use parking_lot::Mutex;
// self
#[cfg(feature = "reqwest")]
use google_oauth_login::{flows::ReqwestLoginFlow, http::ReqwestHttpClient};
use google_oauth_login::{
	config::ProviderConfig,
	error::Error,
	flows::LoginFlow,
	http::ProviderHttpClient,
	oauth::{
		TransportErrorMapper, map_generic_transport_error,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
			http::{
				HeaderName, StatusCode,
				header::{AUTHORIZATION, CONTENT_TYPE},
			},
		},
	},
	provider::{ProviderDescriptor, ProviderEndpoint},
	url::Url,
};

pub const CLIENT_ID: &str = "ABC";
pub const CLIENT_SECRET: &str = "secret-it";
pub const REDIRECT_URI: &str = "http://localhost:8000/auth/google/callback";

pub fn provider_config() -> ProviderConfig {
	provider_config_with_redirect(REDIRECT_URI)
}

pub fn provider_config_with_redirect(redirect_uri: &str) -> ProviderConfig {
	ProviderConfig::parse(CLIENT_ID, CLIENT_SECRET, redirect_uri)
		.expect("Redirect URI fixture should parse.")
}

/// Descriptor whose endpoints live on a local mock server rooted at `base`.
pub fn mock_descriptor(base: &str) -> ProviderDescriptor {
	let endpoint = |path: &str| {
		Url::parse(&format!("{base}{path}")).expect("Mock endpoint URL should parse.")
	};

	ProviderDescriptor::builder("mock-google")
		.authorization_endpoint(endpoint("/o/oauth2/auth"))
		.token_endpoint(endpoint("/token"))
		.userinfo_endpoint(endpoint("/oauth2/v1/userinfo"))
		.build()
		.expect("Mock descriptor should build.")
}

/// Reqwest-backed flow pointed at a local mock server.
#[cfg(feature = "reqwest")]
pub fn reqwest_flow(base: &str) -> ReqwestLoginFlow {
	reqwest_flow_with_timeout(base, ReqwestHttpClient::DEFAULT_TIMEOUT)
}

#[cfg(feature = "reqwest")]
pub fn reqwest_flow_with_timeout(base: &str, timeout: Duration) -> ReqwestLoginFlow {
	let http_client =
		ReqwestHttpClient::with_timeout(timeout).expect("Reqwest client should build.");

	LoginFlow::with_reqwest(mock_descriptor(base), provider_config(), http_client)
}

/// Snapshot of a request seen by [`ScriptedHttpClient`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: String,
	pub uri: String,
	pub authorization: Option<String>,
	pub content_type: Option<String>,
	pub body: String,
}
impl RecordedRequest {
	fn capture(request: &HttpRequest) -> Self {
		let header = |name: HeaderName| {
			request
				.headers()
				.get(name)
				.map(|value| value.to_str().expect("Header should be ASCII.").to_owned())
		};

		Self {
			method: request.method().to_string(),
			uri: request.uri().to_string(),
			authorization: header(AUTHORIZATION),
			content_type: header(CONTENT_TYPE),
			body: String::from_utf8(request.body().clone()).expect("Body should be UTF-8."),
		}
	}

	pub fn form_field(&self, key: &str) -> Option<String> {
		google_oauth_login::url::form_urlencoded::parse(self.body.as_bytes())
			.find(|(name, _)| name == key)
			.map(|(_, value)| value.into_owned())
	}
}

/// Canned outcome for the next outbound call.
#[derive(Clone, Debug)]
pub enum Scripted {
	Json(u16, &'static str),
	Refused,
}

#[derive(Debug)]
pub enum ScriptedTransportError {
	Refused,
}
impl Display for ScriptedTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Refused => write!(f, "Connection refused."),
		}
	}
}
impl StdError for ScriptedTransportError {}

/// Transport that answers from a queue and records every request it receives.
#[derive(Clone, Default)]
pub struct ScriptedHttpClient {
	responses: Arc<Mutex<VecDeque<Scripted>>>,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}
impl ScriptedHttpClient {
	pub fn new(responses: impl IntoIterator<Item = Scripted>) -> Self {
		Self {
			responses: Arc::new(Mutex::new(responses.into_iter().collect())),
			requests: Default::default(),
		}
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}
}
impl ProviderHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHandle;
	type TransportError = ScriptedTransportError;

	fn handle(&self) -> Self::Handle {
		ScriptedHandle(self.clone())
	}
}

pub struct ScriptedHandle(ScriptedHttpClient);
impl<'c> AsyncHttpClient<'c> for ScriptedHandle {
	type Error = HttpClientError<ScriptedTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			client.requests.lock().push(RecordedRequest::capture(&request));

			let next = client.responses.lock().pop_front();

			match next {
				Some(Scripted::Json(status, body)) => {
					let mut response = HttpResponse::new(body.as_bytes().to_vec());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Scripted status should be valid.");

					Ok(response)
				},
				Some(Scripted::Refused) | None =>
					Err(HttpClientError::Reqwest(Box::new(ScriptedTransportError::Refused))),
			}
		})
	}
}

#[derive(Clone, Debug, Default)]
pub struct ScriptedTransportErrorMapper;
impl TransportErrorMapper<ScriptedTransportError> for ScriptedTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: ProviderEndpoint,
		error: HttpClientError<ScriptedTransportError>,
	) -> Error {
		map_generic_transport_error(endpoint, error)
	}
}

pub type ScriptedLoginFlow = LoginFlow<ScriptedHttpClient, ScriptedTransportErrorMapper>;

/// Flow against the Google preset whose calls are answered by `client`.
pub fn scripted_flow(client: &ScriptedHttpClient) -> ScriptedLoginFlow {
	scripted_flow_with_config(client, provider_config())
}

pub fn scripted_flow_with_config(
	client: &ScriptedHttpClient,
	config: ProviderConfig,
) -> ScriptedLoginFlow {
	LoginFlow::with_http_client(
		ProviderDescriptor::google().expect("Google preset should be valid."),
		config,
		client.clone(),
		ScriptedTransportErrorMapper,
	)
}
