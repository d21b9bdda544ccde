//! Outbound OAuth requests and transport-error classification.
//!
//! The token exchange and profile fetch are built here as plain `oauth2::HttpRequest` values so
//! any [`ProviderHttpClient`](crate::http::ProviderHttpClient) can execute them. The token
//! response is classified by [`TokenResponse`](crate::auth::TokenResponse) rather than `oauth2`'s
//! typed responses: the login flow reads the `error` key and `access_token` only and never
//! requires `token_type` or `expires_in`.

pub use oauth2;

// crates.io
use oauth2::{
	AccessToken, AuthorizationCode, HttpClientError, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	config::ProviderConfig,
	error::{ConfigError, TransportError},
	provider::ProviderEndpoint,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Grant type sent with every code exchange.
pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted while calling `endpoint` into a crate error.
	fn map_transport_error(&self, endpoint: ProviderEndpoint, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		endpoint: ProviderEndpoint,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(endpoint, *inner),
			other => map_generic_transport_error(endpoint, other),
		}
	}
}

/// Classifies the transport-agnostic [`HttpClientError`] variants.
///
/// Custom mappers can delegate here for everything except their transport-specific variant.
pub fn map_generic_transport_error<E>(endpoint: ProviderEndpoint, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(endpoint, *inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { endpoint, message }.into(),
		_ => TransportError::Other {
			endpoint,
			message: "unrecognized transport failure".into(),
		}
		.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(endpoint: ProviderEndpoint, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { endpoint }.into();
	}

	TransportError::network(endpoint, err).into()
}

/// Builds the form-encoded code-for-token request.
///
/// Body fields are emitted in a fixed order: `code`, `client_id`, `client_secret`,
/// `redirect_uri`, `grant_type`.
pub fn token_request(
	endpoint: &Url,
	config: &ProviderConfig,
	code: &AuthorizationCode,
) -> Result<HttpRequest> {
	let body = Serializer::new(String::new())
		.append_pair("code", code.secret())
		.append_pair("client_id", config.client_id.as_str())
		.append_pair("client_secret", config.client_secret.secret())
		.append_pair("redirect_uri", config.redirect_uri.as_str())
		.append_pair("grant_type", AUTHORIZATION_CODE_GRANT)
		.finish();
	let request = Request::builder()
		.method(Method::POST)
		.uri(endpoint.as_str())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, JSON_CONTENT_TYPE)
		.body(body.into_bytes())
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Builds the bearer-authenticated user-info request.
pub fn profile_request(endpoint: &Url, access_token: &AccessToken) -> Result<HttpRequest> {
	let request = Request::builder()
		.method(Method::GET)
		.uri(endpoint.as_str())
		.header(AUTHORIZATION, format!("Bearer {}", access_token.secret()))
		.header(ACCEPT, JSON_CONTENT_TYPE)
		.body(Vec::new())
		.map_err(ConfigError::from)?;

	Ok(request)
}
