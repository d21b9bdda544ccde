//! Login-level error types shared across flows, transports, and the HTTP surface.

// self
use crate::{_prelude::*, provider::ProviderEndpoint};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical login error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider answered with a body that could not be understood.
	#[error(transparent)]
	Response(#[from] ResponseError),

	/// Callback request did not carry an authorization code.
	#[error("Authorization code not found")]
	MissingAuthorizationCode,
	/// Token endpoint answered with an explicit `error` payload.
	#[error("Provider rejected the token request: {payload}.")]
	ProviderToken {
		/// The provider's `error` value, untouched.
		payload: Value,
	},
	/// Token endpoint answered without an `error` key and without an `access_token`.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider descriptor is incomplete or insecure.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Provider responses that could not be decoded.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	TokenParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// User-info endpoint responded with malformed JSON.
	#[error("User-info endpoint returned malformed JSON.")]
	ProfileParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl ResponseError {
	/// HTTP status code of the offending response.
	pub fn status(&self) -> u16 {
		match self {
			Self::TokenParse { status, .. } | Self::ProfileParse { status, .. } => *status,
		}
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint that was being called.
		endpoint: ProviderEndpoint,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The call did not complete within the configured timeout.
	#[error("Request timed out while calling the {endpoint} endpoint.")]
	Timeout {
		/// Endpoint that was being called.
		endpoint: ProviderEndpoint,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Transport failed in a way it could only describe in text.
	#[error("HTTP client error occurred while calling the {endpoint} endpoint: {message}.")]
	Other {
		/// Endpoint that was being called.
		endpoint: ProviderEndpoint,
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: ProviderEndpoint,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn missing_code_message_matches_http_detail() {
		assert_eq!(Error::MissingAuthorizationCode.to_string(), "Authorization code not found");
	}

	#[test]
	fn transport_errors_name_the_endpoint() {
		let err = TransportError::Timeout { endpoint: ProviderEndpoint::UserInfo };

		assert_eq!(err.to_string(), "Request timed out while calling the userinfo endpoint.");

		let err = TransportError::network(
			ProviderEndpoint::Token,
			std::io::Error::other("connection reset"),
		);

		assert_eq!(err.to_string(), "Network error occurred while calling the token endpoint.");
		assert!(StdError::source(&err).is_some());
	}

	#[test]
	fn provider_token_error_keeps_payload() {
		let err = Error::ProviderToken { payload: Value::String("invalid_grant".into()) };

		assert_eq!(err.to_string(), "Provider rejected the token request: \"invalid_grant\".");
	}
}
