//! Provider descriptor data structures shared by all flows.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Google's browser-facing consent endpoint.
pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";
/// Google's code-for-token exchange endpoint.
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
/// Google's OAuth2 v1 user-info endpoint.
pub const GOOGLE_USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

/// Endpoint labels used in errors, spans, and log fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderEndpoint {
	/// Consent screen the browser is redirected to.
	Authorization,
	/// Code-for-token exchange.
	Token,
	/// Bearer-authenticated profile lookup.
	UserInfo,
}
impl ProviderEndpoint {
	/// Returns a stable label suitable for messages and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderEndpoint::Authorization => "authorization",
			ProviderEndpoint::Token => "token",
			ProviderEndpoint::UserInfo => "userinfo",
		}
	}
}
impl Display for ProviderEndpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint the browser is sent to.
	pub authorization: Url,
	/// Token endpoint used for the code exchange.
	pub token: Url,
	/// User-info endpoint queried with the bearer token.
	pub userinfo: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Human-readable provider label, used in spans.
	pub name: String,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided label.
	pub fn builder(name: impl Into<String>) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(name)
	}

	/// Descriptor for Google's OAuth 2.0 endpoints.
	pub fn google() -> Result<Self, ProviderDescriptorError> {
		Self::builder("google")
			.authorization_endpoint(parse_endpoint("authorization", GOOGLE_AUTHORIZATION_ENDPOINT)?)
			.token_endpoint(parse_endpoint("token", GOOGLE_TOKEN_ENDPOINT)?)
			.userinfo_endpoint(parse_endpoint("userinfo", GOOGLE_USERINFO_ENDPOINT)?)
			.build()
	}

	/// Returns the URL behind an endpoint label.
	pub fn endpoint(&self, endpoint: ProviderEndpoint) -> &Url {
		match endpoint {
			ProviderEndpoint::Authorization => &self.endpoints.authorization,
			ProviderEndpoint::Token => &self.endpoints.token,
			ProviderEndpoint::UserInfo => &self.endpoints.userinfo,
		}
	}
}

fn parse_endpoint(name: &'static str, raw: &str) -> Result<Url, ProviderDescriptorError> {
	Url::parse(raw)
		.map_err(|_| ProviderDescriptorError::InvalidEndpoint { endpoint: name, url: raw.into() })
}
