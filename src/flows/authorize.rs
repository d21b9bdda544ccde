//! Consent redirect construction.
//!
//! [`LoginFlow::authorization_url`] turns the injected [`ProviderConfig`] plus a handful of fixed
//! literals into the provider's authorization URL. The query order is fixed, so repeated calls
//! with the same config yield byte-identical URLs.

// self
use crate::{
	_prelude::*,
	config::ProviderConfig,
	flows::LoginFlow,
	http::ProviderHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowSpan},
};

/// Scopes requested on every login.
pub const DEFAULT_SCOPE: &str = "openid email profile";
/// Authorization Code grant response type.
pub const RESPONSE_TYPE_CODE: &str = "code";
/// Asks the provider to issue a refresh token alongside the access token.
pub const ACCESS_TYPE_OFFLINE: &str = "offline";
/// Forces the consent screen even for returning users.
pub const PROMPT_CONSENT: &str = "consent";

/// Query parameters sent to the authorization endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Always [`RESPONSE_TYPE_CODE`].
	pub response_type: String,
	/// Space-delimited scopes.
	pub scope: String,
	/// Callback URI registered with the provider.
	pub redirect_uri: String,
	/// Offline access toggle.
	pub access_type: String,
	/// Consent prompt behavior.
	pub prompt: String,
}
impl AuthorizationRequest {
	/// Builds the request from the provider config and the fixed literals.
	pub fn new(config: &ProviderConfig) -> Self {
		Self {
			client_id: config.client_id.as_str().to_owned(),
			response_type: RESPONSE_TYPE_CODE.into(),
			scope: DEFAULT_SCOPE.into(),
			redirect_uri: config.redirect_uri.as_str().to_owned(),
			access_type: ACCESS_TYPE_OFFLINE.into(),
			prompt: PROMPT_CONSENT.into(),
		}
	}

	/// Query pairs in the order they are written to the URL.
	pub fn query_pairs(&self) -> [(&'static str, &str); 6] {
		[
			("client_id", self.client_id.as_str()),
			("response_type", self.response_type.as_str()),
			("scope", self.scope.as_str()),
			("redirect_uri", self.redirect_uri.as_str()),
			("access_type", self.access_type.as_str()),
			("prompt", self.prompt.as_str()),
		]
	}

	/// Appends the form-urlencoded query to `endpoint`.
	pub fn to_url(&self, endpoint: &Url) -> Url {
		let mut url = endpoint.clone();

		url.query_pairs_mut().extend_pairs(self.query_pairs());

		url
	}
}

impl<C, M> LoginFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Authorization request derived from the injected config.
	pub fn authorization_request(&self) -> AuthorizationRequest {
		AuthorizationRequest::new(&self.config)
	}

	/// Fully-formed authorization URL to redirect the browser to.
	pub fn authorization_url(&self) -> Url {
		const KIND: FlowKind = FlowKind::AuthorizationRedirect;

		let span = FlowSpan::new(KIND, "authorization_url", &self.descriptor.name);

		span.in_scope(|| {
			obs::record_flow_attempt(KIND);

			let url =
				self.authorization_request().to_url(&self.descriptor.endpoints.authorization);

			obs::record_flow_result(KIND, &Ok(()));
			obs::log_stage_success(KIND, "authorization_url");

			url
		})
	}
}
