//! Callback handling: authorization code → access token → user profile.
//!
//! [`LoginFlow::complete_login`] runs the three stages strictly in order and stops at the first
//! failure. A missing code never reaches the network, and a token `error` payload never reaches
//! the user-info endpoint. Nothing is retried.

// crates.io
use oauth2::{AccessToken, AsyncHttpClient, AuthorizationCode, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	auth::{CallbackParams, TokenResponse, UserProfile},
	flows::LoginFlow,
	http::ProviderHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, FlowKind, FlowSpan},
	provider::ProviderEndpoint,
};

const KIND: FlowKind = FlowKind::Callback;

impl<C, M> LoginFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validates the callback, exchanges its code, and fetches the user's profile.
	pub async fn complete_login(&self, params: CallbackParams) -> Result<UserProfile> {
		let span = FlowSpan::new(KIND, "complete_login", &self.descriptor.name);

		obs::record_flow_attempt(KIND);

		let result = span
			.instrument(async move {
				if let Some(error) = params.error.as_deref() {
					obs::log_callback_error(error);
				}

				let code = params.authorization_code()?;
				let access_token = self.exchange_code(&code).await?;

				self.fetch_profile(&access_token).await
			})
			.await;

		obs::record_flow_result(KIND, &result);

		match &result {
			Ok(_) => obs::log_stage_success(KIND, "complete_login"),
			Err(err) => obs::log_stage_failure(KIND, "complete_login", err),
		}

		result
	}

	/// Trades an authorization code for an access token.
	///
	/// Any body carrying an `error` key fails with [`Error::ProviderToken`], whatever the HTTP
	/// status.
	pub async fn exchange_code(&self, code: &AuthorizationCode) -> Result<AccessToken> {
		let span = FlowSpan::new(KIND, "exchange_code", &self.descriptor.name);

		span.instrument(async move {
			let request =
				oauth::token_request(&self.descriptor.endpoints.token, &self.config, code)?;
			let response = self.send(ProviderEndpoint::Token, request).await?;
			let status = response.status().as_u16();
			let token_response = TokenResponse::from_slice(response.body(), status)?;

			if let TokenResponse::Rejected(payload) = &token_response {
				obs::log_provider_rejection(payload);
			}

			let access_token = token_response.into_access_token()?;

			obs::log_stage_success(KIND, "exchange_code");

			Ok(access_token)
		})
		.await
	}

	/// Fetches the profile for `access_token`, returned exactly as the provider sent it.
	pub async fn fetch_profile(&self, access_token: &AccessToken) -> Result<UserProfile> {
		let span = FlowSpan::new(KIND, "fetch_profile", &self.descriptor.name);

		span.instrument(async move {
			let request =
				oauth::profile_request(&self.descriptor.endpoints.userinfo, access_token)?;
			let response = self.send(ProviderEndpoint::UserInfo, request).await?;
			let status = response.status();

			if !status.is_success() {
				obs::log_unexpected_status(ProviderEndpoint::UserInfo, status.as_u16());
			}

			let profile = UserProfile::from_slice(response.body(), status.as_u16())?;

			obs::log_stage_success(KIND, "fetch_profile");

			Ok(profile)
		})
		.await
	}

	async fn send(
		&self,
		endpoint: ProviderEndpoint,
		request: HttpRequest,
	) -> Result<HttpResponse> {
		let handle = self.http_client.handle();
		let response = handle
			.call(request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(endpoint, err))?;

		obs::record_provider_response(endpoint, response.status().as_u16());

		Ok(response)
	}
}
