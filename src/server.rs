//! HTTP surface: `GET /auth/google` redirects to the consent screen and
//! `GET /auth/google/callback` answers with the user's profile or `{"detail": ...}`.

// crates.io
use axum::{
	Json, Router,
	extract::{RawQuery, State},
	http::{StatusCode, header::LOCATION},
	response::{IntoResponse, Response},
	routing::get,
};
use tokio::net::TcpListener;
use tracing_subscriber::{
	EnvFilter,
	filter::ParseError,
	fmt,
	layer::SubscriberExt,
	util::{SubscriberInitExt, TryInitError},
};
// self
use crate::{
	_prelude::*,
	auth::{CallbackParams, UserProfile},
	flows::ReqwestLoginFlow,
};

/// Path that starts the login.
pub const LOGIN_PATH: &str = "/auth/google";
/// Path the provider redirects back to.
pub const CALLBACK_PATH: &str = "/auth/google/callback";
/// Detail returned for token rejections under [`ErrorDetailPolicy::Redacted`].
pub const REDACTED_TOKEN_ERROR: &str = "Provider rejected the authorization code.";

/// Failures raised while bootstrapping the server.
#[derive(Debug, ThisError)]
pub enum ServerError {
	/// The log filter directives could not be parsed.
	#[error("Invalid log filter.")]
	InvalidLogFilter(#[from] ParseError),
	/// A global tracing subscriber was already installed.
	#[error(transparent)]
	TracingInit(#[from] TryInitError),
}

/// How token endpoint rejections are rendered in the `detail` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorDetailPolicy {
	/// Forward the provider's `error` payload verbatim.
	#[default]
	PassThrough,
	/// Log the payload and answer with [`REDACTED_TOKEN_ERROR`].
	Redacted,
}

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
	/// Login flow shared by every request.
	pub flow: Arc<ReqwestLoginFlow>,
	/// Rendering policy for provider rejections.
	pub error_detail: ErrorDetailPolicy,
}
impl AppState {
	/// Wraps a flow with the default [`ErrorDetailPolicy::PassThrough`].
	pub fn new(flow: ReqwestLoginFlow) -> Self {
		Self { flow: Arc::new(flow), error_detail: ErrorDetailPolicy::default() }
	}

	/// Overrides the error detail policy.
	pub fn with_error_detail(mut self, policy: ErrorDetailPolicy) -> Self {
		self.error_detail = policy;

		self
	}
}

/// Error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
	/// Underlying flow error.
	pub error: Error,
	/// Rendering policy for provider rejections.
	pub policy: ErrorDetailPolicy,
}
impl ApiError {
	/// HTTP status for the wrapped error.
	///
	/// Caller-side problems map to 400, provider or network faults to 502, and local
	/// misconfiguration to 500.
	pub fn status(&self) -> StatusCode {
		match &self.error {
			Error::MissingAuthorizationCode | Error::ProviderToken { .. } =>
				StatusCode::BAD_REQUEST,
			Error::MissingAccessToken | Error::Response(_) | Error::Transport(_) =>
				StatusCode::BAD_GATEWAY,
			Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Value placed under `detail` in the response body.
	pub fn detail(&self) -> Value {
		match (&self.error, self.policy) {
			(Error::ProviderToken { payload }, ErrorDetailPolicy::PassThrough) => payload.clone(),
			(Error::ProviderToken { .. }, ErrorDetailPolicy::Redacted) =>
				Value::String(REDACTED_TOKEN_ERROR.into()),
			(error, _) => Value::String(error.to_string()),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status();
		let detail = self.detail();

		(status, Json(serde_json::json!({ "detail": detail }))).into_response()
	}
}

/// Builds the router serving both login endpoints.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route(LOGIN_PATH, get(auth_google))
		.route(CALLBACK_PATH, get(auth_google_callback))
		.with_state(state)
}

/// Serves the router on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
	axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await
}

/// Installs the global fmt subscriber filtered by `directives`.
pub fn init_tracing(directives: &str) -> Result<(), ServerError> {
	let filter = EnvFilter::try_new(directives)?;

	tracing_subscriber::registry().with(filter).with(fmt::layer()).try_init()?;

	Ok(())
}

async fn auth_google(State(state): State<AppState>) -> Response {
	let url = state.flow.authorization_url();

	(StatusCode::FOUND, [(LOCATION, url.to_string())]).into_response()
}

async fn auth_google_callback(
	State(state): State<AppState>,
	RawQuery(query): RawQuery,
) -> Result<Json<UserProfile>, ApiError> {
	let params = CallbackParams::from_query(query.as_deref());

	state
		.flow
		.complete_login(params)
		.await
		.map(Json)
		.map_err(|error| ApiError { error, policy: state.error_detail })
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for the shutdown signal");

		std::future::pending::<()>().await;
	}

	tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::{ConfigError, TransportError};
	use crate::provider::ProviderEndpoint;

	fn api_error(error: Error, policy: ErrorDetailPolicy) -> ApiError {
		ApiError { error, policy }
	}

	#[test]
	fn caller_faults_are_bad_requests() {
		let missing = api_error(Error::MissingAuthorizationCode, ErrorDetailPolicy::PassThrough);

		assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
		assert_eq!(missing.detail(), Value::String("Authorization code not found".into()));

		let rejected = api_error(
			Error::ProviderToken { payload: Value::String("invalid_grant".into()) },
			ErrorDetailPolicy::PassThrough,
		);

		assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
		assert_eq!(rejected.detail(), Value::String("invalid_grant".into()));
	}

	#[test]
	fn redacted_policy_hides_provider_payload() {
		let rejected = api_error(
			Error::ProviderToken { payload: serde_json::json!({"internal": "trace-id-123"}) },
			ErrorDetailPolicy::Redacted,
		);

		assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
		assert_eq!(rejected.detail(), Value::String(REDACTED_TOKEN_ERROR.into()));
	}

	#[test]
	fn provider_and_local_faults_are_not_bad_requests() {
		let timeout = api_error(
			TransportError::Timeout { endpoint: ProviderEndpoint::Token }.into(),
			ErrorDetailPolicy::PassThrough,
		);

		assert_eq!(timeout.status(), StatusCode::BAD_GATEWAY);
		assert_eq!(
			timeout.detail(),
			Value::String("Request timed out while calling the token endpoint.".into())
		);

		let missing_token = api_error(Error::MissingAccessToken, ErrorDetailPolicy::PassThrough);

		assert_eq!(missing_token.status(), StatusCode::BAD_GATEWAY);

		let config = api_error(
			ConfigError::InvalidRedirect { source: url::ParseError::EmptyHost }.into(),
			ErrorDetailPolicy::PassThrough,
		);

		assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
