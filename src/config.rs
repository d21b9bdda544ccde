//! Provider credentials injected into the flows, plus the server's command-line settings.
//!
//! [`ProviderConfig`] is built once at startup and shared read-only; nothing in the crate reads
//! credentials from globals. With the `server` feature, [`ServerConfig`] loads `.env`, then
//! resolves every setting from flags or their environment variables.

// crates.io
use oauth2::{ClientId, ClientSecret, RedirectUrl};
#[cfg(feature = "server")] use {clap::Parser, std::net::SocketAddr};
// self
use crate::{_prelude::*, error::ConfigError};
#[cfg(feature = "server")] use crate::server::ErrorDetailPolicy;

/// Callback URI registered with Google for local development.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/auth/google/callback";

/// Client credentials and redirect URI registered with the provider.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: ClientId,
	/// OAuth 2.0 client secret; its `Debug` output is redacted.
	pub client_secret: ClientSecret,
	/// Callback URI; must match the provider registration exactly.
	///
	/// Validated as a URL, but sent to the provider as the text it was configured with.
	pub redirect_uri: RedirectUrl,
}
impl ProviderConfig {
	/// Creates a config from raw credentials and an already-validated redirect URI.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: RedirectUrl,
	) -> Self {
		Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: ClientSecret::new(client_secret.into()),
			redirect_uri,
		}
	}

	/// Creates a config from raw strings, rejecting a redirect URI that is not a URL.
	pub fn parse(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Result<Self> {
		let redirect_uri = RedirectUrl::new(redirect_uri.into())
			.map_err(|source| ConfigError::InvalidRedirect { source })?;

		Ok(Self::new(client_id, client_secret, redirect_uri))
	}

	/// Creates a config that uses [`DEFAULT_REDIRECT_URI`].
	pub fn with_default_redirect(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self> {
		Self::parse(client_id, client_secret, DEFAULT_REDIRECT_URI)
	}
}

/// Settings for the login server binary.
#[cfg(feature = "server")]
#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
	/// OAuth client identifier issued by Google.
	#[arg(long, env = "GOOGLE_CLIENT_ID")]
	pub client_id: String,
	/// OAuth client secret issued by Google.
	#[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
	pub client_secret: String,
	/// Callback URI registered with Google; must match exactly.
	#[arg(long, env = "REDIRECT_URI", default_value = DEFAULT_REDIRECT_URI)]
	pub redirect_uri: String,
	/// Socket address the HTTP server binds to.
	#[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8000")]
	pub listen: SocketAddr,
	/// Upper bound, in seconds, for each outbound call to the provider.
	#[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
	pub request_timeout_secs: u64,
	/// Replace provider error payloads with a fixed message in client responses.
	#[arg(long, env = "REDACT_PROVIDER_ERRORS")]
	pub redact_provider_errors: bool,
	/// Tracing filter directives.
	#[arg(long, env = "RUST_LOG", default_value = "info")]
	pub log_filter: String,
}
#[cfg(feature = "server")]
impl ServerConfig {
	/// Loads `.env` when present, then parses flags and environment variables.
	pub fn load() -> Result<Self, dotenvy::Error> {
		match dotenvy::dotenv() {
			Ok(_) => {},
			Err(e) if e.not_found() => {},
			Err(e) => return Err(e),
		}

		Ok(Self::parse())
	}

	/// Provider credentials to inject into the login flow.
	pub fn provider_config(&self) -> Result<ProviderConfig> {
		ProviderConfig::parse(
			self.client_id.as_str(),
			self.client_secret.as_str(),
			self.redirect_uri.as_str(),
		)
	}

	/// Timeout applied to every outbound provider call.
	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	/// How provider error payloads are rendered to clients.
	pub fn error_detail_policy(&self) -> ErrorDetailPolicy {
		if self.redact_provider_errors {
			ErrorDetailPolicy::Redacted
		} else {
			ErrorDetailPolicy::PassThrough
		}
	}
}
