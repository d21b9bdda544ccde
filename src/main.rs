//! Runs the Google login server: `GET /auth/google` and `GET /auth/google/callback`.

// crates.io
use color_eyre::Result;
use tokio::net::TcpListener;
// self
use google_oauth_login::{
	config::ServerConfig,
	flows::LoginFlow,
	http::ReqwestHttpClient,
	server::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ServerConfig::load()?;

	server::init_tracing(&config.log_filter)?;

	let http_client = ReqwestHttpClient::with_timeout(config.request_timeout())?;
	let flow = LoginFlow::google(config.provider_config()?, http_client)?;
	let state = AppState::new(flow).with_error_detail(config.error_detail_policy());
	let listener = TcpListener::bind(config.listen).await?;

	tracing::info!(
		listen = %config.listen,
		redirect_uri = %config.redirect_uri,
		"google login server ready"
	);

	server::serve(listener, state).await?;

	Ok(())
}
