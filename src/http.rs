//! Transport primitives for the provider calls.
//!
//! The module exposes [`ProviderHttpClient`], the login flow's only dependency on an HTTP stack.
//! The default [`ReqwestHttpClient`] bounds every call with a timeout and never follows
//! redirects; tests and embedders can substitute any client whose handles implement `oauth2`'s
//! [`AsyncHttpClient`].

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")] use reqwest::redirect::Policy;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Abstraction over HTTP transports capable of executing the token exchange and the profile
/// fetch.
///
/// Implementations must be `Send + Sync + 'static` so one client can be shared by every
/// concurrent callback, and the handles they return must own whatever state is required so
/// their request futures remain `Send` for the lifetime of the in-flight call.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single outbound call.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for the next outbound call.
	fn handle(&self) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token and user-info endpoints answer directly, so redirects are never followed. Configure
/// any custom [`ReqwestClient`] passed to [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Timeout applied by [`ReqwestHttpClient::new`].
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

	/// Builds a client with [`Self::DEFAULT_TIMEOUT`].
	pub fn new() -> Result<Self> {
		Self::with_timeout(Self::DEFAULT_TIMEOUT)
	}

	/// Builds a client whose calls fail once `timeout` elapses.
	pub fn with_timeout(timeout: Duration) -> Result<Self> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.redirect(Policy::none())
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`ProviderHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
