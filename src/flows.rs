//! Login flow orchestrators: the consent redirect and the callback exchange.

pub mod authorize;
mod callback;

pub use authorize::*;

// self
use crate::{
	_prelude::*,
	config::ProviderConfig,
	http::ProviderHttpClient,
	oauth::TransportErrorMapper,
	provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Login flow specialized for the crate's default reqwest transport stack.
pub type ReqwestLoginFlow = LoginFlow<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs the authorization-code login against a single provider descriptor.
///
/// The flow owns the HTTP client, the transport error mapper, the descriptor, and the injected
/// [`ProviderConfig`]. Everything is read-only after construction, so one instance serves every
/// concurrent request without locking.
pub struct LoginFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider descriptor that defines the endpoints.
	pub descriptor: ProviderDescriptor,
	/// Client credentials and redirect URI.
	pub config: Arc<ProviderConfig>,
}
impl<C, M> LoginFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a flow that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		config: impl Into<Arc<ProviderConfig>>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			config: config.into(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl LoginFlow<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a flow backed by the default reqwest transport.
	pub fn new(
		descriptor: ProviderDescriptor,
		config: impl Into<Arc<ProviderConfig>>,
	) -> Result<Self> {
		Ok(Self::with_reqwest(descriptor, config, ReqwestHttpClient::new()?))
	}

	/// Creates a flow that uses the caller-configured reqwest transport.
	pub fn with_reqwest(
		descriptor: ProviderDescriptor,
		config: impl Into<Arc<ProviderConfig>>,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self::with_http_client(descriptor, config, http_client, ReqwestTransportErrorMapper)
	}

	/// Creates a flow against Google's endpoints using the caller-configured transport.
	pub fn google(
		config: impl Into<Arc<ProviderConfig>>,
		http_client: ReqwestHttpClient,
	) -> Result<Self> {
		let descriptor = ProviderDescriptor::google().map_err(ConfigError::from)?;

		Ok(Self::with_reqwest(descriptor, config, http_client))
	}
}
impl<C, M> Clone for LoginFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			descriptor: self.descriptor.clone(),
			config: Arc::clone(&self.config),
		}
	}
}
impl<C, M> Debug for LoginFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginFlow")
			.field("descriptor", &self.descriptor)
			.field("client_id", &self.config.client_id)
			.field("redirect_uri", &self.config.redirect_uri.as_str())
			.finish()
	}
}
