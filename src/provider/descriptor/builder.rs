// std
use std::net::IpAddr;
// self
use crate::{
	_prelude::*,
	provider::{ProviderDescriptor, ProviderEndpoint, ProviderEndpoints},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// Authorization endpoint is required to build the consent redirect.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is required for the code exchange.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// User-info endpoint is required for the profile fetch.
	#[error("Missing userinfo endpoint.")]
	MissingUserInfoEndpoint,
	/// Endpoint string could not be parsed.
	#[error("The {endpoint} endpoint is not a valid URL: {url}.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Raw endpoint string.
		url: String,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Label for the descriptor being constructed.
	pub name: String,
	/// Authorization endpoint the browser is redirected to.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint used for the code exchange.
	pub token_endpoint: Option<Url>,
	/// User-info endpoint used for the profile fetch.
	pub userinfo_endpoint: Option<Url>,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided label.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			authorization_endpoint: None,
			token_endpoint: None,
			userinfo_endpoint: None,
		}
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the user-info endpoint.
	pub fn userinfo_endpoint(mut self, url: Url) -> Self {
		self.userinfo_endpoint = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;
		let userinfo =
			self.userinfo_endpoint.ok_or(ProviderDescriptorError::MissingUserInfoEndpoint)?;
		let descriptor = ProviderDescriptor {
			name: self.name,
			endpoints: ProviderEndpoints { authorization, token, userinfo },
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		for endpoint in
			[ProviderEndpoint::Authorization, ProviderEndpoint::Token, ProviderEndpoint::UserInfo]
		{
			validate_endpoint(endpoint.as_str(), self.endpoint(endpoint))?;
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() == "https" || (url.scheme() == "http" && is_loopback(url)) {
		Ok(())
	} else {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

// Local mock providers listen on plain HTTP.
fn is_loopback(url: &Url) -> bool {
	match url.host_str() {
		Some("localhost") => true,
		Some(host) => host
			.trim_start_matches('[')
			.trim_end_matches(']')
			.parse::<IpAddr>()
			.is_ok_and(|ip| ip.is_loopback()),
		None => false,
	}
}
