//! Login observability.
//!
//! # Feature Flags
//!
//! - `tracing`: every stage runs inside a `google_oauth_login.flow` span carrying `flow`, `stage`
//!   and `provider`. Provider rejections, non-success statuses and failed stages emit `warn!`;
//!   completed stages emit `debug!`.
//! - `metrics`: three counters, all prefixed `google_oauth_login_`:
//!   - `flow_total{flow, outcome}` for every attempt and its result,
//!   - `failures_total{flow, reason}` with the [`FailureReason`] of each failed login,
//!   - `provider_responses_total{endpoint, class}` for every answer from Google, bucketed by
//!     status class.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, error::ResponseError};

/// The two user-facing steps of a login.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Building the consent redirect.
	AuthorizationRedirect,
	/// Handling the provider callback (token exchange + profile fetch).
	Callback,
}
impl FlowKind {
	/// Stable label for span and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AuthorizationRedirect => "authorization_redirect",
			FlowKind::Callback => "callback",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each login step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// The step started.
	Attempt,
	/// The browser got its redirect or the caller got a profile.
	Success,
	/// The caller got a `{"detail": ...}` error.
	Failure,
}
impl FlowOutcome {
	/// Stable label for span and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}

/// Why a login failed, coarse enough to use as a metric label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureReason {
	/// The callback carried no usable code.
	MissingCode,
	/// The token endpoint answered with an `error` key.
	ProviderRejected,
	/// The token endpoint answered without an access token.
	MissingAccessToken,
	/// The token body was not JSON.
	MalformedToken,
	/// The profile body was not JSON.
	MalformedProfile,
	/// A provider call never produced a response.
	Transport,
	/// Request construction or local setup failed.
	Config,
}
impl FailureReason {
	/// Stable label for span and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureReason::MissingCode => "missing_code",
			FailureReason::ProviderRejected => "provider_rejected",
			FailureReason::MissingAccessToken => "missing_access_token",
			FailureReason::MalformedToken => "malformed_token",
			FailureReason::MalformedProfile => "malformed_profile",
			FailureReason::Transport => "transport",
			FailureReason::Config => "config",
		}
	}
}
impl From<&Error> for FailureReason {
	fn from(err: &Error) -> Self {
		match err {
			Error::MissingAuthorizationCode => Self::MissingCode,
			Error::ProviderToken { .. } => Self::ProviderRejected,
			Error::MissingAccessToken => Self::MissingAccessToken,
			Error::Response(ResponseError::TokenParse { .. }) => Self::MalformedToken,
			Error::Response(ResponseError::ProfileParse { .. }) => Self::MalformedProfile,
			Error::Transport(_) => Self::Transport,
			Error::Config(_) => Self::Config,
		}
	}
}
impl Display for FailureReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
