// self
use crate::{
	_prelude::*,
	obs::{FailureReason, FlowKind},
	provider::ProviderEndpoint,
};

/// Future returned by [`FlowSpan::instrument`].
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`FlowSpan::instrument`].
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span around one login stage, labeled with the flow, the stage and the provider.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens a `google_oauth_login.flow` span.
	pub fn new(kind: FlowKind, stage: &'static str, provider: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"google_oauth_login.flow",
				flow = kind.as_str(),
				stage,
				provider
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage, provider);

			Self {}
		}
	}

	/// Runs a synchronous stage inside the span.
	pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Runs an async stage inside the span without holding a guard across `.await`.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs the provider's raw `error` payload from the token endpoint.
pub fn log_provider_rejection(payload: &Value) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(%payload, "token endpoint rejected the authorization code");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = payload;
	}
}

/// Logs the `error` query parameter a provider sends when consent is declined.
pub fn log_callback_error(error: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(error, "callback arrived with a provider error instead of a code");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}

/// Logs a non-success HTTP status from an endpoint whose body is still being used.
pub fn log_unexpected_status(endpoint: ProviderEndpoint, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			endpoint = endpoint.as_str(),
			status,
			"provider answered with a non-success status"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (endpoint, status);
	}
}

/// Logs the error that ended a login step, tagged with its [`FailureReason`].
pub fn log_stage_failure(kind: FlowKind, stage: &'static str, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			flow = kind.as_str(),
			stage,
			reason = FailureReason::from(err).as_str(),
			error = %err,
			"login stage failed"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, stage, FailureReason::from(err));
	}
}

/// Logs a completed login stage.
pub fn log_stage_success(kind: FlowKind, stage: &'static str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(flow = kind.as_str(), stage, "login stage completed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, stage);
	}
}
