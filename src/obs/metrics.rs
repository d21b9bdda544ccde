// self
use crate::{
	_prelude::*,
	obs::{FailureReason, FlowKind, FlowOutcome},
	provider::ProviderEndpoint,
};

/// Counts the start of a login step.
pub fn record_flow_attempt(kind: FlowKind) {
	increment_flow(kind, FlowOutcome::Attempt);
}

/// Counts how a login step ended; failures are also counted by [`FailureReason`].
pub fn record_flow_result<T>(kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => increment_flow(kind, FlowOutcome::Success),
		Err(err) => {
			increment_flow(kind, FlowOutcome::Failure);

			let reason = FailureReason::from(err);

			#[cfg(feature = "metrics")]
			{
				metrics::counter!(
					"google_oauth_login_failures_total",
					"flow" => kind.as_str(),
					"reason" => reason.as_str()
				)
				.increment(1);
			}
			#[cfg(not(feature = "metrics"))]
			{
				let _ = reason;
			}
		},
	}
}

/// Counts an answer from a provider endpoint, bucketed by [`status_class`].
pub fn record_provider_response(endpoint: ProviderEndpoint, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"google_oauth_login_provider_responses_total",
			"endpoint" => endpoint.as_str(),
			"class" => status_class(status)
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (endpoint, status);
	}
}

/// Collapses an HTTP status into a low-cardinality label.
pub const fn status_class(status: u16) -> &'static str {
	match status {
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}

fn increment_flow(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"google_oauth_login_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
