//! Opaque user profile relayed from the provider.

// self
use crate::{_prelude::*, auth::token::decode_json, error::ResponseError};

/// Profile JSON returned by the user-info endpoint.
///
/// The shape is not validated; the value is forwarded to the caller exactly as received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Value);
impl UserProfile {
	/// Wraps an already-parsed profile value.
	pub fn new(value: Value) -> Self {
		Self(value)
	}

	/// Parses a raw user-info body.
	pub fn from_slice(body: &[u8], status: u16) -> Result<Self> {
		decode_json(body)
			.map(Self)
			.map_err(|source| ResponseError::ProfileParse { source, status }.into())
	}

	/// Borrows the profile JSON.
	pub fn as_json(&self) -> &Value {
		&self.0
	}

	/// Consumes the wrapper and returns the profile JSON.
	pub fn into_json(self) -> Value {
		self.0
	}
}
impl From<UserProfile> for Value {
	fn from(profile: UserProfile) -> Self {
		profile.0
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn profile_is_forwarded_untouched() {
		let body = br#"{"email":"a@b.com","verified_email":true,"extra":{"nested":[1,2]}}"#;
		let profile = UserProfile::from_slice(body, 200).expect("Profile body should parse.");

		assert_eq!(
			profile.as_json(),
			&serde_json::json!({"email":"a@b.com","verified_email":true,"extra":{"nested":[1,2]}})
		);
		assert_eq!(
			serde_json::to_string(&profile).expect("Profile should serialize."),
			serde_json::to_string(profile.as_json()).expect("Value should serialize.")
		);
	}

	#[test]
	fn malformed_profile_reports_status() {
		let err = UserProfile::from_slice(b"", 503).expect_err("Empty body should fail to parse.");

		assert!(matches!(err, Error::Response(ResponseError::ProfileParse { status: 503, .. })));
	}
}
