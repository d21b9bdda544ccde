//! Token endpoint response classification.

// crates.io
use oauth2::AccessToken;
use serde::de::DeserializeOwned;
use serde_json::Map;
// self
use crate::{_prelude::*, error::ResponseError};

/// Outcome of a token endpoint call.
///
/// Only two fields are ever inspected: `error`, whose presence alone marks a rejection, and
/// `access_token`. Everything else the provider returns is ignored.
#[derive(Debug)]
pub enum TokenResponse {
	/// Provider granted an access token.
	Granted(AccessToken),
	/// Provider answered with an `error` key; the value is kept verbatim.
	Rejected(Value),
}
impl TokenResponse {
	/// Classifies a raw token endpoint body.
	///
	/// The HTTP status is carried into parse errors only; a 400 with a well-formed body is
	/// classified the same way as a 200.
	pub fn from_slice(body: &[u8], status: u16) -> Result<Self> {
		let parse_err = |source| ResponseError::TokenParse { source, status };
		let mut object: Map<String, Value> = decode_json(body).map_err(parse_err)?;

		if let Some(payload) = object.remove("error") {
			return Ok(Self::Rejected(payload));
		}

		let grant: TokenGrant =
			serde_path_to_error::deserialize(Value::Object(object)).map_err(parse_err)?;

		grant.access_token.map(Self::Granted).ok_or(Error::MissingAccessToken)
	}

	/// Returns the access token, turning a rejection into [`Error::ProviderToken`].
	pub fn into_access_token(self) -> Result<AccessToken> {
		match self {
			Self::Granted(token) => Ok(token),
			Self::Rejected(payload) => Err(Error::ProviderToken { payload }),
		}
	}
}

#[derive(Deserialize)]
struct TokenGrant {
	access_token: Option<AccessToken>,
}

pub(crate) fn decode_json<T>(
	body: &[u8],
) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
where
	T: DeserializeOwned,
{
	let de = &mut serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(de)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn access_token_is_extracted() {
		let body = br#"{"access_token":"T1","expires_in":3599}"#;
		let response = TokenResponse::from_slice(body, 200).expect("Token body should parse.");
		let token = response.into_access_token().expect("Token should be granted.");

		assert_eq!(token.secret(), "T1");
	}

	#[test]
	fn error_key_wins_regardless_of_status_or_other_fields() {
		let response = TokenResponse::from_slice(
			br#"{"error":"invalid_grant","access_token":"ignored"}"#,
			200,
		)
		.expect("Rejected body should parse.");

		assert!(matches!(
			&response,
			TokenResponse::Rejected(Value::String(code)) if code == "invalid_grant"
		));

		let err = response.into_access_token().expect_err("Rejection should surface as an error.");

		assert!(matches!(err, Error::ProviderToken { .. }));
	}

	#[test]
	fn structured_error_payload_is_kept_verbatim() {
		let body = br#"{"error":{"code":400,"message":"Bad Request","status":"INVALID_ARGUMENT"}}"#;
		let response = TokenResponse::from_slice(body, 400).expect("Rejected body should parse.");
		let TokenResponse::Rejected(payload) = response else {
			panic!("Structured error payload should be classified as a rejection.");
		};

		assert_eq!(
			payload,
			serde_json::json!({"code":400,"message":"Bad Request","status":"INVALID_ARGUMENT"})
		);
	}

	#[test]
	fn missing_access_token_is_reported() {
		let err = TokenResponse::from_slice(br#"{"token_type":"Bearer"}"#, 200)
			.expect_err("Body without access_token should be rejected.");

		assert!(matches!(err, Error::MissingAccessToken));
	}

	#[test]
	fn malformed_bodies_report_parse_errors() {
		let err = TokenResponse::from_slice(b"<html>oops</html>", 502)
			.expect_err("Non-JSON body should fail to parse.");

		assert!(matches!(err, Error::Response(ResponseError::TokenParse { status: 502, .. })));

		let err = TokenResponse::from_slice(br#"{"access_token":42}"#, 200)
			.expect_err("Non-string access_token should fail to parse.");
		let Error::Response(ResponseError::TokenParse { source, .. }) = err else {
			panic!("Expected a token parse error.");
		};

		assert_eq!(source.path().to_string(), "access_token");
	}
}
