//! Callback query parameters and authorization-code extraction.

// crates.io
use oauth2::AuthorizationCode;
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// Query parameters the provider appends when redirecting the browser back to the callback.
///
/// Only `code` drives the flow. `error` is what the provider sends instead of a code when the
/// user declines consent; it is logged and otherwise treated like any other missing code.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
	/// Authorization code issued by the provider.
	pub code: Option<String>,
	/// Provider error reported in place of a code.
	pub error: Option<String>,
}
impl CallbackParams {
	/// Builds callback parameters carrying the provided code.
	pub fn with_code(code: impl Into<String>) -> Self {
		Self { code: Some(code.into()), error: None }
	}

	/// Reads the callback's raw query string.
	///
	/// Parsing never fails. Unknown keys are ignored and a repeated key keeps its last value.
	pub fn from_query(query: Option<&str>) -> Self {
		let mut params = Self::default();

		for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
			match key.as_ref() {
				"code" => params.code = Some(value.into_owned()),
				"error" => params.error = Some(value.into_owned()),
				_ => {},
			}
		}

		params
	}

	/// Extracts the authorization code, rejecting absent or empty values.
	pub fn authorization_code(&self) -> Result<AuthorizationCode> {
		match self.code.as_deref() {
			Some(code) if !code.is_empty() => Ok(AuthorizationCode::new(code.to_owned())),
			_ => Err(Error::MissingAuthorizationCode),
		}
	}
}
impl Debug for CallbackParams {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CallbackParams")
			.field("code", &self.code.as_ref().map(|_| "<redacted>"))
			.field("error", &self.error)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn absent_or_empty_code_is_missing() {
		let err = CallbackParams::default()
			.authorization_code()
			.expect_err("Absent code should be rejected.");

		assert!(matches!(err, Error::MissingAuthorizationCode));

		let err = CallbackParams::with_code("")
			.authorization_code()
			.expect_err("Empty code should be rejected.");

		assert!(matches!(err, Error::MissingAuthorizationCode));

		let denied = CallbackParams { code: None, error: Some("access_denied".into()) };

		assert!(matches!(denied.authorization_code(), Err(Error::MissingAuthorizationCode)));
	}

	#[test]
	fn present_code_is_passed_through() {
		let code = CallbackParams::with_code("4/0AX4XfWh")
			.authorization_code()
			.expect("Non-empty code should be accepted.");

		assert_eq!(code.secret(), "4/0AX4XfWh");
	}

	#[test]
	fn query_keeps_last_repeated_value() {
		let params = CallbackParams::from_query(Some("code=a&scope=email&code=4%2FXYZ"));

		assert_eq!(params.code.as_deref(), Some("4/XYZ"));
		assert_eq!(params.error, None);

		let params = CallbackParams::from_query(Some("code=4%2FXYZ&code="));

		assert!(matches!(params.authorization_code(), Err(Error::MissingAuthorizationCode)));
	}

	#[test]
	fn absent_or_garbled_query_has_no_code() {
		assert_eq!(CallbackParams::from_query(None), CallbackParams::default());

		let params = CallbackParams::from_query(Some("%ZZ&error=access_denied&&="));

		assert_eq!(params.code, None);
		assert_eq!(params.error.as_deref(), Some("access_denied"));
	}

	#[test]
	fn debug_redacts_code() {
		let params = CallbackParams::with_code("super-secret-code");

		assert!(!format!("{params:?}").contains("super-secret-code"));
	}
}
