//! Access tokens parsed from MercadoLibre token responses.

// self
use crate::_prelude::*;

/// `expires` values below this many seconds are treated as relative lifetimes, anything
/// larger as a unix timestamp (roughly ten years of seconds).
const EXPIRES_TIMESTAMP_THRESHOLD: i64 = 315_537_897;

/// Errors produced while reading a token response.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum TokenResponseError {
	/// The response did not carry an `access_token` string.
	#[error("Token response is missing access_token.")]
	MissingAccessToken,
	/// The response carried an expiry that is not a non-negative integer.
	#[error("Token response has an invalid {field} value.")]
	InvalidExpiry {
		/// Offending member name.
		field: &'static str,
	},
}

/// Redacted secret wrapper keeping bearer material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSecret(<redacted>)")
	}
}

/// Bearer credential issued by the token endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	access_token: TokenSecret,
	token_type: Option<String>,
	refresh_token: Option<TokenSecret>,
	expires_at: Option<OffsetDateTime>,
	resource_owner_id: Option<String>,
	scope: Option<String>,
	/// Remaining response members that are not modeled explicitly.
	pub values: Map<String, Value>,
}
impl AccessToken {
	/// Wraps a bare access token with no metadata.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			token_type: None,
			refresh_token: None,
			expires_at: None,
			resource_owner_id: None,
			scope: None,
			values: Map::new(),
		}
	}

	/// Reads a decoded token response, stamping relative expiries against the current clock.
	///
	/// `resource_owner_id_field` names the member identifying the resource owner.
	pub fn from_response(
		body: &Value,
		resource_owner_id_field: &str,
	) -> Result<Self, TokenResponseError> {
		Self::from_response_at(body, resource_owner_id_field, OffsetDateTime::now_utc())
	}

	/// Same as [`AccessToken::from_response`] with an explicit clock.
	pub fn from_response_at(
		body: &Value,
		resource_owner_id_field: &str,
		now: OffsetDateTime,
	) -> Result<Self, TokenResponseError> {
		let mut values = body.as_object().cloned().unwrap_or_default();
		let access_token = match values.remove("access_token") {
			Some(Value::String(token)) if !token.is_empty() => TokenSecret::new(token),
			_ => return Err(TokenResponseError::MissingAccessToken),
		};
		let refresh_token = match values.remove("refresh_token") {
			Some(Value::String(token)) if !token.is_empty() => Some(TokenSecret::new(token)),
			_ => None,
		};
		let expires_at = match (values.remove("expires_in"), values.remove("expires")) {
			(Some(expires_in), _) => {
				let seconds = seconds(&expires_in, "expires_in")?;

				Some(after(now, seconds, "expires_in")?)
			},
			(None, Some(expires)) => {
				let seconds = seconds(&expires, "expires")?;

				if seconds < EXPIRES_TIMESTAMP_THRESHOLD {
					Some(after(now, seconds, "expires")?)
				} else {
					Some(
						OffsetDateTime::from_unix_timestamp(seconds).map_err(|_| {
							TokenResponseError::InvalidExpiry { field: "expires" }
						})?,
					)
				}
			},
			(None, None) => None,
		};
		let resource_owner_id = values.get(resource_owner_id_field).and_then(id_string);
		let token_type = values.get("token_type").and_then(Value::as_str).map(str::to_owned);
		let scope = values.get("scope").and_then(Value::as_str).map(str::to_owned);

		Ok(Self {
			access_token,
			token_type,
			refresh_token,
			expires_at,
			resource_owner_id,
			scope,
			values,
		})
	}

	/// Returns the bearer token value. Callers must avoid logging this string.
	pub fn token(&self) -> &str {
		self.access_token.expose()
	}

	/// Returns the token type (`bearer` for MercadoLibre), if reported.
	pub fn token_type(&self) -> Option<&str> {
		self.token_type.as_deref()
	}

	/// Returns the refresh token, if issued.
	pub fn refresh_token(&self) -> Option<&str> {
		self.refresh_token.as_ref().map(TokenSecret::expose)
	}

	/// Returns the absolute expiry instant, if the response carried one.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// Returns the identifier of the resource owner that authorized the token.
	pub fn resource_owner_id(&self) -> Option<&str> {
		self.resource_owner_id.as_deref()
	}

	/// Returns the granted scope string, if reported.
	pub fn scope(&self) -> Option<&str> {
		self.scope.as_deref()
	}

	/// Returns `true` when the token has an expiry at or before `instant`.
	///
	/// Tokens without an expiry never report as expired.
	pub fn has_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| expires_at <= instant)
	}

	/// Checks expiry against the current UTC clock.
	pub fn has_expired(&self) -> bool {
		self.has_expired_at(OffsetDateTime::now_utc())
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.token()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_at", &self.expires_at)
			.field("resource_owner_id", &self.resource_owner_id)
			.field("scope", &self.scope)
			.finish()
	}
}

fn after(
	now: OffsetDateTime,
	seconds: i64,
	field: &'static str,
) -> Result<OffsetDateTime, TokenResponseError> {
	now.checked_add(Duration::seconds(seconds)).ok_or(TokenResponseError::InvalidExpiry { field })
}

fn seconds(value: &Value, field: &'static str) -> Result<i64, TokenResponseError> {
	let seconds = match value {
		Value::Number(number) => number.as_i64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	};

	seconds.filter(|s| *s >= 0).ok_or(TokenResponseError::InvalidExpiry { field })
}

pub(crate) fn id_string(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros;
	// self
	use super::*;

	#[test]
	fn reads_every_standard_member() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::from_response_at(
			&json!({
				"access_token": "APP_USR-123",
				"token_type": "bearer",
				"expires_in": 21600,
				"scope": "offline_access read",
				"user_id": 8_675_309,
				"refresh_token": "TG-456",
			}),
			"user_id",
			now,
		)
		.expect("Token response should parse.");

		assert_eq!(token.token(), "APP_USR-123");
		assert_eq!(token.token_type(), Some("bearer"));
		assert_eq!(token.refresh_token(), Some("TG-456"));
		assert_eq!(token.expires_at(), Some(macros::datetime!(2025-01-01 06:00 UTC)));
		assert_eq!(token.resource_owner_id(), Some("8675309"));
		assert_eq!(token.scope(), Some("offline_access read"));
		assert!(!token.values.contains_key("access_token"));
		assert!(token.values.contains_key("user_id"));
		assert!(!token.has_expired_at(macros::datetime!(2025-01-01 05:59 UTC)));
		assert!(token.has_expired_at(macros::datetime!(2025-01-01 06:00 UTC)));
	}

	#[test]
	fn expires_accepts_timestamps_and_lifetimes() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let absolute = AccessToken::from_response_at(
			&json!({ "access_token": "a", "expires": 1_735_700_400 }),
			"user_id",
			now,
		)
		.expect("Absolute expiry should parse.");

		assert_eq!(absolute.expires_at(), Some(macros::datetime!(2025-01-01 03:00 UTC)));

		let relative = AccessToken::from_response_at(
			&json!({ "access_token": "a", "expires": "60" }),
			"user_id",
			now,
		)
		.expect("Relative expiry should parse.");

		assert_eq!(relative.expires_at(), Some(macros::datetime!(2025-01-01 00:01 UTC)));
	}

	#[test]
	fn rejects_missing_token_and_bad_expiry() {
		assert_eq!(
			AccessToken::from_response(&json!({ "user_id": "u" }), "user_id"),
			Err(TokenResponseError::MissingAccessToken)
		);
		assert_eq!(
			AccessToken::from_response(&json!({ "access_token": "a", "expires_in": -5 }), "user_id"),
			Err(TokenResponseError::InvalidExpiry { field: "expires_in" })
		);
	}

	#[test]
	fn out_of_range_lifetimes_are_rejected() {
		assert_eq!(
			AccessToken::from_response(
				&json!({ "access_token": "a", "expires_in": i64::MAX }),
				"user_id",
			),
			Err(TokenResponseError::InvalidExpiry { field: "expires_in" })
		);
		assert_eq!(
			AccessToken::from_response(
				&json!({ "access_token": "a", "expires": i64::MAX }),
				"user_id",
			),
			Err(TokenResponseError::InvalidExpiry { field: "expires" })
		);
	}

	#[test]
	fn formatters_redact_secrets() {
		let token = AccessToken::from_response(
			&json!({ "access_token": "very-secret", "refresh_token": "also-secret" }),
			"user_id",
		)
		.expect("Token response should parse.");
		let rendered = format!("{token:?}");

		assert!(!rendered.contains("very-secret"));
		assert!(!rendered.contains("also-secret"));
		assert_eq!(format!("{:?}", TokenSecret::new("x")), "TokenSecret(<redacted>)");
	}
}
