//! Response classification for decoded MercadoLibre bodies.
//!
//! MercadoLibre reports failures inside the JSON body (`error`, `message`, `status`) rather
//! than through the OAuth `error_description` convention, so the host hands every decoded
//! body to [`classify`] before trusting it. Classification is plain data; turning an error
//! into [`IdentityProviderError`](crate::error::IdentityProviderError) is left to the caller.

// self
use crate::_prelude::*;

/// Provider status or error code attached to an error body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
	/// Numeric status (usually mirrors the HTTP status).
	Status(i64),
	/// Symbolic code such as `invalid_grant`.
	Text(String),
}
impl ErrorCode {
	/// Returns the numeric status, if the code is numeric.
	pub fn as_status(&self) -> Option<i64> {
		match self {
			ErrorCode::Status(status) => Some(*status),
			ErrorCode::Text(_) => None,
		}
	}
}
impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			ErrorCode::Status(status) => write!(f, "{status}"),
			ErrorCode::Text(text) => f.write_str(text),
		}
	}
}

/// Message and code extracted from an error body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderErrorDetails {
	/// Human-readable message.
	pub message: String,
	/// Status or error code.
	pub code: ErrorCode,
}

/// Outcome of inspecting a decoded body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
	/// No error indicator was present.
	Ok,
	/// The provider reported an error.
	Error(ProviderErrorDetails),
}
impl Classification {
	/// Returns true for [`Classification::Ok`].
	pub fn is_ok(&self) -> bool {
		matches!(self, Classification::Ok)
	}

	/// Returns the error details, if any.
	pub fn error(&self) -> Option<&ProviderErrorDetails> {
		match self {
			Classification::Ok => None,
			Classification::Error(details) => Some(details),
		}
	}
}

/// Classifies a decoded response body.
///
/// Objects with a truthy `error` member are errors. The message comes from a truthy
/// `message` member and the code from a truthy `status` member; either one falls back to the
/// `error` value itself when absent. Everything else, including non-object bodies, is
/// [`Classification::Ok`].
pub fn classify(body: &Value) -> Classification {
	let Some(object) = body.as_object() else {
		return Classification::Ok;
	};
	let Some(error) = object.get("error").filter(|value| is_truthy(value)) else {
		return Classification::Ok;
	};
	let fallback = display_value(error);
	let message = object
		.get("message")
		.filter(|value| is_truthy(value))
		.map(display_value)
		.unwrap_or_else(|| fallback.clone());
	let code = object
		.get("status")
		.filter(|value| is_truthy(value))
		.map(error_code)
		.unwrap_or(ErrorCode::Text(fallback));

	Classification::Error(ProviderErrorDetails { message, code })
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => !text.is_empty() && text != "0",
		Value::Array(items) => !items.is_empty(),
		Value::Object(members) => !members.is_empty(),
	}
}

fn display_value(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

fn error_code(value: &Value) -> ErrorCode {
	match value {
		Value::Number(number) => number
			.as_i64()
			.map(ErrorCode::Status)
			.unwrap_or_else(|| ErrorCode::Text(number.to_string())),
		Value::String(text) => text
			.trim()
			.parse()
			.map(ErrorCode::Status)
			.unwrap_or_else(|_| ErrorCode::Text(text.clone())),
		other => ErrorCode::Text(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn error_with_message_and_status() {
		let classified = classify(&json!({
			"error": "invalid_grant",
			"status": 400,
			"message": "Redirect URI does not match the original",
		}));

		assert_eq!(
			classified,
			Classification::Error(ProviderErrorDetails {
				message: "Redirect URI does not match the original".into(),
				code: ErrorCode::Status(400),
			})
		);
	}

	#[test]
	fn token_body_is_ok() {
		assert!(classify(&json!({ "access_token": "t", "user_id": "u" })).is_ok());
	}

	#[test]
	fn falls_back_to_error_value() {
		let classified = classify(&json!({ "error": "not_found" }));
		let details = classified.error().expect("Body with error key should classify as error.");

		assert_eq!(details.message, "not_found");
		assert_eq!(details.code, ErrorCode::Text("not_found".into()));
	}

	#[test]
	fn falsy_members_are_ignored() {
		assert!(classify(&json!({ "error": null, "message": "x" })).is_ok());
		assert!(classify(&json!({ "error": "" })).is_ok());
		assert!(classify(&json!({ "error": false })).is_ok());

		let classified = classify(&json!({ "error": "forbidden", "message": "", "status": 0 }));
		let details = classified.error().expect("Truthy error should classify as error.");

		assert_eq!(details.message, "forbidden");
		assert_eq!(details.code, ErrorCode::Text("forbidden".into()));
	}

	#[test]
	fn numeric_string_status_becomes_numeric() {
		let classified = classify(&json!({ "error": "bad_request", "status": "401" }));

		assert_eq!(classified.error().map(|d| d.code.as_status()), Some(Some(401)));
	}

	#[test]
	fn non_object_bodies_are_ok() {
		assert!(classify(&json!([{ "error": "x" }])).is_ok());
		assert!(classify(&json!("error")).is_ok());
		assert!(classify(&Value::Null).is_ok());
	}
}
