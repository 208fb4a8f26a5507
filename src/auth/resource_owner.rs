//! Resource-owner model wrapping the decoded `/users/me` body.

// self
use crate::{_prelude::*, auth::token::id_string};

/// Error returned when a decoded body is not a JSON object.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Resource owner body must be a JSON object.")]
pub struct NotAnObject;

/// Authenticated MercadoLibre user, kept exactly as the API returned it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceOwner(Map<String, Value>);
impl ResourceOwner {
	/// Wraps a decoded object.
	pub fn new(body: Map<String, Value>) -> Self {
		Self(body)
	}

	/// Looks up a value using dot notation (`address.country`).
	pub fn get(&self, key: &str) -> Option<&Value> {
		lookup(&self.0, key)
	}

	/// Returns the owner identifier; numeric ids are rendered as strings.
	pub fn id(&self) -> Option<String> {
		self.get("id").and_then(id_string)
	}

	/// Borrows the underlying object.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	/// Returns the underlying object.
	pub fn into_map(self) -> Map<String, Value> {
		self.0
	}
}
impl TryFrom<Value> for ResourceOwner {
	type Error = NotAnObject;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(body) => Ok(Self(body)),
			_ => Err(NotAnObject),
		}
	}
}

/// Resolves a dot-separated path through nested objects.
///
/// Returns `None` for an empty key, a missing segment, or a segment that is not an object.
pub fn lookup<'a>(data: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
	if key.is_empty() {
		return None;
	}

	let mut segments = key.split('.');
	let mut current = data.get(segments.next()?)?;

	for segment in segments {
		current = current.as_object()?.get(segment)?;
	}

	Some(current)
}
