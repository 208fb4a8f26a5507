//! URL composition helpers.
//!
//! [`compose`] merges query parameters into a (possibly relative) reference using replace
//! semantics, then resolves the reference against an absolute base the way RFC 3986 §5
//! describes: references carrying a scheme are returned untouched, everything else inherits
//! the base scheme and authority and has its path merged against the base path.

// crates.io
use url::{ParseError, form_urlencoded};
// self
use crate::{_prelude::*, error::ConfigError};

/// Parses an absolute base URL.
pub fn parse_base(base: &str) -> Result<Url, ConfigError> {
	Url::parse(base).map_err(|source| ConfigError::InvalidUrl { url: base.to_owned(), source })
}

/// Composes an absolute URL from `base`, a `reference`, and query parameters.
///
/// Each `(key, value)` pair replaces every existing occurrence of `key` in the reference's
/// query before being appended, so later values win instead of accumulating. Segments whose
/// decoded key differs keep their raw text, and an empty parameter list leaves the
/// reference's query exactly as written.
pub fn compose(base: &Url, reference: &str, query: &[(&str, &str)]) -> Result<Url, ConfigError> {
	let reference = with_query_values(reference, query);

	match Url::parse(&reference) {
		Ok(absolute) => Ok(absolute),
		Err(ParseError::RelativeUrlWithoutBase) => base
			.join(&reference)
			.map_err(|source| ConfigError::InvalidUrl { url: reference.into_owned(), source }),
		Err(source) => Err(ConfigError::InvalidUrl { url: reference.into_owned(), source }),
	}
}

fn with_query_values<'a>(reference: &'a str, query: &[(&str, &str)]) -> Cow<'a, str> {
	if query.is_empty() {
		return Cow::Borrowed(reference);
	}

	let (rest, fragment) = match reference.split_once('#') {
		Some((rest, fragment)) => (rest, Some(fragment)),
		None => (reference, None),
	};
	let (path, existing) = match rest.split_once('?') {
		Some((path, existing)) => (path, Some(existing)),
		None => (rest, None),
	};
	let mut segments: Vec<Cow<str>> = existing
		.filter(|q| !q.is_empty())
		.map(|q| q.split('&').map(Cow::Borrowed).collect())
		.unwrap_or_default();

	for (key, value) in query {
		segments.retain(|segment| segment_key(segment) != *key);
		segments.push(Cow::Owned(
			form_urlencoded::Serializer::new(String::new()).append_pair(key, value).finish(),
		));
	}

	let encoded = segments.join("&");
	let mut rebuilt = format!("{path}?{encoded}");

	if let Some(fragment) = fragment {
		rebuilt.push('#');
		rebuilt.push_str(fragment);
	}

	Cow::Owned(rebuilt)
}

// Decoded key of a raw `key=value` query segment.
fn segment_key(segment: &str) -> Cow<'_, str> {
	form_urlencoded::parse(segment.as_bytes()).next().map(|(key, _)| key).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn base(value: &str) -> Url {
		parse_base(value).expect("Base URL fixture should parse.")
	}

	#[test]
	fn absolute_path_replaces_base_path() {
		let api = base("https://api.mercadolibre.com/v1/items?x=1");
		let url = compose(&api, "/users/me", &[]).expect("Composition should succeed.");

		assert_eq!(url.as_str(), "https://api.mercadolibre.com/users/me");
	}

	#[test]
	fn relative_path_merges_with_base_directory() {
		let api = base("https://api.mercadolibre.com/v1/");

		assert_eq!(
			compose(&api, "users/me", &[]).expect("Composition should succeed.").as_str(),
			"https://api.mercadolibre.com/v1/users/me"
		);
		assert_eq!(
			compose(&api, "../sites", &[]).expect("Composition should succeed.").as_str(),
			"https://api.mercadolibre.com/sites"
		);
	}

	#[test]
	fn absolute_reference_is_returned_as_is() {
		let api = base("https://api.mercadolibre.com");
		let url = compose(&api, "https://other.example.com/path?a=1", &[])
			.expect("Composition should succeed.");

		assert_eq!(url.as_str(), "https://other.example.com/path?a=1");
	}

	#[test]
	fn query_values_replace_existing_keys() {
		let api = base("https://api.mercadolibre.com");
		let url = compose(&api, "/items?key=old&other=1&key=older", &[("key", "new")])
			.expect("Composition should succeed.");

		assert_eq!(url.as_str(), "https://api.mercadolibre.com/items?other=1&key=new");

		let url = compose(&api, "/items", &[("a", "1"), ("b", "2"), ("a", "3")])
			.expect("Composition should succeed.");

		assert_eq!(url.as_str(), "https://api.mercadolibre.com/items?b=2&a=3");
	}

	#[test]
	fn untouched_segments_keep_their_raw_form() {
		let api = base("https://api.mercadolibre.com");
		let url = compose(&api, "/items?ids=MLA1,MLA2&flag&q=a%20b", &[("access_token", "t")])
			.expect("Composition should succeed.");

		assert_eq!(
			url.as_str(),
			"https://api.mercadolibre.com/items?ids=MLA1,MLA2&flag&q=a%20b&access_token=t"
		);

		let url = compose(&api, "/items?access%5Ftoken=stale&x=1", &[("access_token", "t")])
			.expect("Composition should succeed.");

		assert_eq!(url.as_str(), "https://api.mercadolibre.com/items?x=1&access_token=t");
	}

	#[test]
	fn query_values_are_encoded_and_fragment_survives() {
		let api = base("https://api.mercadolibre.com");
		let url = compose(&api, "/search#top", &[("q", "a&b c")])
			.expect("Composition should succeed.");

		assert_eq!(url.as_str(), "https://api.mercadolibre.com/search?q=a%26b+c#top");
	}

	#[test]
	fn empty_reference_keeps_base_path() {
		let api = base("https://api.mercadolibre.com/users/me");
		let url = compose(&api, "", &[("k", "v")]).expect("Composition should succeed.");

		assert_eq!(url.as_str(), "https://api.mercadolibre.com/users/me?k=v");
	}

	#[test]
	fn invalid_base_is_rejected() {
		assert!(matches!(parse_base("not a url"), Err(ConfigError::InvalidUrl { .. })));
	}
}
