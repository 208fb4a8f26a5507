//! Provider adapter hooks consumed by the host OAuth engine.
//!
//! The trait keeps every hook on crate-owned or `oauth2`-owned types so hosts never depend
//! on a particular HTTP client. Requests are produced as [`HttpRequest`] values and decoded
//! bodies come back as plain [`Value`]s.

// crates.io
use oauth2::{
	HttpRequest,
	http::{HeaderMap, HeaderName, HeaderValue, Method},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ResourceOwner, TokenResponseError},
	error::{ConfigError, IdentityProviderError},
	provider::{Classification, Grant, classify},
};

/// Extra headers and body attached to an authenticated request.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// Headers copied onto the request verbatim.
	pub headers: HeaderMap,
	/// Request body; empty when absent.
	pub body: Option<Vec<u8>>,
}
impl RequestOptions {
	/// Adds a header, replacing any previous value under the same name.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Sets the request body.
	pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = Some(body.into());

		self
	}
}

/// Provider-specific pieces of the Authorization Code flow.
///
/// Implementors are required to be `Send + Sync`. Only the endpoint and request hooks are
/// mandatory; response checking, resource-owner mapping, and token parsing have default
/// implementations built on [`classify`].
pub trait ProviderAdapter: Send + Sync {
	/// Base authorization endpoint (no query).
	fn authorization_url(&self) -> &Url;

	/// Token endpoint.
	fn token_url(&self) -> &Url;

	/// Endpoint returning the authenticated resource owner.
	fn resource_owner_details_url(&self) -> &Url;

	/// Scopes requested when the caller passes none.
	fn default_scopes(&self) -> &[&'static str] {
		&[]
	}

	/// Member of the token response that identifies the resource owner.
	fn resource_owner_id_field(&self) -> &'static str;

	/// Builds the token endpoint request for `grant`.
	fn token_request(&self, grant: &Grant) -> Result<HttpRequest, ConfigError>;

	/// Builds a request carrying `token` as its bearer credential.
	fn authenticated_request(
		&self,
		method: Method,
		url: &str,
		token: &str,
		options: RequestOptions,
	) -> Result<HttpRequest, ConfigError>;

	/// Raises an [`IdentityProviderError`] when the decoded body reports a failure.
	fn check_response(
		&self,
		http_status: Option<u16>,
		body: &Value,
	) -> Result<(), IdentityProviderError> {
		match classify(body) {
			Classification::Ok => Ok(()),
			Classification::Error(details) => Err(IdentityProviderError {
				message: details.message,
				code: details.code,
				http_status,
				body: body.clone(),
			}),
		}
	}

	/// Maps a successful token response into an [`AccessToken`].
	fn create_access_token(&self, body: &Value) -> Result<AccessToken, TokenResponseError> {
		AccessToken::from_response(body, self.resource_owner_id_field())
	}

	/// Wraps a successful resource-owner response.
	fn create_resource_owner(&self, body: Map<String, Value>) -> ResourceOwner {
		ResourceOwner::new(body)
	}
}
