//! MercadoLibre implementation of [`ProviderAdapter`].
//!
//! Authenticated requests carry the bearer token as the `access_token` query parameter.
//! The adapter never adds an `Authorization` header; hosts that also set one will send the
//! token twice.

// crates.io
use oauth2::{
	HttpRequest,
	http::{Method, Request, header},
};
use rand::{Rng, distr::Alphanumeric};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{
		Grant, ProviderAdapter, ProviderConfig, Region, RequestOptions, config::ValidatedConfig,
	},
	uri,
};

/// Base URL shared by every region for API and token calls.
pub const API_BASE_URL: &str = "https://api.mercadolibre.com";
/// Token response member naming the resource owner.
pub const RESOURCE_OWNER_ID_FIELD: &str = "user_id";

const STATE_LEN: usize = 32;
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Validated MercadoLibre adapter; immutable once built.
#[derive(Clone)]
pub struct MercadoLibreProvider {
	config: ValidatedConfig,
	api_base: Url,
	authorization_url: Url,
	token_url: Url,
	resource_owner_details_url: Url,
}
impl MercadoLibreProvider {
	/// Validates `config` and precomputes the protocol endpoints.
	pub fn new(config: ProviderConfig) -> Result<Self, ConfigError> {
		let config = config.validate()?;
		let api_base = uri::parse_base(API_BASE_URL)?;
		let authorization_base = uri::parse_base(config.region.authorization_base())?;
		let authorization_url = uri::compose(&authorization_base, "/authorization", &[])?;
		let token_url = uri::compose(&api_base, "/oauth/token", &[])?;
		let resource_owner_details_url = uri::compose(&api_base, "/users/me", &[])?;

		Ok(Self { config, api_base, authorization_url, token_url, resource_owner_details_url })
	}

	/// Site the adapter authorizes against.
	pub fn region(&self) -> Region {
		self.config.region
	}

	/// OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		&self.config.client_id
	}

	/// Registered redirect URI.
	pub fn redirect_uri(&self) -> &Url {
		&self.config.redirect_uri
	}

	/// API root (`https://api.mercadolibre.com/`).
	pub fn api_root(&self) -> &Url {
		&self.api_base
	}

	/// Composes an API URL from a path (absolute or relative) and query parameters.
	pub fn api_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ConfigError> {
		uri::compose(&self.api_base, path, query)
	}

	/// Generates a random CSRF `state` value.
	pub fn new_state() -> String {
		rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
	}

	/// Builds the URL the end user is redirected to.
	///
	/// Falls back to [`ProviderAdapter::default_scopes`] when `scopes` is empty and omits the
	/// `scope` parameter entirely when both are empty.
	pub fn authorize_url(&self, state: &str, scopes: &[&str]) -> Url {
		let scopes = if scopes.is_empty() { self.default_scopes() } else { scopes };
		let mut url = self.authorization_url.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("response_type", "code");
		pairs.append_pair("client_id", &self.config.client_id);
		pairs.append_pair("redirect_uri", self.config.redirect_uri.as_str());

		if !scopes.is_empty() {
			pairs.append_pair("scope", &scopes.join(" "));
		}

		pairs.append_pair("state", state);

		drop(pairs);

		url
	}
}
impl ProviderAdapter for MercadoLibreProvider {
	fn authorization_url(&self) -> &Url {
		&self.authorization_url
	}

	fn token_url(&self) -> &Url {
		&self.token_url
	}

	fn resource_owner_details_url(&self) -> &Url {
		&self.resource_owner_details_url
	}

	fn resource_owner_id_field(&self) -> &'static str {
		RESOURCE_OWNER_ID_FIELD
	}

	fn token_request(&self, grant: &Grant) -> Result<HttpRequest, ConfigError> {
		let mut fields = grant.form_fields(&self.config.redirect_uri);

		fields.push(("client_id", self.config.client_id.as_str()));
		fields.push(("client_secret", self.config.client_secret.as_str()));

		let body = form_urlencoded::Serializer::new(String::new()).extend_pairs(fields).finish();

		Ok(Request::builder()
			.method(Method::POST)
			.uri(self.token_url.as_str())
			.header(header::ACCEPT, JSON_CONTENT_TYPE)
			.header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
			.body(body.into_bytes())?)
	}

	fn authenticated_request(
		&self,
		method: Method,
		url: &str,
		token: &str,
		options: RequestOptions,
	) -> Result<HttpRequest, ConfigError> {
		let url = uri::compose(&self.api_base, url, &[("access_token", token)])?;
		let mut request = Request::builder()
			.method(method)
			.uri(url.as_str())
			.body(options.body.unwrap_or_default())?;

		request.headers_mut().extend(options.headers);

		Ok(request)
	}
}
impl Debug for MercadoLibreProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MercadoLibreProvider")
			.field("region", &self.config.region)
			.field("client_id", &self.config.client_id)
			.field("redirect_uri", &self.config.redirect_uri.as_str())
			.field("authorization_url", &self.authorization_url.as_str())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn provider(region: &str) -> MercadoLibreProvider {
		ProviderConfig::builder()
			.region(region)
			.client_id("mockClientId")
			.client_secret("mockClientSecret")
			.redirect_uri("http://mockredirecturi.com/")
			.build()
			.expect("Provider fixture should be valid.")
	}

	#[test]
	fn endpoints_are_precomputed() {
		let provider = provider("MLA");

		assert_eq!(
			provider.authorization_url().as_str(),
			"https://auth.mercadolibre.com.ar/authorization"
		);
		assert_eq!(provider.token_url().as_str(), "https://api.mercadolibre.com/oauth/token");
		assert_eq!(
			provider.resource_owner_details_url().as_str(),
			"https://api.mercadolibre.com/users/me"
		);
		assert_eq!(provider.api_root().as_str(), "https://api.mercadolibre.com/");
	}

	#[test]
	fn token_request_posts_form_with_credentials() {
		let provider = provider("MLB");
		let request = provider
			.token_request(&Grant::AuthorizationCode { code: "TG-abc".into() })
			.expect("Token request should build.");
		let body = String::from_utf8(request.body().clone()).expect("Form body should be UTF-8.");

		assert_eq!(*request.method(), Method::POST);
		assert_eq!(request.uri(), "https://api.mercadolibre.com/oauth/token");
		assert_eq!(request.headers()[header::CONTENT_TYPE], FORM_CONTENT_TYPE);
		assert_eq!(request.headers()[header::ACCEPT], JSON_CONTENT_TYPE);
		assert_eq!(
			body,
			"grant_type=authorization_code&code=TG-abc\
			 &redirect_uri=http%3A%2F%2Fmockredirecturi.com%2F\
			 &client_id=mockClientId&client_secret=mockClientSecret"
		);
	}

	#[test]
	fn refresh_and_client_credentials_forms() {
		let provider = provider("MLM");
		let refresh = provider
			.token_request(&Grant::RefreshToken { refresh_token: "TG-r".into() })
			.expect("Refresh request should build.");

		assert_eq!(
			refresh.body().as_slice(),
			b"grant_type=refresh_token&refresh_token=TG-r\
			  &client_id=mockClientId&client_secret=mockClientSecret"
		);

		let app = provider
			.token_request(&Grant::ClientCredentials)
			.expect("Client credentials request should build.");

		assert_eq!(
			app.body().as_slice(),
			b"grant_type=client_credentials&client_id=mockClientId&client_secret=mockClientSecret"
		);
	}

	#[test]
	fn state_is_random_alphanumeric() {
		let first = MercadoLibreProvider::new_state();
		let second = MercadoLibreProvider::new_state();

		assert_eq!(first.len(), STATE_LEN);
		assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first, second);
	}

	#[test]
	fn debug_omits_client_secret() {
		assert!(!format!("{:?}", provider("MLA")).contains("mockClientSecret"));
	}
}
