//! Async client driving the adapter hooks over an [`HttpTransport`].
//!
//! [`Client`] is the host engine in miniature: it asks the adapter for a request, executes it,
//! decodes the JSON body, and lets the adapter classify it before mapping the result into an
//! [`AccessToken`] or [`ResourceOwner`].

// crates.io
use oauth2::{HttpRequest, http::Method};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ResourceOwner},
	error::TransportError,
	http::HttpTransport,
	obs::{self, Operation, Outcome, RequestSpan},
	provider::{Grant, MercadoLibreProvider, ProviderAdapter, RequestOptions},
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport and the MercadoLibre adapter.
pub type MercadoLibreClient = Client<ReqwestHttpClient>;

/// Executes adapter-built requests and interprets their responses.
#[derive(Clone)]
pub struct Client<T, A = MercadoLibreProvider>
where
	T: ?Sized + HttpTransport,
	A: ?Sized + ProviderAdapter,
{
	/// Adapter producing requests and checking responses.
	pub adapter: Arc<A>,
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
}
impl<T, A> Client<T, A>
where
	T: ?Sized + HttpTransport,
	A: ?Sized + ProviderAdapter,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(adapter: impl Into<Arc<A>>, transport: impl Into<Arc<T>>) -> Self {
		Self { adapter: adapter.into(), transport: transport.into() }
	}

	/// Requests an access token for `grant` and maps the response.
	pub async fn get_access_token(&self, grant: Grant) -> Result<AccessToken> {
		const OPERATION: Operation = Operation::AccessToken;

		let span = RequestSpan::new(OPERATION, grant.grant_type().as_str());

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let request = self.adapter.token_request(&grant)?;
				let body = self.send_json(request).await?;

				Ok(self.adapter.create_access_token(&body)?)
			})
			.await;

		obs::record_outcome(OPERATION, Outcome::of(&result));

		result
	}

	/// Exchanges an authorization `code` returned to the redirect URI.
	pub async fn exchange_code(&self, code: impl Into<String>) -> Result<AccessToken> {
		self.get_access_token(Grant::AuthorizationCode { code: code.into() }).await
	}

	/// Rotates a refresh token into a new access token.
	pub async fn refresh_token(&self, refresh_token: impl Into<String>) -> Result<AccessToken> {
		self.get_access_token(Grant::RefreshToken { refresh_token: refresh_token.into() }).await
	}

	/// Obtains an application token via the `client_credentials` grant.
	pub async fn client_credentials(&self) -> Result<AccessToken> {
		self.get_access_token(Grant::ClientCredentials).await
	}

	/// Fetches the user the token was issued for.
	pub async fn resource_owner(&self, token: &AccessToken) -> Result<ResourceOwner> {
		const OPERATION: Operation = Operation::ResourceOwner;

		let span = RequestSpan::new(OPERATION, "resource_owner");

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.adapter.resource_owner_details_url().as_str();
				let request = self.adapter.authenticated_request(
					Method::GET,
					url,
					token.token(),
					RequestOptions::default(),
				)?;

				match self.send_json(request).await? {
					Value::Object(body) => Ok(self.adapter.create_resource_owner(body)),
					_ => Err(crate::auth::NotAnObject.into()),
				}
			})
			.await;

		obs::record_outcome(OPERATION, Outcome::of(&result));

		result
	}

	/// Sends an authenticated request to `url` and returns the checked JSON body.
	///
	/// Relative `url`s resolve against the API root. An empty response body decodes as
	/// [`Value::Null`].
	pub async fn authenticated_json(
		&self,
		method: Method,
		url: &str,
		token: &AccessToken,
		options: RequestOptions,
	) -> Result<Value> {
		const OPERATION: Operation = Operation::Authenticated;

		let span = RequestSpan::new(OPERATION, "authenticated_json");

		obs::record_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let request =
					self.adapter.authenticated_request(method, url, token.token(), options)?;

				self.send_json(request).await
			})
			.await;

		obs::record_outcome(OPERATION, Outcome::of(&result));

		result
	}

	async fn send_json(&self, request: HttpRequest) -> Result<Value> {
		let response =
			self.transport.execute(request).await.map_err(TransportError::network)?;
		let status = response.status().as_u16();
		let body = response.body();
		let value = if body.iter().all(u8::is_ascii_whitespace) {
			Value::Null
		} else {
			let mut deserializer = serde_json::Deserializer::from_slice(body);

			serde_path_to_error::deserialize(&mut deserializer)
				.map_err(|source| Error::ResponseParse { source, status: Some(status) })?
		};

		if let Err(e) = self.adapter.check_response(Some(status), &value) {
			obs::trace_provider_error(e.http_status, &e.code);

			return Err(e.into());
		}

		Ok(value)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client backed by a fresh [`ReqwestHttpClient`].
	pub fn new(adapter: MercadoLibreProvider) -> Result<Self, ConfigError> {
		Ok(Self::with_transport(adapter, ReqwestHttpClient::new()?))
	}
}
impl<T, A> Debug for Client<T, A>
where
	T: ?Sized + HttpTransport,
	A: ?Sized + ProviderAdapter + Debug,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client").field("adapter", &self.adapter).finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// crates.io
	use oauth2::{HttpResponse, http::StatusCode};
	// self
	use super::*;
	use crate::{http::TransportFuture, provider::ProviderConfig};

	#[derive(Default)]
	struct Scripted {
		responses: Mutex<Vec<(u16, &'static str)>>,
	}
	impl Scripted {
		fn reply(status: u16, body: &'static str) -> Self {
			Self { responses: Mutex::new(vec![(status, body)]) }
		}
	}
	impl HttpTransport for Scripted {
		type TransportError = std::io::Error;

		fn execute(&self, _request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
			let next = self.responses.lock().expect("Script should lock.").pop();

			Box::pin(async move {
				let (status, body) = next.ok_or_else(|| {
					std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "script exhausted")
				})?;
				let mut response = HttpResponse::new(body.as_bytes().to_vec());

				*response.status_mut() =
					StatusCode::from_u16(status).expect("Scripted status should be valid.");

				Ok(response)
			})
		}
	}

	fn client(transport: Scripted) -> Client<Scripted> {
		let provider = ProviderConfig::builder()
			.region("MLA")
			.client_id("id")
			.client_secret("secret")
			.redirect_uri("https://app.example.com/cb")
			.build()
			.expect("Provider fixture should be valid.");

		Client::with_transport(provider, transport)
	}

	#[tokio::test]
	async fn whitespace_body_decodes_as_null() {
		let client = client(Scripted::reply(204, " "));
		let value = client
			.authenticated_json(
				Method::DELETE,
				"/items/1",
				&AccessToken::new("t"),
				RequestOptions::default(),
			)
			.await
			.expect("Empty body should be accepted.");

		assert_eq!(value, Value::Null);
	}

	#[tokio::test]
	async fn malformed_json_keeps_status() {
		let client = client(Scripted::reply(502, "<html>"));
		let err = client.client_credentials().await.expect_err("HTML body must fail to decode.");

		assert!(matches!(err, Error::ResponseParse { status: Some(502), .. }));
	}

	#[tokio::test]
	async fn transport_failures_are_wrapped() {
		let client = client(Scripted::default());
		let err = client.client_credentials().await.expect_err("Exhausted script must fail.");

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	}
}
