//! Transport seam for executing adapter-built requests.
//!
//! The adapter only ever produces [`HttpRequest`] values; [`HttpTransport`] is the single
//! place an HTTP stack plugs in. The crate ships [`ReqwestHttpClient`] behind the default
//! `reqwest` feature, and tests substitute scripted transports without touching the network.

// crates.io
use oauth2::{HttpRequest, HttpResponse};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Executes HTTP requests on behalf of the [`Client`](crate::client::Client).
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared
/// behind an `Arc` across clients, and the returned future must be `Send`. Any HTTP status,
/// including 4xx/5xx, is a successful execution; only failures to obtain a response are
/// reported as [`HttpTransport::TransportError`].
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the full response.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// [`HttpTransport`] backed by a shared [`ReqwestClient`].
///
/// Token endpoints answer directly, so [`ReqwestHttpClient::new`] disables redirect
/// following. Clients passed through [`ReqwestHttpClient::with_client`] are used as-is.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client =
			ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Uses a caller-configured [`ReqwestClient`] (proxies or timeouts, for example).
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(reqwest::Request::try_from(request)?).await?;
			let (status, headers) = (response.status(), response.headers().clone());
			let mut out = HttpResponse::new(response.bytes().await?.to_vec());

			*out.status_mut() = status;
			*out.headers_mut() = headers;

			Ok(out)
		})
	}
}
