//! Adapter-level error types shared across configuration, classification, and transport.

// self
use crate::{_prelude::*, provider::ErrorCode};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-formatting problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The provider answered with an error body.
	#[error(transparent)]
	IdentityProvider(#[from] IdentityProviderError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint answered without a usable token.
	#[error(transparent)]
	TokenResponse(#[from] crate::auth::TokenResponseError),
	/// Resource-owner endpoint answered with something other than an object.
	#[error(transparent)]
	ResourceOwner(#[from] crate::auth::NotAnObject),

	/// Response body could not be decoded as JSON.
	#[error("Provider returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: Option<u16>,
	},
}

/// Configuration and validation failures raised while building the adapter or its requests.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// One or more required options were absent or empty.
	#[error("Required options not defined: {}.", .missing.join(", "))]
	MissingOptions {
		/// Missing option names in declaration order.
		missing: Vec<&'static str>,
	},
	/// Region code is not part of the registry.
	#[error(
		"Region `{region}` is not supported. Valid values for region are only: {}.",
		crate::provider::Region::codes().join(", ")
	)]
	InvalidRegion {
		/// Rejected region code.
		region: String,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A URL could not be composed from its parts.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL or reference.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Error reported by MercadoLibre inside a decoded response body.
#[derive(Debug, ThisError)]
#[error("Identity provider returned an error ({code}): {message}.")]
pub struct IdentityProviderError {
	/// Human-readable message extracted from the body.
	pub message: String,
	/// Provider status or error code.
	pub code: ErrorCode,
	/// HTTP status code of the response, when the host knows it.
	pub http_status: Option<u16>,
	/// Raw decoded body kept for diagnostics.
	pub body: Value,
}

/// Failures to obtain a response from the provider.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
