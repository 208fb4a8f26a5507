//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `mercadolibre_oauth2.request` with the
//!   `operation` and `stage` (call site) fields.
//! - Enable `metrics` to increment the `mercadolibre_oauth2_request_total` counter for every
//!   attempt and outcome, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Token endpoint exchange (any grant).
	AccessToken,
	/// `/users/me` lookup.
	ResourceOwner,
	/// Arbitrary authenticated API call.
	Authenticated,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::AccessToken => "access_token",
			Operation::ResourceOwner => "resource_owner",
			Operation::Authenticated => "authenticated",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// MercadoLibre answered with an error body.
	ProviderError,
	/// Any other failure (configuration, transport, decoding).
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::ProviderError => "provider_error",
			Outcome::Failure => "failure",
		}
	}

	/// Derives the terminal outcome of an operation result.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => Outcome::Success,
			Err(Error::IdentityProvider(_)) => Outcome::ProviderError,
			Err(_) => Outcome::Failure,
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
