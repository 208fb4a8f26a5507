//! Raw adapter configuration and its validation rules.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{MercadoLibreProvider, Region},
};

/// Option names in the order they are reported when missing.
pub const REQUIRED_OPTIONS: [&str; 4] = ["region", "client_id", "client_secret", "redirect_uri"];

/// Unvalidated adapter configuration.
///
/// Every field is optional on the wire so absent keys surface as a single
/// [`ConfigError::MissingOptions`] listing all of them instead of a serde error on the first.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
	/// MercadoLibre site code (e.g. `MLA`).
	pub region: Option<String>,
	/// OAuth 2.0 client identifier.
	pub client_id: Option<String>,
	/// OAuth 2.0 client secret.
	pub client_secret: Option<String>,
	/// Absolute redirect URI registered for the application.
	pub redirect_uri: Option<String>,
}
impl ProviderConfig {
	/// Creates an empty configuration.
	pub fn builder() -> Self {
		Self::default()
	}

	/// Sets the site code.
	pub fn region(mut self, region: impl Into<String>) -> Self {
		self.region = Some(region.into());

		self
	}

	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
		self.client_secret = Some(client_secret.into());

		self
	}

	/// Sets the redirect URI.
	pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Validates the configuration and builds the adapter.
	pub fn build(self) -> Result<MercadoLibreProvider, ConfigError> {
		MercadoLibreProvider::new(self)
	}

	/// Lists the required options that are absent or empty, in declaration order.
	pub fn missing_options(&self) -> Vec<&'static str> {
		let values = [&self.region, &self.client_id, &self.client_secret, &self.redirect_uri];

		REQUIRED_OPTIONS
			.iter()
			.zip(values)
			.filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
			.map(|(name, _)| *name)
			.collect()
	}

	pub(crate) fn validate(self) -> Result<ValidatedConfig, ConfigError> {
		let missing = self.missing_options();

		if !missing.is_empty() {
			return Err(ConfigError::MissingOptions { missing });
		}

		let (Some(region), Some(client_id), Some(client_secret), Some(redirect_uri)) =
			(self.region, self.client_id, self.client_secret, self.redirect_uri)
		else {
			return Err(ConfigError::MissingOptions { missing: REQUIRED_OPTIONS.to_vec() });
		};
		let region = Region::from_code(&region)?;
		let redirect_uri =
			Url::parse(&redirect_uri).map_err(|source| ConfigError::InvalidRedirect { source })?;

		Ok(ValidatedConfig { region, client_id, client_secret, redirect_uri })
	}
}
impl Debug for ProviderConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderConfig")
			.field("region", &self.region)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.finish()
	}
}

/// Configuration that passed every check; owned by the adapter for its lifetime.
#[derive(Clone)]
pub(crate) struct ValidatedConfig {
	pub(crate) region: Region,
	pub(crate) client_id: String,
	pub(crate) client_secret: String,
	pub(crate) redirect_uri: Url,
}
