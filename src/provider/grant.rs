//! Token endpoint grants and their form encoding.

// self
use crate::_prelude::*;

/// OAuth 2.0 grant types MercadoLibre accepts at its token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	AuthorizationCode,
	/// Refresh Token grant for long-lived sessions.
	RefreshToken,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
			GrantType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Grant plus the parameters it contributes to the token request form.
#[derive(Clone, PartialEq, Eq)]
pub enum Grant {
	/// Trades an authorization code received on the redirect URI.
	AuthorizationCode {
		/// Code returned by the authorization server.
		code: String,
	},
	/// Rotates an access token using a refresh token.
	RefreshToken {
		/// Previously issued refresh token.
		refresh_token: String,
	},
	/// Requests an app-only token.
	ClientCredentials,
}
impl Grant {
	/// Returns the grant type tag.
	pub fn grant_type(&self) -> GrantType {
		match self {
			Grant::AuthorizationCode { .. } => GrantType::AuthorizationCode,
			Grant::RefreshToken { .. } => GrantType::RefreshToken,
			Grant::ClientCredentials => GrantType::ClientCredentials,
		}
	}

	/// Grant-specific form fields, excluding client credentials.
	pub(crate) fn form_fields<'a>(&'a self, redirect_uri: &'a Url) -> Vec<(&'static str, &'a str)> {
		let mut fields = vec![("grant_type", self.grant_type().as_str())];

		match self {
			Grant::AuthorizationCode { code } => {
				fields.push(("code", code.as_str()));
				fields.push(("redirect_uri", redirect_uri.as_str()));
			},
			Grant::RefreshToken { refresh_token } =>
				fields.push(("refresh_token", refresh_token.as_str())),
			Grant::ClientCredentials => {},
		}

		fields
	}
}
impl Debug for Grant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		// Codes and refresh tokens are credentials.
		f.debug_tuple("Grant").field(&self.grant_type()).finish()
	}
}
