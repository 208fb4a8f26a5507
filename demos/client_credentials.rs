//! Requests an application token with the `client_credentials` grant.
//!
//! Reads `MELI_REGION`, `MELI_CLIENT_ID`, `MELI_CLIENT_SECRET`, and `MELI_REDIRECT_URI` from the
//! environment.

// std
use std::env;
// crates.io
use color_eyre::Result;
// self
use oauth2_mercadolibre::{client::MercadoLibreClient, provider::ProviderConfig};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let provider = ProviderConfig::builder()
		.region(env::var("MELI_REGION").unwrap_or_else(|_| "MLA".into()))
		.client_id(env::var("MELI_CLIENT_ID")?)
		.client_secret(env::var("MELI_CLIENT_SECRET")?)
		.redirect_uri(env::var("MELI_REDIRECT_URI")?)
		.build()?;
	let client = MercadoLibreClient::new(provider)?;
	let token = client.client_credentials().await?;

	println!("Issued token: {token:?}.");

	if let Some(expires_at) = token.expires_at() {
		println!("Expires at {expires_at}.");
	}

	Ok(())
}
