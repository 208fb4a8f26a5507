//! Builds the MercadoLibre authorization URL for a site and prints the endpoints the adapter
//! resolved for it.

// crates.io
use color_eyre::Result;
// self
use oauth2_mercadolibre::provider::{MercadoLibreProvider, ProviderAdapter, ProviderConfig};

fn main() -> Result<()> {
	color_eyre::install()?;

	let region = std::env::args().nth(1).unwrap_or_else(|| "MLA".into());
	let provider = ProviderConfig::builder()
		.region(region)
		.client_id("demo-client")
		.client_secret("demo-secret")
		.redirect_uri("https://app.example.com/oauth/callback")
		.build()?;
	let state = MercadoLibreProvider::new_state();
	let url = provider.authorize_url(&state, &["offline_access", "read"]);

	println!("Send your user to {url}.");
	println!("Keep state `{state}` to validate the redirect.");
	println!("Token endpoint: {}.", provider.token_url());
	println!("Resource owner endpoint: {}.", provider.resource_owner_details_url());

	Ok(())
}
