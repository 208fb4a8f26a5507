//! Region registry mapping MercadoLibre site codes to their authorization servers.

// self
use crate::{_prelude::*, error::ConfigError};

macro_rules! def_regions {
	($($variant:ident => $code:literal, $base:literal, $doc:literal;)+) => {
		/// MercadoLibre site selecting the national authorization server.
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "&'static str")]
		pub enum Region {
			$(
				#[doc = $doc]
				$variant,
			)+
		}
		impl Region {
			/// Every region in registry order.
			pub const ALL: &'static [Region] = &[$(Region::$variant),+];

			/// Returns the site code (e.g. `MLA`).
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Region::$variant => $code,)+
				}
			}

			/// Returns the authorization server base URL for the site.
			pub const fn authorization_base(self) -> &'static str {
				match self {
					$(Region::$variant => $base,)+
				}
			}
		}
	};
}

def_regions! {
	Mla => "MLA", "https://auth.mercadolibre.com.ar", "Argentina.";
	Mlb => "MLB", "https://auth.mercadolivre.com.br", "Brazil.";
	Mco => "MCO", "https://auth.mercadolibre.com.co", "Colombia.";
	Mcr => "MCR", "https://auth.mercadolibre.com.cr", "Costa Rica.";
	Mec => "MEC", "https://auth.mercadolibre.com.ec", "Ecuador.";
	Mlc => "MLC", "https://auth.mercadolibre.cl", "Chile.";
	Mlm => "MLM", "https://auth.mercadolibre.com.mx", "Mexico.";
	Mlu => "MLU", "https://auth.mercadolibre.com.uy", "Uruguay.";
	Mlv => "MLV", "https://auth.mercadolibre.com.ve", "Venezuela.";
	Mpa => "MPA", "https://auth.mercadolibre.com.pa", "Panama.";
	Mpe => "MPE", "https://auth.mercadolibre.com.pe", "Peru.";
	Mpt => "MPT", "https://auth.mercadolibre.com.pt", "Portugal.";
	Mrd => "MRD", "https://auth.mercadolibre.com.do", "Dominican Republic.";
}

impl Region {
	/// Site codes in registry order.
	pub fn codes() -> Vec<&'static str> {
		Self::ALL.iter().map(|region| region.as_str()).collect()
	}

	/// Looks up a site code; codes are case-sensitive.
	pub fn from_code(code: &str) -> Result<Self, ConfigError> {
		Self::ALL
			.iter()
			.copied()
			.find(|region| region.as_str() == code)
			.ok_or_else(|| ConfigError::InvalidRegion { region: code.to_owned() })
	}
}
impl Display for Region {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Region {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_code(s)
	}
}
impl TryFrom<String> for Region {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::from_code(&value)
	}
}
impl From<Region> for &'static str {
	fn from(value: Region) -> Self {
		value.as_str()
	}
}

/// Resolves a site code to its authorization server base URL.
pub fn resolve(code: &str) -> Result<&'static str, ConfigError> {
	Region::from_code(code).map(Region::authorization_base)
}
