//! Provider-facing data (regions, configuration, grants) and behavior (adapter, classifier).
//!
//! `region` holds the fixed site → authorization server table, `config` validates the
//! options an adapter is built from, and `mercadolibre` implements [`ProviderAdapter`], the
//! hook set a host OAuth engine calls to obtain endpoint URLs, format token and
//! authenticated requests, and check decoded responses through [`classify`].

pub mod adapter;
pub mod classify;
pub mod config;
pub mod grant;
pub mod mercadolibre;
pub mod region;

pub use adapter::*;
pub use classify::*;
pub use config::{ProviderConfig, REQUIRED_OPTIONS};
pub use grant::*;
pub use mercadolibre::*;
pub use region::Region;
