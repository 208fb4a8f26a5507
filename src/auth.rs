//! Auth-domain models: access tokens issued by the provider and the resource owner they
//! authorize.

pub mod resource_owner;
pub mod token;

pub use resource_owner::*;
pub use token::*;
