//! SAML 2.0 types and data structures.
//!
//! This module contains the constants, query messages and parsed values
//! exchanged with attribute and authorization services.

mod attribute;
mod constants;
mod decision;
mod query;
mod status;

pub use attribute::*;
pub use constants::*;
pub use decision::*;
pub use query::*;
pub use status::*;
