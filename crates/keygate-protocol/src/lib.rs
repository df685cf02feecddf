//! Keygate protocol
//!
//! Wire types exchanged between the Keygate client and the authentication API.

pub mod endpoints;
pub mod types;

pub use types::*;
