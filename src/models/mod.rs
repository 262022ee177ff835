//! Data models for the mock banking backend.
//!
//! Field names follow the JSON the portal frontend already consumes, which
//! mixes snake_case (portal widgets) and camelCase (banking API records).

mod account;
mod message;
mod profile;
mod reference;
mod transfer;

pub use account::*;
pub use message::*;
pub use profile::*;
pub use reference::*;
pub use transfer::*;
