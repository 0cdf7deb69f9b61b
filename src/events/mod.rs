//! Event data model: names and payloads.
//!
//! ## Contents
//! - [`EventName`] — closed known set (`Ready`) plus open custom names
//! - [`Payload`] — opaque, cheaply clonable value the bus forwards unchanged
//!
//! The bus itself lives in [`crate::bus`]; this module only defines the
//! vocabulary it is keyed and loaded with.

mod name;
mod payload;

pub use name::EventName;
pub use payload::Payload;
