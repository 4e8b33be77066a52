//! PartSmart Core
//!
//! Domain logic shared by every storage backend: the error type, the storage
//! ports, part matching, rating aggregation and payload validation.

pub mod error;
pub mod ports;
pub mod rating;
pub mod search;
pub mod validation;

pub use error::{MarketError, Result};
pub use partsmart_types::*;
pub use ports::*;

/// Fresh entity id
///
/// UUID v7, so ids sort by creation time.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
