//! Port traits implemented by the storage backends

pub mod storage;

pub use storage::*;
