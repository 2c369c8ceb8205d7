//! # Pluginhub Core Kernel
//!
//! The `kernel` module holds what every other subsystem of `pluginhub-core`
//! shares: the crate-wide [`Error`](error::Error) type with its `Result`
//! alias, and the well-known constants (option keys, URL layout, defaults)
//! used by the serializers and the option store.
pub mod constants;
pub mod error;

pub use error::{Error, Result};
