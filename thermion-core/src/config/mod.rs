//! Configuration type definitions

pub mod types;

pub use types::{LinkTiming, SessionConfig};
