//! # Utility Functions (`utils`)
//!
//! Provides helpers for saving and loading module parameters.

pub mod serialization;

pub use serialization::{load, save, SerializationError};
