//! # Neural Network Layer Modules
//!
//! Layers that own trainable state.

pub mod activation;
pub use activation::{PReLU, PReLUConfig, PSwish, PSwishConfig};
