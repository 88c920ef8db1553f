//! # RTorch Activations
//!
//! Activation functions and parametric activation layers for RTorch.
//!
//! - [`nn::functional`] re-exports the stateless activations (`relu`,
//!   `gelu`, `softmax`, ...) implemented in [`tensor::ops`].
//! - [`nn::PReLU`] and [`nn::PSwish`] are layers with one learnable scalar.
//! - [`optim::SGD`] and [`utils::serialization`] train and checkpoint those
//!   scalars by name.

pub mod tensor;
pub mod nn;
pub mod optim;
pub mod utils;

pub mod prelude {
    pub use crate::nn::functional;
    pub use crate::nn::{
        Forward, Module, PReLU, PReLUConfig, PSwish, PSwishConfig, Param, Sequential,
    };
    pub use crate::optim::{Gradients, Optimizer, SGD};
    pub use crate::tensor::{DType, Element, TensorError};
}
