//! # Optimization Algorithms (`optim`)
//!
//! Optimizers update a module's parameters in place from gradients the
//! caller has computed. Gradients are matched to parameters by name, using
//! the names returned by [`Module::parameters_mut`].

use crate::nn::Module;
use crate::tensor::TensorError;
use std::collections::BTreeMap;

// --- Submodules ---
pub mod sgd;

// Re-export optimizers
pub use sgd::SGD;

/// Gradient of the loss with respect to each named parameter.
pub type Gradients = BTreeMap<String, f64>;

/// Base trait for all optimizers.
pub trait Optimizer {
    /// Performs a single optimization step on `module`.
    ///
    /// Parameters without an entry in `grads` are left untouched.
    ///
    /// # Errors
    /// `UnknownParameter` if `grads` names a parameter the module does not
    /// have. No parameter is updated in that case.
    fn step<M: Module + ?Sized>(&mut self, module: &mut M, grads: &Gradients)
        -> Result<(), TensorError>;
}
