//! # Stochastic Gradient Descent (SGD) Optimizer

use super::{Gradients, Optimizer};
use crate::nn::Module;
use crate::tensor::TensorError;
use std::collections::HashMap;

/// Implements the Stochastic Gradient Descent optimizer.
/// Supports momentum, weight decay, and Nesterov momentum.
#[derive(Debug, Clone)]
pub struct SGD {
    lr: f64,
    momentum: f64,
    weight_decay: f64,
    nesterov: bool,
    // One momentum buffer per parameter name
    momentum_buffers: HashMap<String, f64>,
}

impl SGD {
    /// Creates a new SGD optimizer instance.
    ///
    /// # Arguments
    /// * `lr`: Learning rate.
    /// * `momentum`: Momentum factor (default: 0).
    /// * `weight_decay`: Weight decay (L2 penalty) (default: 0).
    /// * `nesterov`: Enables Nesterov momentum; requires `momentum > 0`.
    pub fn new(
        lr: f64,
        momentum: Option<f64>,
        weight_decay: Option<f64>,
        nesterov: bool,
    ) -> Result<Self, TensorError> {
        let momentum = momentum.unwrap_or(0.0);
        let weight_decay = weight_decay.unwrap_or(0.0);

        if !(lr >= 0.0) {
            return Err(TensorError::InvalidArgument(format!(
                "learning rate must be non-negative, got {}",
                lr
            )));
        }
        if !(momentum >= 0.0) {
            return Err(TensorError::InvalidArgument(format!(
                "momentum must be non-negative, got {}",
                momentum
            )));
        }
        if !(weight_decay >= 0.0) {
            return Err(TensorError::InvalidArgument(format!(
                "weight_decay must be non-negative, got {}",
                weight_decay
            )));
        }
        if nesterov && momentum <= 0.0 {
            return Err(TensorError::InvalidArgument(
                "Nesterov momentum requires momentum > 0".to_string(),
            ));
        }

        Ok(SGD {
            lr,
            momentum,
            weight_decay,
            nesterov,
            momentum_buffers: HashMap::new(),
        })
    }

    /// Plain SGD with only a learning rate.
    pub fn simple(lr: f64) -> Result<Self, TensorError> {
        Self::new(lr, None, None, false)
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }
}

impl Optimizer for SGD {
    fn step<M: Module + ?Sized>(
        &mut self,
        module: &mut M,
        grads: &Gradients,
    ) -> Result<(), TensorError> {
        let mut params = module.parameters_mut();
        if let Some(unknown) = grads.keys().find(|name| !params.contains_key(*name)) {
            return Err(TensorError::UnknownParameter(unknown.clone()));
        }

        for (name, param) in params.iter_mut() {
            let Some(&grad) = grads.get(name) else {
                log::trace!("sgd: no gradient for '{}', skipping", name);
                continue;
            };

            let value = param.value();
            let mut grad = grad;
            if self.weight_decay != 0.0 {
                grad += self.weight_decay * value;
            }

            if self.momentum != 0.0 {
                // The first step seeds the buffer with the gradient itself
                let buf = match self.momentum_buffers.get(name) {
                    Some(&prev) => self.momentum * prev + grad,
                    None => grad,
                };
                self.momentum_buffers.insert(name.clone(), buf);
                grad = if self.nesterov {
                    grad + self.momentum * buf
                } else {
                    buf
                };
            }

            param.set(value - self.lr * grad);
        }

        log::debug!("sgd: updated {} of {} parameters", grads.len(), params.len());
        Ok(())
    }
}
