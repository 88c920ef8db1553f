//! # Trainable Parameters

use crate::tensor::{DType, Element};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trainable scalar owned by a layer.
///
/// The value is kept rounded to `dtype`, so reading it back always yields a
/// number representable in the parameter's precision. Forward passes read
/// the value with [`Param::get`]; optimizers and checkpoint loaders write it
/// with [`Param::set`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Param {
    value: f64,
    dtype: DType,
}

impl Param {
    /// Creates a parameter holding `value` rounded to `dtype`.
    pub fn new(value: f64, dtype: DType) -> Self {
        Param {
            value: dtype.round(value),
            dtype,
        }
    }

    /// The stored value, widened to `f64`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The precision the value is stored in.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// The stored value cast to the element type `A`.
    pub fn get<A: Element>(&self) -> A {
        A::cast(self.value)
    }

    /// Replaces the value, rounding it to the parameter's precision.
    pub fn set(&mut self, value: f64) {
        self.value = self.dtype.round(value);
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.dtype)
    }
}
