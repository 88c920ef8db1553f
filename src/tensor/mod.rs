//! # Tensor Module
//!
//! Element types, precision tags and the activation kernels that operate on
//! `ndarray` arrays. Arrays themselves are plain `ndarray` types; this module
//! only adds what the layer library needs on top of them.

use half::{bf16, f16};
use num_traits::Float;
use std::fmt::{Debug, Display};

// --- Submodules ---
pub mod dtype;
pub mod ops;

// --- Re-exports ---
pub use dtype::DType;

// --- Error Handling ---
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    #[error("Invalid axis {axis} for array with {ndim} dimensions")]
    InvalidAxis { axis: isize, ndim: usize },
    #[error("Incompatible shape for operation {op}: {shape:?}")]
    IncompatibleShapes { op: String, shape: Vec<usize> },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unknown parameter: '{0}'")]
    UnknownParameter(String),
}

// --- Element Types ---

/// A floating-point array element the kernels and layers can operate on.
///
/// The associated `DTYPE` is the precision tag of arrays holding this type,
/// so an output's precision is always the input's precision.
pub trait Element: Float + Debug + Display + Default + Send + Sync + 'static {
    /// Precision tag of this element type.
    const DTYPE: DType;

    /// Converts an `f64` into this element type, rounding to nearest.
    fn cast(value: f64) -> Self;

    /// Widens this value to `f64`.
    fn upcast(self) -> f64;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    fn cast(value: f64) -> Self {
        value as f32
    }

    fn upcast(self) -> f64 {
        self as f64
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    fn cast(value: f64) -> Self {
        value
    }

    fn upcast(self) -> f64 {
        self
    }
}

impl Element for f16 {
    const DTYPE: DType = DType::F16;

    fn cast(value: f64) -> Self {
        f16::from_f64(value)
    }

    fn upcast(self) -> f64 {
        self.to_f64()
    }
}

impl Element for bf16 {
    const DTYPE: DType = DType::BF16;

    fn cast(value: f64) -> Self {
        bf16::from_f64(value)
    }

    fn upcast(self) -> f64 {
        self.to_f64()
    }
}

/// Resolves a possibly negative `axis` against an array of rank `ndim`.
///
/// Negative axes count from the end, so `-1` is the last axis.
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize, TensorError> {
    let rank = ndim as isize;
    let resolved = if axis < 0 { axis + rank } else { axis };
    if resolved < 0 || resolved >= rank {
        return Err(TensorError::InvalidAxis { axis, ndim });
    }
    Ok(resolved as usize)
}
