//! # Precision Tags
//!
//! `DType` names the numeric representation a parameter is stored in.

use half::{bf16, f16};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported floating-point precisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DType {
    /// 16-bit IEEE 754 half precision (`half::f16`).
    F16,
    /// 16-bit brain floating point (`half::bf16`).
    BF16,
    /// 32-bit floating point.
    #[default]
    F32,
    /// 64-bit floating point.
    F64,
}

impl DType {
    /// Rounds `value` to the nearest number representable in this precision.
    ///
    /// Every `f16`, `bf16` and `f32` value is exactly representable as an
    /// `f64`, so the result can be carried around as `f64` without losing the
    /// rounding.
    pub fn round(&self, value: f64) -> f64 {
        match self {
            DType::F16 => f16::from_f64(value).to_f64(),
            DType::BF16 => bf16::from_f64(value).to_f64(),
            DType::F32 => value as f32 as f64,
            DType::F64 => value,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::F16 => write!(f, "float16"),
            DType::BF16 => write!(f, "bfloat16"),
            DType::F32 => write!(f, "float32"),
            DType::F64 => write!(f, "float64"),
        }
    }
}
