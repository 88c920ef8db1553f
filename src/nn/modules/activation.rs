//! # Parametric Activation Modules
//!
//! Activation layers with a learnable scalar. Each layer owns one [`Param`]
//! and reads it on every forward pass; the value is only changed from the
//! outside, through [`Module::parameters_mut`].

use crate::nn::{Forward, Module, Param};
use crate::tensor::ops::sigmoid_scalar;
use crate::tensor::{DType, Element, TensorError};
use ndarray::{Array, ArrayBase, ArrayD, Data, Dimension};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// --- PReLU ---

/// Configuration for [`PReLU`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PReLUConfig {
    /// Initial value of the negative slope. Default is 0.01.
    pub negative_slope_init: f64,
    /// Precision the slope is stored in. Default is float32.
    pub param_dtype: DType,
}

impl Default for PReLUConfig {
    fn default() -> Self {
        PReLUConfig {
            negative_slope_init: 0.01,
            param_dtype: DType::F32,
        }
    }
}

impl PReLUConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_negative_slope_init(mut self, negative_slope_init: f64) -> Self {
        self.negative_slope_init = negative_slope_init;
        self
    }

    pub fn with_param_dtype(mut self, param_dtype: DType) -> Self {
        self.param_dtype = param_dtype;
        self
    }

    /// Builds the layer.
    pub fn init(&self) -> PReLU {
        PReLU::new(self.negative_slope_init, self.param_dtype)
    }
}

/// Parametric rectified linear unit.
///
/// `PReLU(x) = x` for `x >= 0` and `negative_slope * x` otherwise, where
/// `negative_slope` is trainable. The slope is not constrained: zero gives
/// the plain ReLU, one gives the identity, and negative values are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct PReLU {
    negative_slope: Param,
}

impl PReLU {
    /// Creates a PReLU whose slope starts at `negative_slope_init`, stored in
    /// `param_dtype`.
    pub fn new(negative_slope_init: f64, param_dtype: DType) -> Self {
        PReLU {
            negative_slope: Param::new(negative_slope_init, param_dtype),
        }
    }

    /// The trainable slope.
    pub fn negative_slope(&self) -> &Param {
        &self.negative_slope
    }

    /// Precision the slope is stored in.
    pub fn param_dtype(&self) -> DType {
        self.negative_slope.dtype()
    }

    /// Applies the activation element-wise.
    ///
    /// The slope is cast to the input's element type first, so the output
    /// has the input's precision whatever `param_dtype` is.
    ///
    /// # Shapes
    /// - input: `[..., any]`
    /// - output: `[..., any]`
    pub fn forward<A, S, D>(&self, input: &ArrayBase<S, D>) -> Array<A, D>
    where
        A: Element,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let slope = self.negative_slope.get::<A>();
        input.mapv(|x| if x >= A::zero() { x } else { slope * x })
    }
}

impl Default for PReLU {
    fn default() -> Self {
        PReLUConfig::default().init()
    }
}

impl fmt::Display for PReLU {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PReLU(negative_slope={}, param_dtype={})",
            self.negative_slope.value(),
            self.param_dtype()
        )
    }
}

impl Module for PReLU {
    fn parameters(&self) -> BTreeMap<String, &Param> {
        BTreeMap::from([("negative_slope".to_string(), &self.negative_slope)])
    }

    fn parameters_mut(&mut self) -> BTreeMap<String, &mut Param> {
        BTreeMap::from([("negative_slope".to_string(), &mut self.negative_slope)])
    }
}

impl<A: Element> Forward<A> for PReLU {
    fn forward(&self, input: &ArrayD<A>) -> Result<ArrayD<A>, TensorError> {
        Ok(PReLU::forward(self, input))
    }
}

// --- PSwish ---

/// Configuration for [`PSwish`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PSwishConfig {
    /// Initial value of beta. Default is 1.0.
    pub beta_init: f64,
    /// Precision beta is stored in. Default is float32.
    pub param_dtype: DType,
}

impl Default for PSwishConfig {
    fn default() -> Self {
        PSwishConfig {
            beta_init: 1.0,
            param_dtype: DType::F32,
        }
    }
}

impl PSwishConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_beta_init(mut self, beta_init: f64) -> Self {
        self.beta_init = beta_init;
        self
    }

    pub fn with_param_dtype(mut self, param_dtype: DType) -> Self {
        self.param_dtype = param_dtype;
        self
    }

    /// Builds the layer.
    pub fn init(&self) -> PSwish {
        PSwish::new(self.beta_init, self.param_dtype)
    }
}

/// Parametric swish.
///
/// `PSwish(x) = x * sigmoid(beta * x)` with a trainable `beta`. With
/// `beta = 1` this is SiLU.
#[derive(Debug, Clone, PartialEq)]
pub struct PSwish {
    beta: Param,
}

impl PSwish {
    /// Creates a PSwish whose beta starts at `beta_init`, stored in
    /// `param_dtype`.
    pub fn new(beta_init: f64, param_dtype: DType) -> Self {
        PSwish {
            beta: Param::new(beta_init, param_dtype),
        }
    }

    /// The trainable beta.
    pub fn beta(&self) -> &Param {
        &self.beta
    }

    /// Precision beta is stored in.
    pub fn param_dtype(&self) -> DType {
        self.beta.dtype()
    }

    /// Applies the activation element-wise, with `beta` cast to the input's
    /// element type.
    ///
    /// # Shapes
    /// - input: `[..., any]`
    /// - output: `[..., any]`
    pub fn forward<A, S, D>(&self, input: &ArrayBase<S, D>) -> Array<A, D>
    where
        A: Element,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let beta = self.beta.get::<A>();
        input.mapv(|x| x * sigmoid_scalar(beta * x))
    }
}

impl Default for PSwish {
    fn default() -> Self {
        PSwishConfig::default().init()
    }
}

impl fmt::Display for PSwish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PSwish(beta={}, param_dtype={})",
            self.beta.value(),
            self.param_dtype()
        )
    }
}

impl Module for PSwish {
    fn parameters(&self) -> BTreeMap<String, &Param> {
        BTreeMap::from([("beta".to_string(), &self.beta)])
    }

    fn parameters_mut(&mut self) -> BTreeMap<String, &mut Param> {
        BTreeMap::from([("beta".to_string(), &mut self.beta)])
    }
}

impl<A: Element> Forward<A> for PSwish {
    fn forward(&self, input: &ArrayD<A>) -> Result<ArrayD<A>, TensorError> {
        Ok(PSwish::forward(self, input))
    }
}
