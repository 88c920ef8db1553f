//! # Activation Kernels
//!
//! Element-wise and axis-wise activation functions over `ndarray` arrays.
//! Every kernel returns a freshly allocated array with the input's element
//! type; element-wise kernels also keep the input's shape and dimension type.
//!
//! Scalar options (`alpha`, `negative_slope`, `epsilon`) are taken as `f64`
//! and cast to the element type before use. Axis options accept negative
//! values counted from the last axis.

use super::{normalize_axis, Element, TensorError};
use ndarray::{Array, ArrayBase, ArrayD, ArrayView1, Axis, Data, Dimension, IxDyn, Zip};
use num_traits::PrimInt;

const SELU_SCALE: f64 = 1.050_700_987_355_480_5;
const SELU_ALPHA: f64 = 1.673_263_242_354_377_3;
const GELU_COEFF: f64 = 0.044_715;

// --- Scalar Helpers ---

#[inline]
pub(crate) fn sigmoid_scalar<A: Element>(x: A) -> A {
    A::one() / (A::one() + (-x).exp())
}

#[inline]
fn softplus_scalar<A: Element>(x: A) -> A {
    x.max(A::zero()) + (-x.abs()).exp().ln_1p()
}

#[inline]
fn relu6_scalar<A: Element>(x: A) -> A {
    let six = A::cast(6.0);
    if x < A::zero() {
        A::zero()
    } else if x > six {
        six
    } else {
        x
    }
}

#[inline]
fn hard_sigmoid_scalar<A: Element>(x: A) -> A {
    relu6_scalar(x + A::cast(3.0)) / A::cast(6.0)
}

#[inline]
fn elu_scalar<A: Element>(x: A, alpha: A) -> A {
    if x > A::zero() {
        x
    } else {
        alpha * x.exp_m1()
    }
}

fn lane_max<A: Element>(lane: &ArrayView1<'_, A>) -> A {
    lane.fold(A::neg_infinity(), |acc, &v| acc.max(v))
}

/// `max + ln(sum(exp(x - max)))`, with a non-finite max replaced by zero so
/// all-`-inf` inputs give `-inf` instead of NaN.
fn stable_logsumexp<A, I>(values: I) -> A
where
    A: Element,
    I: Iterator<Item = A> + Clone,
{
    let max = values.clone().fold(A::neg_infinity(), |acc, v| acc.max(v));
    let shift = if max.is_finite() { max } else { A::zero() };
    values.fold(A::zero(), |acc, v| acc + (v - shift).exp()).ln() + shift
}

// --- Rectifiers ---

/// Rectified linear unit: `max(x, 0)`. NaN inputs stay NaN.
pub fn relu<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(|v| if v < A::zero() { A::zero() } else { v })
}

/// Rectified linear unit capped at six: `min(max(x, 0), 6)`.
pub fn relu6<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(relu6_scalar)
}

/// Leaky rectifier: `x` where `x >= 0`, `negative_slope * x` elsewhere.
pub fn leaky_relu<A, S, D>(x: &ArrayBase<S, D>, negative_slope: f64) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let slope = A::cast(negative_slope);
    x.mapv(|v| if v >= A::zero() { v } else { slope * v })
}

/// Exponential linear unit: `x` where `x > 0`, `alpha * (exp(x) - 1)` elsewhere.
pub fn elu<A, S, D>(x: &ArrayBase<S, D>, alpha: f64) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let alpha = A::cast(alpha);
    x.mapv(|v| elu_scalar(v, alpha))
}

/// Continuously-differentiable exponential linear unit:
/// `max(x, 0) + alpha * expm1(min(x, 0) / alpha)`.
pub fn celu<A, S, D>(x: &ArrayBase<S, D>, alpha: f64) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let alpha = A::cast(alpha);
    x.mapv(|v| v.max(A::zero()) + alpha * (v.min(A::zero()) / alpha).exp_m1())
}

/// Scaled exponential linear unit with the self-normalizing constants.
pub fn selu<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let scale = A::cast(SELU_SCALE);
    let alpha = A::cast(SELU_ALPHA);
    x.mapv(|v| scale * elu_scalar(v, alpha))
}

/// Gaussian error linear unit.
///
/// With `approximate` the tanh approximation is used,
/// `0.5 x (1 + tanh(sqrt(2 / pi) (x + 0.044715 x^3)))`; otherwise the exact
/// form `x (1 + erf(x / sqrt(2))) / 2`.
pub fn gelu<A, S, D>(x: &ArrayBase<S, D>, approximate: bool) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let half = A::cast(0.5);
    if approximate {
        let sqrt_2_over_pi = A::cast((2.0 / std::f64::consts::PI).sqrt());
        let coeff = A::cast(GELU_COEFF);
        x.mapv(|v| {
            let inner = sqrt_2_over_pi * (v + coeff * (v * v * v));
            half * v * (A::one() + inner.tanh())
        })
    } else {
        x.mapv(|v| {
            let erf = libm::erf(v.upcast() / std::f64::consts::SQRT_2);
            half * v * (A::one() + A::cast(erf))
        })
    }
}

// --- Sigmoids and Gates ---

/// Logistic sigmoid: `1 / (1 + exp(-x))`.
pub fn sigmoid<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(sigmoid_scalar)
}

/// Log of the sigmoid, computed as `-softplus(-x)`.
pub fn log_sigmoid<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(|v| -softplus_scalar(-v))
}

/// Piecewise-linear sigmoid: `relu6(x + 3) / 6`.
pub fn hard_sigmoid<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(hard_sigmoid_scalar)
}

/// Sigmoid-weighted linear unit: `x * sigmoid(x)`.
pub fn silu<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(|v| v * sigmoid_scalar(v))
}

/// `swish` is another name for [`silu`].
pub use self::silu as swish;

/// Hard sigmoid-weighted linear unit: `x * hard_sigmoid(x)`.
pub fn hard_silu<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(|v| v * hard_sigmoid_scalar(v))
}

/// `hard_swish` is another name for [`hard_silu`].
pub use self::hard_silu as hard_swish;

/// Gated linear unit.
///
/// Splits `x` into halves `a` and `b` along `axis` and returns
/// `a * sigmoid(b)`. The output has half the input's extent on `axis`.
///
/// # Errors
/// `InvalidAxis` for an out-of-range axis, `IncompatibleShapes` when the
/// axis has odd length.
pub fn glu<A, S, D>(x: &ArrayBase<S, D>, axis: isize) -> Result<Array<A, D>, TensorError>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = Axis(normalize_axis(axis, x.ndim())?);
    let size = x.len_of(axis);
    if size % 2 != 0 {
        return Err(TensorError::IncompatibleShapes {
            op: "glu".to_string(),
            shape: x.shape().to_vec(),
        });
    }
    let (a, b) = x.view().split_at(axis, size / 2);
    Ok(Zip::from(&a).and(&b).map_collect(|&a, &b| a * sigmoid_scalar(b)))
}

// --- Smooth and Bounded ---

/// Hyperbolic tangent.
pub fn tanh<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(|v| v.tanh())
}

/// Clamps to `[-1, 1]`. NaN inputs stay NaN.
pub fn hard_tanh<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(|v| {
        if v > A::one() {
            A::one()
        } else if v < -A::one() {
            -A::one()
        } else {
            v
        }
    })
}

/// `ln(1 + exp(x))`, evaluated as `max(x, 0) + ln_1p(exp(-|x|))`.
pub fn softplus<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(softplus_scalar)
}

/// `x / (|x| + 1)`.
pub fn soft_sign<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.mapv(|v| v / (v.abs() + A::one()))
}

/// Returns a copy of `x`.
pub fn identity<A, S, D>(x: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.to_owned()
}

// --- Normalizations ---

/// Softmax along `axis`, with the lane maximum subtracted before `exp`.
pub fn softmax<A, S, D>(x: &ArrayBase<S, D>, axis: isize) -> Result<Array<A, D>, TensorError>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = Axis(normalize_axis(axis, x.ndim())?);
    let mut out = x.to_owned();
    for mut lane in out.lanes_mut(axis) {
        let max = lane_max(&lane.view());
        lane.mapv_inplace(|v| (v - max).exp());
        let sum = lane.sum();
        lane.mapv_inplace(|v| v / sum);
    }
    Ok(out)
}

/// Log-softmax along `axis`: `(x - max) - ln(sum(exp(x - max)))`.
pub fn log_softmax<A, S, D>(x: &ArrayBase<S, D>, axis: isize) -> Result<Array<A, D>, TensorError>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = Axis(normalize_axis(axis, x.ndim())?);
    let mut out = x.to_owned();
    for mut lane in out.lanes_mut(axis) {
        let max = lane_max(&lane.view());
        lane.mapv_inplace(|v| v - max);
        let shifted_lse = lane.fold(A::zero(), |acc, &v| acc + v.exp()).ln();
        lane.mapv_inplace(|v| v - shifted_lse);
    }
    Ok(out)
}

/// Log of the sum of exponentials.
///
/// Reduces along `axis`, or over every element when `axis` is `None`. With
/// `keepdims` the reduced axes stay in the output with length one.
pub fn logsumexp<A, S, D>(
    x: &ArrayBase<S, D>,
    axis: Option<isize>,
    keepdims: bool,
) -> Result<ArrayD<A>, TensorError>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let x = x.view().into_dyn();
    match axis {
        Some(axis) => {
            let axis = Axis(normalize_axis(axis, x.ndim())?);
            let reduced = x.map_axis(axis, |lane| stable_logsumexp(lane.iter().copied()));
            Ok(if keepdims {
                reduced.insert_axis(axis)
            } else {
                reduced
            })
        }
        None => {
            let value = stable_logsumexp(x.iter().copied());
            let shape = if keepdims { vec![1; x.ndim()] } else { Vec::new() };
            Ok(ArrayD::from_elem(IxDyn(&shape), value))
        }
    }
}

/// Normalizes each lane along `axis` to zero mean and unit variance:
/// `(x - mean) / sqrt(var + epsilon)` with `var = mean(x^2) - mean^2`.
pub fn standardize<A, S, D>(
    x: &ArrayBase<S, D>,
    axis: isize,
    epsilon: f64,
) -> Result<Array<A, D>, TensorError>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    let axis = Axis(normalize_axis(axis, x.ndim())?);
    let epsilon = A::cast(epsilon);
    let mut out = x.to_owned();
    for mut lane in out.lanes_mut(axis) {
        let n = A::cast(lane.len() as f64);
        let mean = lane.sum() / n;
        let mean_sq = lane.fold(A::zero(), |acc, &v| acc + v * v) / n;
        let scale = (mean_sq - mean * mean + epsilon).sqrt().recip();
        lane.mapv_inplace(|v| (v - mean) * scale);
    }
    Ok(out)
}

// --- Encodings ---

/// One-hot encodes integer class indices.
///
/// The output has one more axis than `x`, of length `num_classes`, placed at
/// `axis` (resolved against the output's rank). Indices that are negative or
/// not below `num_classes` encode as all zeros.
pub fn one_hot<A, I, S, D>(
    x: &ArrayBase<S, D>,
    num_classes: usize,
    axis: isize,
) -> Result<ArrayD<A>, TensorError>
where
    A: Element,
    I: PrimInt,
    S: Data<Elem = I>,
    D: Dimension,
{
    let ndim = x.ndim() + 1;
    let axis = normalize_axis(axis, ndim)?;
    let mut shape = x.shape().to_vec();
    shape.insert(axis, num_classes);

    let mut out = ArrayD::<A>::zeros(IxDyn(&shape));
    let mut index = vec![0usize; ndim];
    for (src, value) in x.view().into_dyn().indexed_iter() {
        let class = match value.to_usize() {
            Some(class) if class < num_classes => class,
            _ => continue,
        };
        let src = src.slice();
        index[..axis].copy_from_slice(&src[..axis]);
        index[axis] = class;
        index[axis + 1..].copy_from_slice(&src[axis..]);
        out[index.as_slice()] = A::one();
    }
    Ok(out)
}
