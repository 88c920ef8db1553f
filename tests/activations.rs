use approx::assert_abs_diff_eq;
use ndarray::{Array, Array3, ArrayD, Axis, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rtorch_activations::nn::functional as F;
use rtorch_activations::prelude::*;

fn random_input(seed: u64, shape: &[usize]) -> ArrayD<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array::from_shape_simple_fn(IxDyn(shape), || rng.gen_range(-6.0..6.0))
}

#[test]
fn prelu_matches_piecewise_definition() {
    let x = random_input(7, &[4, 5, 6]);
    for slope in [0.0, 0.01, 0.5, 1.0, -0.75] {
        let layer = PReLU::new(slope, DType::F64);
        let y = layer.forward(&x);
        assert_eq!(y.shape(), x.shape());
        for (&out, &v) in y.iter().zip(x.iter()) {
            let expected = if v >= 0.0 { v } else { slope * v };
            assert_eq!(out, expected);
        }
    }
}

#[test]
fn prelu_limits() {
    let x = random_input(11, &[32]);
    assert_eq!(PReLU::new(1.0, DType::F32).forward(&x), x);
    assert_eq!(PReLU::new(0.0, DType::F32).forward(&x), F::relu(&x));
}

#[test]
fn pswish_matches_definition_and_silu() {
    let x = random_input(3, &[8, 8]);
    let silu_layer = PSwish::default();
    assert_eq!(silu_layer.forward(&x), F::silu(&x));
    assert_eq!(silu_layer.forward(&x), F::swish(&x));

    let layer = PSwish::new(0.5, DType::F64);
    for (&out, &v) in layer.forward(&x).iter().zip(x.iter()) {
        assert_abs_diff_eq!(out, v / (1.0 + (-0.5 * v).exp()), epsilon = 1e-12);
    }
}

#[test]
fn layers_keep_input_precision() {
    let x = Array3::<f32>::from_elem((2, 3, 4), -1.0);
    for dtype in [DType::F16, DType::BF16, DType::F32, DType::F64] {
        let layer = PReLU::new(0.1, dtype);
        let y = layer.forward(&x);
        assert_eq!(y.dim(), (2, 3, 4));
        assert_eq!(y[[0, 0, 0]], -(dtype.round(0.1) as f32));
    }
}

#[test]
fn softmax_lanes_sum_to_one() {
    let x = random_input(19, &[3, 4, 5]);
    for axis in [0, 1, 2, -1] {
        let y = F::softmax(&x, axis).unwrap();
        let axis = if axis < 0 { 2 } else { axis as usize };
        for s in y.sum_axis(Axis(axis)).iter() {
            assert_abs_diff_eq!(*s, 1.0, epsilon = 1e-12);
        }
        assert!(y.iter().all(|&p| p > 0.0 && p <= 1.0));
    }
}

#[test]
fn log_softmax_is_log_of_softmax() {
    let x = random_input(23, &[6, 10]);
    let log_p = F::log_softmax(&x, -1).unwrap();
    let p = F::softmax(&x, -1).unwrap();
    for (&a, &b) in log_p.iter().zip(p.iter()) {
        assert_abs_diff_eq!(a, b.ln(), epsilon = 1e-10);
    }
}

#[test]
fn logsumexp_agrees_with_log_softmax() {
    let x = random_input(29, &[5, 7]);
    let lse = F::logsumexp(&x, Some(-1), true).unwrap();
    assert_eq!(lse.shape(), &[5, 1]);
    let log_p = F::log_softmax(&x, -1).unwrap();
    for ((i, j), &v) in x.view().into_dimensionality::<ndarray::Ix2>().unwrap().indexed_iter() {
        assert_abs_diff_eq!(v - lse[[i, 0]], log_p[[i, j]], epsilon = 1e-10);
    }
}

#[test]
fn standardize_gives_zero_mean_unit_variance() {
    let x = random_input(31, &[4, 64]);
    let y = F::standardize(&x, 1, 0.0).unwrap();
    for lane in y.lanes(Axis(1)) {
        let mean = lane.sum() / 64.0;
        let var = lane.fold(0.0, |acc, &v| acc + v * v) / 64.0 - mean * mean;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(var, 1.0, epsilon = 1e-8);
    }
}

#[test]
fn one_hot_encodes_indices() {
    let labels = ndarray::arr1(&[0_i64, 2, 5, -1]);
    let encoded: ArrayD<f32> = F::one_hot(&labels, 3, -1).unwrap();
    assert_eq!(encoded.shape(), &[4, 3]);
    assert_eq!(
        encoded.into_raw_vec(),
        vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn glu_and_axis_errors() {
    let x = random_input(37, &[2, 3]);
    assert!(matches!(
        F::glu(&x, -1),
        Err(TensorError::IncompatibleShapes { .. })
    ));
    assert_eq!(
        F::softmax(&x, 2),
        Err(TensorError::InvalidAxis { axis: 2, ndim: 2 })
    );
    let y = F::glu(&random_input(41, &[2, 4]), -1).unwrap();
    assert_eq!(y.shape(), &[2, 2]);
}

#[test]
fn bounded_activations_stay_in_range() {
    let x = random_input(43, &[256]);
    assert!(F::sigmoid(&x).iter().all(|&v| (0.0..=1.0).contains(&v)));
    assert!(F::hard_sigmoid(&x).iter().all(|&v| (0.0..=1.0).contains(&v)));
    assert!(F::hard_tanh(&x).iter().all(|&v| (-1.0..=1.0).contains(&v)));
    assert!(F::relu6(&x).iter().all(|&v| (0.0..=6.0).contains(&v)));
    assert!(F::soft_sign(&x).iter().all(|&v| v.abs() < 1.0));
    assert!(F::log_sigmoid(&x).iter().all(|&v| v <= 0.0));
    assert!(F::softplus(&x).iter().all(|&v| v > 0.0));
}
