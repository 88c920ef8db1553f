//! # Neural Network Functional Interface (`nn::functional`)
//!
//! Stateless activation functions, re-exported from the array kernels so
//! layer code imports every activation from one place. These are the same
//! functions as in [`crate::tensor::ops`]; nothing is wrapped or validated
//! here.

pub use crate::tensor::ops::{
    celu, elu, gelu, glu, hard_sigmoid, hard_silu, hard_swish, hard_tanh, identity, leaky_relu,
    log_sigmoid, log_softmax, logsumexp, one_hot, relu, relu6, selu, sigmoid, silu, soft_sign,
    softmax, softplus, standardize, swish, tanh,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::ops;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_facade_matches_kernels() {
        let x = arr1(&[-3.5_f32, -1.0, -0.0, 0.25, 2.0, 8.0]);
        assert_eq!(relu(&x), ops::relu(&x));
        assert_eq!(relu6(&x), ops::relu6(&x));
        assert_eq!(sigmoid(&x), ops::sigmoid(&x));
        assert_eq!(tanh(&x), ops::tanh(&x));
        assert_eq!(silu(&x), ops::silu(&x));
        assert_eq!(swish(&x), ops::silu(&x));
        assert_eq!(hard_swish(&x), ops::hard_silu(&x));
        assert_eq!(gelu(&x, true), ops::gelu(&x, true));
        assert_eq!(elu(&x, 1.0), ops::elu(&x, 1.0));
        assert_eq!(leaky_relu(&x, 0.2), ops::leaky_relu(&x, 0.2));
        assert_eq!(identity(&x), x);
    }

    #[test]
    fn test_facade_errors_propagate_unchanged() {
        let x = arr2(&[[1.0_f64, 2.0, 3.0]]);
        assert_eq!(softmax(&x, 5), ops::softmax(&x, 5));
        assert_eq!(glu(&x, 1), ops::glu(&x, 1));
        assert!(glu(&x, 1).is_err());
    }
}
