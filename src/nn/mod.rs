//! # Neural Network Module (`nn`)
//!
//! Layer building blocks: the `Module` and `Forward` traits, trainable
//! parameters, the activation layers, and the functional activation
//! interface.

use crate::tensor::{Element, TensorError};
use ndarray::ArrayD;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};

// --- Submodules ---
pub mod functional;
pub mod modules;
pub mod param;

// Re-export common items
pub use modules::*;
pub use param::Param;

// --- Core Traits ---

/// Base trait for all neural network modules.
///
/// A module owns its trainable parameters and exposes them by name so an
/// optimizer or checkpoint loader can discover and update them. Names are
/// unique within the module; containers prefix their children's names
/// (e.g. `"0.negative_slope"`).
pub trait Module: Debug + Send + Sync {
    /// The module's trainable parameters, keyed by name.
    fn parameters(&self) -> BTreeMap<String, &Param>;

    /// Mutable access to the same parameters, keyed by the same names.
    fn parameters_mut(&mut self) -> BTreeMap<String, &mut Param>;

    /// Number of trainable scalars.
    fn num_params(&self) -> usize {
        self.parameters().len()
    }
}

/// The forward computation of a module over arrays of element type `A`.
pub trait Forward<A: Element>: Module {
    /// Performs the forward pass.
    fn forward(&self, input: &ArrayD<A>) -> Result<ArrayD<A>, TensorError>;
}

// --- Containers ---

/// A sequential container.
/// The forward pass applies each child in insertion order.
pub struct Sequential<A: Element> {
    modules: Vec<Box<dyn Forward<A>>>,
}

impl<A: Element> Sequential<A> {
    /// Creates a new empty Sequential container.
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
        }
    }

    /// Appends a module, builder style.
    pub fn add<M: Forward<A> + 'static>(mut self, module: M) -> Self {
        self.push(Box::new(module));
        self
    }

    /// Appends an already boxed module.
    pub fn push(&mut self, module: Box<dyn Forward<A>>) {
        self.modules.push(module);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<A: Element> Default for Sequential<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Element> Debug for Sequential<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.modules.iter()).finish()
    }
}

impl<A: Element> Module for Sequential<A> {
    fn parameters(&self) -> BTreeMap<String, &Param> {
        let mut params = BTreeMap::new();
        for (i, module) in self.modules.iter().enumerate() {
            for (name, param) in module.parameters() {
                // Prefix parameter names with module index for uniqueness
                params.insert(format!("{}.{}", i, name), param);
            }
        }
        params
    }

    fn parameters_mut(&mut self) -> BTreeMap<String, &mut Param> {
        let mut params = BTreeMap::new();
        for (i, module) in self.modules.iter_mut().enumerate() {
            for (name, param) in module.parameters_mut() {
                params.insert(format!("{}.{}", i, name), param);
            }
        }
        params
    }
}

impl<A: Element> Forward<A> for Sequential<A> {
    fn forward(&self, input: &ArrayD<A>) -> Result<ArrayD<A>, TensorError> {
        let mut current = input.clone();
        for module in &self.modules {
            current = module.forward(&current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::DType;
    use ndarray::arr1;

    /// Adds its parameter to every element.
    #[derive(Debug)]
    struct Shift {
        offset: Param,
    }

    impl Module for Shift {
        fn parameters(&self) -> BTreeMap<String, &Param> {
            BTreeMap::from([("offset".to_string(), &self.offset)])
        }

        fn parameters_mut(&mut self) -> BTreeMap<String, &mut Param> {
            BTreeMap::from([("offset".to_string(), &mut self.offset)])
        }
    }

    impl Forward<f64> for Shift {
        fn forward(&self, input: &ArrayD<f64>) -> Result<ArrayD<f64>, TensorError> {
            let offset = self.offset.get::<f64>();
            Ok(input.mapv(|v| v + offset))
        }
    }

    /// Always fails.
    #[derive(Debug)]
    struct Broken;

    impl Module for Broken {
        fn parameters(&self) -> BTreeMap<String, &Param> {
            BTreeMap::new()
        }

        fn parameters_mut(&mut self) -> BTreeMap<String, &mut Param> {
            BTreeMap::new()
        }
    }

    impl Forward<f64> for Broken {
        fn forward(&self, _input: &ArrayD<f64>) -> Result<ArrayD<f64>, TensorError> {
            Err(TensorError::InvalidArgument("broken".to_string()))
        }
    }

    fn shift(offset: f64) -> Shift {
        Shift {
            offset: Param::new(offset, DType::F64),
        }
    }

    #[test]
    fn test_layers_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sequential<f32>>();
        assert_send_sync::<PReLU>();
        assert_send_sync::<PSwish>();
        assert_send_sync::<Param>();
    }

    #[test]
    fn test_sequential_applies_in_order() {
        let model = Sequential::<f64>::new().add(shift(1.0)).add(shift(10.0));
        let out = model.forward(&arr1(&[0.0, 1.0]).into_dyn()).unwrap();
        assert_eq!(out, arr1(&[11.0, 12.0]).into_dyn());
    }

    #[test]
    fn test_empty_sequential_is_identity() {
        let model: Sequential<f64> = Sequential::default();
        assert!(model.is_empty());
        let x = arr1(&[3.0]).into_dyn();
        assert_eq!(model.forward(&x).unwrap(), x);
    }

    #[test]
    fn test_sequential_prefixes_parameter_names() {
        let mut model = Sequential::<f64>::new().add(shift(1.0)).add(shift(2.0));
        let names: Vec<String> = model.parameters().keys().cloned().collect();
        assert_eq!(names, vec!["0.offset", "1.offset"]);
        assert_eq!(model.num_params(), 2);

        model
            .parameters_mut()
            .get_mut("1.offset")
            .unwrap()
            .set(5.0);
        assert_eq!(model.parameters()["1.offset"].value(), 5.0);
    }

    #[test]
    fn test_sequential_propagates_first_error() {
        let model = Sequential::<f64>::new().add(shift(1.0)).add(Broken).add(shift(2.0));
        assert_eq!(model.len(), 3);
        let err = model.forward(&arr1(&[0.0]).into_dyn()).unwrap_err();
        assert_eq!(err, TensorError::InvalidArgument("broken".to_string()));
    }
}
