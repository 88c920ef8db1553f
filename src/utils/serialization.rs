//! # Model Serialization Utilities
//!
//! Functions for saving and loading module parameters.
//! Uses `serde` for serialization and `bincode` as the binary format.

use crate::nn::{Module, Param};
use crate::tensor::DType;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

// --- Error Type ---
#[derive(thiserror::Error, Debug)]
pub enum SerializationError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization Error (Bincode): {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Parameter dtype mismatch during loading: key '{key}', expected {expected}, got {got}")]
    DTypeMismatch {
        key: String,
        expected: DType,
        got: DType,
    },
    #[error("Missing key in state dict during loading: '{0}'")]
    MissingKey(String),
    #[error("Unexpected key in state dict during loading: '{0}'")]
    UnexpectedKey(String),
}

// --- State Dictionary Type ---
// BTreeMap keeps the on-disk order stable.
pub type StateDict = BTreeMap<String, Param>;

/// Snapshot of a module's parameters, keyed by name.
pub fn state_dict<M: Module + ?Sized>(module: &M) -> StateDict {
    module
        .parameters()
        .into_iter()
        .map(|(key, param)| (key, *param))
        .collect()
}

// --- Save Function ---

/// Saves the parameters of a module to a file.
pub fn save<M: Module + ?Sized, P: AsRef<Path>>(
    module: &M,
    path: P,
) -> Result<(), SerializationError> {
    let state = state_dict(module);
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, &state)?;

    log::debug!(
        "saved {} parameters to {}",
        state.len(),
        path.as_ref().display()
    );
    Ok(())
}

// --- Load Function ---

/// Loads a state dictionary from a file and writes it into the module's
/// parameters.
///
/// # Arguments
/// * `module`: The module whose parameters will be updated.
/// * `path`: The file path from which to load the state dictionary.
/// * `strict`: If `true`, the saved keys must match the module's keys
///   exactly and every saved dtype must match the parameter's dtype. Any
///   violation is an error and leaves the module unchanged. If `false`,
///   missing and extra keys are skipped and values saved in another dtype
///   are rounded to the parameter's dtype.
pub fn load<M: Module + ?Sized, P: AsRef<Path>>(
    module: &mut M,
    path: P,
    strict: bool,
) -> Result<(), SerializationError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let loaded: StateDict = bincode::deserialize_from(reader)?;

    load_state_dict(module, &loaded, strict)
}

/// Writes `state` into the module's parameters. See [`load`] for the
/// meaning of `strict`.
pub fn load_state_dict<M: Module + ?Sized>(
    module: &mut M,
    state: &StateDict,
    strict: bool,
) -> Result<(), SerializationError> {
    let mut params = module.parameters_mut();

    // --- Key Matching ---
    let mut unused: BTreeSet<&String> = state.keys().collect();
    for (key, target) in params.iter() {
        match state.get(key) {
            Some(saved) => {
                unused.remove(key);
                if saved.dtype() != target.dtype() {
                    if strict {
                        return Err(SerializationError::DTypeMismatch {
                            key: key.clone(),
                            expected: target.dtype(),
                            got: saved.dtype(),
                        });
                    }
                    log::warn!(
                        "key '{}' saved as {}, casting to {}",
                        key,
                        saved.dtype(),
                        target.dtype()
                    );
                }
            }
            None if strict => return Err(SerializationError::MissingKey(key.clone())),
            None => log::warn!("key '{}' not found in loaded state dict, skipping", key),
        }
    }
    if let Some(unexpected) = unused.iter().next() {
        if strict {
            return Err(SerializationError::UnexpectedKey((*unexpected).clone()));
        }
        for key in &unused {
            log::warn!("key '{}' found in loaded state dict but not used by the module", key);
        }
    }

    // --- Data Update ---
    let mut loaded = 0;
    for (key, target) in params.iter_mut() {
        if let Some(saved) = state.get(key) {
            target.set(saved.value());
            loaded += 1;
        }
    }
    log::debug!("loaded {} of {} parameters", loaded, params.len());

    Ok(())
}
