//! Machine learning models with compile-time state safety.
//!
//! Models carry their training state in the type system: an `Unfitted` model
//! exposes training operations and no prediction, a `Fitted` model exposes
//! only inference and serialization. The conversion happens exactly once,
//! via `into_fitted`, after the solver has placed the final parameters.

pub mod state;
pub use state::{Fitted, Unfitted};

pub mod mlp;
pub use mlp::{MlpRegressor, SerializableDenseParams, SerializableMlpParams};

use crate::backend::Backend;
use crate::serialization::SerializableParams;

/// Inference interface of a trained model.
///
/// A fitted model contains only prediction parameters; no optimizer state,
/// loss function or training hyperparameters survive the conversion from the
/// unfitted state.
pub trait InferenceModel<B: Backend> {
    /// Input type for a single sample.
    type InputSingle;
    /// Output type for a single sample.
    type OutputSingle;
    /// Input type for a batch of samples.
    type InputBatch;
    /// Output type for a batch of samples.
    type OutputBatch;
    /// Serializable representation of the learned parameters.
    type ParamsRepr: SerializableParams;

    /// Predict on a single sample.
    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle;

    /// Predict on a batch of samples, preserving row order.
    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::ParamsRepr;

    /// Reconstruct a fitted model from serialized parameters.
    fn from_params(params: Self::ParamsRepr) -> Result<Self, Box<dyn std::error::Error>>
    where
        Self: Sized;

    /// Save the fitted model to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let bytes = self
            .extract_params()
            .to_bytes()
            .map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load a fitted model from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::ParamsRepr::from_bytes(&bytes)?;
        Self::from_params(params)
    }
}
