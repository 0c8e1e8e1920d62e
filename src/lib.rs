//! # solar-ann
//!
//! A type-safe neural regression pipeline for solar power data, with a
//! pluggable backend and strict separation between training and inference
//! phases.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: Models and transformers carry their training
//!   state in the type system (`Unfitted` vs `Fitted`), preventing invalid
//!   operations at compile time.
//! - **Training/Inference Separation**: Trained models contain only
//!   prediction parameters; training logic lives in separate components
//!   (losses, the L-BFGS solver, the trainer).
//! - **Backend Agnosticism**: Abstract `Backend` trait allows swapping the
//!   tensor implementation without changing model code.
//! - **Leak-Free Preprocessing**: Scaling statistics are learned from the
//!   training rows only and applied unchanged to held-out rows.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use solar_ann::pipeline::{run, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let predictions = run(&config)?;
//! for p in predictions {
//!     println!("{}", p);
//! }
//! # Ok::<(), solar_ann::pipeline::PipelineError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `backend` — Tensor abstractions and computation primitives (`Tensor1D`, `Tensor2D`)
//! - `dataset` — Schema-checked CSV loading and `(X, y)` access by row range
//! - `preprocessing` — Transformers fitted on training data (standard scaling)
//! - `loss` — Differentiable loss functions
//! - `model` — The multilayer perceptron regressor with stateful type parameters
//! - `optimizer` — The L-BFGS minimizer
//! - `trainer` — High-level training orchestration
//! - `pipeline` — End-to-end load/split/scale/train/predict runs
//! - `serialization` — Model and transformer persistence

pub mod backend;

/// Data loading utilities and dataset abstractions.
pub mod dataset;

/// Data preprocessing transformers for the pipeline.
pub mod preprocessing;

/// Differentiable loss functions for model training.
pub mod loss;

/// Regression models with compile-time state safety.
pub mod model;

/// Quasi-Newton optimization over flat parameter vectors.
pub mod optimizer;

/// End-to-end pipeline configuration and execution.
pub mod pipeline;

/// Model persistence utilities.
pub mod serialization;

/// High-level training orchestration.
pub mod trainer;

/// Re-export of core backend types for convenient usage.
pub use backend::{Backend, NdarrayBackend, ScalarOps, Tensor1D, Tensor2D};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::SquaredLoss;
    use crate::model::{InferenceModel, MlpRegressor};
    use crate::trainer::Trainer;

    fn col_to_tensor2d<B: Backend>(col: &[f64]) -> Tensor2D<B> {
        Tensor2D::<B>::new(col.to_vec(), col.len(), 1)
    }

    #[test]
    fn test_mlp_regression_identity() {
        // y = x on a dense 1-D grid.
        let x_data: Vec<f64> = (0..50).map(|i| i as f64 / 50.0).collect();
        let x_tensor = col_to_tensor2d::<NdarrayBackend>(&x_data);
        let y_tensor = Tensor1D::<NdarrayBackend>::new(x_data.clone());

        let model = MlpRegressor::<NdarrayBackend>::new(1, &[5, 2], 1);
        let trainer = Trainer::builder(SquaredLoss).max_iter(500).build();
        let fitted = trainer.fit(model, &x_tensor, &y_tensor).unwrap();

        let pred = fitted.predict(&Tensor1D::<NdarrayBackend>::new(vec![0.5]));
        assert!((pred.to_f64() - 0.5).abs() < 0.1, "got {}", pred.to_f64());
    }

    #[test]
    fn test_mlp_regression_affine() {
        // y = 2*x + 1.
        let x_data: Vec<f64> = (0..40).map(|i| i as f64 / 10.0).collect();
        let y_data: Vec<f64> = x_data.iter().map(|x| 2.0 * x + 1.0).collect();

        let x_tensor = col_to_tensor2d::<NdarrayBackend>(&x_data);
        let y_tensor = Tensor1D::<NdarrayBackend>::new(y_data.clone());

        let model = MlpRegressor::<NdarrayBackend>::new(1, &[6], 1);
        let trainer = Trainer::builder(SquaredLoss).max_iter(500).build();
        let fitted = trainer.fit(model, &x_tensor, &y_tensor).unwrap();

        let preds = fitted.predict_batch(&x_tensor).to_vec();
        for (p, t) in preds.iter().zip(&y_data) {
            assert!((p - t).abs() < 0.3, "pred {} target {}", p, t);
        }
    }
}
