//! Data preprocessing transformers for the regression pipeline.
//!
//! Transformers follow the same type-state pattern as models in this crate:
//! an unfitted [`Transformer`] learns parameters from training data and turns
//! into a [`FittedTransformer`] that applies them to new data without ever
//! refitting.
//!
//! # Example
//!
//! ```
//! use solar_ann::backend::{NdarrayBackend, Tensor2D};
//! use solar_ann::preprocessing::{StandardScaler, Transformer, FittedTransformer};
//!
//! let train = Tensor2D::<NdarrayBackend>::new(vec![0.0, 10.0, 2.0, 30.0], 2, 2);
//! let test = Tensor2D::<NdarrayBackend>::new(vec![1.0, 20.0], 1, 2);
//!
//! let fitted = StandardScaler::new().fit(&train).unwrap();
//! let _train_scaled = fitted.transform(&train).unwrap();
//! // Held-out data is scaled with the training-derived mean and std.
//! let _test_scaled = fitted.transform(&test).unwrap();
//! ```

pub mod error;
pub mod scaling;
pub mod traits;

pub use error::PreprocessingError;
pub use scaling::{
    FittedStandardScaler, StandardScaler, StandardScalerConfig, StandardScalerParams,
};
pub use traits::{FittedTransformer, Transformer};
