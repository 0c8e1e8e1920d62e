//! Scaling transformers for feature normalization.
//!
//! The pipeline standardizes its predictor columns with [`StandardScaler`]
//! (z-score normalization, mean 0 / std 1, fit on training rows only).

pub mod standard;

pub use standard::{
    FittedStandardScaler, StandardScaler, StandardScalerConfig, StandardScalerParams,
};
