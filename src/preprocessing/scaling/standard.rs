//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples and `s` their standard
//! deviation. Both are learned during `fit` and never refit afterwards:
//! held-out data is transformed with the training-derived parameters.
//!
//! # Example
//! ```
//! use solar_ann::backend::{NdarrayBackend, Tensor2D};
//! use solar_ann::preprocessing::{StandardScaler, Transformer, FittedTransformer};
//!
//! let train = Tensor2D::<NdarrayBackend>::new(vec![0.0, 1.0, 2.0, 3.0], 2, 2);
//! let fitted = StandardScaler::new().fit(&train).unwrap();
//! let scaled = fitted.transform(&train).unwrap();
//! assert_eq!(scaled.shape(), (2, 2));
//! ```

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Configuration for StandardScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If true, center the data before scaling.
    pub with_mean: bool,
    /// If true, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// Serializable parameters for a fitted StandardScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Configuration options.
    pub config: StandardScalerConfig,
    /// Mean of each feature.
    pub mean: Vec<f64>,
    /// Standard deviation of each feature (zero columns clamped to 1).
    pub std: Vec<f64>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// StandardScaler transformer (unfitted).
#[derive(Clone)]
pub struct StandardScaler<B: Backend> {
    config: StandardScalerConfig,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for StandardScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> StandardScaler<B> {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self {
            config: StandardScalerConfig::default(),
            _backend: PhantomData,
        }
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }
}

impl<B: Backend> Transformer<B> for StandardScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = StandardScalerParams;
    type Fitted = FittedStandardScaler<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.shape();

        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let mean = if self.config.with_mean {
            data.col_mean()
        } else {
            Tensor1D::zeros(cols)
        };

        let std = if self.config.with_std {
            // population std (ddof = 0)
            data.col_std(0)
        } else {
            Tensor1D::new(vec![1.0; cols])
        };

        // Constant features keep a scale of 1 so transform stays finite.
        let std_adjusted: Vec<f64> = std
            .to_vec()
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(FittedStandardScaler {
            config: self.config.clone(),
            mean,
            std: Tensor1D::new(std_adjusted),
            n_features: cols,
            _backend: PhantomData,
        })
    }

    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Clone)]
pub struct FittedStandardScaler<B: Backend> {
    config: StandardScalerConfig,
    mean: Tensor1D<B>,
    std: Tensor1D<B>,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> std::fmt::Debug for FittedStandardScaler<B>
where
    B::Tensor1D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FittedStandardScaler")
            .field("config", &self.config)
            .field("mean", &self.mean)
            .field("std", &self.std)
            .field("n_features", &self.n_features)
            .finish()
    }
}

impl<B: Backend> FittedStandardScaler<B> {
    /// Get the mean values for each feature.
    pub fn mean(&self) -> &Tensor1D<B> {
        &self.mean
    }

    /// Get the standard deviation values for each feature.
    pub fn std(&self) -> &Tensor1D<B> {
        &self.std
    }
}

impl<B: Backend> FittedTransformer<B> for FittedStandardScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = StandardScalerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (_, cols) = data.shape();

        if cols != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let mut result = data.clone();

        if self.config.with_mean {
            result = result.sub_rows(&self.mean);
        }

        if self.config.with_std {
            result = result.div_rows(&self.std);
        }

        Ok(result)
    }

    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        let (_, cols) = data.shape();

        if cols != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let mut result = data.clone();

        if self.config.with_std {
            result = result.mul_rows(&self.std);
        }

        if self.config.with_mean {
            result = result.add_rows(&self.mean);
        }

        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        StandardScalerParams {
            config: self.config.clone(),
            mean: self.mean.to_vec(),
            std: self.std.to_vec(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Ok(Self {
            config: params.config,
            mean: Tensor1D::new(params.mean),
            std: Tensor1D::new(params.std),
            n_features: params.n_features,
            _backend: PhantomData,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NdarrayBackend;

    fn create_test_data() -> Tensor2D<NdarrayBackend> {
        // [[0, 1], [0, 1], [1, 3]]
        Tensor2D::new(vec![0.0, 1.0, 0.0, 1.0, 1.0, 3.0], 3, 2)
    }

    #[test]
    fn test_standard_scaler_fit() {
        let data = create_test_data();
        let scaler = StandardScaler::<NdarrayBackend>::new();
        let fitted = scaler.fit(&data).unwrap();

        // Mean: [1/3, 5/3]
        let mean = fitted.mean().to_vec();
        assert!((mean[0] - 1.0 / 3.0).abs() < 1e-10);
        assert!((mean[1] - 5.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_transformed_train_has_zero_mean_unit_std() {
        let data = create_test_data();
        let fitted = StandardScaler::<NdarrayBackend>::new().fit(&data).unwrap();
        let scaled = fitted.transform(&data).unwrap();

        let mean = scaled.col_mean().to_vec();
        let std = scaled.col_std(0).to_vec();
        for j in 0..2 {
            assert!(mean[j].abs() < 1e-10, "column {} mean = {}", j, mean[j]);
            assert!((std[j] - 1.0).abs() < 1e-10, "column {} std = {}", j, std[j]);
        }
    }

    #[test]
    fn test_transform_does_not_refit() {
        let train = create_test_data();
        let fitted = StandardScaler::<NdarrayBackend>::new().fit(&train).unwrap();
        let before = fitted.extract_params();

        // Held-out data with a very different distribution.
        let test = Tensor2D::<NdarrayBackend>::new(vec![100.0, -50.0, 200.0, -80.0], 2, 2);
        let _ = fitted.transform(&test).unwrap();

        let after = fitted.extract_params();
        assert_eq!(before.mean, after.mean);
        assert_eq!(before.std, after.std);
    }

    #[test]
    fn test_constant_column_clamped() {
        // First column is constant; scale must fall back to 1.
        let data = Tensor2D::<NdarrayBackend>::new(vec![5.0, 1.0, 5.0, 2.0, 5.0, 3.0], 3, 2);
        let fitted = StandardScaler::<NdarrayBackend>::new().fit(&data).unwrap();
        assert_eq!(fitted.std().to_vec()[0], 1.0);

        let scaled = fitted.transform(&data).unwrap();
        assert!(scaled.to_vec().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_feature_mismatch_rejected() {
        let fitted = StandardScaler::<NdarrayBackend>::new()
            .fit(&create_test_data())
            .unwrap();
        let wrong = Tensor2D::<NdarrayBackend>::new(vec![1.0, 2.0, 3.0], 1, 3);
        let err = fitted.transform(&wrong).unwrap_err();
        assert!(matches!(err, PreprocessingError::FeatureMismatch { .. }));
    }

    #[test]
    fn test_empty_data_rejected() {
        let empty = Tensor2D::<NdarrayBackend>::zeros(0, 2);
        let err = StandardScaler::<NdarrayBackend>::new().fit(&empty).unwrap_err();
        assert!(matches!(err, PreprocessingError::EmptyData(_)));
    }

    #[test]
    fn test_inverse_transform_roundtrip() {
        let data = create_test_data();
        let fitted = StandardScaler::<NdarrayBackend>::new().fit(&data).unwrap();
        let scaled = fitted.transform(&data).unwrap();
        let restored = fitted.inverse_transform(&scaled).unwrap();

        for (a, b) in data.to_vec().iter().zip(restored.to_vec()) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn test_params_roundtrip() {
        let fitted = StandardScaler::<NdarrayBackend>::new()
            .fit(&create_test_data())
            .unwrap();
        let params = fitted.extract_params();
        let restored = FittedStandardScaler::<NdarrayBackend>::from_params(params).unwrap();

        assert_eq!(fitted.mean().to_vec(), restored.mean().to_vec());
        assert_eq!(fitted.std().to_vec(), restored.std().to_vec());
        assert_eq!(restored.n_features_in(), 2);
    }

    #[test]
    fn test_save_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.bin");

        let fitted = StandardScaler::<NdarrayBackend>::new()
            .fit(&create_test_data())
            .unwrap();
        fitted.save_to_file(&path).unwrap();

        let loaded = FittedStandardScaler::<NdarrayBackend>::load_from_file(&path).unwrap();
        assert_eq!(fitted.mean().to_vec(), loaded.mean().to_vec());
    }
}
