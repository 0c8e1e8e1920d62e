// trainer/mod.rs
use crate::{
    backend::{Backend, Tensor1D, Tensor2D},
    loss::Loss,
    model::{Fitted, MlpRegressor, Unfitted},
    optimizer::{Lbfgs, LbfgsSummary},
};
use std::marker::PhantomData;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from a training run.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("training data is empty")]
    EmptyData,
    #[error("feature count mismatch: model expects {expected}, data has {got}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error("row count mismatch: {rows} feature rows but {targets} targets")]
    TargetMismatch { rows: usize, targets: usize },
}

/// Orchestrates full-batch training of an [`MlpRegressor`].
///
/// Combines a loss function with the L-BFGS solver: each solver step
/// evaluates the penalized objective and its gradient over the whole
/// training set. Once built via [`TrainerBuilder`], it is immutable and can
/// be reused across multiple models (as long as types match).
///
/// `fit` consumes an unfitted model and returns its fitted form, which
/// carries only inference logic.
pub struct Trainer<B, L>
where
    B: Backend,
    L: Loss<B>,
{
    pub(crate) alpha: f64,
    pub(crate) max_iter: usize,
    pub(crate) tol: f64,
    pub(crate) loss_fn: L,
    _phantom_backend: PhantomData<B>,
}

/// Fluent builder for constructing a `Trainer` with custom hyperparameters.
///
/// Defaults:
/// - `alpha`: 1e-5
/// - `max_iter`: 1000
/// - `tol`: 1e-4
pub struct TrainerBuilder<B, L>
where
    B: Backend,
    L: Loss<B>,
{
    alpha: f64,
    max_iter: usize,
    tol: f64,
    loss_fn: L,
    _phantom_backend: PhantomData<B>,
}

impl<B, L> TrainerBuilder<B, L>
where
    B: Backend,
    L: Loss<B>,
{
    /// Creates a new `TrainerBuilder` around the given loss.
    pub fn new(loss_fn: L) -> Self {
        Self {
            alpha: 1e-5,
            max_iter: 1000,
            tol: 1e-4,
            loss_fn,
            _phantom_backend: PhantomData,
        }
    }

    /// Sets the L2 penalty strength applied to weight matrices.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the gradient tolerance at which the solver stops early.
    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn build(self) -> Trainer<B, L> {
        Trainer {
            alpha: self.alpha,
            max_iter: self.max_iter,
            tol: self.tol,
            loss_fn: self.loss_fn,
            _phantom_backend: PhantomData,
        }
    }
}

impl<B, L> Trainer<B, L>
where
    B: Backend,
    L: Loss<B>,
{
    /// Convenience constructor that starts the builder pattern.
    ///
    /// Equivalent to `TrainerBuilder::new(...)`.
    pub fn builder(loss_fn: L) -> TrainerBuilder<B, L> {
        TrainerBuilder::new(loss_fn)
    }

    /// Trains the model on the full training set.
    ///
    /// # Returns
    /// A fitted model ready for inference, or an error if:
    /// - The training set is empty
    /// - Feature or target counts do not line up with the model
    ///
    /// Reaching `max_iter` without meeting the gradient tolerance is not an
    /// error; the model at the last iterate is returned.
    pub fn fit(
        &self,
        model: MlpRegressor<B, Unfitted>,
        x: &Tensor2D<B>,
        y: &Tensor1D<B>,
    ) -> Result<MlpRegressor<B, Fitted>, TrainError> {
        let (rows, cols) = x.shape();
        if rows == 0 {
            return Err(TrainError::EmptyData);
        }
        let expected = model.layer_sizes()[0];
        if cols != expected {
            return Err(TrainError::FeatureMismatch {
                expected,
                got: cols,
            });
        }
        if y.len() != rows {
            return Err(TrainError::TargetMismatch {
                rows,
                targets: y.len(),
            });
        }

        info!(
            rows,
            features = cols,
            n_parameters = model.n_parameters(),
            alpha = self.alpha,
            max_iter = self.max_iter,
            "starting training"
        );

        let solver = Lbfgs::default()
            .with_max_iter(self.max_iter)
            .with_tol(self.tol);

        // The solver works on a flat parameter vector; a probe copy of the
        // model maps each candidate vector back to layer shapes.
        let mut probe = model.clone();
        let (params, summary) = solver.minimize(model.flat_params(), |flat| {
            let (value, grad) = {
                probe.set_flat_params(flat);
                probe.loss_and_grad(&self.loss_fn, x, y, self.alpha)
            };
            debug!(value, "objective evaluated");
            (value, grad)
        });

        self.log_summary(&summary);

        let mut trained = model;
        trained.set_flat_params(&params);
        Ok(trained.into_fitted())
    }

    fn log_summary(&self, summary: &LbfgsSummary) {
        if summary.converged {
            info!(
                iterations = summary.iterations,
                final_value = summary.final_value,
                "training converged"
            );
        } else {
            info!(
                iterations = summary.iterations,
                final_value = summary.final_value,
                "training stopped before reaching tolerance"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::NdarrayBackend,
        loss::SquaredLoss,
        model::InferenceModel,
    };

    fn tensor2d(data: Vec<f64>, rows: usize, cols: usize) -> Tensor2D<NdarrayBackend> {
        Tensor2D::new(data, rows, cols)
    }

    // === TrainerBuilder tests ===

    #[test]
    fn test_trainer_builder_default_values() {
        let builder = TrainerBuilder::<NdarrayBackend, _>::new(SquaredLoss);

        assert_eq!(builder.alpha, 1e-5);
        assert_eq!(builder.max_iter, 1000);
        assert_eq!(builder.tol, 1e-4);
    }

    #[test]
    fn test_trainer_builder_custom_alpha() {
        let builder = TrainerBuilder::<NdarrayBackend, _>::new(SquaredLoss).alpha(0.01);

        assert_eq!(builder.alpha, 0.01);
        assert_eq!(builder.max_iter, 1000);
    }

    #[test]
    fn test_trainer_builder_chaining() {
        let builder = TrainerBuilder::<NdarrayBackend, _>::new(SquaredLoss)
            .alpha(0.5)
            .max_iter(250)
            .tol(1e-6);

        assert_eq!(builder.alpha, 0.5);
        assert_eq!(builder.max_iter, 250);
        assert_eq!(builder.tol, 1e-6);
    }

    #[test]
    fn test_trainer_builder_creates_valid_trainer() {
        let trainer = TrainerBuilder::<NdarrayBackend, _>::new(SquaredLoss)
            .alpha(0.1)
            .max_iter(200)
            .build();

        assert_eq!(trainer.alpha, 0.1);
        assert_eq!(trainer.max_iter, 200);
    }

    // === Trainer tests ===

    #[test]
    fn test_trainer_fit_linear_target() {
        // y = 2*x1 + 3*x2 + 1 on a small grid; a network with ReLU hidden
        // units can fit this on the training points.
        let mut data = Vec::new();
        let mut targets = Vec::new();
        for i in 0..10 {
            for j in 0..10 {
                let (a, b) = (i as f64 / 10.0, j as f64 / 10.0);
                data.extend([a, b]);
                targets.push(2.0 * a + 3.0 * b + 1.0);
            }
        }
        let x = tensor2d(data, 100, 2);
        let y = Tensor1D::<NdarrayBackend>::new(targets.clone());

        let model = MlpRegressor::<NdarrayBackend>::new(2, &[8], 1);
        let trainer = Trainer::builder(SquaredLoss)
            .alpha(1e-5)
            .max_iter(500)
            .build();

        let fitted = trainer.fit(model, &x, &y).unwrap();
        let preds = fitted.predict_batch(&x).to_vec();

        let mse: f64 = preds
            .iter()
            .zip(&targets)
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>()
            / 100.0;
        assert!(mse < 0.05, "mse = {}", mse);
    }

    #[test]
    fn test_trainer_strong_penalty_shrinks_weights() {
        let x = tensor2d(vec![1.0, 2.0, 3.0, 4.0], 4, 1);
        let y = Tensor1D::<NdarrayBackend>::new(vec![2.0, 4.0, 6.0, 8.0]);

        let fit_with = |alpha: f64| {
            let model = MlpRegressor::<NdarrayBackend>::new(1, &[4], 7);
            let trainer = Trainer::builder(SquaredLoss)
                .alpha(alpha)
                .max_iter(300)
                .build();
            let fitted = trainer.fit(model, &x, &y).unwrap();
            let params = fitted.extract_params();
            params
                .layers
                .iter()
                .map(|l| l.weights.iter().map(|w| w * w).sum::<f64>())
                .sum::<f64>()
        };

        let small = fit_with(1e-6);
        let large = fit_with(10.0);
        assert!(large < small, "large-penalty norm {} >= {}", large, small);
    }

    #[test]
    fn test_trainer_empty_data() {
        let x = tensor2d(vec![], 0, 2);
        let y = Tensor1D::<NdarrayBackend>::new(vec![]);
        let model = MlpRegressor::<NdarrayBackend>::new(2, &[3], 1);
        let trainer = Trainer::builder(SquaredLoss).build();

        let err = trainer.fit(model, &x, &y).unwrap_err();
        assert!(matches!(err, TrainError::EmptyData));
    }

    #[test]
    fn test_trainer_feature_mismatch() {
        let x = tensor2d(vec![1.0, 2.0, 3.0], 1, 3);
        let y = Tensor1D::<NdarrayBackend>::new(vec![1.0]);
        let model = MlpRegressor::<NdarrayBackend>::new(2, &[3], 1);
        let trainer = Trainer::builder(SquaredLoss).build();

        let err = trainer.fit(model, &x, &y).unwrap_err();
        assert!(matches!(
            err,
            TrainError::FeatureMismatch {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn test_trainer_target_mismatch() {
        let x = tensor2d(vec![1.0, 2.0], 2, 1);
        let y = Tensor1D::<NdarrayBackend>::new(vec![1.0]);
        let model = MlpRegressor::<NdarrayBackend>::new(1, &[3], 1);
        let trainer = Trainer::builder(SquaredLoss).build();

        let err = trainer.fit(model, &x, &y).unwrap_err();
        assert!(matches!(
            err,
            TrainError::TargetMismatch { rows: 2, targets: 1 }
        ));
    }

    #[test]
    fn test_trainer_deterministic_given_seed() {
        let x = tensor2d(vec![0.0, 1.0, 2.0, 3.0], 4, 1);
        let y = Tensor1D::<NdarrayBackend>::new(vec![0.0, 1.0, 4.0, 9.0]);

        let run = || {
            let model = MlpRegressor::<NdarrayBackend>::new(1, &[5, 2], 1);
            let trainer = Trainer::builder(SquaredLoss).max_iter(50).build();
            let fitted = trainer.fit(model, &x, &y).unwrap();
            fitted.predict_batch(&x).to_vec()
        };

        assert_eq!(run(), run());
    }
}
