//! Differentiable loss functions for model training.

use crate::backend::{Backend, Scalar, Tensor1D};

/// A trait for differentiable loss functions used during model training.
///
/// Implementors define the scalar loss value and the gradient of the loss
/// with respect to the model's predictions. The gradient is what gets fed
/// into the model's backward pass.
pub trait Loss<B: Backend> {
    /// Computes the scalar loss value.
    fn loss(&self, prediction: &Tensor1D<B>, target: &Tensor1D<B>) -> Scalar<B>;

    /// Computes the gradient of the loss w.r.t. the prediction: `∂L/∂pred`.
    fn grad_wrt_prediction(
        &self,
        prediction: &Tensor1D<B>,
        target: &Tensor1D<B>,
    ) -> Tensor1D<B>;
}

/// Halved mean squared error: `L = (1/2n) * Σ(pred_i - target_i)²`
///
/// Gradient w.r.t. prediction: `∂L/∂pred = (pred - target) / n`
///
/// The factor of one half keeps the gradient free of a stray 2, which is the
/// convention quasi-Newton regression solvers expect.
pub struct SquaredLoss;

impl<B: Backend> Loss<B> for SquaredLoss {
    fn loss(&self, pred: &Tensor1D<B>, target: &Tensor1D<B>) -> Scalar<B> {
        let diff = pred.sub(target);
        let n = Scalar::<B>::new(2.0 * diff.len() as f64);
        diff.dot(&diff) / n
    }

    fn grad_wrt_prediction(&self, pred: &Tensor1D<B>, target: &Tensor1D<B>) -> Tensor1D<B> {
        let diff = pred.sub(target);
        let inv_n = Scalar::<B>::new(1.0 / pred.len() as f64);
        diff.scale(&inv_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NdarrayBackend;

    #[test]
    fn test_squared_loss_value() {
        let pred = Tensor1D::<NdarrayBackend>::new(vec![1.0, 2.0]);
        let target = Tensor1D::<NdarrayBackend>::new(vec![0.0, 4.0]);
        // ((1)^2 + (-2)^2) / (2 * 2) = 5/4
        let loss = SquaredLoss.loss(&pred, &target);
        assert!((loss.to_f64() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_squared_loss_zero_at_target() {
        let v = Tensor1D::<NdarrayBackend>::new(vec![3.0, -1.0, 0.5]);
        assert_eq!(SquaredLoss.loss(&v, &v).to_f64(), 0.0);
    }

    #[test]
    fn test_squared_loss_gradient() {
        let pred = Tensor1D::<NdarrayBackend>::new(vec![1.0, 2.0]);
        let target = Tensor1D::<NdarrayBackend>::new(vec![0.0, 4.0]);
        // (pred - target) / n = [0.5, -1.0]
        let grad = SquaredLoss.grad_wrt_prediction(&pred, &target);
        assert_eq!(grad.to_vec(), vec![0.5, -1.0]);
    }
}
