//! Feed-forward regression network with type-level training state.
//!
//! [`MlpRegressor`] is a fully-connected network with ReLU hidden activations
//! and an identity output unit, sized by a list of hidden layer widths. It is
//! trained full-batch by a quasi-Newton solver, so instead of an incremental
//! `step` interface it exposes its parameters as one flat vector plus a
//! penalized objective ([`MlpRegressor::loss_and_grad`]) the solver can
//! evaluate at any point.
//!
//! - `MlpRegressor<B, Unfitted>` — initialization, forward/backward, flat
//!   parameter access.
//! - `MlpRegressor<B, Fitted>` — inference-only, serializable predictor.

use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::loss::Loss;
use crate::model::{Fitted, InferenceModel, Unfitted};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// One fully-connected layer: weights of shape `(fan_in, fan_out)` and a
/// bias of length `fan_out`.
#[derive(Clone)]
struct DenseLayer<B: Backend> {
    weights: Tensor2D<B>,
    bias: Tensor1D<B>,
}

impl<B: Backend> std::fmt::Debug for DenseLayer<B>
where
    B::Tensor1D: std::fmt::Debug,
    B::Tensor2D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseLayer")
            .field("weights", &self.weights)
            .field("bias", &self.bias)
            .finish()
    }
}

/// Serializable parameters of a single dense layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializableDenseParams {
    /// Row-major `(fan_in, fan_out)` weight matrix.
    pub weights: Vec<f64>,
    /// Bias vector of length `fan_out`.
    pub bias: Vec<f64>,
}

/// Serializable representation of a trained network.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializableMlpParams {
    /// Full layer widths, input and output included (e.g., `[2, 5, 2, 1]`).
    pub layer_sizes: Vec<usize>,
    /// Per-layer weights and biases, input side first.
    pub layers: Vec<SerializableDenseParams>,
}

/// A feed-forward regressor with state encoded at the type level.
///
/// - When `S = Unfitted`: exposes training operations.
/// - When `S = Fitted`: implements [`InferenceModel`].
///
/// # Example
/// ```
/// use solar_ann::backend::{NdarrayBackend, Tensor2D};
/// use solar_ann::model::{InferenceModel, MlpRegressor};
///
/// let model = MlpRegressor::<NdarrayBackend>::new(2, &[5, 2], 1)
///     .into_fitted();
/// let x = Tensor2D::new(vec![0.1, -0.2, 0.3, 0.4], 2, 2);
/// assert_eq!(model.predict_batch(&x).len(), 2);
/// ```
pub struct MlpRegressor<B: Backend, S = Unfitted> {
    layer_sizes: Vec<usize>,
    layers: Vec<DenseLayer<B>>,
    _state: PhantomData<S>,
}

impl<B: Backend, S> std::fmt::Debug for MlpRegressor<B, S>
where
    B::Tensor1D: std::fmt::Debug,
    B::Tensor2D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlpRegressor")
            .field("layer_sizes", &self.layer_sizes)
            .field("layers", &self.layers)
            .finish()
    }
}

impl<B: Backend, S> Clone for MlpRegressor<B, S> {
    fn clone(&self) -> Self {
        Self {
            layer_sizes: self.layer_sizes.clone(),
            layers: self.layers.clone(),
            _state: PhantomData,
        }
    }
}

impl<B: Backend, S> MlpRegressor<B, S> {
    /// Full layer widths, input and output included.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Total number of trainable parameters (weights and biases).
    pub fn n_parameters(&self) -> usize {
        self.layer_sizes
            .windows(2)
            .map(|w| w[0] * w[1] + w[1])
            .sum()
    }

    /// Shared forward pass; hidden layers apply ReLU, the output is linear.
    ///
    /// Returns the per-layer pre-activations and the final activation.
    fn forward_cached(&self, x: &Tensor2D<B>) -> (Vec<Tensor2D<B>>, Tensor2D<B>) {
        let n_layers = self.layers.len();
        let mut pre_activations = Vec::with_capacity(n_layers);
        let mut activation = x.clone();
        for (l, layer) in self.layers.iter().enumerate() {
            let z = activation.matmul(&layer.weights).add_rows(&layer.bias);
            activation = if l + 1 < n_layers { z.relu() } else { z.clone() };
            pre_activations.push(z);
        }
        (pre_activations, activation)
    }
}

impl<B: Backend> MlpRegressor<B, Unfitted> {
    /// Creates a network with Glorot-uniform initialized parameters.
    ///
    /// Each layer draws weights and biases from
    /// `U(-b, b)` with `b = sqrt(6 / (fan_in + fan_out))`. The seeded
    /// ChaCha generator makes initialization identical across runs and
    /// platforms for the same seed.
    pub fn new(n_features: usize, hidden_layer_sizes: &[usize], seed: u64) -> Self {
        let mut layer_sizes = Vec::with_capacity(hidden_layer_sizes.len() + 2);
        layer_sizes.push(n_features);
        layer_sizes.extend_from_slice(hidden_layer_sizes);
        layer_sizes.push(1);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layers = layer_sizes
            .windows(2)
            .map(|w| {
                let (fan_in, fan_out) = (w[0], w[1]);
                let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();
                let weights: Vec<f64> = (0..fan_in * fan_out)
                    .map(|_| rng.gen_range(-bound..bound))
                    .collect();
                let bias: Vec<f64> = (0..fan_out).map(|_| rng.gen_range(-bound..bound)).collect();
                DenseLayer {
                    weights: Tensor2D::new(weights, fan_in, fan_out),
                    bias: Tensor1D::new(bias),
                }
            })
            .collect();

        Self {
            layer_sizes,
            layers,
            _state: PhantomData,
        }
    }

    /// Forward pass over a batch; returns one prediction per row.
    pub fn forward(&self, x: &Tensor2D<B>) -> Tensor1D<B> {
        let (_, output) = self.forward_cached(x);
        output.ravel()
    }

    /// Copies all parameters into one flat vector.
    ///
    /// Layout: per layer, the row-major weight matrix followed by the bias,
    /// input side first. [`Self::set_flat_params`] inverts this exactly.
    pub fn flat_params(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.n_parameters());
        for layer in &self.layers {
            flat.extend(layer.weights.to_vec());
            flat.extend(layer.bias.to_vec());
        }
        flat
    }

    /// Replaces all parameters from a flat vector produced by
    /// [`Self::flat_params`] (or advanced by the solver).
    ///
    /// # Panics
    /// Panics if `flat.len()` does not match [`Self::n_parameters`]; the
    /// solver preserves the vector length, so a mismatch is a logic error.
    pub fn set_flat_params(&mut self, flat: &[f64]) {
        assert_eq!(
            flat.len(),
            self.n_parameters(),
            "flat parameter vector has wrong length"
        );
        let mut offset = 0;
        for (w, layer) in self.layer_sizes.windows(2).zip(self.layers.iter_mut()) {
            let (fan_in, fan_out) = (w[0], w[1]);
            let n_weights = fan_in * fan_out;
            layer.weights =
                Tensor2D::new(flat[offset..offset + n_weights].to_vec(), fan_in, fan_out);
            offset += n_weights;
            layer.bias = Tensor1D::new(flat[offset..offset + fan_out].to_vec());
            offset += fan_out;
        }
    }

    /// Penalized training objective and its gradient at the current
    /// parameters, flattened in [`Self::flat_params`] order.
    ///
    /// The objective is `loss(forward(x), y) + alpha/(2n) * Σ‖W_l‖²` where
    /// the L2 term covers weight matrices only, not biases.
    pub fn loss_and_grad<L: Loss<B>>(
        &self,
        loss_fn: &L,
        x: &Tensor2D<B>,
        y: &Tensor1D<B>,
        alpha: f64,
    ) -> (f64, Vec<f64>) {
        let (n_rows, _) = x.shape();
        let n = n_rows as f64;
        let (pre_activations, output) = self.forward_cached(x);
        let prediction = output.ravel();

        let mut value = loss_fn.loss(&prediction, y).to_f64();
        for layer in &self.layers {
            value += alpha / (2.0 * n) * layer.weights.sum_squares().to_f64();
        }

        // Backpropagation. delta holds ∂objective/∂z for the current layer.
        let grad_pred = loss_fn.grad_wrt_prediction(&prediction, y);
        let mut delta = Tensor2D::<B>::new(grad_pred.to_vec(), n_rows, 1);

        let n_layers = self.layers.len();
        let mut weight_grads: Vec<Tensor2D<B>> = Vec::with_capacity(n_layers);
        let mut bias_grads: Vec<Tensor1D<B>> = Vec::with_capacity(n_layers);
        let ridge = Scalar::<B>::new(alpha / n);

        for l in (0..n_layers).rev() {
            let input = if l == 0 {
                x.clone()
            } else {
                pre_activations[l - 1].relu()
            };
            let grad_w = input
                .transpose()
                .matmul(&delta)
                .add(&self.layers[l].weights.scale(&ridge));
            weight_grads.push(grad_w);
            bias_grads.push(delta.col_sum());

            if l > 0 {
                delta = delta
                    .matmul(&self.layers[l].weights.transpose())
                    .mul(&pre_activations[l - 1].relu_mask());
            }
        }
        weight_grads.reverse();
        bias_grads.reverse();

        let mut grad = Vec::with_capacity(self.n_parameters());
        for (gw, gb) in weight_grads.iter().zip(&bias_grads) {
            grad.extend(gw.to_vec());
            grad.extend(gb.to_vec());
        }
        (value, grad)
    }

    /// Converts the trained model into its inference-only form.
    pub fn into_fitted(self) -> MlpRegressor<B, Fitted> {
        MlpRegressor {
            layer_sizes: self.layer_sizes,
            layers: self.layers,
            _state: PhantomData,
        }
    }
}

impl<B: Backend> InferenceModel<B> for MlpRegressor<B, Fitted> {
    type InputSingle = Tensor1D<B>;
    type OutputSingle = Scalar<B>;
    type InputBatch = Tensor2D<B>;
    type OutputBatch = Tensor1D<B>;
    type ParamsRepr = SerializableMlpParams;

    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle {
        let row = Tensor2D::<B>::new(input.to_vec(), 1, input.len());
        let (_, output) = self.forward_cached(&row);
        Scalar::new(output.to_vec()[0])
    }

    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch {
        let (_, output) = self.forward_cached(input);
        output.ravel()
    }

    fn extract_params(&self) -> Self::ParamsRepr {
        SerializableMlpParams {
            layer_sizes: self.layer_sizes.clone(),
            layers: self
                .layers
                .iter()
                .map(|layer| SerializableDenseParams {
                    weights: layer.weights.to_vec(),
                    bias: layer.bias.to_vec(),
                })
                .collect(),
        }
    }

    fn from_params(params: Self::ParamsRepr) -> Result<Self, Box<dyn std::error::Error>> {
        if params.layer_sizes.len() < 2 || params.layers.len() + 1 != params.layer_sizes.len() {
            return Err("layer count does not match layer sizes".into());
        }
        let layers = params
            .layer_sizes
            .windows(2)
            .zip(params.layers)
            .map(|(w, layer)| {
                let (fan_in, fan_out) = (w[0], w[1]);
                if layer.weights.len() != fan_in * fan_out || layer.bias.len() != fan_out {
                    return Err::<_, Box<dyn std::error::Error>>(
                        format!("layer shape mismatch for ({}, {})", fan_in, fan_out).into(),
                    );
                }
                Ok(DenseLayer {
                    weights: Tensor2D::new(layer.weights, fan_in, fan_out),
                    bias: Tensor1D::new(layer.bias),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            layer_sizes: params.layer_sizes,
            layers,
            _state: PhantomData,
        })
    }
}
