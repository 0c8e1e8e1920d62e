//! # Backend Abstraction
//!
//! Trait-based abstraction over the numeric backend used by the scaler,
//! the network and the trainer. Models and transformers are generic over
//! [`Backend`], so the tensor implementation can be swapped without touching
//! their code.
//!
//! ## Design
//!
//! - **Minimal trait surface**: only the operations the regression pipeline
//!   exercises are part of the trait (element-wise arithmetic, matrix
//!   products, column reductions, row broadcasts, ReLU).
//! - **Zero-cost generics**: backend selection happens at compile time via
//!   type parameters; there is no runtime dispatch.
//! - **Type-safe tensor handling**: [`Scalar`], [`Tensor1D`] and [`Tensor2D`]
//!   carry their backend as a phantom type, so tensors from different
//!   backends cannot be mixed.
//!
//! The default (and currently only) implementation is [`NdarrayBackend`],
//! backed by the `ndarray` crate.
//!
//! ## Example
//!
//! ```rust
//! use solar_ann::backend::{NdarrayBackend, Tensor1D, Tensor2D};
//!
//! let w: Tensor2D<NdarrayBackend> = Tensor2D::new(vec![1.0, 0.0, 0.0, 1.0], 2, 2);
//! let x: Tensor2D<NdarrayBackend> = Tensor2D::new(vec![3.0, 4.0], 1, 2);
//! let y = x.matmul(&w);
//! assert_eq!(y.to_vec(), vec![3.0, 4.0]);
//! ```

mod ndarray_backend;
pub use ndarray_backend::NdarrayBackend;

/// Scalar value representation and arithmetic operations.
pub mod scalar;
/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use scalar::{Scalar, ScalarOps};
pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over computation devices and tensor operations.
///
/// Implementations provide concrete tensor types and the numeric kernels the
/// rest of the crate builds on. All tensors hold `f64` values; constructors
/// take row-major data.
///
/// # Panics
///
/// Shape-checked operations (`matmul`, element-wise binary ops, broadcasts)
/// panic on mismatched shapes. Callers that accept external data are expected
/// to validate shapes before reaching the backend.
pub trait Backend: Clone + Copy + 'static {
    /// Scalar type supporting arithmetic operations.
    type Scalar: ScalarOps + Clone;

    /// One-dimensional tensor type.
    type Tensor1D: Clone + Send + Sync;

    /// Two-dimensional tensor type.
    type Tensor2D: Clone + Send + Sync;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros of given length.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Creates a 2D tensor filled with zeros of given dimensions.
    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D;

    /// Constructs a 1D tensor from owned data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major ordered data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D;

    /// Creates a backend-specific scalar from an `f64` value.
    fn scalar_f64(value: f64) -> Self::Scalar;

    // --- Element-wise operations ---

    /// Element-wise addition of two 1D tensors.
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise subtraction of two 1D tensors.
    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Multiplies each element of a 1D tensor by a scalar.
    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    /// Element-wise addition of two 2D tensors.
    fn add_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Element-wise subtraction of two 2D tensors.
    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Element-wise (Hadamard) multiplication of two 2D tensors.
    fn mul_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Multiplies each element of a 2D tensor by a scalar.
    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D;

    // --- Reductions ---

    /// Dot product of two 1D tensors.
    ///
    /// # Panics
    /// If tensors have different lengths.
    fn dot_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Scalar;

    /// Sum of all elements in a 1D tensor.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    /// Sum of squares of all elements in a 2D tensor.
    ///
    /// Used for L2 penalties on weight matrices.
    fn sum_squares_2d(t: &Self::Tensor2D) -> Self::Scalar;

    // --- Linear algebra ---

    /// Matrix-matrix multiplication: `(m × k) · (k × n) → (m × n)`.
    ///
    /// # Panics
    /// If `a.cols() != b.rows()`.
    fn matmul(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Returns the transpose of a 2D tensor.
    fn transpose(t: &Self::Tensor2D) -> Self::Tensor2D;

    /// Returns the shape of a 2D tensor as `(rows, cols)`.
    fn shape(t: &Self::Tensor2D) -> (usize, usize);

    /// Flattens a 2D tensor into a 1D tensor in row-major order.
    fn ravel_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    // --- Column-wise operations (for preprocessing and bias gradients) ---

    /// Mean of each column; returns a 1D tensor of length `cols`.
    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Standard deviation of each column.
    ///
    /// `ddof` is the delta degrees of freedom (0 for population std,
    /// 1 for sample std).
    fn col_std_2d(t: &Self::Tensor2D, ddof: usize) -> Self::Tensor1D;

    /// Sum of each column; returns a 1D tensor of length `cols`.
    fn col_sum_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    // --- Broadcasting operations ---

    /// `result[i, j] = t[i, j] + v[j]`
    fn broadcast_add_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `result[i, j] = t[i, j] - v[j]`
    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `result[i, j] = t[i, j] * v[j]`
    fn broadcast_mul_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `result[i, j] = t[i, j] / v[j]`
    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    // --- Non-linearities ---

    /// Element-wise rectified linear unit: `max(x, 0)`.
    fn relu_2d(t: &Self::Tensor2D) -> Self::Tensor2D;

    /// Derivative mask of the ReLU: `1.0` where `x > 0`, else `0.0`.
    fn relu_mask_2d(t: &Self::Tensor2D) -> Self::Tensor2D;

    // --- Data access ---

    /// Converts a 1D tensor to a `Vec<f64>`.
    ///
    /// Not intended for hot paths due to allocation overhead.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Converts a 2D tensor to a row-major `Vec<f64>`.
    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<f64>;

    /// Returns the number of elements in a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;
}
