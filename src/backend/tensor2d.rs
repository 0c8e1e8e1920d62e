use super::scalar::Scalar;
use super::tensor1d::Tensor1D;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 2D tensor (matrix).
///
/// Rows are samples, columns are features throughout this crate. Construction
/// takes row-major data; `to_vec` returns it row-major as well.
///
/// # Example
/// ```
/// use solar_ann::backend::{NdarrayBackend, Tensor2D};
///
/// let t: Tensor2D<NdarrayBackend> = Tensor2D::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
/// assert_eq!(t.shape(), (2, 2));
/// assert_eq!(t.transpose().to_vec(), vec![1.0, 3.0, 2.0, 4.0]);
/// ```
#[derive(Clone)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> std::fmt::Debug for Tensor2D<B>
where
    B::Tensor2D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor2D").field("data", &self.data).finish()
    }
}

impl<B: Backend> Tensor2D<B> {
    /// Creates a new 2D tensor from row-major data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self {
            data: B::from_vec_2d(data, rows, cols),
            backend: PhantomData,
        }
    }

    /// Creates a 2D tensor filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: B::zeros_2d(rows, cols),
            backend: PhantomData,
        }
    }

    pub(crate) fn from_repr(data: B::Tensor2D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }

    /// Matrix product `self · other`.
    ///
    /// # Panics
    /// Panics if `self.cols() != other.rows()`.
    pub fn matmul(&self, other: &Self) -> Self {
        Self::from_repr(B::matmul(&self.data, &other.data))
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        Self::from_repr(B::transpose(&self.data))
    }

    /// Element-wise addition.
    pub fn add(&self, other: &Self) -> Self {
        Self::from_repr(B::add_2d(&self.data, &other.data))
    }

    /// Element-wise subtraction.
    pub fn sub(&self, other: &Self) -> Self {
        Self::from_repr(B::sub_2d(&self.data, &other.data))
    }

    /// Element-wise (Hadamard) multiplication.
    pub fn mul(&self, other: &Self) -> Self {
        Self::from_repr(B::mul_2d(&self.data, &other.data))
    }

    /// Multiplies every element by a scalar.
    pub fn scale(&self, s: &Scalar<B>) -> Self {
        Self::from_repr(B::mul_scalar_2d(&self.data, &s.data))
    }

    /// Sum of squares of all entries.
    pub fn sum_squares(&self) -> Scalar<B> {
        Scalar {
            data: B::sum_squares_2d(&self.data),
            backend: PhantomData,
        }
    }

    /// Flattens the matrix into a 1D tensor in row-major order.
    pub fn ravel(&self) -> Tensor1D<B> {
        Tensor1D::from_repr(B::ravel_2d(&self.data))
    }

    /// Mean of each column.
    pub fn col_mean(&self) -> Tensor1D<B> {
        Tensor1D::from_repr(B::col_mean_2d(&self.data))
    }

    /// Standard deviation of each column with the given degrees of freedom.
    pub fn col_std(&self, ddof: usize) -> Tensor1D<B> {
        Tensor1D::from_repr(B::col_std_2d(&self.data, ddof))
    }

    /// Sum of each column.
    pub fn col_sum(&self) -> Tensor1D<B> {
        Tensor1D::from_repr(B::col_sum_2d(&self.data))
    }

    /// Adds `v` to every row.
    pub fn add_rows(&self, v: &Tensor1D<B>) -> Self {
        Self::from_repr(B::broadcast_add_1d_to_2d_rows(&self.data, &v.data))
    }

    /// Subtracts `v` from every row.
    pub fn sub_rows(&self, v: &Tensor1D<B>) -> Self {
        Self::from_repr(B::broadcast_sub_1d_to_2d_rows(&self.data, &v.data))
    }

    /// Multiplies every row element-wise by `v`.
    pub fn mul_rows(&self, v: &Tensor1D<B>) -> Self {
        Self::from_repr(B::broadcast_mul_1d_to_2d_rows(&self.data, &v.data))
    }

    /// Divides every row element-wise by `v`.
    pub fn div_rows(&self, v: &Tensor1D<B>) -> Self {
        Self::from_repr(B::broadcast_div_1d_to_2d_rows(&self.data, &v.data))
    }

    /// Element-wise `max(x, 0)`.
    pub fn relu(&self) -> Self {
        Self::from_repr(B::relu_2d(&self.data))
    }

    /// ReLU derivative mask: `1.0` where positive, `0.0` elsewhere.
    pub fn relu_mask(&self) -> Self {
        Self::from_repr(B::relu_mask_2d(&self.data))
    }

    /// Converts the tensor to a row-major `Vec<f64>`.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_2d(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NdarrayBackend;

    type T2 = Tensor2D<NdarrayBackend>;

    #[test]
    fn test_shape_and_to_vec() {
        let t = T2::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        assert_eq!(t.shape(), (2, 3));
        assert_eq!(t.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_matmul() {
        // [[1, 2], [3, 4]] · [[5, 6], [7, 8]] = [[19, 22], [43, 50]]
        let a = T2::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        let b = T2::new(vec![5.0, 6.0, 7.0, 8.0], 2, 2);
        assert_eq!(a.matmul(&b).to_vec(), vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_transpose() {
        let t = T2::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let tt = t.transpose();
        assert_eq!(tt.shape(), (3, 2));
        assert_eq!(tt.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_col_reductions() {
        let t = T2::new(vec![0.0, 1.0, 0.0, 1.0, 1.0, 3.0], 3, 2);
        let mean = t.col_mean().to_vec();
        assert!((mean[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((mean[1] - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(t.col_sum().to_vec(), vec![1.0, 5.0]);
    }

    #[test]
    fn test_row_broadcasts() {
        let t = T2::new(vec![2.0, 4.0, 6.0, 8.0], 2, 2);
        let v = Tensor1D::<NdarrayBackend>::new(vec![2.0, 4.0]);
        assert_eq!(t.sub_rows(&v).to_vec(), vec![0.0, 0.0, 4.0, 4.0]);
        assert_eq!(t.div_rows(&v).to_vec(), vec![1.0, 1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_relu_and_mask() {
        let t = T2::new(vec![-1.0, 0.0, 2.0, -3.0], 2, 2);
        assert_eq!(t.relu().to_vec(), vec![0.0, 0.0, 2.0, 0.0]);
        assert_eq!(t.relu_mask().to_vec(), vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_ravel() {
        let t = T2::new(vec![1.0, 2.0, 3.0], 3, 1);
        assert_eq!(t.ravel().to_vec(), vec![1.0, 2.0, 3.0]);
    }
}
