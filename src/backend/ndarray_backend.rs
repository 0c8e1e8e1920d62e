use super::Backend;
use ndarray::{Array1, Array2, Axis};

/// CPU tensor backend implementation using the `ndarray` crate.
///
/// # Type mappings
/// - `Scalar`: `f64`
/// - `Tensor1D`: `ndarray::Array1<f64>`
/// - `Tensor2D`: `ndarray::Array2<f64>`
///
/// All arrays own their storage; element-wise operations allocate new arrays,
/// which keeps the trait surface purely functional at the cost of some
/// intermediate allocations.
#[derive(Clone, Debug, Copy)]
pub struct NdarrayBackend;

impl Backend for NdarrayBackend {
    type Scalar = f64;
    type Tensor1D = Array1<f64>;
    type Tensor2D = Array2<f64>;

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        Array1::zeros(len)
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        Array2::zeros((rows, cols))
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        Array1::from_vec(data)
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        Array2::from_shape_vec((rows, cols), data)
            .expect("data length must equal rows * cols")
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a + b
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a - b
    }

    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t * *s
    }

    fn add_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a + b
    }

    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a - b
    }

    fn mul_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a * b
    }

    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        t * *s
    }

    fn dot_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Scalar {
        a.dot(b)
    }

    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.sum()
    }

    fn sum_squares_2d(t: &Self::Tensor2D) -> Self::Scalar {
        t.iter().map(|v| v * v).sum()
    }

    fn matmul(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a.dot(b)
    }

    fn transpose(t: &Self::Tensor2D) -> Self::Tensor2D {
        t.t().to_owned()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.dim()
    }

    fn ravel_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        Array1::from_iter(t.iter().copied())
    }

    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.mean_axis(Axis(0))
            .expect("column mean requires at least one row")
    }

    fn col_std_2d(t: &Self::Tensor2D, ddof: usize) -> Self::Tensor1D {
        t.std_axis(Axis(0), ddof as f64)
    }

    fn col_sum_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.sum_axis(Axis(0))
    }

    fn broadcast_add_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        t + v
    }

    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        t - v
    }

    fn broadcast_mul_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        t * v
    }

    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        t / v
    }

    fn relu_2d(t: &Self::Tensor2D) -> Self::Tensor2D {
        t.mapv(|x| x.max(0.0))
    }

    fn relu_mask_2d(t: &Self::Tensor2D) -> Self::Tensor2D {
        t.mapv(|x| if x > 0.0 { 1.0 } else { 0.0 })
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.to_vec()
    }

    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<f64> {
        t.iter().copied().collect()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_std_population() {
        // column [1, 2, 3]: population std = sqrt(2/3)
        let t = Array2::from_shape_vec((3, 1), vec![1.0, 2.0, 3.0]).unwrap();
        let std = NdarrayBackend::col_std_2d(&t, 0);
        assert!((std[0] - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_matmul_shapes() {
        let a = Array2::from_shape_vec((2, 3), vec![1.0; 6]).unwrap();
        let b = Array2::from_shape_vec((3, 4), vec![1.0; 12]).unwrap();
        let c = NdarrayBackend::matmul(&a, &b);
        assert_eq!(c.dim(), (2, 4));
        assert_eq!(c[[0, 0]], 3.0);
    }

    #[test]
    fn test_sum_squares() {
        let t = Array2::from_shape_vec((2, 2), vec![1.0, -2.0, 3.0, -4.0]).unwrap();
        assert_eq!(NdarrayBackend::sum_squares_2d(&t), 30.0);
    }
}
