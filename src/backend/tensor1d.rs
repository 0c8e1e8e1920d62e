use super::scalar::Scalar;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 1D tensor.
///
/// Wraps a backend's native vector representation (`B::Tensor1D`) while
/// carrying phantom type information about its originating backend. The
/// `PhantomData<B>` marker is zero-sized, so the wrapper adds no runtime
/// overhead over the native type.
///
/// # Example
/// ```
/// use solar_ann::backend::{NdarrayBackend, Scalar, Tensor1D};
///
/// let x: Tensor1D<NdarrayBackend> = Tensor1D::new(vec![1.0, 2.0, 3.0]);
/// let y = x.scale(&Scalar::new(2.0));
/// assert_eq!(y.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
#[derive(Clone)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> std::fmt::Debug for Tensor1D<B>
where
    B::Tensor1D: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor1D").field("data", &self.data).finish()
    }
}

impl<B: Backend> Tensor1D<B> {
    /// Creates a new 1D tensor from a vector of `f64` values.
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: B::from_vec_1d(data),
            backend: PhantomData,
        }
    }

    /// Creates a 1D tensor filled with zeros of the specified length.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: B::zeros_1d(len),
            backend: PhantomData,
        }
    }

    pub(crate) fn from_repr(data: B::Tensor1D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    /// Checks whether the tensor has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element-wise addition: `self + other`.
    ///
    /// # Panics
    /// Panics if tensors have different lengths.
    pub fn add(&self, other: &Self) -> Self {
        Self::from_repr(B::add_1d(&self.data, &other.data))
    }

    /// Element-wise subtraction: `self - other`.
    ///
    /// # Panics
    /// Panics if tensors have different lengths.
    pub fn sub(&self, other: &Self) -> Self {
        Self::from_repr(B::sub_1d(&self.data, &other.data))
    }

    /// Multiplies every element by a scalar.
    pub fn scale(&self, s: &Scalar<B>) -> Self {
        Self::from_repr(B::mul_scalar_1d(&self.data, &s.data))
    }

    /// Dot product with another 1D tensor.
    ///
    /// # Panics
    /// Panics if tensors have different lengths.
    pub fn dot(&self, other: &Self) -> Scalar<B> {
        Scalar {
            data: B::dot_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Scalar<B> {
        Scalar {
            data: B::sum_all_1d(&self.data),
            backend: PhantomData,
        }
    }

    /// Converts the tensor to a standard `Vec<f64>` for host interoperability.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NdarrayBackend;

    #[test]
    fn test_new_and_to_vec() {
        let t = Tensor1D::<NdarrayBackend>::new(vec![1.0, 2.5, -3.0]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.to_vec(), vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn test_zeros() {
        let t = Tensor1D::<NdarrayBackend>::zeros(4);
        assert_eq!(t.to_vec(), vec![0.0; 4]);
    }

    #[test]
    fn test_add_sub() {
        let a = Tensor1D::<NdarrayBackend>::new(vec![5.0, 7.0]);
        let b = Tensor1D::<NdarrayBackend>::new(vec![2.0, 3.0]);
        assert_eq!(a.add(&b).to_vec(), vec![7.0, 10.0]);
        assert_eq!(a.sub(&b).to_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_dot_and_sum() {
        let a = Tensor1D::<NdarrayBackend>::new(vec![1.0, 2.0, 3.0]);
        let b = Tensor1D::<NdarrayBackend>::new(vec![4.0, 5.0, 6.0]);
        assert_eq!(a.dot(&b).to_f64(), 32.0);
        assert_eq!(a.sum().to_f64(), 6.0);
    }
}
