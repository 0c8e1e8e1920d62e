use crate::backend::Backend;
use std::marker::PhantomData;

/// Trait for scalar operations required by numerical backends.
///
/// Abstracts the handful of scalar operations generic code needs so that a
/// backend may substitute its own numeric type. Implemented for `f64`, which
/// is what [`super::NdarrayBackend`] uses.
pub trait ScalarOps:
    Clone
    + Copy
    + Send
    + Sync
    + std::ops::Add<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Div<Output = Self>
{
    /// Computes the square root of the scalar.
    fn sqrt(self) -> Self;

    /// Returns the absolute value of the scalar.
    fn abs(self) -> Self;

    /// Returns the additive identity for this scalar type.
    fn zero() -> Self;

    /// Returns the multiplicative identity for this scalar type.
    fn one() -> Self;

    /// Converts an `f64` value to this scalar type.
    fn from_f64(v: f64) -> Self;

    /// Converts this scalar to an `f64` value.
    fn to_f64(self) -> f64;
}

impl ScalarOps for f64 {
    fn sqrt(self) -> Self {
        self.sqrt()
    }

    fn abs(self) -> Self {
        self.abs()
    }

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Backend-typed scalar wrapper.
///
/// Wraps a backend's native scalar type while carrying phantom type
/// information about its originating backend, so scalars from different
/// backends cannot be mixed at compile time.
#[derive(Clone, Copy)]
pub struct Scalar<B: Backend> {
    pub data: B::Scalar,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Scalar<B> {
    /// Creates a backend scalar from an `f64` value.
    pub fn new(value: f64) -> Self {
        Self {
            data: B::scalar_f64(value),
            backend: PhantomData,
        }
    }

    /// Converts the scalar back to an `f64` for host code.
    pub fn to_f64(&self) -> f64 {
        self.data.to_f64()
    }
}

impl<B: Backend> std::ops::Add for Scalar<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            data: self.data + rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Sub for Scalar<B> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            data: self.data - rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Mul for Scalar<B> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            data: self.data * rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Div for Scalar<B> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self {
            data: self.data / rhs.data,
            backend: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NdarrayBackend;

    #[test]
    fn test_scalar_roundtrip() {
        let s = Scalar::<NdarrayBackend>::new(2.5);
        assert_eq!(s.to_f64(), 2.5);
    }

    #[test]
    fn test_scalar_arithmetic() {
        let a = Scalar::<NdarrayBackend>::new(6.0);
        let b = Scalar::<NdarrayBackend>::new(2.0);
        assert_eq!((a + b).to_f64(), 8.0);
        assert_eq!((a - b).to_f64(), 4.0);
        assert_eq!((a * b).to_f64(), 12.0);
        assert_eq!((a / b).to_f64(), 3.0);
    }
}
