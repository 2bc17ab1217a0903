//! Fixed-length value-type vector used for integrator states.
//!
//! The length is chosen at construction and never changes afterwards.
//! Every arithmetic operation returns a new vector with its own storage,
//! so operands and results never alias.

use core::fmt;
use core::ops::{Index, IndexMut, Mul};

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedVector {
    data: Box<[Real]>,
}

impl FixedVector {
    /// Zero-length vector.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Vector of length `n` with every element set to zero.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![0.0; n].into_boxed_slice(),
        }
    }

    /// Copy the given elements; the length is the slice length.
    pub fn from_slice(values: &[Real]) -> Self {
        Self {
            data: values.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = Real> + '_ {
        self.data.iter().copied()
    }

    /// Checked element read.
    pub fn get(&self, index: usize) -> CoreResult<Real> {
        self.data
            .get(index)
            .copied()
            .ok_or(CoreError::IndexOob {
                what: "vector element",
                index,
                len: self.len(),
            })
    }

    /// Checked element write.
    pub fn set(&mut self, index: usize, value: Real) -> CoreResult<()> {
        let len = self.len();
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(CoreError::IndexOob {
                what: "vector element",
                index,
                len,
            }),
        }
    }

    /// Elementwise sum. Both operands must have the same length.
    pub fn add(&self, other: &FixedVector) -> CoreResult<FixedVector> {
        if self.len() != other.len() {
            return Err(CoreError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect())
    }

    /// Multiply every element by `k`. Never fails; any length is accepted.
    pub fn scale(&self, k: Real) -> FixedVector {
        self.data.iter().map(|v| v * k).collect()
    }

    /// Move the contents out, leaving `self` as an empty vector.
    pub fn take(&mut self) -> FixedVector {
        core::mem::take(self)
    }
}

impl FromIterator<Real> for FixedVector {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[Real; N]> for FixedVector {
    fn from(values: [Real; N]) -> Self {
        Self::from_slice(&values)
    }
}

impl From<Vec<Real>> for FixedVector {
    fn from(values: Vec<Real>) -> Self {
        Self {
            data: values.into_boxed_slice(),
        }
    }
}

// Out-of-range indexing panics like slice indexing does; use `get`/`set`
// for the checked variants.
impl Index<usize> for FixedVector {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        &self.data[index]
    }
}

impl IndexMut<usize> for FixedVector {
    fn index_mut(&mut self, index: usize) -> &mut Real {
        &mut self.data[index]
    }
}

impl Mul<Real> for &FixedVector {
    type Output = FixedVector;

    fn mul(self, k: Real) -> FixedVector {
        self.scale(k)
    }
}

impl Mul<&FixedVector> for Real {
    type Output = FixedVector;

    fn mul(self, v: &FixedVector) -> FixedVector {
        v.scale(self)
    }
}

impl Mul<Real> for FixedVector {
    type Output = FixedVector;

    fn mul(self, k: Real) -> FixedVector {
        self.scale(k)
    }
}

impl Mul<FixedVector> for Real {
    type Output = FixedVector;

    fn mul(self, v: FixedVector) -> FixedVector {
        v.scale(self)
    }
}

impl fmt::Display for FixedVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(FixedVector::empty().len(), 0);
        assert!(FixedVector::empty().is_empty());

        let z = FixedVector::zeros(3);
        assert_eq!(z.as_slice(), &[0.0, 0.0, 0.0]);

        let v = FixedVector::from([1.0, 2.0]);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 2.0);

        let w = FixedVector::from(vec![4.0, 5.0, 6.0]);
        assert_eq!(w.as_slice(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn add_is_elementwise() {
        let a = FixedVector::from([1.0, -2.0]);
        let b = FixedVector::from([0.5, 4.0]);
        let c = a.add(&b).unwrap();
        assert_eq!(c.as_slice(), &[1.5, 2.0]);
        // operands untouched
        assert_eq!(a.as_slice(), &[1.0, -2.0]);
        assert_eq!(b.as_slice(), &[0.5, 4.0]);
    }

    #[test]
    fn add_rejects_length_mismatch() {
        let a = FixedVector::zeros(2);
        let b = FixedVector::zeros(3);
        let err = a.add(&b).unwrap_err();
        assert_eq!(err, CoreError::LengthMismatch { left: 2, right: 3 });
        assert!(FixedVector::empty().add(&a).is_err());
    }

    #[test]
    fn add_of_empty_vectors_is_empty() {
        let c = FixedVector::empty().add(&FixedVector::empty()).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn scale_works_from_both_sides() {
        let v = FixedVector::from([1.0, 2.0, 3.0]);
        let left = 2.0 * &v;
        let right = &v * 2.0;
        assert_eq!(left, right);
        assert_eq!(left.as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!(v.scale(0.0).len(), 3);
    }

    #[test]
    fn clone_is_independent() {
        let original = FixedVector::from([1.0, 2.0]);
        let mut copy = original.clone();
        copy[0] = 10.0;
        copy.set(1, 20.0).unwrap();
        assert_eq!(original.as_slice(), &[1.0, 2.0]);
        assert_eq!(copy.as_slice(), &[10.0, 20.0]);
    }

    #[test]
    fn take_empties_source() {
        let mut src = FixedVector::from([3.0, 4.0]);
        let dst = src.take();
        assert!(src.is_empty());
        assert_eq!(dst.as_slice(), &[3.0, 4.0]);
        // source is still usable
        assert_eq!(src.add(&FixedVector::empty()).unwrap().len(), 0);
    }

    #[test]
    fn checked_access_reports_out_of_range() {
        let mut v = FixedVector::zeros(2);
        assert_eq!(v.get(1).unwrap(), 0.0);
        assert_eq!(
            v.get(2).unwrap_err(),
            CoreError::IndexOob {
                what: "vector element",
                index: 2,
                len: 2
            }
        );
        assert!(v.set(5, 1.0).is_err());
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let v = FixedVector::zeros(2);
        let _ = v[2];
    }

    #[test]
    fn display_lists_elements() {
        let v = FixedVector::from([0.5, -1.0]);
        assert_eq!(v.to_string(), "[0.5, -1]");
        assert_eq!(FixedVector::empty().to_string(), "[]");
    }
}
