//! Overflow-checked folds over iterators of integers.
//!
//! Sums use [`checked_sum::CheckedSum`]; this module covers products and least common multiples,
//! which that crate doesn't.

use num_integer::Integer;
use num_traits::{CheckedMul, One};

/// Iterator extension for multiplying numbers while checking for overflow.
pub trait CheckedProduct<T> {
    /// Multiply all numbers of the iterator, returning `None` on overflow.
    ///
    /// An empty iterator has a product of one.
    fn checked_product(self) -> Option<T>;
}

impl<T, I> CheckedProduct<T> for I
where
    T: CheckedMul + One,
    I: Iterator<Item = T>,
{
    fn checked_product(mut self) -> Option<T> {
        self.try_fold(T::one(), |acc, value| acc.checked_mul(&value))
    }
}

/// Find the least common multiple of all numbers of an iterator.
///
/// # Returns
///
/// `None` if the iterator is empty or the multiple overflows `T`.
pub fn checked_lcm<T, I>(values: I) -> Option<T>
where
    T: Integer + CheckedMul + Copy,
    I: IntoIterator<Item = T>,
{
    let mut values = values.into_iter();
    let first = values.next()?;
    values.try_fold(first, |acc, value| {
        if acc.is_zero() || value.is_zero() {
            return Some(T::zero());
        }
        (acc / acc.gcd(&value)).checked_mul(&value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_product_multiplies() {
        assert_eq!([2u8, 3, 4].into_iter().checked_product(), Some(24));
        assert_eq!(std::iter::empty::<u64>().checked_product(), Some(1));
    }

    #[test]
    fn checked_product_detects_overflow() {
        assert_eq!([200u8, 2].into_iter().checked_product(), None);
        assert_eq!([i32::MAX, -2].into_iter().checked_product(), None);
    }

    #[test]
    fn checked_lcm_of_cycles() {
        assert_eq!(checked_lcm([4u64, 6, 10]), Some(60));
        assert_eq!(checked_lcm([7u64]), Some(7));
        assert_eq!(checked_lcm(Vec::<u64>::new()), None);
    }

    #[test]
    fn checked_lcm_detects_overflow() {
        assert_eq!(checked_lcm([251u8, 241]), None);
        assert_eq!(checked_lcm([u64::MAX, u64::MAX]), Some(u64::MAX));
    }
}
