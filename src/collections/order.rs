//! Fallible ordering predicates for heaps.
//!
//! A heap is parameterised by an ordering `C: HeapOrder<T>`. The predicate
//! answers "is `a` strictly before `b`" and is the only operation in the heap
//! that is allowed to fail. Every structural edit is infallible, which is what
//! lets a failed comparison be undone.
//!
//! Three kinds of ordering are provided:
//! - [`Natural`]: the element's own `Ord` less-than. The default.
//! - [`LessThan`]: wraps an infallible `Fn(&T, &T) -> bool`.
//! - Any closure `Fn(&T, &T) -> Result<bool, ComparisonFailed>`.

use core::fmt;

/// The ordering predicate could not compare two elements.
///
/// Carries no heap state: by the time a caller sees it, the heap has already
/// been restored to its state before the failed call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComparisonFailed;

impl fmt::Display for ComparisonFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ordering predicate failed to compare two elements")
    }
}

impl std::error::Error for ComparisonFailed {}

/// A strict weak ordering over `T` that may fail.
pub trait HeapOrder<T: ?Sized> {
    /// Returns `Ok(true)` if `a` is strictly ordered before `b`.
    ///
    /// # Errors
    /// Returns [`ComparisonFailed`] if the two elements cannot be compared.
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, ComparisonFailed>;
}

/// The natural `<` of an `Ord` element type. Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> HeapOrder<T> for Natural {
    #[inline]
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, ComparisonFailed> {
        Ok(a < b)
    }
}

/// Adapts an infallible `less-than` function into a [`HeapOrder`].
///
/// ```rust
/// use tripod_heap::{BrandedTreeHeap, GhostToken, LessThan};
///
/// GhostToken::new(|mut token| {
///     // Max-heap by flipping the predicate.
///     let mut heap = BrandedTreeHeap::with_order(LessThan(|a: &i32, b: &i32| a > b));
///     for x in [3, 9, 1] {
///         heap.push(&mut token, x).unwrap();
///     }
///     assert_eq!(heap.pop(&mut token), Ok(Some(9)));
/// });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LessThan<F>(pub F);

impl<T: ?Sized, F> HeapOrder<T> for LessThan<F>
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, ComparisonFailed> {
        Ok((self.0)(a, b))
    }
}

impl<T: ?Sized, F> HeapOrder<T> for F
where
    F: Fn(&T, &T) -> Result<bool, ComparisonFailed>,
{
    #[inline]
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, ComparisonFailed> {
        self(a, b)
    }
}
