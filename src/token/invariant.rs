use core::marker::PhantomData;

/// A marker type that is invariant in its lifetime parameter `'id`.
///
/// Heaps carry this marker so the compiler cannot shrink one brand into another,
/// which would let a heap be driven by a token from an unrelated scope.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvariantLifetime<'id>(PhantomData<fn(&'id ()) -> &'id ()>);

impl<'id> InvariantLifetime<'id> {
    /// Creates a new invariant lifetime marker.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
