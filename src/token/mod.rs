//! GhostToken: the capability that gates access to branded heaps.
//!
//! Every `BrandedTreeHeap<'brand, ..>` is tied to exactly one token scope. Reading
//! the minimum needs `&GhostToken<'brand>`; inserting or extracting needs
//! `&mut GhostToken<'brand>`. The token is zero-sized, so the gate costs nothing
//! at runtime.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is **not** `Copy`/`Clone`. Only one `&mut` borrow of it can
//! be live, so only one mutating heap operation per brand can be in flight.

/// Invariant lifetime definitions for branding.
pub mod invariant;

pub use invariant::InvariantLifetime;

/// A zero-sized token that controls access to branded heaps.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a new token and runs `f` with it.
    ///
    /// The closure is generic over the brand, so a heap created inside it can
    /// never escape to, or be mixed with, another scope.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tripod_heap::{BrandedTreeHeap, GhostToken};
    ///
    /// let min = GhostToken::new(|mut token| {
    ///     let mut heap = BrandedTreeHeap::new();
    ///     heap.push(&mut token, 7).unwrap();
    ///     heap.push(&mut token, 3).unwrap();
    ///     heap.peek(&token).copied()
    /// });
    /// assert_eq!(min, Some(3));
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::new()))
    }

    /// Opens a nested branded scope.
    ///
    /// Equivalent to [`GhostToken::new`]; heaps created inside the nested scope
    /// are isolated from the ones owned by `self`.
    #[inline(always)]
    pub fn with_scoped<F, R>(&self, f: F) -> R
    where
        F: for<'sub> FnOnce(GhostToken<'sub>) -> R,
    {
        Self::new(f)
    }
}

// `GhostToken<'brand>` holds no data. Sharing `&GhostToken` only grants reads.
unsafe impl<'brand> Sync for GhostToken<'brand> {}
