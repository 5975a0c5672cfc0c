use std::{cmp::Ordering, sync::Arc};

/// A total preorder over values of type `T`.
///
/// Unlike `Ord`, an orderer is a value of its own, so it can carry state
/// and two distinct elements may compare as `Equal` without being the same.
/// Implementations must be total and transitive; this is assumed, never checked.
pub trait Orderer<T> {
    /// compares two values under this preorder
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// An orderer that just delegates to the Ord implementation on the type itself
#[derive(Default, Clone, Copy, Debug)]
pub struct OrdOrderer {}
impl OrdOrderer {
    pub fn new() -> Self {
        Self {}
    }
}

impl<T: Ord> Orderer<T> for OrdOrderer {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// an orderer that compares values based on a key extracted from them.
#[derive(Clone, Copy)]
pub struct KeyOrderer<F> {
    key_extractor: F,
}
impl<F> KeyOrderer<F> {
    pub fn new<T, K>(key_extractor: F) -> Self
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        Self { key_extractor }
    }
}

impl<F, T, K> Orderer<T> for KeyOrderer<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        let left = (self.key_extractor)(left);
        let right = (self.key_extractor)(right);
        left.cmp(&right)
    }
}

/// an orderer that compares values by delegating to a comparison function
#[derive(Clone, Copy)]
pub struct FuncOrderer<F> {
    comparator: F,
}

impl<F> FuncOrderer<F> {
    pub fn new<T>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering,
    {
        Self { comparator }
    }
}

impl<F, T> Orderer<T> for FuncOrderer<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.comparator)(left, right)
    }
}

/// flips the direction of another orderer.
/// A sorting machine over a reversed orderer drains its largest entries first.
#[derive(Default, Clone, Copy, Debug)]
pub struct ReverseOrderer<O> {
    inner: O,
}

impl<O> ReverseOrderer<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O, T> Orderer<T> for ReverseOrderer<O>
where
    O: Orderer<T>,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.inner.compare(left, right).reverse()
    }
}

impl<O, T> Orderer<T> for &O
where
    O: Orderer<T> + ?Sized,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (**self).compare(left, right)
    }
}

// lets several machines share one (possibly stateful) orderer across threads.
impl<O, T> Orderer<T> for Arc<O>
where
    O: Orderer<T> + ?Sized,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (**self).compare(left, right)
    }
}
