use std::{cmp::Ordering, sync::Arc};

use crate::{
    machine::SortingMachine,
    merge::MergedRuns,
    orderer::{FuncOrderer, KeyOrderer, OrdOrderer, Orderer},
    sorter::{HeapSorter, SortConfig},
};

/// The specific iterator type returned by
/// the parallel sorting implementations.
pub struct ParallelResultIterator<T, O> {
    inner: MergedRuns<T, SortingMachine<T, Arc<O>>, Arc<O>>,
}

impl<T, O> Iterator for ParallelResultIterator<T, O>
where
    O: Orderer<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl<T, O> ExactSizeIterator for ParallelResultIterator<T, O> where O: Orderer<T> {}

pub trait ParallelHeapSortOrdExtension: Iterator
where
    Self::Item: Send,
{
    /// Sorts the provided Iterator according to the provided config
    /// the native ordering specified on the iterated type.
    /// The heaps for the individual runs are built on the rayon thread pool.
    fn par_heap_sort(self, options: SortConfig) -> ParallelResultIterator<Self::Item, OrdOrderer>;
}

pub trait ParallelHeapSortExtension: Iterator
where
    Self::Item: Send,
{
    /// Sorts the provided Iterator according to the provided config
    /// using a custom comparison function.
    fn par_heap_sort_by<F>(
        self,
        options: SortConfig,
        comparator: F,
    ) -> ParallelResultIterator<Self::Item, FuncOrderer<F>>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering + Send + Sync;

    /// Sorts the provided Iterator according to the provided config
    /// using a key extraction function.
    fn par_heap_sort_by_key<F, K>(
        self,
        options: SortConfig,
        key_extractor: F,
    ) -> ParallelResultIterator<Self::Item, KeyOrderer<F>>
    where
        F: Fn(&Self::Item) -> K + Send + Sync,
        K: Ord;
}

impl<I, T> ParallelHeapSortOrdExtension for I
where
    I: Iterator<Item = T>,
    T: Send + Ord,
{
    fn par_heap_sort(self, options: SortConfig) -> ParallelResultIterator<Self::Item, OrdOrderer> {
        let inner = HeapSorter::new(options).run_parallel(self, OrdOrderer::new());
        ParallelResultIterator { inner }
    }
}

impl<I, T> ParallelHeapSortExtension for I
where
    I: Iterator<Item = T>,
    T: Send,
{
    fn par_heap_sort_by<F>(
        self,
        options: SortConfig,
        comparator: F,
    ) -> ParallelResultIterator<Self::Item, FuncOrderer<F>>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering + Send + Sync,
    {
        let inner = HeapSorter::new(options).run_parallel(self, FuncOrderer::new(comparator));
        ParallelResultIterator { inner }
    }

    fn par_heap_sort_by_key<F, K>(
        self,
        options: SortConfig,
        key_extractor: F,
    ) -> ParallelResultIterator<Self::Item, KeyOrderer<F>>
    where
        F: Fn(&Self::Item) -> K + Send + Sync,
        K: Ord,
    {
        let inner = HeapSorter::new(options).run_parallel(self, KeyOrderer::new(key_extractor));
        ParallelResultIterator { inner }
    }
}
