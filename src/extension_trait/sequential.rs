use std::cmp::Ordering;

use crate::{
    machine::IntoSorted,
    orderer::{FuncOrderer, KeyOrderer, OrdOrderer},
    sorter::{HeapSorter, SortConfig},
};

pub trait HeapSortOrdExtension: Iterator {
    /// Sorts the provided Iterator according to the provided config
    /// using the native ordering on the type to sort
    fn heap_sort(self, options: SortConfig) -> IntoSorted<Self::Item, OrdOrderer>;
}

impl<I, T> HeapSortOrdExtension for I
where
    I: Iterator<Item = T>,
    T: Ord,
{
    fn heap_sort(self, options: SortConfig) -> IntoSorted<Self::Item, OrdOrderer> {
        HeapSorter::new(options).run(self, OrdOrderer::new())
    }
}

pub trait HeapSortByExtension: Iterator {
    /// Sorts the provided Iterator according to the provided config
    /// using a custom comparator function.
    /// The comparator must be a total preorder; entries comparing equal
    /// come out in no particular order.
    fn heap_sort_by<F>(
        self,
        options: SortConfig,
        comparator: F,
    ) -> IntoSorted<Self::Item, FuncOrderer<F>>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering;

    /// Sorts the provided Iterator according to the provided config
    /// using a key extraction function.
    fn heap_sort_by_key<F, K>(
        self,
        options: SortConfig,
        key_extractor: F,
    ) -> IntoSorted<Self::Item, KeyOrderer<F>>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord;
}

impl<I, T> HeapSortByExtension for I
where
    I: Iterator<Item = T>,
{
    fn heap_sort_by<F>(
        self,
        options: SortConfig,
        comparator: F,
    ) -> IntoSorted<Self::Item, FuncOrderer<F>>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        HeapSorter::new(options).run(self, FuncOrderer::new(comparator))
    }

    fn heap_sort_by_key<F, K>(
        self,
        options: SortConfig,
        key_extractor: F,
    ) -> IntoSorted<Self::Item, KeyOrderer<F>>
    where
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        HeapSorter::new(options).run(self, KeyOrderer::new(key_extractor))
    }
}
