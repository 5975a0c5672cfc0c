use std::{cmp::Ordering, marker::PhantomData};

use log::trace;

use crate::{
    heap::{heapify, sift_down},
    orderer::Orderer,
    run::Run,
};

/// orders runs by their current head, exhausted runs last.
struct HeadOrderer<'a, T, O> {
    orderer: &'a O,
    phantom: PhantomData<fn(&T)>,
}

impl<'a, T, O> HeadOrderer<'a, T, O> {
    fn new(orderer: &'a O) -> Self {
        Self {
            orderer,
            phantom: PhantomData,
        }
    }
}

impl<T, R, O> Orderer<R> for HeadOrderer<'_, T, O>
where
    R: Run<T>,
    O: Orderer<T>,
{
    fn compare(&self, left: &R, right: &R) -> Ordering {
        match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => self.orderer.compare(l, r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Merges several runs into one ascending sequence.
///
/// invariants:
/// the runs form a heap ordered by their heads
/// and none of them is exhausted.
pub struct MergedRuns<T, R, O> {
    runs: Vec<R>,
    orderer: O,
    phantom: PhantomData<T>,
}

impl<T, R, O> MergedRuns<T, R, O>
where
    R: Run<T>,
    O: Orderer<T>,
{
    /// Constructs a merger over the given runs
    /// and a provided ordering instruction.
    pub fn new(mut runs: Vec<R>, orderer: O) -> Self {
        runs.retain(|r| r.peek().is_some());
        trace!("merging {} runs", runs.len());
        heapify(&mut runs, &HeadOrderer::<T, O>::new(&orderer));
        Self {
            runs,
            orderer,
            phantom: PhantomData,
        }
    }

    /// returns the remaining items of all merged runs.
    pub fn remaining_items(&self) -> usize {
        self.runs.iter().map(|r| r.remaining_items()).sum()
    }

    /// advances the internal state
    /// Once this method returns None, it will never yield any elements again.
    pub fn next(&mut self) -> Option<T> {
        let head = self.runs.first_mut()?;
        let value = head.next()?;
        if head.peek().is_none() {
            self.runs.swap_remove(0);
        }
        sift_down(&mut self.runs, 0, &HeadOrderer::<T, O>::new(&self.orderer));
        Some(value)
    }
}

impl<T, R, O> Iterator for MergedRuns<T, R, O>
where
    R: Run<T>,
    O: Orderer<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining_items();
        (remaining, Some(remaining))
    }
}
impl<T, R, O> ExactSizeIterator for MergedRuns<T, R, O>
where
    R: Run<T>,
    O: Orderer<T>,
{
    fn len(&self) -> usize {
        self.remaining_items()
    }
}
