use std::{iter::FusedIterator, slice};

use crate::orderer::Orderer;

use super::SortingMachine;

/// A read-only view of the entries of a sorting machine.
/// Created by [`SortingMachine::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    inner: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(entries: &'a [T]) -> Self {
        Self {
            inner: entries.iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Removes the entries of a machine in extraction mode, smallest first.
/// Entries not consumed before the drain is dropped stay in the machine.
/// Created by [`SortingMachine::drain_sorted`].
pub struct DrainSorted<'a, T, O> {
    machine: &'a mut SortingMachine<T, O>,
}

impl<'a, T, O> DrainSorted<'a, T, O> {
    pub(super) fn new(machine: &'a mut SortingMachine<T, O>) -> Self {
        Self { machine }
    }
}

impl<T, O> Iterator for DrainSorted<'_, T, O>
where
    O: Orderer<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.machine.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.machine.size();
        (size, Some(size))
    }
}

impl<T, O> ExactSizeIterator for DrainSorted<'_, T, O> where O: Orderer<T> {}
impl<T, O> FusedIterator for DrainSorted<'_, T, O> where O: Orderer<T> {}

/// The owning counterpart of [`DrainSorted`].
/// Created by [`SortingMachine::into_sorted`].
pub struct IntoSorted<T, O> {
    machine: SortingMachine<T, O>,
}

impl<T, O> IntoSorted<T, O> {
    pub(super) fn new(machine: SortingMachine<T, O>) -> Self {
        Self { machine }
    }

    /// gives back the machine, in extraction mode, holding the entries not yet yielded.
    pub fn into_machine(self) -> SortingMachine<T, O> {
        self.machine
    }
}

impl<T, O> Iterator for IntoSorted<T, O>
where
    O: Orderer<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.machine.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.machine.size();
        (size, Some(size))
    }
}

impl<T, O> ExactSizeIterator for IntoSorted<T, O> where O: Orderer<T> {}
impl<T, O> FusedIterator for IntoSorted<T, O> where O: Orderer<T> {}
