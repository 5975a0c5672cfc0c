#[cfg(test)]
pub(crate) mod buf_run;

use crate::{machine::SortingMachine, orderer::Orderer};

/// A run is a sequence of items in ascending order.
pub trait Run<T> {
    /// peeks at the next value in the sequence.
    fn peek(&self) -> Option<&T>;

    /// fetches the next item from the run.
    /// If the method returns None, we have reached the end.
    fn next(&mut self) -> Option<T>;

    /// returns the number of items left in the run
    fn remaining_items(&self) -> usize;
}

/// A machine in extraction mode hands out its entries in order.
/// In insertion mode it is not sorted yet and reports itself as exhausted.
impl<T, O> Run<T> for SortingMachine<T, O>
where
    O: Orderer<T>,
{
    fn peek(&self) -> Option<&T> {
        self.peek_first().ok()
    }

    fn next(&mut self) -> Option<T> {
        self.remove_first().ok()
    }

    fn remaining_items(&self) -> usize {
        if self.is_in_insertion_mode() {
            0
        } else {
            self.size()
        }
    }
}
