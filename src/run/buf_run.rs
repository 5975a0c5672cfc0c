use std::vec::IntoIter;

use super::Run;

/// Serves a vec the caller has already sorted, one entry at a time.
/// Used as a fixture for the merge tests, where machines would hide merge bugs behind heap bugs.
pub(crate) struct BufRun<T> {
    source: IntoIter<T>,
}

impl<T> BufRun<T> {
    pub fn new(source: Vec<T>) -> Self {
        Self {
            source: source.into_iter(),
        }
    }
}

impl<T> Run<T> for BufRun<T> {
    fn peek(&self) -> Option<&T> {
        self.source.as_slice().first()
    }

    fn next(&mut self) -> Option<T> {
        self.source.next()
    }

    fn remaining_items(&self) -> usize {
        self.source.len()
    }
}
