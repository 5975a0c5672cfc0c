//! The two-mode sorting machine.
//!
//! Entries are collected unordered while the machine is in insertion mode.
//! Switching to extraction mode moves them into an array-embedded binary heap
//! in one linear-time pass, after which they are removed smallest first.

use std::{fmt, mem};

use log::{debug, trace};

use crate::{
    error::{MachineError, Mode, Result},
    heap::{heapify, is_heap, sift_down},
    orderer::Orderer,
    sorter::SortConfig,
};

pub use self::iter::{DrainSorted, IntoSorted, Iter};

mod iter;

/// The physical representation of the machine's multiset.
/// Which variant is active is the machine's mode.
#[derive(Clone)]
enum Representation<T> {
    /// the entries in the order they were added.
    Inserting { buffer: Vec<T> },
    /// a binary min-heap under the machine's order.
    /// The heap size is the length of the vec; every removal shrinks it by one.
    Extracting { heap: Vec<T> },
}

impl<T> Representation<T> {
    fn empty() -> Self {
        Representation::Inserting { buffer: Vec::new() }
    }

    fn mode(&self) -> Mode {
        match self {
            Representation::Inserting { .. } => Mode::Inserting,
            Representation::Extracting { .. } => Mode::Extracting,
        }
    }

    fn as_slice(&self) -> &[T] {
        match self {
            Representation::Inserting { buffer } => buffer,
            Representation::Extracting { heap } => heap,
        }
    }
}

/// A collection that accepts entries under a caller supplied total preorder
/// and hands them back in non-decreasing order.
///
/// A machine starts in insertion mode, where [`add`](Self::add) is allowed.
/// [`change_to_extraction_mode`](Self::change_to_extraction_mode) turns the
/// collected entries into a heap, after which [`remove_first`](Self::remove_first)
/// drains them. [`clear`](Self::clear) starts over in insertion mode.
///
/// A machine is not synchronized. Sharing one between threads requires external locking.
#[derive(Clone)]
pub struct SortingMachine<T, O> {
    order: O,
    repr: Representation<T>,
}

impl<T, O> SortingMachine<T, O>
where
    O: Orderer<T>,
{
    /// Creates an empty machine in insertion mode.
    pub fn new(order: O) -> Self {
        Self {
            order,
            repr: Representation::empty(),
        }
    }

    /// Creates an empty machine whose insertion buffer can hold
    /// `capacity` entries without reallocating.
    pub fn with_capacity(order: O, capacity: usize) -> Self {
        Self {
            order,
            repr: Representation::Inserting {
                buffer: Vec::with_capacity(capacity),
            },
        }
    }

    /// Creates a machine in insertion mode already holding `entries`.
    pub fn from_vec(order: O, entries: Vec<T>) -> Self {
        Self {
            order,
            repr: Representation::Inserting { buffer: entries },
        }
    }

    /// Creates an empty machine sized according to the provided config.
    pub fn with_config(order: O, config: &SortConfig) -> Self {
        Self::with_capacity(order, config.initial_capacity)
    }

    /// Creates an empty machine in insertion mode that shares this machine's order.
    pub fn new_instance(&self) -> Self
    where
        O: Clone,
    {
        Self::new(self.order.clone())
    }

    /// Moves the whole content, mode included, out of this machine.
    /// Afterwards `self` is empty and in insertion mode, with the same order.
    pub fn take(&mut self) -> Self
    where
        O: Clone,
    {
        let empty = self.new_instance();
        mem::replace(self, empty)
    }

    /// Adds an entry to the machine.
    ///
    /// # Errors
    /// Fails with [`MachineError::InvalidState`] if the machine is in extraction mode.
    pub fn add(&mut self, entry: T) -> Result<()> {
        match &mut self.repr {
            Representation::Inserting { buffer } => buffer.push(entry),
            Representation::Extracting { .. } => return Err(Self::wrong_mode(Mode::Inserting)),
        }
        debug_assert!(self.convention_holds());
        Ok(())
    }

    /// Adds all entries produced by `entries`.
    ///
    /// # Errors
    /// Fails with [`MachineError::InvalidState`] if the machine is in extraction mode.
    /// In that case the source is not consumed.
    pub fn try_extend<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        match &mut self.repr {
            Representation::Inserting { buffer } => buffer.extend(entries),
            Representation::Extracting { .. } => return Err(Self::wrong_mode(Mode::Inserting)),
        }
        debug_assert!(self.convention_holds());
        Ok(())
    }

    /// Switches to extraction mode, heap-ordering all entries in linear time.
    ///
    /// # Errors
    /// Fails with [`MachineError::InvalidState`] if the machine already is in extraction mode.
    pub fn change_to_extraction_mode(&mut self) -> Result<()> {
        self.expect_mode(Mode::Inserting)?;
        self.build_heap();
        Ok(())
    }

    /// Removes and returns an entry that is minimal under the machine's order.
    /// When several entries compare equal to the minimum, any one of them may be returned.
    ///
    /// # Errors
    /// Fails with [`MachineError::InvalidState`] in insertion mode
    /// and with [`MachineError::EmptyCollection`] if there is nothing left to remove.
    pub fn remove_first(&mut self) -> Result<T> {
        let first = match &mut self.repr {
            Representation::Inserting { .. } => return Err(Self::wrong_mode(Mode::Extracting)),
            Representation::Extracting { heap } => {
                if heap.is_empty() {
                    return Err(MachineError::EmptyCollection);
                }
                // the last entry takes the root's place and is sifted back down
                let first = heap.swap_remove(0);
                sift_down(heap, 0, &self.order);
                first
            }
        };
        debug_assert!(self.convention_holds());
        Ok(first)
    }

    /// Returns the entry the next [`remove_first`](Self::remove_first) call would return.
    ///
    /// # Errors
    /// The same as for [`remove_first`](Self::remove_first).
    pub fn peek_first(&self) -> Result<&T> {
        match &self.repr {
            Representation::Inserting { .. } => Err(Self::wrong_mode(Mode::Extracting)),
            Representation::Extracting { heap } => {
                heap.first().ok_or(MachineError::EmptyCollection)
            }
        }
    }

    /// Returns an iterator removing the entries in order.
    ///
    /// # Errors
    /// Fails with [`MachineError::InvalidState`] in insertion mode.
    pub fn drain_sorted(&mut self) -> Result<DrainSorted<'_, T, O>> {
        self.expect_mode(Mode::Extracting)?;
        Ok(DrainSorted::new(self))
    }

    /// Converts the machine into an iterator yielding all entries in order.
    /// A machine still in insertion mode is switched to extraction mode first.
    pub fn into_sorted(mut self) -> IntoSorted<T, O> {
        self.build_heap();
        IntoSorted::new(self)
    }

    /// Resets the machine to the empty insertion mode, keeping its order.
    /// The storage allocated so far is retained for reuse.
    pub fn clear(&mut self) {
        let mut storage = match mem::replace(&mut self.repr, Representation::empty()) {
            Representation::Inserting { buffer } => buffer,
            Representation::Extracting { heap } => heap,
        };
        trace!("clearing sorting machine with {} entries", storage.len());
        storage.clear();
        self.repr = Representation::Inserting { buffer: storage };
        debug_assert!(self.convention_holds());
    }

    /// heap-orders the insertion buffer. Does nothing in extraction mode.
    fn build_heap(&mut self) {
        if let Representation::Inserting { buffer } = &mut self.repr {
            let mut heap = mem::take(buffer);
            debug!("building heap over {} entries", heap.len());
            heapify(&mut heap, &self.order);
            self.repr = Representation::Extracting { heap };
        }
        debug_assert!(self.convention_holds());
    }

    /// checks the representation invariant: in extraction mode the entries form a heap.
    fn convention_holds(&self) -> bool {
        match &self.repr {
            Representation::Inserting { .. } => true,
            Representation::Extracting { heap } => is_heap(heap, 0, &self.order),
        }
    }
}

impl<T, O> SortingMachine<T, O> {
    /// true while entries may be added.
    pub fn is_in_insertion_mode(&self) -> bool {
        self.mode() == Mode::Inserting
    }

    pub fn mode(&self) -> Mode {
        self.repr.mode()
    }

    /// the order this machine sorts by.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// the number of entries currently held, in either mode.
    pub fn size(&self) -> usize {
        self.repr.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Iterates over the current entries without removing them.
    ///
    /// In insertion mode the entries come in the order they were added, in
    /// extraction mode in heap layout order. Neither carries a sorting guarantee.
    /// The machine cannot be modified while the iterator is alive.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.repr.as_slice())
    }

    fn expect_mode(&self, expected: Mode) -> Result<()> {
        if self.mode() == expected {
            Ok(())
        } else {
            Err(MachineError::InvalidState(expected, self.mode()))
        }
    }

    /// the error for an operation needing `expected` while in the other mode
    fn wrong_mode(expected: Mode) -> MachineError {
        let actual = match expected {
            Mode::Inserting => Mode::Extracting,
            Mode::Extracting => Mode::Inserting,
        };
        MachineError::InvalidState(expected, actual)
    }
}

impl<'a, T, O> IntoIterator for &'a SortingMachine<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// returns true if both slices hold the same entries with the same multiplicities,
/// in any arrangement.
fn same_multiset<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut matched = vec![false; right.len()];
    for entry in left {
        let partner = right
            .iter()
            .enumerate()
            .position(|(idx, candidate)| !matched[idx] && candidate == entry);
        match partner {
            Some(idx) => matched[idx] = true,
            None => return false,
        }
    }
    true
}

/// Two machines are equal when they are in the same mode and hold the same multiset.
/// The physical heap layout does not matter. Orders are only compared by type.
impl<T, O> PartialEq for SortingMachine<T, O>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.mode() == other.mode() && same_multiset(self.repr.as_slice(), other.repr.as_slice())
    }
}

impl<T: Eq, O> Eq for SortingMachine<T, O> {}

impl<T, O> fmt::Display for SortingMachine<T, O>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {{", self.mode())?;
        for (idx, entry) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        f.write_str("})")
    }
}

impl<T, O> fmt::Debug for SortingMachine<T, O>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SortingMachine")
            .field("mode", &self.mode())
            .field("entries", &self.repr.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod test;
