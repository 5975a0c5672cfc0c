//! A sorting machine: a collection that is filled in any order and then
//! drained smallest first, according to an order chosen by the caller.
//!
//! ```
//! use heapsort_machine::{orderer::OrdOrderer, SortingMachine};
//!
//! let mut machine = SortingMachine::new(OrdOrderer::new());
//! machine.add("banana").unwrap();
//! machine.add("apple").unwrap();
//! machine.add("cherry").unwrap();
//! machine.change_to_extraction_mode().unwrap();
//! assert_eq!(Ok("apple"), machine.remove_first());
//! assert_eq!(Ok("banana"), machine.remove_first());
//! assert_eq!(Ok("cherry"), machine.remove_first());
//! ```
//!
//! Whole iterators can be sorted through the extension traits:
//!
//! ```
//! use heapsort_machine::{HeapSortOrdExtension, SortConfig};
//!
//! let sorted: Vec<_> = [3, 1, 2].into_iter().heap_sort(SortConfig::default()).collect();
//! assert_eq!(vec![1, 2, 3], sorted);
//! ```

mod error;
mod extension_trait;
pub mod heap;
mod machine;
mod merge;
pub mod orderer;
mod run;
mod sorter;

pub use error::{MachineError, Mode, Result};
pub use extension_trait::*;
pub use machine::{DrainSorted, IntoSorted, Iter, SortingMachine};
pub use merge::MergedRuns;
pub use run::Run;
pub use sorter::{HeapSorter, SortConfig};
