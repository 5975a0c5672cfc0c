use std::num::NonZeroUsize;

#[cfg(feature = "parallel_sort")]
use std::sync::Arc;

use crate::{
    machine::{IntoSorted, SortingMachine},
    orderer::Orderer,
};

#[cfg(feature = "parallel_sort")]
use crate::merge::MergedRuns;

/// The configuration for sorting whole iterators.
#[derive(Clone, Debug)]
pub struct SortConfig {
    /// the number of entries to reserve room for before inserting
    pub(crate) initial_capacity: usize,
    /// the number of machines the parallel sort splits its input into
    pub(crate) parallel_runs: NonZeroUsize,
}

impl Default for SortConfig {
    /// no preallocation, one parallel run per available core.
    fn default() -> Self {
        let parallel_runs = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self {
            initial_capacity: 0,
            parallel_runs,
        }
    }
}

impl SortConfig {
    /// Creates a configuration that preallocates roughly `buffer_bytes`
    /// worth of entries of type `T`.
    pub fn create_with_buffer_size_for<T>(buffer_bytes: usize) -> Self {
        let t_size = std::mem::size_of::<T>();
        let initial_capacity = if t_size == 0 {
            0
        } else {
            buffer_bytes / t_size
        };
        Self {
            initial_capacity,
            ..Self::default()
        }
    }
    /// Updates the initial_capacity attribute.
    /// Useful for fluent-style api usage.
    pub fn initial_capacity(self, initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..self
        }
    }
    /// Updates the parallel_runs attribute.
    pub fn parallel_runs(self, parallel_runs: NonZeroUsize) -> Self {
        Self {
            parallel_runs,
            ..self
        }
    }
}

/// Sorts whole iterators by pushing them through sorting machines.
pub struct HeapSorter {
    config: SortConfig,
}

impl HeapSorter {
    pub fn new(options: SortConfig) -> Self {
        Self { config: options }
    }

    /// collects the source into a single machine and drains it in order.
    pub fn run<S, T, O>(&self, source: S, orderer: O) -> IntoSorted<T, O>
    where
        S: Iterator<Item = T>,
        O: Orderer<T>,
    {
        let capacity = source.size_hint().0.max(self.config.initial_capacity);
        let mut buffer = Vec::with_capacity(capacity);
        buffer.extend(source);
        SortingMachine::from_vec(orderer, buffer).into_sorted()
    }

    /// splits the source into up to `parallel_runs` chunks, builds one heap per
    /// chunk on the rayon pool and merges the resulting machines.
    #[cfg(feature = "parallel_sort")]
    pub fn run_parallel<S, T, O>(
        &self,
        source: S,
        orderer: O,
    ) -> MergedRuns<T, SortingMachine<T, Arc<O>>, Arc<O>>
    where
        S: Iterator<Item = T>,
        T: Send,
        O: Orderer<T> + Send + Sync,
    {
        use log::debug;
        use rayon::iter::{IntoParallelIterator, ParallelIterator};

        let mut entries: Vec<T> = source.collect();
        let total = entries.len();
        let num_runs = self.config.parallel_runs.get().min(total.max(1));
        let chunk_len = total.div_ceil(num_runs).max(1);

        let mut chunks = Vec::with_capacity(num_runs);
        while entries.len() > chunk_len {
            let tail = entries.split_off(entries.len() - chunk_len);
            chunks.push(tail);
        }
        chunks.push(entries);
        debug!("sorting {} entries in {} parallel runs", total, chunks.len());

        let orderer = Arc::new(orderer);
        let machines: Vec<_> = chunks
            .into_par_iter()
            .map(|chunk| {
                SortingMachine::from_vec(Arc::clone(&orderer), chunk)
                    .into_sorted()
                    .into_machine()
            })
            .collect();

        MergedRuns::new(machines, orderer)
    }
}
