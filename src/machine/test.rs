use std::{cell::Cell, cmp::Ordering, rc::Rc};

use crate::{
    error::{MachineError, Mode},
    heap::is_heap,
    orderer::{OrdOrderer, Orderer, ReverseOrderer},
    sorter::SortConfig,
};

use super::{Representation, SortingMachine};

/// compares strings in lexicographic order, ignoring case
#[derive(Clone, Copy, Default)]
struct StringLt;

impl Orderer<&str> for StringLt {
    fn compare(&self, left: &&str, right: &&str) -> Ordering {
        left.to_lowercase().cmp(&right.to_lowercase())
    }
}

fn create_from_args(
    insertion_mode: bool,
    args: &[&'static str],
) -> SortingMachine<&'static str, StringLt> {
    let mut machine = SortingMachine::new(StringLt);
    for arg in args {
        machine.add(*arg).unwrap();
    }
    if !insertion_mode {
        machine.change_to_extraction_mode().unwrap();
    }
    machine
}

fn heap_of<T, O>(machine: &SortingMachine<T, O>) -> &[T] {
    match &machine.repr {
        Representation::Extracting { heap } => heap,
        Representation::Inserting { .. } => panic!("machine is in insertion mode"),
    }
}

#[test]
fn test_constructor() {
    let machine = SortingMachine::<&str, _>::new(StringLt);
    assert!(machine.is_in_insertion_mode());
    assert_eq!(0, machine.size());
    assert!(machine.is_empty());
    assert_eq!(create_from_args(true, &[]), machine);
}

#[test]
fn test_add_empty() {
    let mut machine = create_from_args(true, &[]);
    machine.add("green").unwrap();
    assert_eq!(create_from_args(true, &["green"]), machine);
}

#[test]
fn test_add_non_empty() {
    let mut machine = create_from_args(true, &["one", "two", "three"]);
    machine.add("four").unwrap();
    assert_eq!(create_from_args(true, &["one", "two", "three", "four"]), machine);
    assert_eq!(4, machine.size());
}

#[test]
fn test_add_keeps_insertion_order() {
    let mut machine = create_from_args(true, &["one", "two"]);
    machine.add("three").unwrap();
    machine.add("four").unwrap();
    let entries: Vec<_> = machine.iter().copied().collect();
    assert_eq!(vec!["one", "two", "three", "four"], entries);
}

#[test]
fn test_add_duplicates() {
    let mut machine = create_from_args(true, &["red"]);
    machine.add("red").unwrap();
    machine.add("RED").unwrap();
    assert_eq!(3, machine.size());
    machine.change_to_extraction_mode().unwrap();
    let drained: Vec<_> = machine.drain_sorted().unwrap().collect();
    assert_eq!(3, drained.len());
    assert_eq!(2, drained.iter().filter(|s| **s == "red").count());
}

#[test]
fn test_change_to_extraction_mode() {
    let mut machine = create_from_args(true, &["one", "two", "three"]);
    machine.change_to_extraction_mode().unwrap();
    assert!(!machine.is_in_insertion_mode());
    assert_eq!(Mode::Extracting, machine.mode());
    assert_eq!(create_from_args(false, &["three", "one", "two"]), machine);
    assert!(is_heap(heap_of(&machine), 0, &StringLt));
}

#[test]
fn test_change_to_extraction_mode_empty() {
    let mut machine = create_from_args(true, &[]);
    machine.change_to_extraction_mode().unwrap();
    assert!(!machine.is_in_insertion_mode());
    assert_eq!(0, machine.size());
    assert_eq!(Err(MachineError::EmptyCollection), machine.remove_first());
    assert_eq!(Err(MachineError::EmptyCollection), machine.peek_first());
}

#[test]
fn test_remove_first() {
    let mut machine = create_from_args(false, &["one", "two", "three"]);
    assert_eq!(Ok("one"), machine.remove_first());
    assert_eq!(create_from_args(false, &["two", "three"]), machine);
    assert_eq!(2, machine.size());
}

#[test]
fn test_remove_first_until_empty() {
    let mut machine = create_from_args(false, &["banana", "apple", "cherry"]);
    assert_eq!(Ok(&"apple"), machine.peek_first());
    assert_eq!(Ok("apple"), machine.remove_first());
    assert_eq!(Ok("banana"), machine.remove_first());
    assert_eq!(Ok("cherry"), machine.remove_first());
    assert_eq!(0, machine.size());
    assert_eq!(Err(MachineError::EmptyCollection), machine.remove_first());
    assert_eq!(create_from_args(false, &[]), machine);
}

#[test]
fn test_remove_single_entry() {
    let mut machine = create_from_args(true, &["x"]);
    machine.change_to_extraction_mode().unwrap();
    assert_eq!(Ok("x"), machine.remove_first());
    assert_eq!(0, machine.size());
}

#[test]
fn test_remove_first_ignores_case() {
    let mut machine = create_from_args(false, &["b", "C", "a", "D"]);
    let drained: Vec<_> = machine.drain_sorted().unwrap().collect();
    assert_eq!(vec!["a", "b", "C", "D"], drained);
}

#[test]
fn test_remove_first_keeps_heap() {
    let mut machine = create_from_args(
        false,
        &["g", "c", "e", "a", "f", "b", "d", "h", "c", "a"],
    );
    while !machine.is_empty() {
        machine.remove_first().unwrap();
        assert!(is_heap(heap_of(&machine), 0, &StringLt));
        assert!(machine.convention_holds());
    }
    machine.clear();
    assert!(machine.convention_holds());
}

/// ascending until flipped, descending afterwards
#[derive(Clone, Default)]
struct FlippingOrderer {
    flipped: Rc<Cell<bool>>,
}

impl Orderer<u32> for FlippingOrderer {
    fn compare(&self, left: &u32, right: &u32) -> Ordering {
        if self.flipped.get() {
            right.cmp(left)
        } else {
            left.cmp(right)
        }
    }
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn test_remove_first_rejects_broken_heap() {
    let order = FlippingOrderer::default();
    let flipped = order.flipped.clone();
    let mut machine = SortingMachine::from_vec(order, (0..15).collect());
    machine.change_to_extraction_mode().unwrap();

    // a single sift cannot repair a heap built under the opposite order
    flipped.set(true);
    let _ = machine.remove_first();
}

#[test]
fn test_add_in_extraction_mode_fails() {
    let mut machine = create_from_args(false, &["one"]);
    let before = machine.clone();
    assert_eq!(
        Err(MachineError::InvalidState(Mode::Inserting, Mode::Extracting)),
        machine.add("two")
    );
    assert_eq!(
        Err(MachineError::InvalidState(Mode::Inserting, Mode::Extracting)),
        machine.try_extend(["two", "three"])
    );
    assert_eq!(before, machine);
}

#[test]
fn test_remove_in_insertion_mode_fails() {
    let mut machine = create_from_args(true, &["one"]);
    assert_eq!(
        Err(MachineError::InvalidState(Mode::Extracting, Mode::Inserting)),
        machine.remove_first()
    );
    assert_eq!(
        Err(MachineError::InvalidState(Mode::Extracting, Mode::Inserting)),
        machine.peek_first()
    );
    assert!(machine.drain_sorted().is_err());
    assert_eq!(create_from_args(true, &["one"]), machine);
}

#[test]
fn test_change_mode_twice_fails() {
    let mut machine = create_from_args(false, &["one", "two"]);
    assert_eq!(
        Err(MachineError::InvalidState(Mode::Inserting, Mode::Extracting)),
        machine.change_to_extraction_mode()
    );
    assert_eq!(create_from_args(false, &["one", "two"]), machine);
}

#[test]
fn test_is_in_insertion_mode() {
    assert!(create_from_args(true, &["one"]).is_in_insertion_mode());
    assert!(!create_from_args(false, &["one"]).is_in_insertion_mode());
}

#[test]
fn test_order() {
    let machine = SortingMachine::<i32, _>::new(ReverseOrderer::new(OrdOrderer::new()));
    assert_eq!(Ordering::Greater, machine.order().compare(&1i32, &2));
}

#[test]
fn test_size() {
    let mut machine = create_from_args(true, &["one", "two", "three"]);
    assert_eq!(3, machine.size());
    machine.change_to_extraction_mode().unwrap();
    assert_eq!(3, machine.size());
    machine.remove_first().unwrap();
    assert_eq!(2, machine.size());
}

#[test]
fn test_clear() {
    let mut inserting = create_from_args(true, &["one", "two"]);
    inserting.clear();
    assert_eq!(create_from_args(true, &[]), inserting);

    let mut extracting = create_from_args(false, &["one", "two"]);
    extracting.remove_first().unwrap();
    extracting.clear();
    assert!(extracting.is_in_insertion_mode());
    assert!(extracting.convention_holds());
    assert_eq!(create_from_args(true, &[]), extracting);

    extracting.add("three").unwrap();
    extracting.change_to_extraction_mode().unwrap();
    assert_eq!(Ok("three"), extracting.remove_first());
}

#[test]
fn test_new_instance_and_take() {
    let mut machine = create_from_args(false, &["one", "two"]);
    let fresh = machine.new_instance();
    assert_eq!(create_from_args(true, &[]), fresh);

    let taken = machine.take();
    assert_eq!(create_from_args(false, &["one", "two"]), taken);
    assert_eq!(create_from_args(true, &[]), machine);
}

#[test]
fn test_with_config() {
    let config = SortConfig::default().initial_capacity(16);
    let mut machine = SortingMachine::with_config(OrdOrderer::new(), &config);
    assert!(machine.is_in_insertion_mode());
    machine.try_extend([3, 1, 2]).unwrap();
    assert_eq!(vec![1, 2, 3], machine.into_sorted().collect::<Vec<_>>());
}

#[test]
fn test_try_extend() {
    let mut machine = create_from_args(true, &["one"]);
    machine.try_extend(["two", "three"]).unwrap();
    assert_eq!(create_from_args(true, &["three", "two", "one"]), machine);
}

#[test]
fn test_equality_ignores_layout_not_mode() {
    let left = create_from_args(true, &["a", "b", "b"]);
    assert_eq!(create_from_args(true, &["b", "a", "b"]), left);
    assert_ne!(create_from_args(true, &["a", "a", "b"]), left);
    assert_ne!(create_from_args(true, &["a", "b"]), left);
    assert_ne!(create_from_args(false, &["a", "b", "b"]), left);
    assert_eq!(
        create_from_args(false, &["c", "a", "b", "d"]),
        create_from_args(false, &["d", "b", "c", "a"])
    );
}

#[test]
fn test_iter() {
    let machine = create_from_args(false, &["c", "a", "b"]);
    let iter = machine.iter();
    assert_eq!(3, iter.len());
    let mut seen: Vec<_> = iter.copied().collect();
    seen.sort();
    assert_eq!(vec!["a", "b", "c"], seen);
    // heap layout puts the minimum first
    assert_eq!(Some(&"a"), (&machine).into_iter().next());
}

#[test]
fn test_drain_can_stop_early() {
    let mut machine = create_from_args(false, &["c", "a", "b"]);
    let first: Vec<_> = machine.drain_sorted().unwrap().take(1).collect();
    assert_eq!(vec!["a"], first);
    assert_eq!(create_from_args(false, &["b", "c"]), machine);
}

#[test]
fn test_into_sorted() {
    let sorted: Vec<_> = create_from_args(true, &["banana", "apple", "cherry"])
        .into_sorted()
        .collect();
    assert_eq!(vec!["apple", "banana", "cherry"], sorted);

    let mut machine = create_from_args(false, &["b", "a"]);
    machine.remove_first().unwrap();
    let mut iter = machine.into_sorted();
    assert_eq!(1, iter.len());
    assert_eq!(Some("b"), iter.next());
    assert_eq!(None, iter.next());
    assert!(!iter.into_machine().is_in_insertion_mode());
}

#[test]
fn test_display_and_debug() {
    let machine = create_from_args(true, &["one", "two"]);
    assert_eq!("(insertion, {one, two})", machine.to_string());
    assert_eq!(
        "(extraction, {})",
        create_from_args(false, &[]).to_string()
    );
    assert_eq!(
        "SortingMachine { mode: Inserting, entries: [\"one\", \"two\"] }",
        format!("{machine:?}")
    );
}

#[cfg(not(miri))]
// too slow to execute with miri
mod random {
    use std::sync::{Arc, Mutex};

    use rand::Rng;

    use crate::{
        heap::is_heap,
        machine::SortingMachine,
        orderer::{KeyOrderer, OrdOrderer},
    };

    use super::heap_of;

    #[test]
    fn test_thousand_random_integers() {
        let mut rng = rand::thread_rng();
        let mut machine = SortingMachine::new(OrdOrderer::new());
        for _ in 0..1000 {
            machine.add(rng.gen::<i64>()).unwrap();
        }
        machine.change_to_extraction_mode().unwrap();
        assert!(is_heap(heap_of(&machine), 0, &OrdOrderer::new()));

        let drained: Vec<_> = machine.drain_sorted().unwrap().collect();
        assert_eq!(1000, drained.len());
        assert!(drained.windows(2).all(|w| w[0] <= w[1]));
        assert!(machine.is_empty());
    }

    /// interleaves additions and removals across clear cycles and checks that
    /// every entry added is either removed or still held.
    fn run_conservation_test(rng: &mut impl Rng, rounds: usize) {
        let order = KeyOrderer::new(|v: &(u8, u32)| v.0);
        let mut machine = SortingMachine::new(order);
        let mut next_id = 0u32;
        for _ in 0..rounds {
            let mut added = Vec::new();
            for _ in 0..rng.gen_range(0..64) {
                let entry = (rng.gen_range(0..8), next_id);
                next_id += 1;
                added.push(entry);
                machine.add(entry).unwrap();
            }
            machine.change_to_extraction_mode().unwrap();

            let mut removed: Vec<(u8, u32)> = Vec::new();
            for _ in 0..rng.gen_range(0..=added.len()) {
                let entry = machine.remove_first().unwrap();
                if let Some(prev) = removed.last() {
                    assert!(prev.0 <= entry.0);
                }
                removed.push(entry);
            }

            let mut accounted: Vec<_> = removed.iter().chain(machine.iter()).copied().collect();
            accounted.sort();
            added.sort();
            assert_eq!(added, accounted);

            machine.clear();
        }
    }

    #[test]
    fn test_conservation_random() {
        let rounds = Arc::new(Mutex::new(0..200));
        let threads: Vec<_> = (0..num_cpus::get())
            .map(|_| {
                let rounds = rounds.clone();
                std::thread::spawn(move || {
                    let mut rng = rand::thread_rng();
                    while rounds.lock().unwrap().next().is_some() {
                        run_conservation_test(&mut rng, 5);
                    }
                })
            })
            .collect();

        threads.into_iter().for_each(|t| t.join().unwrap());
    }
}
