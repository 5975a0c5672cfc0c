//! Binary min-heap primitives over slices.
//!
//! A slice is read as a complete binary tree in the usual implicit array
//! layout: the children of entry `i` live at `2i + 1` and `2i + 2`.
//! The heap only ever covers the slice it is handed, so callers holding a
//! partially used array pass `&mut array[..heap_size]`.

mod node;

pub use self::node::TreeNode;

use crate::orderer::Orderer;

/// Exchanges the entries at indices `i` and `j` of `array`.
#[inline]
pub fn exchange<T>(array: &mut [T], i: usize, j: usize) {
    debug_assert!(i < array.len(), "exchange index {i} out of bounds");
    debug_assert!(j < array.len(), "exchange index {j} out of bounds");
    array.swap(i, j);
}

/// Restores the heap property for the subtree rooted at `top`,
/// given that both subtrees below it already are heaps.
///
/// The root is swapped with its smaller child until it is no larger than
/// both of its children or has run out of children. A root that already
/// satisfies the property is left alone, so sifting a valid heap is a no-op.
pub fn sift_down<T, O>(array: &mut [T], top: usize, order: &O)
where
    O: Orderer<T> + ?Sized,
{
    let len = array.len();
    let mut node = TreeNode::new(top);
    loop {
        let left = node.left();
        if !left.is_within(len) {
            return;
        }
        let right = node.right();

        // pick the smaller child first, on ties the right one.
        let smaller = if right.is_within(len)
            && !order.compare(&array[left.idx], &array[right.idx]).is_lt()
        {
            right
        } else {
            left
        };

        if order.compare(&array[smaller.idx], &array[node.idx]).is_lt() {
            exchange(array, node.idx, smaller.idx);
            node = smaller;
        } else {
            return;
        }
    }
}

/// Turns the whole of `array` into a heap.
///
/// Every internal node is sifted, starting from the last one and walking back to
/// the root. Sifting bottom-up keeps the total work linear in the number of entries.
pub fn heapify<T, O>(array: &mut [T], order: &O)
where
    O: Orderer<T> + ?Sized,
{
    if let Some(last_parent) = TreeNode::last_parent(array.len()) {
        for idx in (0..=last_parent.idx).rev() {
            sift_down(array, idx, order);
        }
    }
}

/// Checks whether the subtree of `array` rooted at `top` is a heap.
/// An index past the end of the slice denotes an empty subtree, which is a heap.
pub fn is_heap<T, O>(array: &[T], top: usize, order: &O) -> bool
where
    O: Orderer<T> + ?Sized,
{
    let node = TreeNode::new(top);
    [node.left(), node.right()]
        .into_iter()
        .filter(|child| child.is_within(array.len()))
        .all(|child| {
            order.compare(&array[top], &array[child.idx]).is_le()
                && is_heap(array, child.idx, order)
        })
}
