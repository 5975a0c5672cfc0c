/// This is a wrapper around the tree indices in
/// the classic implicit array tree.
/// it mainly exists for clarity, as well as to make
/// implementing the tree navigation easier.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TreeNode {
    pub idx: usize,
}

impl TreeNode {
    pub fn new(idx: usize) -> Self {
        Self { idx }
    }
    pub fn left(self) -> Self {
        Self {
            idx: self.idx * 2 + 1,
        }
    }
    pub fn right(self) -> Self {
        Self {
            idx: self.idx * 2 + 2,
        }
    }
    pub fn parent(self) -> Self {
        Self {
            idx: self.idx.saturating_sub(1) / 2,
        }
    }
    pub fn root() -> Self {
        Self { idx: 0 }
    }
    pub fn is_root(&self) -> bool {
        self.idx == 0
    }

    /// true if this node exists in a tree of `len` entries
    pub fn is_within(&self, len: usize) -> bool {
        self.idx < len
    }

    /// the last node in a tree of `len` entries that has at least one child.
    /// Returns None for trees without any internal node.
    pub fn last_parent(len: usize) -> Option<Self> {
        if len < 2 {
            None
        } else {
            Some(Self::new(len - 1).parent())
        }
    }
}
