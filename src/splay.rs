/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A self-adjusting binary search tree rebalanced by top-down simple
//! splaying on every access.
//!
//! Splay trees were defined in "Self-Adjusting Binary Search Trees" by
//! Daniel D. Sleator & Robert E. Tarjan, Journal of the ACM 32 (3),
//! 1985. doi:10.1145/3828.3835
//!
//! Every operation moves the accessed element (or the closest one
//! visited) to the root, so a sequence of N operations is guaranteed to
//! take O(N*log(N)) time even though a single one may take O(N). Note
//! that this means a lookup mutates the tree.

use std::mem;

use compare::Compare;
use serde::{Deserialize, Serialize};

use crate::NaturalOrder;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
struct Node<T> {
    c: [Option<Box<Node<T>>>; 2],
    data: T,
}

impl<T> Node<T> {
    fn new(data: T) -> Node<T> {
        Node {
            c: [None, None],
            data,
        }
    }

    // Top-down simple splay toward the extreme on `side` (false = the
    // smallest element). Nodes passed over are threaded onto `linked`
    // with a hole on `side` and reassembled below the new root, so the
    // final shape is the same as the classic rotate-and-link loop.
    fn splay_extreme(mut self: Box<Node<T>>, side: bool) -> Box<Node<T>> {
        let s = side as usize;
        let o = !side as usize;
        let mut linked = Vec::new();
        loop {
            // Rotate
            let mut child = match self.c[s].take() {
                Some(child) => child,
                None => break,
            };
            self.c[s] = child.c[o].take();
            child.c[o] = Some(self);
            self = child;

            // Link
            match self.c[s].take() {
                Some(next) => {
                    linked.push(self);
                    self = next;
                }
                None => break,
            }
        }

        // Assemble: fill each hole with the chain built so far, then
        // hang the whole thing off the opposite side of the new root.
        let mut chain = self.c[o].take();
        while let Some(mut node) = linked.pop() {
            node.c[s] = chain;
            chain = Some(node);
        }
        self.c[o] = chain;
        self
    }
}

/// A splay tree holding one element per key, ordered by a stored
/// comparator ([`NaturalOrder`] by default).
///
/// Smallest per-node footprint of the two containers in this crate: two
/// children and the element, no auxiliary counters.
#[derive(Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>, C: Default"
))]
pub struct Splay<T, C = NaturalOrder> {
    root: Option<Box<Node<T>>>,
    #[serde(skip)]
    cmp: C,
}

impl<T: Ord> Splay<T> {
    pub fn new() -> Splay<T> {
        Splay {
            root: None,
            cmp: NaturalOrder,
        }
    }
}

impl<T: Ord> Default for Splay<T> {
    fn default() -> Splay<T> {
        Splay::new()
    }
}

impl<T, C: Compare<T>> Splay<T, C> {
    /// Builds an empty tree ordered by `cmp`, where
    /// `cmp.compares_lt(x, y)` is the strict less-than of the keys.
    /// Ties are "not less" in both directions.
    pub fn with_cmp(cmp: C) -> Splay<T, C> {
        Splay { root: None, cmp }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The element currently at the root, in O(1) and without splaying.
    ///
    /// Every other operation leaves the element it accessed at the
    /// root, so this is how their results are read back.
    pub fn root(&self) -> Option<&T> {
        self.root.as_ref().map(|root| &root.data)
    }

    /// Splays the smallest element to the root and returns it.
    pub fn min(&mut self) -> Option<&T> {
        self.extreme(false)
    }

    /// Splays the biggest element to the root and returns it.
    pub fn max(&mut self) -> Option<&T> {
        self.extreme(true)
    }

    fn extreme(&mut self, side: bool) -> Option<&T> {
        let root = self.root.take()?;
        self.root = Some(root.splay_extreme(side));
        self.root.as_ref().map(|root| &root.data)
    }

    /// Removes the current root node and returns its element.
    ///
    /// If the popped element was the smallest (biggest) in the tree,
    /// the new root is still the smallest (biggest) of the remainder,
    /// so `min` (`max`) followed by repeated `pop` consumes the tree in
    /// sorted (reverse) order touching each element exactly once.
    pub fn pop(&mut self) -> Option<T> {
        let mut old_root = self.root.take()?;
        let left = old_root.c[0].take();
        let right = old_root.c[1].take();
        self.root = match (left, right) {
            (None, None) => None,
            (Some(left), None) => Some(left.splay_extreme(true)),
            (left, Some(right)) => {
                let mut root = right.splay_extreme(false);
                root.c[0] = left;
                Some(root)
            }
        };
        Some(old_root.data)
    }

    /// Splays the successor of the current root to the root. Returns
    /// false (without splaying) if the tree is empty or the root is
    /// already the biggest element.
    pub fn next(&mut self) -> bool {
        self.step(true)
    }

    /// Splays the predecessor of the current root to the root. Returns
    /// false (without splaying) if the tree is empty or the root is
    /// already the smallest element.
    pub fn prev(&mut self) -> bool {
        self.step(false)
    }

    fn step(&mut self, side: bool) -> bool {
        let s = side as usize;
        let o = !side as usize;
        let mut old_root = match self.root.take() {
            Some(root) => root,
            None => return false,
        };
        let subtree = match old_root.c[s].take() {
            Some(subtree) => subtree,
            None => {
                self.root = Some(old_root);
                return false;
            }
        };
        // The extreme of the subtree on `side` is the neighbor; the old
        // root becomes its only child on the opposite side.
        let mut root = subtree.splay_extreme(!side);
        root.c[o] = Some(old_root);
        self.root = Some(root);
        true
    }

    /// Looks for `key`. If present, splays it to the root and returns
    /// true. Otherwise splays the closest key visited to the root and
    /// returns false.
    pub fn find(&mut self, key: &T) -> bool {
        self.splay_to(key)
    }

    /// Inserts `data`, overwriting in place when an equal key is
    /// already present (the previous element is returned). The inserted
    /// element ends up at the root.
    pub fn insert(&mut self, data: T) -> Option<T> {
        if self.splay_to(&data) {
            // splay_to left the equal element at the root.
            let root = match self.root.as_mut() {
                Some(root) => root,
                None => return None,
            };
            return Some(mem::replace(&mut root.data, data));
        }
        // The search split the tree at the closest key: the new node
        // adopts the subtree straddling the insertion point and the old
        // root on the other side.
        let mut node = Box::new(Node::new(data));
        if let Some(mut root) = self.root.take() {
            let s = self.cmp.compares_lt(&root.data, &node.data) as usize;
            node.c[s] = root.c[s].take();
            node.c[1 - s] = Some(root);
        }
        self.root = Some(node);
        None
    }

    // Top-down splay search: two successive steps in the same direction
    // collapse into one rotation before the node is linked away, which
    // is what bounds the amortized cost (simple splaying).
    fn splay_to(&mut self, key: &T) -> bool {
        let mut root = match self.root.take() {
            Some(root) => root,
            None => return false,
        };
        let mut path: Vec<(Box<Node<T>>, bool)> = Vec::new();
        let found = loop {
            let side = if self.cmp.compares_lt(key, &root.data) {
                false
            } else if self.cmp.compares_lt(&root.data, key) {
                true
            } else {
                break true;
            };
            let s = side as usize;
            let o = !side as usize;

            // Rotate if the path continues in the same direction.
            let same_dir = match root.c[s] {
                Some(ref child) => {
                    if side {
                        self.cmp.compares_lt(&child.data, key)
                    } else {
                        self.cmp.compares_lt(key, &child.data)
                    }
                }
                None => false,
            };
            if same_dir {
                if let Some(mut child) = root.c[s].take() {
                    root.c[s] = child.c[o].take();
                    child.c[o] = Some(root);
                    root = child;
                }
            }

            // Link
            match root.c[s].take() {
                Some(next) => {
                    path.push((root, side));
                    root = next;
                }
                None => break false,
            }
        };

        // Assemble the two accumulated trees back around the final
        // node: nodes linked while going left are all bigger than the
        // key and end up on the right, and vice versa.
        let mut lc = root.c[0].take();
        let mut rc = root.c[1].take();
        while let Some((mut node, side)) = path.pop() {
            if side {
                node.c[1] = lc;
                lc = Some(node);
            } else {
                node.c[0] = rc;
                rc = Some(node);
            }
        }
        root.c[0] = lc;
        root.c[1] = rc;
        self.root = Some(root);
        found
    }

    // Only for DEBUG
    pub fn check_sanity(&self) {
        if let Some(ref root) = self.root {
            self.check_sanity_subtree(root, None, None);
        }
    }

    fn check_sanity_subtree(
        &self,
        node: &Node<T>,
        lo: Option<&T>,
        hi: Option<&T>,
    ) {
        if let Some(lo) = lo {
            assert!(self.cmp.compares_lt(lo, &node.data));
        }
        if let Some(hi) = hi {
            assert!(self.cmp.compares_lt(&node.data, hi));
        }
        if let Some(ref c) = node.c[0] {
            self.check_sanity_subtree(c, lo, Some(&node.data));
        }
        if let Some(ref c) = node.c[1] {
            self.check_sanity_subtree(c, Some(&node.data), hi);
        }
    }
}

impl<T, C> Drop for Splay<T, C> {
    fn drop(&mut self) {
        // A splay tree can degenerate to an O(n) chain (e.g. sorted
        // insertion), so the derived recursive drop could blow the
        // stack. Unlink iteratively instead.
        let mut stack = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.c[0].take());
            stack.extend(node.c[1].take());
        }
    }
}
