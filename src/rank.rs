/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A weight-balanced binary search tree with order-statistic queries.
//!
//! Weight-balanced trees were defined in "Binary search trees of
//! bounded balance" by J. Nievergelt & E. M. Reingold, Proceedings of
//! the Fourth Annual ACM Symposium on Theory of Computing, 1972.
//! doi:10.1145/800152.804906
//!
//! Every node carries the size of its own subtree, which both drives
//! rebalancing and supports `rank`-based queries. Queries are
//! fail-proof by construction: `find` reports the rank of an element
//! (or nothing), and `select`/`remove` consume ranks, so a caller that
//! only forwards ranks obtained from `find`/`insert` never makes a
//! failing query.

use std::cmp::Ordering;
use std::mem;

use compare::Compare;
use serde::{Deserialize, Serialize};

use crate::NaturalOrder;

// Rebalancing constants (DELTA, GAMMA).
// (5/2, 3/2) -> Worst case height = log(size)/log(7/5) ~ 2.06*log2(size)
// (3/1, 2/1) -> Worst case height ~ 2.41*log2(size)
const DELTA_NUM: usize = 5;
const DELTA_DEN: usize = 2;
const GAMMA_NUM: usize = 3;
const GAMMA_DEN: usize = 2;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
struct Node<T> {
    c: [Option<Box<Node<T>>>; 2],
    // Number of elements in the subtree, this node included
    size: usize,
    data: T,
}

fn subtree_size<T>(c: &Option<Box<Node<T>>>) -> usize {
    c.as_ref().map_or(0, |node| node.size)
}

// The weight of a subtree is its size plus one, so an absent child
// still weighs 1 and the balance ratios stay well-defined at the
// fringe.
fn weight<T>(c: &Option<Box<Node<T>>>) -> usize {
    subtree_size(c) + 1
}

impl<T> Node<T> {
    fn new(data: T) -> Node<T> {
        Node {
            c: [None, None],
            size: 1,
            data,
        }
    }

    fn push_up(&mut self) {
        self.size = subtree_size(&self.c[0]) + subtree_size(&self.c[1]) + 1;
    }

    // Brings node.c[s] above node, preserving in-order. Sizes of both
    // are recomputed.
    fn rotate(node: &mut Box<Node<T>>, s: usize) {
        let mut child = match node.c[s].take() {
            Some(child) => child,
            None => return,
        };
        node.c[s] = child.c[1 - s].take();
        node.push_up();
        mem::swap(node, &mut child);
        node.c[1 - s] = Some(child);
        node.push_up();
    }

    // Restores the balance invariant at this node after one insertion
    // or removal below it. Shared by both: the DELTA ratio decides
    // whether a side became too heavy and the GAMMA ratio of the heavy
    // child decides between a single and a double rotation.
    fn rebalance(node: &mut Box<Node<T>>) {
        node.push_up();
        let lw = weight(&node.c[0]);
        let rw = weight(&node.c[1]);
        let s = if DELTA_NUM * rw < DELTA_DEN * lw {
            0
        } else if DELTA_NUM * lw < DELTA_DEN * rw {
            1
        } else {
            return;
        };
        let (outer, inner) = match node.c[s] {
            Some(ref heavy) => (weight(&heavy.c[s]), weight(&heavy.c[1 - s])),
            None => return,
        };
        if GAMMA_NUM * outer <= GAMMA_DEN * inner {
            // The heavy child is inner-heavy itself: double rotation.
            if let Some(heavy) = node.c[s].as_mut() {
                Self::rotate(heavy, 1 - s);
            }
        }
        Self::rotate(node, s);
    }
}

/// A weight-balanced tree holding one element per key, ordered by a
/// stored comparator ([`NaturalOrder`] by default).
///
/// Unlike [`Splay`](crate::Splay), lookups never restructure the tree
/// and the height is O(log(size)) in the worst case, at the cost of one
/// `usize` per node. All ranks are 1-based: `1 <= rank <= size`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>, C: Default"
))]
pub struct RankTree<T, C = NaturalOrder> {
    root: Option<Box<Node<T>>>,
    #[serde(skip)]
    cmp: C,
}

impl<T: Ord> RankTree<T> {
    pub fn new() -> RankTree<T> {
        RankTree {
            root: None,
            cmp: NaturalOrder,
        }
    }
}

impl<T: Ord> Default for RankTree<T> {
    fn default() -> RankTree<T> {
        RankTree::new()
    }
}

impl<T, C: Compare<T>> RankTree<T, C> {
    /// Builds an empty tree ordered by `cmp`, where
    /// `cmp.compares_lt(x, y)` is the strict less-than of the keys.
    /// Ties are "not less" in both directions.
    pub fn with_cmp(cmp: C) -> RankTree<T, C> {
        RankTree { root: None, cmp }
    }

    /// The number of elements in the tree, in O(1).
    pub fn size(&self) -> usize {
        subtree_size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Looks for `key` and returns its rank, counting the left-sibling
    /// subtrees skipped on the way down. Returns `None` if `key` is not
    /// in the tree. Never mutates the tree.
    pub fn find(&self, key: &T) -> Option<usize> {
        let mut node = self.root.as_ref();
        let mut rank = 1;
        while let Some(cur) = node {
            if self.cmp.compares_lt(key, &cur.data) {
                node = cur.c[0].as_ref();
            } else {
                rank += subtree_size(&cur.c[0]);
                if self.cmp.compares_lt(&cur.data, key) {
                    rank += 1;
                    node = cur.c[1].as_ref();
                } else {
                    return Some(rank);
                }
            }
        }
        None
    }

    /// Inserts `data` and returns its rank. An equal key already in the
    /// tree is overwritten in place (same rank, no rebalancing).
    pub fn insert(&mut self, data: T) -> usize {
        Self::insert_in(&mut self.root, data, &self.cmp)
    }

    fn insert_in(
        slot: &mut Option<Box<Node<T>>>,
        data: T,
        cmp: &C,
    ) -> usize {
        let node = match slot {
            Some(node) => node,
            None => {
                *slot = Some(Box::new(Node::new(data)));
                return 1;
            }
        };
        let rank = if cmp.compares_lt(&data, &node.data) {
            Self::insert_in(&mut node.c[0], data, cmp)
        } else if cmp.compares_lt(&node.data, &data) {
            weight(&node.c[0]) + Self::insert_in(&mut node.c[1], data, cmp)
        } else {
            node.data = data;
            return weight(&node.c[0]);
        };
        Node::rebalance(node);
        rank
    }

    /// Returns the element of a given rank, or `None` when the rank is
    /// out of range. `select(1)` is the minimum and `select(size)` the
    /// maximum, both resolved by a straight descent.
    pub fn select(&self, rank: usize) -> Option<&T> {
        let mut node = self.root.as_ref()?;
        let size = node.size;
        if rank < 1 || size < rank {
            return None;
        }
        if rank == 1 {
            while let Some(c) = node.c[0].as_ref() {
                node = c;
            }
        } else if rank == size {
            while let Some(c) = node.c[1].as_ref() {
                node = c;
            }
        } else {
            let mut target = rank;
            loop {
                let lw = weight(&node.c[0]);
                match target.cmp(&lw) {
                    Ordering::Equal => break,
                    Ordering::Less => match node.c[0].as_ref() {
                        Some(c) => node = c,
                        None => return None,
                    },
                    Ordering::Greater => {
                        target -= lw;
                        match node.c[1].as_ref() {
                            Some(c) => node = c,
                            None => return None,
                        }
                    }
                }
            }
        }
        Some(&node.data)
    }

    /// Removes and returns the element of a given rank, or `None` when
    /// the rank is out of range. Every ancestor of the removed node is
    /// rebalanced on the way back up.
    pub fn remove(&mut self, rank: usize) -> Option<T> {
        if rank < 1 || self.size() < rank {
            return None;
        }
        Some(Self::remove_in(&mut self.root, rank))
    }

    // `rank` must be valid for the subtree in `slot`.
    fn remove_in(slot: &mut Option<Box<Node<T>>>, rank: usize) -> T {
        let data;
        {
            let node = match slot {
                Some(node) => node,
                None => unreachable!("rank out of range"),
            };
            let lw = weight(&node.c[0]);
            if rank < lw {
                data = Self::remove_in(&mut node.c[0], rank);
            } else if rank > lw {
                data = Self::remove_in(&mut node.c[1], rank - lw);
            } else if node.c[0].is_some() && node.c[1].is_some() {
                // Both children: displace this element with its
                // in-order successor, the rank-1 element of the right
                // subtree.
                let succ = Self::remove_in(&mut node.c[1], 1);
                data = mem::replace(&mut node.data, succ);
            } else {
                let mut node = match slot.take() {
                    Some(node) => node,
                    None => unreachable!(),
                };
                *slot = node.c[0].take().or_else(|| node.c[1].take());
                return node.data;
            }
        }
        if let Some(node) = slot.as_mut() {
            Node::rebalance(node);
        }
        data
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
        let lw = weight(&node.c[0]);
        let rw = weight(&node.c[1]);
        assert_eq!(node.size, lw + rw - 1);
        assert!(DELTA_NUM * rw >= DELTA_DEN * lw);
        assert!(DELTA_NUM * lw >= DELTA_DEN * rw);
        if let Some(ref c) = node.c[0] {
            self.check_sanity_subtree(c, lo, Some(&node.data));
        }
        if let Some(ref c) = node.c[1] {
            self.check_sanity_subtree(c, Some(&node.data), hi);
        }
    }
}
