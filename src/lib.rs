/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Two independent generic ordered containers implemented with safe
//! rust: a self-adjusting splay tree ([`Splay`]) and a weight-balanced
//! order-statistic tree ([`RankTree`]).
//!
//! Both store one element per key under a caller-supplied strict
//! less-than (a [`Compare`] comparator, [`NaturalOrder`] for `T: Ord`)
//! and share nothing else: pick [`Splay`] when adaptive amortized
//! behavior and a minimal node footprint matter, [`RankTree`] when
//! worst-case O(log n) height and rank/select queries do.
//!
//! Beware that a [`Splay`] lookup splays and therefore takes `&mut
//! self`: even "reads" must be serialized by the caller.
//!
//! ```rust
//! use rank_splay_rs::{RankTree, Splay};
//!
//! let mut splay = Splay::new();
//! for key in [2, 4, 6] {
//!     splay.insert(key);
//! }
//! assert!(splay.find(&4));
//! assert_eq!(splay.root(), Some(&4));
//! assert!(splay.next());
//! assert_eq!(splay.root(), Some(&6));
//!
//! let mut rank = RankTree::new();
//! for key in [2, 4, 6] {
//!     rank.insert(key);
//! }
//! assert_eq!(rank.find(&4), Some(2));
//! assert_eq!(rank.select(2), Some(&4));
//! assert_eq!(rank.remove(2), Some(4));
//! assert_eq!(rank.size(), 2);
//! ```

mod rank;
mod splay;
mod tests;

pub use crate::rank::RankTree;
pub use crate::splay::Splay;

pub use compare::Compare;

use std::cmp::Ordering;

/// The default comparator: orders elements by their [`Ord`] instance.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Compare<T> for NaturalOrder {
    fn compare(&self, l: &T, r: &T) -> Ordering {
        l.cmp(r)
    }
}
