/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#[cfg(test)]
mod rand_tests {
    use rand::distributions::{Distribution, Uniform};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    use crate::{RankTree, Splay};

    // Random find/pop/insert storm against BTreeSet, following the
    // shape of the splay container's original stress loop: when the key
    // is present it must come out through the root, when it is absent
    // the insertion must make it findable.
    fn splay_rand_ops(num: usize, max_key: u64) {
        let mut rng = StdRng::seed_from_u64(233);
        let dist = Uniform::new(0, max_key);
        let mut splay = Splay::new();
        let mut std_set = BTreeSet::new();
        for i in 0..num {
            let key = dist.sample(&mut rng);
            if splay.find(&key) {
                assert!(std_set.remove(&key));
                assert_eq!(splay.root(), Some(&key));
                assert_eq!(splay.pop(), Some(key));
                assert!(!splay.find(&key));
            } else {
                assert!(std_set.insert(key));
                assert_eq!(splay.insert(key), None);
                assert!(splay.find(&key));
                assert_eq!(splay.root(), Some(&key));
            }
            if i % 64 == 0 {
                splay.check_sanity();
            }
        }
        // Consume forwards; pop preserves the minimum at the root.
        splay.min();
        let mut drained = Vec::new();
        while let Some(key) = splay.pop() {
            drained.push(key);
        }
        assert!(splay.is_empty());
        assert_eq!(drained, std_set.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn splay_rand_ops_1e3() {
        splay_rand_ops(1_000, 1 << 6);
    }
    #[test]
    fn splay_rand_ops_1e4() {
        splay_rand_ops(10_000, 1 << 8);
    }
    #[test]
    fn splay_rand_ops_1e5() {
        splay_rand_ops(100_000, 1 << 10);
    }

    // Same storm for the rank container, additionally checking every
    // reported rank against the number of smaller keys in the BTreeSet.
    fn rank_rand_ops(num: usize, max_key: u64) {
        let mut rng = StdRng::seed_from_u64(233);
        let dist = Uniform::new(0, max_key);
        let mut tree = RankTree::new();
        let mut std_set = BTreeSet::new();
        for i in 0..num {
            let key = dist.sample(&mut rng);
            let expected_rank = std_set.range(..key).count() + 1;
            match tree.find(&key) {
                Some(rank) => {
                    assert!(std_set.remove(&key));
                    assert_eq!(rank, expected_rank);
                    assert_eq!(tree.select(rank), Some(&key));
                    assert_eq!(tree.remove(rank), Some(key));
                    assert_eq!(tree.find(&key), None);
                }
                None => {
                    assert!(std_set.insert(key));
                    let rank = tree.insert(key);
                    assert_eq!(rank, expected_rank);
                    assert_eq!(tree.find(&key), Some(rank));
                }
            }
            assert_eq!(tree.size(), std_set.len());
            if i % 64 == 0 {
                tree.check_sanity();
            }
        }
        tree.check_sanity();
        // A full select sweep enumerates the keys in increasing order
        // with no gaps or repeats.
        let expected: Vec<u64> = std_set.iter().copied().collect();
        let swept: Vec<u64> = (1..=tree.size())
            .filter_map(|rank| tree.select(rank).copied())
            .collect();
        assert_eq!(swept, expected);
        // Removing rank 1 repeatedly drains in the same order.
        let mut drained = Vec::new();
        while let Some(key) = tree.remove(1) {
            drained.push(key);
        }
        assert!(tree.is_empty());
        assert_eq!(drained, expected);
    }

    #[test]
    fn rank_rand_ops_1e3() {
        rank_rand_ops(1_000, 1 << 6);
    }
    #[test]
    fn rank_rand_ops_1e4() {
        rank_rand_ops(10_000, 1 << 8);
    }
    #[test]
    fn rank_rand_ops_1e5() {
        rank_rand_ops(100_000, 1 << 10);
    }
}

#[cfg(test)]
mod scenarios {
    use std::cmp::Ordering;

    use compare::Compare;

    use crate::{RankTree, Splay};

    #[test]
    fn splay_empty_queries() {
        let mut splay = Splay::<u32>::new();
        assert!(splay.is_empty());
        assert_eq!(splay.root(), None);
        assert_eq!(splay.min(), None);
        assert_eq!(splay.max(), None);
        assert_eq!(splay.pop(), None);
        assert!(!splay.next());
        assert!(!splay.prev());
        assert!(!splay.find(&42));
    }

    #[test]
    fn splay_find_then_next() {
        let mut splay = Splay::new();
        for key in [2, 4, 6] {
            splay.insert(key);
        }
        assert!(splay.find(&4));
        assert_eq!(splay.root(), Some(&4));
        assert!(splay.next());
        assert_eq!(splay.root(), Some(&6));
        assert!(!splay.next());
        assert_eq!(splay.root(), Some(&6));
    }

    #[test]
    fn splay_iterate_both_ways() {
        let mut splay = Splay::new();
        for key in 1..=64 {
            splay.insert(key);
            splay.check_sanity();
        }
        assert_eq!(splay.max(), Some(&64));
        let mut expected = 64;
        while splay.prev() {
            expected -= 1;
            assert_eq!(splay.root(), Some(&expected));
            splay.check_sanity();
        }
        assert_eq!(expected, 1);
        assert_eq!(splay.min(), Some(&1));
        while splay.next() {
            expected += 1;
            assert_eq!(splay.root(), Some(&expected));
            splay.check_sanity();
        }
        assert_eq!(expected, 64);
    }

    #[test]
    fn splay_pop_preserves_extremes() {
        let keys = [31, 7, 59, 3, 41, 11, 23];
        let mut sorted = keys;
        sorted.sort();

        let mut splay = Splay::new();
        for key in keys {
            splay.insert(key);
        }
        splay.min();
        for key in sorted {
            assert_eq!(splay.root(), Some(&key));
            assert_eq!(splay.pop(), Some(key));
        }
        assert!(splay.is_empty());

        for key in keys {
            splay.insert(key);
        }
        splay.max();
        for key in sorted.iter().rev() {
            assert_eq!(splay.root(), Some(key));
            assert_eq!(splay.pop(), Some(*key));
        }
        assert!(splay.is_empty());
    }

    #[test]
    fn splay_insert_overwrites_in_place() {
        #[derive(Clone, Debug, PartialEq)]
        struct Pair {
            key: u32,
            value: u32,
        }
        struct ByKey;
        impl Compare<Pair> for ByKey {
            fn compare(&self, a: &Pair, b: &Pair) -> Ordering {
                a.key.cmp(&b.key)
            }
        }
        let mut splay = Splay::with_cmp(ByKey);
        assert_eq!(splay.insert(Pair { key: 3, value: 10 }), None);
        assert_eq!(splay.insert(Pair { key: 5, value: 11 }), None);
        assert_eq!(
            splay.insert(Pair { key: 3, value: 20 }),
            Some(Pair { key: 3, value: 10 })
        );
        assert_eq!(splay.root(), Some(&Pair { key: 3, value: 20 }));
        assert_eq!(splay.pop(), Some(Pair { key: 3, value: 20 }));
        assert_eq!(splay.pop(), Some(Pair { key: 5, value: 11 }));
        assert!(splay.is_empty());
    }

    #[test]
    fn splay_deep_tree_drops_without_overflow() {
        let mut splay = Splay::new();
        // Sorted insertion degenerates the tree to a chain.
        for key in 0..100_000u32 {
            splay.insert(key);
        }
        drop(splay);
    }

    #[test]
    fn rank_empty_queries() {
        let mut tree = RankTree::<u32>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.find(&42), None);
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.select(1), None);
        assert_eq!(tree.remove(1), None);
    }

    #[test]
    fn rank_insert_reports_ranks() {
        let mut tree = RankTree::new();
        let inserts = [(5, 1), (3, 1), (8, 3), (1, 1), (4, 3)];
        for (key, rank) in inserts {
            assert_eq!(tree.insert(key), rank);
            tree.check_sanity();
        }
        assert_eq!(tree.size(), 5);
        let swept: Vec<i32> =
            (1..=5).filter_map(|rank| tree.select(rank).copied()).collect();
        assert_eq!(swept, vec![1, 3, 4, 5, 8]);
        assert_eq!(tree.select(6), None);
    }

    #[test]
    fn rank_overwrite_keeps_size_and_rank() {
        #[derive(Clone, Debug, PartialEq)]
        struct Pair {
            key: u32,
            value: u32,
        }
        struct ByKey;
        impl Compare<Pair> for ByKey {
            fn compare(&self, a: &Pair, b: &Pair) -> Ordering {
                a.key.cmp(&b.key)
            }
        }
        let mut tree = RankTree::with_cmp(ByKey);
        assert_eq!(tree.insert(Pair { key: 2, value: 10 }), 1);
        assert_eq!(tree.insert(Pair { key: 7, value: 11 }), 2);
        assert_eq!(tree.insert(Pair { key: 7, value: 22 }), 2);
        assert_eq!(tree.size(), 2);
        assert_eq!(tree.select(2), Some(&Pair { key: 7, value: 22 }));
        tree.check_sanity();
    }

    #[test]
    fn rank_select_remove_consistency() {
        let mut tree = RankTree::new();
        for key in 0..256u32 {
            // 167 is coprime with 256, so this scatters the insertion
            // order while still producing every key exactly once.
            tree.insert(key.wrapping_mul(167) % 256);
        }
        assert_eq!(tree.size(), 256);
        tree.check_sanity();
        for (rank, key) in (1..=256).zip(0..256u32) {
            assert_eq!(tree.select(rank), Some(&key));
            assert_eq!(tree.find(&key), Some(rank));
        }
        // Remove from the middle out and keep the invariants.
        while tree.size() > 0 {
            let middle = (tree.size() + 1) / 2;
            assert!(tree.remove(middle).is_some());
            tree.check_sanity();
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn rank_find_reports_insertion_rank() {
        let mut tree = RankTree::new();
        for key in [60, 70] {
            tree.insert(key);
        }
        assert_eq!(tree.size(), 2);
        assert_eq!(tree.select(1), Some(&60));
        let rank = tree.insert(80);
        assert_eq!(rank, 3);
        assert_eq!(tree.find(&80), Some(3));
        assert_eq!(tree.remove(rank), Some(80));
        assert_eq!(tree.find(&80), None);
        assert_eq!(tree.size(), 2);
    }
}
