use core::hash::BuildHasher;
use core::hash::Hasher;
use std::collections::BTreeSet;
use std::collections::HashMap;

use proptest::prelude::*;

use super::*;

/// Folds keys into 15 distinct hashes spread over a few groups, so probes
/// run long and removals leave tombstones.
#[derive(Clone, Default)]
struct LowEntropyState;

#[derive(Default)]
struct LowEntropyHasher(u64);

impl Hasher for LowEntropyHasher {
    fn finish(&self) -> u64 {
        ((self.0 % 5) << 7) | (self.0 % 3)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_mul(31).wrapping_add(b as u64);
        }
    }
}

impl BuildHasher for LowEntropyState {
    type Hasher = LowEntropyHasher;

    fn build_hasher(&self) -> Self::Hasher {
        LowEntropyHasher::default()
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(u16, u32),
    Remove(u16),
    Get(u16),
    Rehash(u16),
}

fn ops_strategy(key_space: u16) -> impl Strategy<Value = Vec<Op>> {
    let key = 0..key_space;
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        19 => key.prop_map(Op::Get),
        1 => (0u16..512).prop_map(Op::Rehash),
    ];
    prop::collection::vec(op, 0..=1500)
}

fn check_against_model<S: BuildHasher>(
    map: &mut FlatHashMap<u16, u32, S>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<u16, u32> = HashMap::new();

    for op in ops {
        match op {
            Op::Put(key, value) => {
                prop_assert_eq!(map.put(key, value), model.insert(key, value));
                prop_assert!(map.len() <= map.capacity() / 16 * 14);
            }
            Op::Remove(key) => {
                prop_assert_eq!(map.remove(&key), model.remove(&key));
                prop_assert!(!map.contains(&key));
            }
            Op::Get(key) => {
                prop_assert_eq!(map.get(&key), model.get(&key));
            }
            Op::Rehash(capacity) => {
                map.rehash(capacity as usize);
            }
        }

        prop_assert_eq!(map.len(), model.len());
        map.raw_table().assert_invariants();
    }

    let mut got: Vec<(u16, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    let mut expected: Vec<(u16, u32)> = model.into_iter().collect();
    got.sort_unstable();
    expected.sort_unstable();
    prop_assert_eq!(got, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 20_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_default_hasher(ops in ops_strategy(2048)) {
        let mut map = FlatHashMap::new();
        check_against_model(&mut map, ops)?;
    }

    #[test]
    fn prop_equivalence_low_entropy(ops in ops_strategy(256)) {
        let mut map = FlatHashMap::with_capacity_and_hasher(16, LowEntropyState);
        check_against_model(&mut map, ops)?;
    }

    #[test]
    fn prop_set_algebra(
        a in prop::collection::btree_set(0u16..300, 0..200),
        b in prop::collection::btree_set(0u16..300, 0..200),
    ) {
        let fa: FlatHashSet<u16> = a.iter().copied().collect();
        let fb: FlatHashSet<u16> = b.iter().copied().collect();

        let sorted = |s: &FlatHashSet<u16>| s.iter().copied().collect::<BTreeSet<u16>>();

        prop_assert_eq!(
            sorted(&fa.union(&fb)),
            a.union(&b).copied().collect::<BTreeSet<u16>>()
        );
        prop_assert_eq!(
            sorted(&fa.intersection(&fb)),
            a.intersection(&b).copied().collect::<BTreeSet<u16>>()
        );
        prop_assert_eq!(
            sorted(&fa.difference(&fb)),
            a.difference(&b).copied().collect::<BTreeSet<u16>>()
        );
        prop_assert_eq!(fa.is_disjoint(&fb), a.is_disjoint(&b));
        prop_assert_eq!(fa.is_subset(&fb), a.is_subset(&b));
    }
}

#[test]
fn churn_on_low_entropy_hashes_terminates() {
    let mut map = FlatHashMap::with_capacity_and_hasher(16, LowEntropyState);
    let mut model = HashMap::new();
    for step in 0..5_000u32 {
        let key = (step.wrapping_mul(2_654_435_761) >> 22) as u16;
        if step % 3 == 0 {
            assert_eq!(map.remove(&key), model.remove(&key));
        } else {
            assert_eq!(map.put(key, step), model.insert(key, step));
        }
    }
    assert_eq!(map.len(), model.len());
    map.raw_table().assert_invariants();
}
