#![cfg(test)]

// Property tests for Dict kept inside the crate so they can inspect the
// backing array directly.

use crate::bucket::Bucket;
use crate::dict::{Dict, Slot};
use crate::mix::{Lcg32, Mix, SplitMix32};
use crate::probe::{locate, Probe};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    GetOrInsert(usize, i32),
    Get(usize),
    Contains(u32),
    Mutate(usize, i32),
    Slot(usize),
    Iterate,
}

fn arb_scenario(spread: u32) -> impl Strategy<Value = (Vec<u32>, Vec<OpI>)> {
    // `spread` of 1 draws arbitrary keys; larger values force many keys onto
    // the same home bucket of a 10-bucket table.
    proptest::collection::vec(any::<u32>(), 1..=40).prop_flat_map(move |raw| {
        let pool: Vec<u32> = raw.iter().map(|k| (k % (u32::MAX / spread)) * spread).collect();
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::GetOrInsert(i, v)),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![contains_pool, any::<u32>()].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            idx.clone().prop_map(OpI::Slot),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Structural invariants of the backing array:
// - `len` equals the number of occupied buckets and stays under half capacity.
// - No key is stored twice.
// - Every stored key is reachable: probing for it finds its own bucket.
fn check_structure<M: Mix>(d: &Dict<i32, M>) -> Result<(), TestCaseError> {
    let buckets: &[Bucket<i32>] = d.buckets_for_test();
    let keys: Vec<u32> = buckets.iter().filter_map(|b| b.entry()).map(|(k, _)| k).collect();
    prop_assert_eq!(keys.len(), d.len());
    prop_assert!(2 * d.len() <= d.capacity());
    let unique: BTreeSet<u32> = keys.iter().copied().collect();
    prop_assert_eq!(unique.len(), keys.len());
    for (i, b) in buckets.iter().enumerate() {
        if let Some((k, _)) = b.entry() {
            prop_assert_eq!(locate(d.mixer(), buckets, k), Probe::Found(i));
        }
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Upsert: the displaced value matches the model; `len` tracks distinct keys.
// - `get`/`contains_key` parity with the model, including never-inserted keys.
// - `get_or_insert_with` runs its constructor only when the key is absent.
// - Slots taken earlier resolve iff no rebuild happened since.
// - `iter` yields each live entry exactly once.
fn run<M: Mix>(mut sut: Dict<i32, M>, pool: Vec<u32>, ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let mut model: HashMap<u32, i32> = HashMap::new();
    let mut slots: Vec<(Slot, u32)> = Vec::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i];
                let prev = sut.insert(k, v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::GetOrInsert(i, v) => {
                let k = pool[i];
                let mut ran = false;
                let got = *sut.get_or_insert_with(k, || {
                    ran = true;
                    v
                });
                prop_assert_eq!(ran, !model.contains_key(&k));
                let expected = *model.entry(k).or_insert(v);
                prop_assert_eq!(got, expected);
            }
            OpI::Get(i) => {
                let k = pool[i];
                prop_assert_eq!(sut.get(k), model.get(&k));
            }
            OpI::Contains(k) => {
                prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
            }
            OpI::Mutate(i, d) => {
                let k = pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(&k) {
                    *v = v.wrapping_add(d);
                }
            }
            OpI::Slot(i) => {
                let k = pool[i];
                match sut.find_slot(k) {
                    Some(s) => {
                        prop_assert!(model.contains_key(&k));
                        slots.push((s, k));
                    }
                    None => prop_assert!(!model.contains_key(&k)),
                }
            }
            OpI::Iterate => {
                let mut seen: HashMap<u32, i32> = HashMap::new();
                for (k, v) in sut.iter() {
                    prop_assert!(seen.insert(k, *v).is_none());
                }
                prop_assert_eq!(&seen, &model);
            }
        }

        for &(s, k) in &slots {
            if s.generation() == sut.generation() {
                prop_assert_eq!(s.key(&sut), Some(k));
                prop_assert_eq!(s.value(&sut), model.get(&k));
            } else {
                prop_assert!(s.value(&sut).is_none());
            }
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        check_structure(&sut)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(1)) {
        run(Dict::<i32>::new(), pool, ops)?;
    }
}

// Property: same state-machine invariants with every key sharing a home
// bucket modulo 10, which forces long probe chains before the first rebuild.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(10)) {
        run(Dict::<i32, SplitMix32>::with_mixer(SplitMix32), pool, ops)?;
    }

    #[test]
    fn prop_state_machine_lcg((pool, ops) in arb_scenario(10)) {
        run(Dict::<i32, Lcg32>::with_mixer(Lcg32), pool, ops)?;
    }
}
