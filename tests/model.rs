//! Property tests checking `FatVec` against `Vec` as a reference model.

use fatvec::{Config, FatVec};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Pop,
    PopFront,
    Erase(usize),
    Truncate(usize),
    Resize(usize, i32),
    ResizeDefault(usize),
    AssignFill(usize, i32),
    AssignRange(Vec<i32>),
    ExtendFromSlice(Vec<i32>),
    Reserve(usize),
    ShrinkToFit,
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        1 => Just(Op::PopFront),
        1 => (0usize..64).prop_map(Op::Erase),
        1 => (0usize..64).prop_map(Op::Truncate),
        1 => (0usize..64, any::<i32>()).prop_map(|(n, x)| Op::Resize(n, x)),
        1 => (0usize..64).prop_map(Op::ResizeDefault),
        1 => (0usize..32, any::<i32>()).prop_map(|(n, x)| Op::AssignFill(n, x)),
        1 => proptest::collection::vec(any::<i32>(), 0..32).prop_map(Op::AssignRange),
        1 => proptest::collection::vec(any::<i32>(), 0..32).prop_map(Op::ExtendFromSlice),
        1 => (0usize..128).prop_map(Op::Reserve),
        1 => Just(Op::ShrinkToFit),
        1 => Just(Op::Clear),
    ]
}

fn apply(v: &mut FatVec<i32>, model: &mut Vec<i32>, op: Op) -> Result<(), TestCaseError> {
    match op {
        Op::Push(x) => {
            v.push_back(x);
            model.push(x);
        }
        Op::Pop => {
            prop_assert_eq!(v.pop_back(), model.pop());
        }
        Op::PopFront => {
            let expected = (!model.is_empty()).then(|| model.remove(0));
            prop_assert_eq!(v.pop_front(), expected);
        }
        Op::Erase(i) => {
            let expected = (i < model.len()).then(|| model.remove(i));
            prop_assert_eq!(v.erase(i), expected);
        }
        Op::Truncate(n) => {
            v.truncate(n);
            model.truncate(n);
        }
        Op::Resize(n, x) => {
            v.resize(n, x);
            model.resize(n, x);
        }
        Op::ResizeDefault(n) => {
            v.resize_default(n);
            model.resize(n, 0);
        }
        Op::AssignFill(n, x) => {
            v.assign_fill(n, x);
            model.clear();
            model.resize(n, x);
        }
        Op::AssignRange(items) => {
            v.assign_range(&items);
            *model = items;
        }
        Op::ExtendFromSlice(items) => {
            v.extend_from_slice(&items);
            model.extend_from_slice(&items);
        }
        Op::Reserve(n) => {
            let before = v.capacity();
            v.reserve(n);
            prop_assert_eq!(v.capacity(), before.max(n));
        }
        Op::ShrinkToFit => {
            v.shrink_to_fit();
            prop_assert_eq!(v.capacity(), v.len());
        }
        Op::Clear => {
            v.clear();
            model.clear();
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn matches_vec_model(ops in proptest::collection::vec(arb_op(), 0..200)) {
        let mut v = FatVec::new();
        let mut model = Vec::new();
        for op in ops {
            apply(&mut v, &mut model, op)?;
            prop_assert_eq!(v.as_slice(), model.as_slice());
            prop_assert!(v.len() <= v.capacity());
            prop_assert_eq!(v.is_allocated(), v.capacity() > 0);
        }
    }

    #[test]
    fn at_agrees_with_get(
        items in proptest::collection::vec(any::<i32>(), 0..64),
        index in 0usize..128,
        fallback in any::<i32>(),
    ) {
        let mut v = FatVec::with_policy(0, Config::new(fallback));
        v.assign_range(items.as_slice());
        prop_assert_eq!(v.at(index), items.get(index).copied().unwrap_or(fallback));
    }

    #[test]
    fn growth_keeps_prefix(
        items in proptest::collection::vec(any::<u8>(), 1..256),
        factor in 1.0f64..4.0,
    ) {
        let config = Config::new(0u8).with_growth_factor(factor).unwrap();
        let mut v = FatVec::with_policy(0, config);
        for (i, &x) in items.iter().enumerate() {
            v.push_back(x);
            prop_assert_eq!(&v[..=i], &items[..=i]);
        }
    }

    #[test]
    fn collect_and_into_iter_round_trip(items in proptest::collection::vec(any::<i64>(), 0..128)) {
        let v: FatVec<i64> = items.iter().copied().collect();
        prop_assert_eq!(v.len(), items.len());
        let back: Vec<i64> = v.into_iter().rev().collect();
        let expected: Vec<i64> = items.into_iter().rev().collect();
        prop_assert_eq!(back, expected);
    }
}
