use super::*;

use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;
use std::collections::HashMap;

// Model identity mirrors key identity: the (tag, repr) pair.
type ModelKey = (KeyTag, String);

fn model_key(value: &Value) -> Option<ModelKey> {
    Key::try_from(value.clone())
        .ok()
        .map(|k| (k.tag(), k.repr().into_owned()))
}

fn model_key_of(key: &Key) -> ModelKey {
    (key.tag(), key.repr().into_owned())
}

// Deliberately collision-heavy: the interesting keys are the ones whose
// reprs coincide across tags (1 vs "1", true vs "true", NaN vs "NaN").
fn key_strategy() -> impl Strategy<Value = Value> + Clone {
    prop_oneof![
        4 => (-3i8..=3).prop_map(|n| Value::Num(n as f64)),
        2 => prop::sample::select(vec![-0.0f64, 0.5, 1e100, f64::NAN, f64::INFINITY])
            .prop_map(Value::Num),
        2 => any::<bool>().prop_map(Value::Bool),
        4 => prop::sample::select(vec![
            "", "0", "1", "-1", "true", "false", "null", "undefined", "NaN", "a", "b",
        ])
        .prop_map(|s| Value::Str(s.to_string())),
        1 => Just(Value::Null),
        1 => Just(Value::Undefined),
        1 => Just(Value::List(vec![Value::Num(1.0)])),
    ]
}

#[derive(Clone, Debug)]
enum Op {
    Set(Value, i64),
    Get(Value),
    Remove(Value),
    Contains(Value),
    PopFirst,
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        40 => (key.clone(), any::<i64>()).prop_map(|(k, v)| Op::Set(k, v)),
        25 => key.clone().prop_map(Op::Get),
        20 => key.clone().prop_map(Op::Remove),
        10 => key.clone().prop_map(Op::Contains),
        4 => Just(Op::PopFirst),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

#[derive(Clone, Debug)]
enum CountOp {
    Add(Value),
    Subtract(Value),
    SetCount(Value, i64),
    Count(Value),
    Remove(Value),
}

fn count_ops_strategy() -> impl Strategy<Value = Vec<CountOp>> {
    let key = key_strategy();
    let op = prop_oneof![
        40 => key.clone().prop_map(CountOp::Add),
        25 => key.clone().prop_map(CountOp::Subtract),
        10 => (key.clone(), -5i64..=5).prop_map(|(k, v)| CountOp::SetCount(k, v)),
        15 => key.clone().prop_map(CountOp::Count),
        10 => key.clone().prop_map(CountOp::Remove),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_dict_matches_hash_map(ops in ops_strategy()) {
        let mut d: Dict<i64> = Dict::new();
        let mut m: HashMap<ModelKey, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Set(key, value) => match model_key(&key) {
                    Some(mk) => {
                        prop_assert_eq!(d.set(key, value).unwrap(), m.insert(mk, value));
                    }
                    None => prop_assert!(d.set(key, value).is_err()),
                },
                Op::Get(key) => match model_key(&key) {
                    Some(mk) => {
                        prop_assert_eq!(d.get_opt(key).unwrap().copied(), m.get(&mk).copied());
                    }
                    None => prop_assert!(d.get_opt(key).is_err()),
                },
                Op::Remove(key) => match model_key(&key) {
                    Some(mk) => {
                        prop_assert_eq!(d.remove_opt(key).unwrap(), m.remove(&mk));
                    }
                    None => prop_assert!(d.remove_opt(key).is_err()),
                },
                Op::Contains(key) => match model_key(&key) {
                    Some(mk) => {
                        prop_assert_eq!(d.contains_key(key).unwrap(), m.contains_key(&mk));
                    }
                    None => prop_assert!(d.contains_key(key).is_err()),
                },
                Op::PopFirst => match d.pop_first() {
                    Ok((key, value)) => {
                        prop_assert_eq!(m.remove(&model_key_of(&key)), Some(value));
                    }
                    Err(_) => prop_assert!(m.is_empty()),
                },
                Op::Clear => {
                    d.clear();
                    m.clear();
                }
            }
            prop_assert_eq!(d.len(), m.len());
        }

        let got: HashMap<ModelKey, i64> =
            d.iter().map(|(k, v)| (model_key_of(&k), *v)).collect();
        prop_assert_eq!(got, m);
    }

    #[test]
    fn prop_ordered_dict_matches_ordered_model(ops in ops_strategy()) {
        let mut d: OrderedDict<i64> = OrderedDict::new();
        let mut m: Vec<(ModelKey, i64)> = Vec::new();

        for op in ops {
            match op {
                Op::Set(key, value) => match model_key(&key) {
                    Some(mk) => {
                        let previous = d.set(key, value).unwrap();
                        match m.iter_mut().find(|(k, _)| *k == mk) {
                            Some(slot) => {
                                prop_assert_eq!(previous, Some(slot.1));
                                slot.1 = value;
                            }
                            None => {
                                prop_assert_eq!(previous, None);
                                m.push((mk, value));
                            }
                        }
                    }
                    None => prop_assert!(d.set(key, value).is_err()),
                },
                Op::Get(key) => match model_key(&key) {
                    Some(mk) => {
                        let expected = m.iter().find(|(k, _)| *k == mk).map(|(_, v)| *v);
                        prop_assert_eq!(d.get_opt(key).unwrap().copied(), expected);
                    }
                    None => prop_assert!(d.get_opt(key).is_err()),
                },
                Op::Remove(key) => match model_key(&key) {
                    Some(mk) => {
                        let pos = m.iter().position(|(k, _)| *k == mk);
                        let expected = pos.map(|i| m.remove(i).1);
                        prop_assert_eq!(d.remove_opt(key).unwrap(), expected);
                    }
                    None => prop_assert!(d.remove_opt(key).is_err()),
                },
                Op::Contains(key) => match model_key(&key) {
                    Some(mk) => {
                        let expected = m.iter().any(|(k, _)| *k == mk);
                        prop_assert_eq!(d.contains_key(key).unwrap(), expected);
                    }
                    None => prop_assert!(d.contains_key(key).is_err()),
                },
                Op::PopFirst => match d.pop_first() {
                    Ok((key, value)) => {
                        prop_assert!(!m.is_empty());
                        let (mk, mv) = m.remove(0);
                        prop_assert_eq!(model_key_of(&key), mk);
                        prop_assert_eq!(value, mv);
                    }
                    Err(_) => prop_assert!(m.is_empty()),
                },
                Op::Clear => {
                    d.clear();
                    m.clear();
                }
            }
            prop_assert_eq!(d.len(), m.len());
        }

        // Iteration must replay the model's insertion order exactly.
        let got: Vec<(ModelKey, i64)> =
            d.iter().map(|(k, v)| (model_key_of(&k), *v)).collect();
        prop_assert_eq!(got, m);
    }

    #[test]
    fn prop_counter_matches_counting_model(ops in count_ops_strategy()) {
        let mut c = Counter::new();
        let mut m: HashMap<ModelKey, i64> = HashMap::new();

        for op in ops {
            match op {
                CountOp::Add(key) => match model_key(&key) {
                    Some(mk) => {
                        c.update_elements([key]).unwrap();
                        *m.entry(mk).or_insert(0) += 1;
                    }
                    None => prop_assert!(c.update_elements([key]).is_err()),
                },
                CountOp::Subtract(key) => match model_key(&key) {
                    Some(mk) => {
                        c.subtract_elements([key]).unwrap();
                        *m.entry(mk).or_insert(0) -= 1;
                    }
                    None => prop_assert!(c.subtract_elements([key]).is_err()),
                },
                CountOp::SetCount(key, count) => match model_key(&key) {
                    Some(mk) => {
                        c.set(key, count).unwrap();
                        m.insert(mk, count);
                    }
                    None => prop_assert!(c.set(key, count).is_err()),
                },
                CountOp::Count(key) => match model_key(&key) {
                    Some(mk) => {
                        prop_assert_eq!(c.count(key).unwrap(), m.get(&mk).copied().unwrap_or(0));
                    }
                    None => prop_assert!(c.count(key).is_err()),
                },
                CountOp::Remove(key) => match model_key(&key) {
                    Some(mk) => {
                        prop_assert_eq!(c.remove_opt(key).unwrap(), m.remove(&mk));
                    }
                    None => prop_assert!(c.remove_opt(key).is_err()),
                },
            }
            prop_assert_eq!(c.len(), m.len());
        }

        let got: HashMap<ModelKey, i64> =
            c.iter().map(|(k, v)| (model_key_of(&k), *v)).collect();
        prop_assert_eq!(&got, &m);

        // elements() expands positive counts only.
        let positive_total: i64 = m.values().filter(|&&v| v > 0).sum();
        prop_assert_eq!(c.elements().len() as i64, positive_total);

        // most_common is sorted by non-increasing count and covers every key.
        let ranked = c.most_common(None);
        prop_assert_eq!(ranked.len(), m.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }
}

// Deterministic soak against the same model, for a quick non-proptest signal.
#[test]
fn soak_dict_random_ops() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut d: Dict<u32> = Dict::new();
    let mut m: HashMap<ModelKey, u32> = HashMap::new();

    let pool: Vec<Value> = vec![
        Value::Num(0.0),
        Value::Num(1.0),
        Value::Num(2.0),
        Value::Num(-1.0),
        Value::Num(f64::NAN),
        Value::Str("0".into()),
        Value::Str("1".into()),
        Value::Str("NaN".into()),
        Value::Str("true".into()),
        Value::Bool(true),
        Value::Bool(false),
        Value::Null,
        Value::Undefined,
    ];

    for i in 0..20_000u32 {
        let key = pool[rng.gen_range(0..pool.len())].clone();
        let mk = model_key(&key).unwrap();
        match rng.gen_range(0..3) {
            0 => {
                assert_eq!(d.set(key, i).unwrap(), m.insert(mk, i));
            }
            1 => {
                assert_eq!(d.get_opt(key).unwrap().copied(), m.get(&mk).copied());
            }
            _ => {
                assert_eq!(d.remove_opt(key).unwrap(), m.remove(&mk));
            }
        }
        assert_eq!(d.len(), m.len());
    }

    let got: HashMap<ModelKey, u32> = d.iter().map(|(k, v)| (model_key_of(&k), *v)).collect();
    assert_eq!(got, m);
}
