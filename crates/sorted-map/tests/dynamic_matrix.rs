use serde_json::{json, Value};
use sorted_map::{CmpArg, ComparisonError, DynSortedMap, NodeRef, SortedMapError};

fn in_order(map: &DynSortedMap) -> Vec<Value> {
    fn walk(node: Option<NodeRef<'_, Value, Value>>, out: &mut Vec<Value>) {
        if let Some(node) = node {
            walk(node.left(), out);
            out.push(node.key().clone());
            walk(node.right(), out);
        }
    }
    let mut out = Vec::new();
    walk(map.root(), &mut out);
    out
}

fn int_diff(a: &Value, b: &Value) -> Result<Value, String> {
    match (a.as_i64(), b.as_i64()) {
        (Some(a), Some(b)) => Ok(json!(a - b)),
        _ => Err(format!("cannot subtract {b} from {a}")),
    }
}

#[test]
fn dynamic_non_callable_comparator_matrix() {
    for arg in [json!(42), json!("cmp"), json!(null), json!({"f": 1})] {
        let err = DynSortedMap::from_host(Some(CmpArg::Object(arg))).unwrap_err();
        assert!(matches!(err, SortedMapError::Config(_)), "{err:?}");
        assert!(err.to_string().contains("comparator must be callable"));
    }
    let err = DynSortedMap::from_host(Some(CmpArg::Object(json!([1])))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid sorted map configuration: comparator must be callable, got array"
    );
}

#[test]
fn dynamic_natural_order_matrix() {
    let mut map = DynSortedMap::from_host(None).unwrap();
    for k in [json!(3), json!(1.5), json!(-2), json!(10)] {
        map.put(k, json!(null)).unwrap();
    }
    assert_eq!(in_order(&map), vec![json!(-2), json!(1.5), json!(3), json!(10)]);
    assert_eq!(map.contains(&json!(3.0)), Ok(true));
    map.assert_valid().unwrap();

    let mut map = DynSortedMap::from_host(None).unwrap();
    for k in [json!([1, 2]), json!([1]), json!([0, 5])] {
        assert_eq!(map.put(k, json!(true)), Ok(None));
    }
    // ["a"] cannot be ordered against the numeric arrays.
    assert!(matches!(
        map.put(json!(["a"]), json!(true)),
        Err(SortedMapError::Comparison(ComparisonError::Unorderable { .. }))
    ));
    assert_eq!(in_order(&map), vec![json!([0, 5]), json!([1]), json!([1, 2])]);
    assert_eq!(map.size(), 3);
}

#[test]
fn dynamic_int_and_float_keys_stay_distinct_matrix() {
    let mut map = DynSortedMap::from_host(None).unwrap();
    assert_eq!(map.put(json!(9007199254740993i64), json!("int")), Ok(None));
    assert_eq!(map.put(json!(9007199254740992.0), json!("float")), Ok(None));
    assert_eq!(map.size(), 2);
    assert_eq!(
        in_order(&map),
        vec![json!(9007199254740992.0), json!(9007199254740993i64)]
    );
    assert_eq!(map.get(&json!(9007199254740993i64)), Ok(Some(&json!("int"))));

    // Equal by value: the float replaces the integer's value.
    assert_eq!(map.put(json!(7), json!("seven")), Ok(None));
    assert_eq!(map.put(json!(7.0), json!("7.0")), Ok(Some(json!("seven"))));
    assert_eq!(map.size(), 3);
    map.assert_valid().unwrap();
}

#[test]
fn dynamic_arrays_with_equal_objects_matrix() {
    let mut map = DynSortedMap::from_host(None).unwrap();
    assert_eq!(map.put(json!([{"a": 1}, 2]), json!(0)), Ok(None));
    assert_eq!(map.put(json!([{"a": 1.0}, 1]), json!(1)), Ok(None));
    assert_eq!(
        in_order(&map),
        vec![json!([{"a": 1.0}, 1]), json!([{"a": 1}, 2])]
    );
    // Objects that differ have no order.
    assert!(matches!(
        map.put(json!([{"a": 2}, 0]), json!(2)),
        Err(SortedMapError::Comparison(ComparisonError::Unorderable {
            left: "object",
            right: "object",
            ..
        }))
    ));
    assert_eq!(map.size(), 2);
}

#[test]
fn dynamic_unorderable_keys_matrix() {
    let mut map = DynSortedMap::from_host(None).unwrap();
    map.put(json!("a"), json!(1)).unwrap();

    let err = map.put(json!(1), json!(2)).unwrap_err();
    assert_eq!(
        err,
        SortedMapError::Comparison(ComparisonError::Unorderable {
            op: "<",
            left: "number",
            right: "string",
        })
    );
    assert_eq!(err.to_string(), "'<' is not defined between number and string");
    assert!(map.get(&json!(1)).is_err());
    assert!(map.contains(&json!(null)).is_err());
    assert_eq!(map.size(), 1);
    assert_eq!(map.get(&json!("a")), Ok(Some(&json!(1))));
}

#[test]
fn dynamic_null_keys_matrix() {
    let mut map = DynSortedMap::from_host(None).unwrap();
    // The first key is never compared.
    assert_eq!(map.put(json!(null), json!(0)), Ok(None));
    assert!(matches!(
        map.put(json!(null), json!(1)),
        Err(SortedMapError::Comparison(ComparisonError::Unorderable { .. }))
    ));
    assert_eq!(map.size(), 1);
}

#[test]
fn dynamic_host_comparator_matrix() {
    let mut map = DynSortedMap::from_host(Some(CmpArg::callable(int_diff))).unwrap();
    for k in [5, 1, 9, 3] {
        map.put(json!(k), json!(k.to_string())).unwrap();
    }
    assert_eq!(in_order(&map), vec![json!(1), json!(3), json!(5), json!(9)]);
    assert_eq!(map.get(&json!(9)), Ok(Some(&json!("9"))));

    let err = map.put(json!("x"), json!(0)).unwrap_err();
    assert!(matches!(
        err,
        SortedMapError::Comparison(ComparisonError::Comparator(ref msg)) if msg.contains("cannot subtract")
    ));
    assert_eq!(map.size(), 4);
    map.assert_valid().unwrap();
}

#[test]
fn dynamic_host_non_integer_matrix() {
    let mut map =
        DynSortedMap::from_host(Some(CmpArg::callable(|_: &Value, _: &Value| Ok(json!(0.25)))))
            .unwrap();
    map.put(json!(1), json!(1)).unwrap();
    assert_eq!(
        map.put(json!(2), json!(2)),
        Err(SortedMapError::Comparison(ComparisonError::NonInteger(
            "0.25".to_string()
        )))
    );
    assert_eq!(map.size(), 1);
}

#[test]
fn dynamic_remove_is_rejected_matrix() {
    let mut map = DynSortedMap::from_host(None).unwrap();
    map.put(json!(1), json!(1)).unwrap();
    assert_eq!(
        map.remove(&json!(1)),
        Err(SortedMapError::NotImplemented("deleting a key"))
    );
    assert_eq!(map.size(), 1);
}
