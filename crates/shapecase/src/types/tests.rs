//! Descriptor tests.
//!
//! Covers every node kind, union flattening, reference binding, the depth
//! budget, and the diagnostic rendering of descriptors.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::Limits;
    use crate::error::{Error, ErrorCode};
    use crate::runtime::value::{Kind, Value};
    use crate::types::{Reference, Type, any, boolean, float, integer, nothing, string};

    // ─── Helpers ─────────────────────────────────────────────────────────────

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn ok(ty: &Type, json: serde_json::Value) -> bool {
        ty.validate(&v(json)).expect("validate failed")
    }

    fn err(ty: &Type, json: serde_json::Value) -> Error {
        match ty.validate(&v(json)) {
            Ok(b)  => panic!("expected validate to fail, got {b}"),
            Err(e) => e,
        }
    }

    // ─── Primitives ──────────────────────────────────────────────────────────

    #[test]
    fn string_matches_only_strings() {
        assert!(ok(&string(), json!("(↑t)")));
        assert!(!ok(&string(), json!(5)));
        assert!(!ok(&string(), json!(null)));
    }

    #[test]
    fn integer_matches_only_integers() {
        assert!(ok(&integer(), json!(1)));
        assert!(!ok(&integer(), json!("1")));
        assert!(!ok(&integer(), json!(1.0)));
        assert!(!ok(&integer(), json!(true)));
    }

    #[test]
    fn float_matches_only_floats() {
        assert!(ok(&float(), json!(2.5)));
        assert!(!ok(&float(), json!(3)));
        assert!(!ok(&float(), json!("2.5")));
    }

    #[test]
    fn boolean_matches_only_booleans() {
        assert!(ok(&boolean(), json!(true)));
        assert!(ok(&boolean(), json!(false)));
        assert!(!ok(&boolean(), json!(0)));
        assert!(!ok(&boolean(), json!(2.5)));
    }

    #[test]
    fn nothing_matches_only_null() {
        assert!(ok(&nothing(), json!(null)));
        assert!(!ok(&nothing(), json!(5)));
        assert!(!ok(&nothing(), json!("")));
    }

    #[test]
    fn primitives_reject_containers() {
        for kind in [Kind::Nothing, Kind::Boolean, Kind::Integer, Kind::Float, Kind::String] {
            let ty = Type::primitive(kind);
            assert!(!ok(&ty, json!([])));
            assert!(!ok(&ty, json!({})));
        }
    }

    #[test]
    fn any_matches_everything() {
        for doc in [json!(null), json!("x"), json!(1), json!(2.5), json!(false), json!([1]), json!({"a": 1})] {
            assert!(ok(&any(), doc));
        }
    }

    // ─── Literals ────────────────────────────────────────────────────────────

    #[test]
    fn literal_matches_equal_value() {
        let plus = Type::literal("+");
        assert!(ok(&plus, json!("+")));
        assert!(!ok(&plus, json!("-")));
        assert!(!ok(&plus, json!(["+"])));
    }

    #[test]
    fn literal_equality_is_kind_strict() {
        let one = Type::literal(1);
        assert!(ok(&one, json!(1)));
        assert!(!ok(&one, json!(1.0)));
        assert!(!ok(&one, json!(true)));
    }

    #[test]
    fn literal_can_be_a_container() {
        let origin = Type::literal(v(json!([0, 0])));
        assert!(ok(&origin, json!([0, 0])));
        assert!(!ok(&origin, json!([0, 0, 0])));
    }

    // ─── List ────────────────────────────────────────────────────────────────

    #[test]
    fn list_of_integers() {
        let numbers = Type::list(integer());
        assert!(ok(&numbers, json!([])));
        assert!(ok(&numbers, json!([1, 2, 3])));
        assert!(!ok(&numbers, json!([1, "2"])));
        assert!(!ok(&numbers, json!(1)));
        assert!(!ok(&numbers, json!({"0": 1})));
    }

    #[test]
    fn nested_lists() {
        let grid = Type::list(Type::list(integer()));
        assert!(ok(&grid, json!([[1, 2], [], [3]])));
        assert!(!ok(&grid, json!([[1, 2], 3])));
    }

    // ─── Tuple ───────────────────────────────────────────────────────────────

    #[test]
    fn tuple_matches_positionally() {
        let pair = Type::tuple([string(), integer()]);
        assert!(ok(&pair, json!(["a", 1])));
        assert!(!ok(&pair, json!([1, "a"])));
    }

    #[test]
    fn tuple_length_mismatch_is_a_plain_non_match() {
        let pair = Type::tuple([integer(), integer()]);
        assert!(!ok(&pair, json!([1])));
        assert!(!ok(&pair, json!([1, 2, 3])));
        assert!(!ok(&pair, json!("ab")));
    }

    #[test]
    fn empty_tuple_matches_only_empty_list() {
        let unit = Type::tuple(Vec::<Type>::new());
        assert!(ok(&unit, json!([])));
        assert!(!ok(&unit, json!([1])));
    }

    // ─── Record ──────────────────────────────────────────────────────────────

    fn person() -> Type {
        Type::record([("name", string()), ("age", integer())])
    }

    #[test]
    fn record_ignores_extra_keys() {
        assert!(ok(&person(), json!({"name": "Alice", "age": 42})));
        assert!(ok(&person(), json!({"name": "Alice", "age": 42, "extra": true})));
    }

    #[test]
    fn record_requires_every_schema_key() {
        assert!(!ok(&person(), json!({"name": "Alice"})));
        assert!(!ok(&person(), json!({})));
    }

    #[test]
    fn record_checks_field_types() {
        assert!(!ok(&person(), json!({"name": "Alice", "age": "42"})));
        assert!(!ok(&person(), json!(["Alice", 42])));
    }

    #[test]
    fn empty_record_matches_any_map() {
        let anything = Type::record(Vec::<(String, Type)>::new());
        assert!(ok(&anything, json!({})));
        assert!(ok(&anything, json!({"a": 1})));
        assert!(!ok(&anything, json!([])));
    }

    // ─── Union ───────────────────────────────────────────────────────────────

    #[test]
    fn union_matches_any_alternative() {
        let value = integer() | Type::list(integer());
        assert!(ok(&value, json!(1)));
        assert!(ok(&value, json!([1, 2, 3])));
        assert!(!ok(&value, json!("1")));
    }

    #[test]
    fn union_combine_flattens() {
        let ty = integer() | string() | float();
        let Type::Union(alts) = &ty else { panic!("expected union, got {ty:?}") };
        assert_eq!(alts.len(), 3);

        let right = integer() | (string() | float());
        let Type::Union(alts) = &right else { panic!("expected union") };
        assert_eq!(alts.len(), 3);
        assert_eq!(right.to_string(), "Integer | String | Float");
    }

    #[test]
    fn union_constructor_flattens_and_collapses() {
        let ty = Type::union([integer() | string(), float()]);
        assert_eq!(ty.to_string(), "Integer | String | Float");

        let single = Type::union([integer()]);
        assert!(matches!(single, Type::Primitive { kind: Kind::Integer, .. }));
    }

    #[test]
    fn empty_union_matches_nothing() {
        let never = Type::union(Vec::<Type>::new());
        assert!(!ok(&never, json!(null)));
        assert!(!ok(&never, json!(1)));
    }

    #[test]
    fn union_stops_at_first_match() {
        // The second alternative would fail if it were visited.
        let unbound = Reference::new();
        let ty = integer() | unbound.to_type();
        assert!(ok(&ty, json!(1)));
        assert_eq!(err(&ty, json!("x")).code(), ErrorCode::R001);
    }

    // ─── Forward references ──────────────────────────────────────────────────

    #[test]
    fn unbound_reference_fails_validation() {
        let r = Reference::named("Expr");
        let e = err(&r.to_type(), json!(1));
        assert_eq!(e, Error::UnresolvedReference { label: "Expr".into() });
    }

    #[test]
    fn bound_reference_is_transparent() {
        let r = Reference::new();
        r.bind(Type::list(integer())).unwrap();
        let via_ref = r.to_type();
        let direct = Type::list(integer());
        for doc in [json!([]), json!([1, 2]), json!([1, "x"]), json!(3)] {
            assert_eq!(ok(&via_ref, doc.clone()), ok(&direct, doc));
        }
    }

    #[test]
    fn rebinding_is_rejected() {
        let r = Reference::named("Leaf");
        r.bind(integer()).unwrap();
        assert!(ok(&r.to_type(), json!(1)));

        let e = r.bind(string()).unwrap_err();
        assert_eq!(e, Error::AlreadyBound { label: "Leaf".into() });
        // The first target stays in place.
        assert!(ok(&r.to_type(), json!(1)));
        assert!(!ok(&r.to_type(), json!("x")));
    }

    #[test]
    fn clones_share_one_cell() {
        let a = Reference::new();
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        b.bind(integer()).unwrap();
        assert!(a.is_bound());
        assert!(!a.ptr_eq(&Reference::new()));
    }

    #[test]
    fn recursive_expression_grammar() {
        let expr = Reference::named("Expr");
        let op = |sym: &str| Type::tuple([Type::literal(sym), expr.to_type(), expr.to_type()]);
        expr.bind(integer() | op("+") | op("*")).unwrap();

        let e = expr.to_type();
        assert!(ok(&e, json!(7)));
        assert!(ok(&e, json!(["+", 2, ["*", 3, 4]])));
        assert!(!ok(&e, json!(["-", 2, 3])));
        assert!(!ok(&e, json!(["+", 2])));
        assert!(!ok(&e, json!(["+", 2, ["*", 3, "4"]])));
    }

    #[test]
    fn mutually_recursive_tree() {
        let tree = Reference::named("Tree");
        let leaf = Reference::named("Leaf");
        let branch = Reference::named("Branch");
        tree.bind(Type::from(&leaf) | &branch).unwrap();
        leaf.bind(integer()).unwrap();
        branch.bind(Type::tuple([&tree, &tree])).unwrap();

        assert!(ok(&tree.to_type(), json!([1, [2, 3]])));
        assert!(ok(&branch.to_type(), json!([1, 2])));
        assert!(!ok(&branch.to_type(), json!(1)));
        assert!(!ok(&tree.to_type(), json!([1, [2]])));
    }

    // ─── Depth budget ────────────────────────────────────────────────────────

    #[test]
    fn self_alias_hits_depth_limit() {
        let r = Reference::new();
        r.bind(r.to_type() | string()).unwrap();
        let e = r.to_type().validate_with(&v(json!(1)), &Limits::with_max_depth(32)).unwrap_err();
        assert_eq!(e, Error::DepthExceeded { max: 32 });
    }

    #[test]
    fn deep_data_within_budget() {
        let nested = Reference::new();
        nested.bind(integer() | Type::list(&nested)).unwrap();
        let mut doc = json!(1);
        for _ in 0..50 {
            doc = json!([doc]);
        }
        assert!(ok(&nested.to_type(), doc.clone()));
        let tight = Limits::with_max_depth(10);
        assert!(nested.to_type().validate_with(&v(doc), &tight).is_err());
    }

    #[test]
    fn default_budget_is_256_steps() {
        assert_eq!(Limits::default().max_depth, 256);
        assert_eq!(Limits::default(), Limits::with_max_depth(crate::config::DEFAULT_MAX_DEPTH));

        // Each level of nesting costs a reference, a union and a list step.
        let nested = Reference::named("Nested");
        nested.bind(integer() | Type::list(&nested)).unwrap();
        let mut doc = json!(1);
        for _ in 0..100 {
            doc = json!([doc]);
        }
        let e = nested.to_type().validate(&v(doc)).unwrap_err();
        assert_eq!(e, Error::DepthExceeded { max: 256 });
        assert_eq!(e.code(), ErrorCode::R003);
    }

    // ─── Idempotence ─────────────────────────────────────────────────────────

    #[test]
    fn revalidation_is_stable() {
        let ty = person();
        let doc = v(json!({"name": "Bob", "age": 7}));
        let first = ty.validate(&doc).unwrap();
        for _ in 0..10 {
            assert_eq!(ty.validate(&doc).unwrap(), first);
        }
        assert_eq!(doc, v(json!({"name": "Bob", "age": 7})));
    }

    // ─── Display ─────────────────────────────────────────────────────────────

    #[test]
    fn display_renders_descriptors() {
        let expr = Reference::named("Expr");
        let add = Type::tuple([Type::literal("+"), expr.to_type(), expr.to_type()]);
        assert_eq!(add.to_string(), r#"Tuple(<"+">, Expr, Expr)"#);
        assert_eq!(Type::list(integer()).to_string(), "List(Integer)");
        assert_eq!(person().to_string(), "Record({age: Integer, name: String})");
        assert_eq!(Type::literal_labeled("+", "Plus").to_string(), "Plus");
        assert_eq!(Type::primitive_labeled(Kind::Integer, "Int").to_string(), "Int");
        assert_eq!(Reference::new().to_type().to_string(), "Ref");
        assert_eq!(any().to_string(), "Any");
    }

    #[test]
    fn display_does_not_follow_cycles() {
        let r = Reference::named("Loop");
        r.bind(Type::list(&r)).unwrap();
        assert_eq!(r.get().unwrap().to_string(), "List(Loop)");
        assert!(format!("{r:?}").contains("Loop"));
    }
}
