//! Tree fringe.
//!
//! ```text
//! Tree   = Leaf | Branch
//! Leaf   = Integer
//! Branch = (Tree, Tree)
//! ```
//!
//! `flatten` returns the leaves left to right.

use shapecase::types::integer;
use shapecase::{Error, Methods, Reference, Type, Value};

pub const METHOD: &str = "flatten";

pub fn sample() -> Value {
    Value::from(serde_json::json!([1, [2, 3]]))
}

pub fn methods() -> Result<Methods, Error> {
    let tree = Reference::named("Tree");
    let leaf = Reference::named("Leaf");
    let branch = Reference::named("Branch");
    tree.bind(Type::from(&leaf) | &branch)?;
    leaf.bind(integer())?;
    branch.bind(Type::tuple([&tree, &tree]))?;

    let mut m = Methods::new();
    m.register(METHOD, [leaf.to_type()], |_, args| Ok(Value::List(vec![args[0].clone()])))?;
    m.register(METHOD, [branch.to_type()], |m, args| {
        let mut out = Vec::new();
        for child in children(&args[0])? {
            match m.invoke(METHOD, std::slice::from_ref(child))? {
                Value::List(items) => out.extend(items),
                other => return Err(Error::failed(METHOD, format!("expected a list, got {other}"))),
            }
        }
        Ok(Value::List(out))
    })?;
    Ok(m)
}

pub fn run(m: &Methods, input: &Value) -> Result<Value, Error> {
    m.invoke(METHOD, std::slice::from_ref(input))
}

fn children(branch: &Value) -> Result<&[Value], Error> {
    branch.as_list().ok_or_else(|| Error::failed(METHOD, format!("expected a branch, got {branch}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shapecase::ErrorCode;

    fn flatten(doc: serde_json::Value) -> Result<Value, Error> {
        run(&methods().unwrap(), &Value::from(doc))
    }

    #[test]
    fn sample_fringe() {
        assert_eq!(run(&methods().unwrap(), &sample()).unwrap(), Value::from(json!([1, 2, 3])));
    }

    #[test]
    fn single_leaf() {
        assert_eq!(flatten(json!(7)).unwrap(), Value::from(json!([7])));
    }

    #[test]
    fn deep_left_spine() {
        let doc = json!([[[[1, 2], 3], 4], 5]);
        assert_eq!(flatten(doc).unwrap(), Value::from(json!([1, 2, 3, 4, 5])));
    }

    #[test]
    fn non_list_branch_is_a_failure() {
        let e = children(&Value::Int(4)).unwrap_err();
        assert_eq!(e, Error::failed(METHOD, "expected a branch, got 4"));
        assert_eq!(e.code(), ErrorCode::D004);
        assert_eq!(children(&Value::from(json!([1, 2]))).unwrap().len(), 2);
    }

    #[test]
    fn non_binary_branch_has_no_match() {
        assert_eq!(flatten(json!([1, 2, 3])).unwrap_err().code(), ErrorCode::D003);
        assert_eq!(flatten(json!([1, [2, "x"]])).unwrap_err().code(), ErrorCode::D003);
    }
}
