//! Compiler for a small SQL subset.
//!
//! A query is a record naming a table and a list of columns. Tables may be
//! aliased, columns may be plain names, function calls, or aliased
//! expressions. Each shape gets its own method case; `compile_query` returns
//! the SQL text.

use shapecase::types::string;
use shapecase::{Error, Methods, Reference, Type, Value};

pub const METHOD: &str = "compile_query";

pub fn sample() -> Value {
    Value::from(serde_json::json!({
        "table": "sales",
        "columns": [
            {"func": "sum", "args": ["amount"]},
            {"name": "max_quantity", "expr": {"func": "max", "args": ["quantity"]}}
        ]
    }))
}

struct Schema {
    query:         Reference,
    table_alias:   Reference,
    expression:    Reference,
    column_alias:  Reference,
    function_expr: Reference,
}

fn schema() -> Result<Schema, Error> {
    let s = Schema {
        query:         Reference::named("Query"),
        table_alias:   Reference::named("TableAlias"),
        expression:    Reference::named("Expression"),
        column_alias:  Reference::named("ColumnAlias"),
        function_expr: Reference::named("FunctionExpr"),
    };
    let table = string() | &s.table_alias;
    let column = Type::from(&s.expression) | &s.column_alias;

    s.query.bind(Type::record([("table", table), ("columns", Type::list(column))]))?;
    s.table_alias.bind(Type::record([("name", string()), ("table", string())]))?;
    s.expression.bind(string() | &s.function_expr)?;
    s.function_expr.bind(Type::record([
        ("func", string()),
        ("args", Type::list(&s.expression)),
    ]))?;
    s.column_alias.bind(Type::record([
        ("name", string()),
        ("expr", Type::from(&s.expression)),
    ]))?;
    Ok(s)
}

pub fn methods() -> Result<Methods, Error> {
    let s = schema()?;
    let mut m = Methods::new();

    m.register("compile_query", [s.query.to_type()], |m, args| {
        let q = &args[0];
        let table = text(m.invoke("compile_table", &[field(q, "table")?.clone()])?)?;
        let mut columns = Vec::new();
        for c in list(field(q, "columns")?)? {
            columns.push(text(m.invoke("compile_column", std::slice::from_ref(c))?)?);
        }
        Ok(Value::Str(format!("SELECT {} FROM {}", columns.join(", "), table)))
    })?;

    m.register("compile_table", [string()], |_, args| Ok(args[0].clone()))?;
    m.register("compile_table", [s.table_alias.to_type()], |_, args| {
        let t = &args[0];
        Ok(Value::Str(format!("{} AS {}", text_ref(field(t, "table")?)?, text_ref(field(t, "name")?)?)))
    })?;

    m.register("compile_column", [s.expression.to_type()], |m, args| m.invoke("compile_expr", args))?;
    m.register("compile_column", [s.column_alias.to_type()], |m, args| {
        let alias = &args[0];
        let expr = text(m.invoke("compile_expr", std::slice::from_ref(field(alias, "expr")?))?)?;
        Ok(Value::Str(format!("{expr} AS {}", text_ref(field(alias, "name")?)?)))
    })?;

    m.register("compile_expr", [string()], |_, args| Ok(args[0].clone()))?;
    m.register("compile_expr", [s.function_expr.to_type()], |m, args| {
        let f = &args[0];
        let mut rendered = Vec::new();
        for arg in list(field(f, "args")?)? {
            rendered.push(text(m.invoke("compile_expr", std::slice::from_ref(arg))?)?);
        }
        Ok(Value::Str(format!("{}({})", text_ref(field(f, "func")?)?, rendered.join(", "))))
    })?;

    Ok(m)
}

pub fn run(m: &Methods, input: &Value) -> Result<Value, Error> {
    m.invoke(METHOD, std::slice::from_ref(input))
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn field<'a>(v: &'a Value, key: &str) -> Result<&'a Value, Error> {
    v.get(key).ok_or_else(|| Error::failed(METHOD, format!("missing field `{key}` in {v}")))
}

fn list(v: &Value) -> Result<&[Value], Error> {
    v.as_list().ok_or_else(|| Error::failed(METHOD, format!("expected a list, got {v}")))
}

fn text(v: Value) -> Result<String, Error> {
    match v {
        Value::Str(s) => Ok(s),
        other => Err(Error::failed(METHOD, format!("expected text, got {other}"))),
    }
}

fn text_ref(v: &Value) -> Result<&str, Error> {
    v.as_str().ok_or_else(|| Error::failed(METHOD, format!("expected text, got {v}")))
}
