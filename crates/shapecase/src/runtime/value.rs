//! Dynamic runtime values: the untyped data that descriptors are matched against.
//!
//! Equality is strict across kinds: `Int(1) != Float(1.0)` and
//! `Bool(true) != Int(1)`. Floats compare with IEEE semantics, so `NaN`
//! never equals itself.

use std::collections::BTreeMap;
use std::fmt;

// ─── Scalar kinds ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Nothing,
    Boolean,
    Integer,
    Float,
    String,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Nothing => "Nothing",
            Kind::Boolean => "Boolean",
            Kind::Integer => "Integer",
            Kind::Float   => "Float",
            Kind::String  => "String",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Value ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Scalar kind of this value. Containers have none.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::Null     => Some(Kind::Nothing),
            Value::Bool(_)  => Some(Kind::Boolean),
            Value::Int(_)   => Some(Kind::Integer),
            Value::Float(_) => Some(Kind::Float),
            Value::Str(_)   => Some(Kind::String),
            Value::List(_)
            | Value::Map(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::List(_) => "List",
            Value::Map(_)  => "Map",
            scalar         => scalar.kind().map_or("", |k| k.name()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self { Value::Bool(b) => Some(*b), _ => None }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self { Value::Int(i) => Some(*i), _ => None }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self { Value::Float(x) => Some(*x), _ => None }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self { Value::Str(s) => Some(s), _ => None }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self { Value::List(items) => Some(items), _ => None }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self { Value::Map(m) => Some(m), _ => None }
    }

    /// Field lookup on a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    /// Positional lookup on a list value.
    pub fn index(&self, i: usize) -> Option<&Value> {
        self.as_list()?.get(i)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert to a JSON document. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null      => Json::Null,
            Value::Bool(b)   => Json::Bool(*b),
            Value::Int(i)    => Json::from(*i),
            Value::Float(x)  => serde_json::Number::from_f64(*x).map_or(Json::Null, Json::Number),
            Value::Str(s)    => Json::String(s.clone()),
            Value::List(xs)  => Json::Array(xs.iter().map(Value::to_json).collect()),
            Value::Map(m)    => Json::Object(m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()),
        }
    }
}

// ─── Display ──────────────────────────────────────────────────────────────────

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null     => f.write_str("null"),
            Value::Bool(b)  => write!(f, "{b}"),
            Value::Int(i)   => write!(f, "{i}"),
            // keep a trailing `.0` so floats and integers read differently
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s)   => write_quoted(f, s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write_quoted(f, k)?;
                    write!(f, ": {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// JSON string escaping, so `Display` agrees with `to_json`.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

// ─── Conversions ──────────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Int(i) }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Int(i64::from(i)) }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self { Value::Float(x) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self { Value::List(items) }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(m: BTreeMap<String, Value>) -> Self { Value::Map(m) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map_or(Value::Null, Into::into) }
}

/// Integral JSON numbers that fit in `i64` become `Int`; every other number
/// becomes `Float`.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null      => Value::Null,
            Json::Bool(b)   => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None    => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(xs) => Value::List(xs.into_iter().map(Value::from).collect()),
            Json::Object(m) => Value::Map(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
        }
    }
}
