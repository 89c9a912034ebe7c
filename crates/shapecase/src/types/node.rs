//! The descriptor algebra: a closed set of shapes values can be matched
//! against.
//!
//! Descriptors are immutable once built. The only mutation anywhere in a
//! graph is the single bind of a [`Reference`].

use std::collections::BTreeMap;
use std::fmt;
use std::ops::BitOr;

use crate::runtime::value::{Kind, Value};
use super::reference::Reference;

#[derive(Debug, Clone)]
pub enum Type {
    /// Matches scalars whose dynamic kind is `kind`.
    Primitive { kind: Kind, label: Option<String> },
    /// Matches values equal to `value`.
    Literal { value: Value, label: Option<String> },
    Any,
    /// Homogeneous sequence of any length.
    List(Box<Type>),
    /// Fixed-arity positional sequence.
    Tuple(Vec<Type>),
    /// Keyed schema. Extra keys on the value are ignored.
    Record(BTreeMap<String, Type>),
    /// Ordered alternatives; matches when any one does.
    Union(Vec<Type>),
    Ref(Reference),
}

// ─── Constructors ─────────────────────────────────────────────────────────────

impl Type {
    pub fn primitive(kind: Kind) -> Self {
        Type::Primitive { kind, label: None }
    }

    pub fn primitive_labeled(kind: Kind, label: impl Into<String>) -> Self {
        Type::Primitive { kind, label: Some(label.into()) }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Type::Literal { value: value.into(), label: None }
    }

    pub fn literal_labeled(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Type::Literal { value: value.into(), label: Some(label.into()) }
    }

    pub fn any() -> Self {
        Type::Any
    }

    pub fn list(elem: impl Into<Type>) -> Self {
        Type::List(Box::new(elem.into()))
    }

    pub fn tuple<T: Into<Type>>(items: impl IntoIterator<Item = T>) -> Self {
        Type::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn record<K, T>(fields: impl IntoIterator<Item = (K, T)>) -> Self
    where
        K: Into<String>,
        T: Into<Type>,
    {
        Type::Record(fields.into_iter().map(|(k, t)| (k.into(), t.into())).collect())
    }

    /// Combine alternatives with the same flattening as `|`. A single
    /// alternative is returned as-is; no alternatives gives a union that
    /// matches nothing.
    pub fn union<T: Into<Type>>(alts: impl IntoIterator<Item = T>) -> Self {
        let mut flat = Vec::new();
        for alt in alts {
            push_flat(&mut flat, alt.into());
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        Type::Union(flat)
    }

    pub fn or(self, other: impl Into<Type>) -> Self {
        self | other
    }
}

fn push_flat(out: &mut Vec<Type>, ty: Type) {
    match ty {
        Type::Union(alts) => out.extend(alts),
        other             => out.push(other),
    }
}

/// Union-combine. Nested unions on either side are spliced in, so
/// `a | b | c` is one union of three alternatives in that order.
impl<T: Into<Type>> BitOr<T> for Type {
    type Output = Type;

    fn bitor(self, rhs: T) -> Type {
        let mut alts = Vec::new();
        push_flat(&mut alts, self);
        push_flat(&mut alts, rhs.into());
        Type::Union(alts)
    }
}

impl From<Kind> for Type {
    fn from(kind: Kind) -> Self { Type::primitive(kind) }
}

// ─── Named leaves ─────────────────────────────────────────────────────────────

pub fn string() -> Type { Type::primitive(Kind::String) }
pub fn integer() -> Type { Type::primitive(Kind::Integer) }
pub fn float() -> Type { Type::primitive(Kind::Float) }
pub fn boolean() -> Type { Type::primitive(Kind::Boolean) }
pub fn nothing() -> Type { Type::primitive(Kind::Nothing) }
pub fn any() -> Type { Type::Any }

// ─── Display ──────────────────────────────────────────────────────────────────

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive { label: Some(l), .. }
            | Type::Literal { label: Some(l), .. } => f.write_str(l),
            Type::Primitive { kind, label: None } => write!(f, "{kind}"),
            Type::Literal { value, label: None }  => write!(f, "<{value}>"),
            Type::Any       => f.write_str("Any"),
            Type::List(elem) => write!(f, "List({elem})"),
            Type::Tuple(items) => {
                f.write_str("Tuple(")?;
                write_joined(f, items, ", ")?;
                f.write_str(")")
            }
            Type::Record(fields) => {
                f.write_str("Record({")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{name}: {ty}")?;
                }
                f.write_str("})")
            }
            Type::Union(alts) if alts.is_empty() => f.write_str("Never"),
            Type::Union(alts) => write_joined(f, alts, " | "),
            Type::Ref(r)      => write!(f, "{r}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Type], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 { f.write_str(sep)?; }
        write!(f, "{item}")?;
    }
    Ok(())
}
