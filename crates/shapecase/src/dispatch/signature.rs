//! Declared parameter lists.
//!
//! A signature is supplied explicitly at registration; nothing is read from
//! the implementation itself. Only positional parameters take part in
//! dispatch, so the other forms exist to be rejected with `InvalidSignature`.

use std::fmt;

use crate::error::Error;
use crate::types::Type;

#[derive(Debug, Clone)]
pub enum Param {
    Positional(Type),
    /// Positional without a descriptor; matches anything.
    Untyped,
    Variadic(Type),
    Keyword { name: String, ty: Type },
}

impl Param {
    fn form(&self) -> &'static str {
        match self {
            Param::Positional(_) | Param::Untyped => "positional",
            Param::Variadic(_)                    => "variadic",
            Param::Keyword { .. }                 => "keyword",
        }
    }
}

impl From<Type> for Param {
    fn from(ty: Type) -> Self { Param::Positional(ty) }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Positional(ty)       => write!(f, "{ty}"),
            Param::Untyped              => f.write_str("_"),
            Param::Variadic(ty)         => write!(f, "*{ty}"),
            Param::Keyword { name, ty } => write!(f, "{name}={ty}"),
        }
    }
}

// ─── Signature ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    pub fn new<P: Into<Param>>(params: impl IntoIterator<Item = P>) -> Self {
        Self { params: params.into_iter().map(Into::into).collect() }
    }

    /// All-positional signature from one descriptor per parameter.
    pub fn of<T: Into<Type>>(types: impl IntoIterator<Item = T>) -> Self {
        Self { params: types.into_iter().map(|t| Param::Positional(t.into())).collect() }
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Pack the parameters into one `Tuple` descriptor. Untyped parameters
    /// become `Any`; variadic and keyword parameters are rejected.
    pub fn pack(&self, method: &str) -> Result<Type, Error> {
        let mut slots = Vec::with_capacity(self.params.len());
        for (position, param) in self.params.iter().enumerate() {
            match param {
                Param::Positional(ty) => slots.push(ty.clone()),
                Param::Untyped        => slots.push(Type::Any),
                other => {
                    return Err(Error::InvalidSignature {
                        method: method.to_string(),
                        position,
                        form: other.form(),
                    });
                }
            }
        }
        Ok(Type::Tuple(slots))
    }
}

impl<const N: usize> From<[Type; N]> for Signature {
    fn from(types: [Type; N]) -> Self { Signature::of(types) }
}

impl From<Vec<Type>> for Signature {
    fn from(types: Vec<Type>) -> Self { Signature::of(types) }
}

impl From<Vec<Param>> for Signature {
    fn from(params: Vec<Param>) -> Self { Signature { params } }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 { f.write_str(", ")?; }
            write!(f, "{p}")?;
        }
        f.write_str(")")
    }
}
