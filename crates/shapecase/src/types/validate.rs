//! Structural matching of values against descriptors.
//!
//! Matching is a pure predicate: it never mutates the value or the
//! descriptor, so re-validating a pair always gives the same answer.
//! Shape mismatches are `Ok(false)`; only an unbound reference or an
//! exhausted depth budget is an error.

use crate::config::Limits;
use crate::error::Error;
use crate::runtime::value::Value;
use super::node::Type;

impl Type {
    pub fn validate(&self, value: &Value) -> Result<bool, Error> {
        self.validate_with(value, &Limits::default())
    }

    pub fn validate_with(&self, value: &Value, limits: &Limits) -> Result<bool, Error> {
        Matcher { max_depth: limits.max_depth }.check(self, value, 0)
    }

    /// Match an argument slice positionally, as if it were a list value.
    /// Avoids building a `Value::List` for every dispatch attempt.
    pub(crate) fn validate_args(&self, args: &[Value], limits: &Limits) -> Result<bool, Error> {
        let m = Matcher { max_depth: limits.max_depth };
        match self {
            Type::Tuple(items) => m.check_positional(items, args, 1),
            other              => m.check(other, &Value::List(args.to_vec()), 0),
        }
    }
}

/// Free-function form of [`Type::validate`].
pub fn validate(ty: &Type, value: &Value) -> Result<bool, Error> {
    ty.validate(value)
}

struct Matcher {
    max_depth: usize,
}

impl Matcher {
    fn check(&self, ty: &Type, value: &Value, depth: usize) -> Result<bool, Error> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded { max: self.max_depth });
        }
        let next = depth + 1;

        match ty {
            Type::Primitive { kind, .. } => Ok(value.kind() == Some(*kind)),
            Type::Literal { value: lit, .. } => Ok(lit == value),
            Type::Any => Ok(true),

            Type::List(elem) => {
                let Value::List(items) = value else { return Ok(false) };
                for item in items {
                    if !self.check(elem, item, next)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Type::Tuple(slots) => match value {
                Value::List(items) => self.check_positional(slots, items, next),
                _ => Ok(false),
            },

            Type::Record(schema) => {
                let Value::Map(fields) = value else { return Ok(false) };
                for (key, field_ty) in schema {
                    match fields.get(key) {
                        Some(v) if self.check(field_ty, v, next)? => {}
                        _ => return Ok(false),
                    }
                }
                Ok(true)
            }

            // First match wins; later alternatives are not visited.
            Type::Union(alts) => {
                for alt in alts {
                    if self.check(alt, value, next)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            Type::Ref(r) => match r.get() {
                Some(target) => self.check(target, value, next),
                None => Err(Error::UnresolvedReference { label: r.display_label().to_string() }),
            },
        }
    }

    fn check_positional(&self, slots: &[Type], items: &[Value], depth: usize) -> Result<bool, Error> {
        if slots.len() != items.len() {
            return Ok(false);
        }
        for (slot, item) in slots.iter().zip(items) {
            if !self.check(slot, item, depth)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
