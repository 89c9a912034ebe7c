//! Method tables: maps a method name → ordered (signature, implementation)
//! entries, and dispatches calls to the first entry whose signature matches.
//!
//! Adding a case to a method = calling `register()` again under its name.
//! Registration order is the tie-break between overlapping signatures, so
//! more specific shapes belong before more general ones.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::Limits;
use crate::error::Error;
use crate::runtime::value::Value;
use crate::types::Type;
use super::signature::Signature;

// ─── Function pointer ─────────────────────────────────────────────────────────

/// An implementation. Receives the registry it was dispatched from, so it
/// can recurse into sub-structures through the same method names.
pub type MethodFn = Arc<dyn Fn(&Methods, &[Value]) -> Result<Value, Error> + Send + Sync>;

// ─── Table ────────────────────────────────────────────────────────────────────

pub struct Entry {
    signature: Signature,
    /// The signature packed into one `Tuple` descriptor.
    params:    Type,
    call:      MethodFn,
}

impl Entry {
    pub fn signature(&self) -> &Signature { &self.signature }
    pub fn params(&self) -> &Type { &self.params }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("signature", &self.signature.to_string()).finish()
    }
}

/// Every entry registered under one name. The arity is fixed by the first
/// registration and shared by all entries.
#[derive(Debug)]
pub struct MethodTable {
    name:    String,
    arity:   usize,
    entries: Vec<Entry>,
}

impl MethodTable {
    pub fn name(&self) -> &str { &self.name }
    pub fn arity(&self) -> usize { self.arity }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn entries(&self) -> &[Entry] { &self.entries }

    /// Index of the first entry whose signature validates `args`.
    fn select(&self, args: &[Value], limits: &Limits) -> Result<usize, Error> {
        if args.len() != self.arity {
            return Err(Error::Arity {
                method:   self.name.clone(),
                expected: self.arity,
                found:    args.len(),
            });
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.params.validate_args(args, limits)? {
                return Ok(i);
            }
        }
        Err(Error::NoMatchingMethod { method: self.name.clone(), args: render_args(args) })
    }
}

fn render_args(args: &[Value]) -> String {
    args.iter().map(Value::to_string).collect::<Vec<_>>().join(", ")
}

// ─── Registry ─────────────────────────────────────────────────────────────────

/// Registry of method tables, owned and passed around by the caller.
///
/// Registration takes `&mut self` and dispatch takes `&self`, so all
/// registrations finish before the registry can be shared for concurrent
/// dispatch.
#[derive(Default)]
pub struct Methods {
    tables: HashMap<String, MethodTable>,
    limits: Limits,
}

impl Methods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { tables: HashMap::new(), limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Append an implementation to `name`'s table.
    ///
    /// Fails with `InvalidSignature` for variadic or keyword parameters, and
    /// with `ArityMismatch` when the parameter count differs from the arity
    /// fixed by the first registration. A failed registration leaves the
    /// table unchanged.
    pub fn register<F>(&mut self, name: &str, signature: impl Into<Signature>, f: F) -> Result<(), Error>
    where
        F: Fn(&Methods, &[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        let signature = signature.into();
        let params = signature.pack(name)?;
        let arity = signature.arity();

        let table = self.tables.entry(name.to_string()).or_insert_with(|| MethodTable {
            name: name.to_string(),
            arity,
            entries: Vec::new(),
        });
        if table.arity != arity {
            return Err(Error::ArityMismatch {
                method:   name.to_string(),
                expected: table.arity,
                found:    arity,
            });
        }

        debug!(method = name, signature = %signature, arity, index = table.entries.len(), "registered method");
        table.entries.push(Entry { signature, params, call: Arc::new(f) });
        Ok(())
    }

    /// Run the first implementation of `name` whose signature matches `args`.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, Error> {
        let index = self.resolve(name, args).inspect_err(|e| {
            debug!(method = name, argc = args.len(), error = %e, "dispatch failed");
        })?;
        trace!(method = name, argc = args.len(), index, "dispatching");
        (self.tables[name].entries[index].call)(self, args)
    }

    /// Index of the entry `invoke` would run, without running it.
    pub fn resolve(&self, name: &str, args: &[Value]) -> Result<usize, Error> {
        let table = self.table(name).ok_or_else(|| Error::UnknownMethod { method: name.to_string() })?;
        table.select(args, &self.limits)
    }

    /// Call-syntax handle: `methods.method("compute").call(&[expr])`.
    pub fn method<'a>(&'a self, name: &'a str) -> Method<'a> {
        Method { methods: self, name }
    }

    pub fn table(&self, name: &str) -> Option<&MethodTable> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Registered method names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Methods")
            .field("methods", &self.names())
            .field("limits", &self.limits)
            .finish()
    }
}

// ─── Call handle ──────────────────────────────────────────────────────────────

/// A method name bound to its registry, callable like an ordinary function.
#[derive(Clone, Copy)]
pub struct Method<'a> {
    methods: &'a Methods,
    name:    &'a str,
}

impl Method<'_> {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, Error> {
        self.methods.invoke(self.name, args)
    }
}
