//! Forward references: placeholders that let a descriptor graph refer to
//! itself.
//!
//! A `Reference` is a shared handle. Every clone aliases the same cell, so a
//! reference can be embedded in several composites before it is bound:
//!
//! ```
//! use shapecase::types::{Reference, Type, integer};
//!
//! let tree = Reference::named("Tree");
//! let branch = Type::tuple([tree.to_type(), tree.to_type()]);
//! tree.bind(integer() | branch).unwrap();
//! ```
//!
//! The cell can be written exactly once. Graphs that close a cycle through a
//! reference hold themselves alive; they are meant to be built once at setup
//! and kept for the life of the program.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::Error;
use super::node::Type;

struct Cell {
    label:  Option<String>,
    target: OnceLock<Type>,
}

#[derive(Clone)]
pub struct Reference {
    cell: Arc<Cell>,
}

impl Reference {
    pub fn new() -> Self {
        Self { cell: Arc::new(Cell { label: None, target: OnceLock::new() }) }
    }

    pub fn named(label: impl Into<String>) -> Self {
        Self { cell: Arc::new(Cell { label: Some(label.into()), target: OnceLock::new() }) }
    }

    /// Install the target. A second bind fails with `AlreadyBound`, whether or
    /// not the reference has been validated through in between.
    pub fn bind(&self, target: impl Into<Type>) -> Result<(), Error> {
        self.cell.target
            .set(target.into())
            .map_err(|_| Error::AlreadyBound { label: self.display_label().to_string() })
    }

    pub fn get(&self) -> Option<&Type> {
        self.cell.target.get()
    }

    pub fn is_bound(&self) -> bool {
        self.cell.target.get().is_some()
    }

    pub fn label(&self) -> Option<&str> {
        self.cell.label.as_deref()
    }

    /// Label used in diagnostics; unlabelled references print as `Ref`.
    pub fn display_label(&self) -> &str {
        self.label().unwrap_or("Ref")
    }

    /// Whether two handles alias the same cell.
    pub fn ptr_eq(&self, other: &Reference) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    pub fn to_type(&self) -> Type {
        Type::Ref(self.clone())
    }
}

impl Default for Reference {
    fn default() -> Self { Self::new() }
}

// Never print the target: it may contain this reference again.
impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("label", &self.display_label())
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

impl From<Reference> for Type {
    fn from(r: Reference) -> Self { Type::Ref(r) }
}

impl From<&Reference> for Type {
    fn from(r: &Reference) -> Self { Type::Ref(r.clone()) }
}
