//! Structural type descriptors and first-match multiple dispatch over
//! dynamic values.
//!
//! Build a descriptor graph from [`Type`] leaves and combinators (using
//! [`Reference`] for recursive shapes), validate [`Value`]s against it, and
//! register implementations under a shared method name in [`Methods`]. A
//! call runs the first implementation, in registration order, whose
//! parameter descriptors match the arguments.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod runtime;
pub mod types;

pub use config::Limits;
pub use dispatch::{Method, MethodFn, MethodTable, Methods, Param, Signature};
pub use error::{Error, ErrorCode};
pub use runtime::value::{Kind, Value};
pub use types::{Reference, Type, validate};
