pub mod node;
pub mod reference;
pub mod validate;

#[cfg(test)]
mod tests;

pub use node::{Type, any, boolean, float, integer, nothing, string};
pub use reference::Reference;
pub use validate::validate;
pub use crate::runtime::value::Kind;
