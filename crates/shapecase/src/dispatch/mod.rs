pub mod signature;
pub mod registry;


pub use registry::{Entry, Method, MethodFn, MethodTable, Methods};
pub use signature::{Param, Signature};
