//! Tunables shared by validation and dispatch.

/// Default budget of nested descriptor steps for a single validation.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Bounds applied while walking a descriptor graph.
///
/// Recursive graphs can loop without consuming any input (a reference bound
/// to a union that contains the reference itself), so every validation
/// carries a depth budget and fails with `DepthExceeded` once it runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_depth: usize,
}

impl Limits {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}
