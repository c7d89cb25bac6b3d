//! Register descriptors and lookup.

/// Per-register layout and location.
pub mod descriptor;

/// Immutable name-keyed table with resolution.
pub mod table;

pub use descriptor::RegisterDescriptor;
pub use table::RegisterTable;
