//! Common types shared across the register control library.
//!
//! 1. **Address Types:** A strong type for physical addresses on the SoC bus.
//! 2. **Error Handling:** The single error enum returned by every fallible operation.

/// Physical address type.
pub mod addr;

/// Error type for codec, configuration, and device failures.
pub mod error;

pub use addr::PhysAddr;
pub use error::Error;
