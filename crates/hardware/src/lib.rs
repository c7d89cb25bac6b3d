//! FPGA fabric register control library.
//!
//! This crate reads and writes named registers of a custom FPGA component through a
//! memory-mapped I/O window, presenting register contents as fixed-point decimal text:
//! 1. **Codec:** Exact decimal string to 32-bit fixed-point conversion and back.
//! 2. **Registers:** Descriptors (name, widths, signedness, word offset) and a name-keyed table.
//! 3. **Access:** Single-word read/write orchestration with optional readback.
//! 4. **MMIO:** The `RegisterIo` trait and a `/dev/mem` backed implementation.
//! 5. **Configuration:** Component base address, span, and register map, with built-in defaults.

/// Common types (physical addresses, crate error).
pub mod common;
/// Component and register-map configuration.
pub mod config;
/// Fixed-point codec (decimal text to sign-magnitude Q-format words and back).
pub mod fixed;
/// Register descriptors and the name-keyed register table.
pub mod regs;
/// Memory-mapped register access (trait and `/dev/mem` provider).
pub mod mmio;
/// Register read/write operations.
pub mod access;

/// Root configuration type; use `Config::default()` or load a JSON register map.
pub use crate::config::Config;
/// Crate-wide error type.
pub use crate::common::Error;
/// Descriptor and table types for register lookup.
pub use crate::regs::{RegisterDescriptor, RegisterTable};
