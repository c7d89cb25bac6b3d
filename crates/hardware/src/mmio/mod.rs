//! Memory-mapped register access.
//!
//! [`RegisterIo`] is the seam between register operations and the hardware. The production
//! implementation maps the component window out of `/dev/mem`.

/// `/dev/mem` device handle and mapped window.
#[cfg(unix)]
pub mod devmem;

/// The `RegisterIo` trait and offset checking.
pub mod traits;

#[cfg(unix)]
pub use devmem::{DevMem, MappedRegion};
pub use traits::RegisterIo;
