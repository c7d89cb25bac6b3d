//! Physical address type.
//!
//! Register addresses are tracked as bus-visible physical addresses so they cannot be
//! confused with word offsets or byte offsets into a mapped window.

use std::fmt;

/// Size in bytes of one register word.
pub const WORD_BYTES: u64 = 4;

/// A physical address as seen by the HPS.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns the address of the register `words` 32-bit words past this one.
    ///
    /// # Arguments
    ///
    /// * `words` - Offset in register words (4 bytes each), not bytes.
    pub const fn word_offset(&self, words: u32) -> Self {
        Self(self.0.wrapping_add(WORD_BYTES * words as u64))
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
