//! Register descriptor.

use crate::common::{Error, PhysAddr};
use crate::fixed::{self, FractionRendering};

/// Static description of one register of the FPGA component.
///
/// Binds a name to the register's fixed-point layout and its position in the component's
/// register window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDescriptor {
    /// Register name, case-sensitive and non-empty.
    pub name: String,
    /// Total register width in bits.
    ///
    /// Informational only: encode and decode always work on the full 32-bit word.
    pub width: u8,
    /// Number of fraction bits (below 32).
    pub fraction_width: u8,
    /// Whether bit 31 is a sign flag (sign-magnitude).
    pub is_signed: bool,
    /// Offset from the component base in 32-bit words, not bytes.
    pub offset: u32,
    /// Absolute physical address, `base + 4 * offset`. Only used for diagnostics.
    pub addr: PhysAddr,
}

impl RegisterDescriptor {
    /// Creates a descriptor for a register `offset` words past `component_base`.
    pub fn new(
        name: impl Into<String>,
        width: u8,
        fraction_width: u8,
        is_signed: bool,
        offset: u32,
        component_base: PhysAddr,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            fraction_width,
            is_signed,
            offset,
            addr: component_base.word_offset(offset),
        }
    }

    /// Encodes decimal text with this register's layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if `text` is not a decimal number.
    pub fn encode(&self, text: &str) -> Result<u32, Error> {
        fixed::encode(text, self.fraction_width, self.is_signed)
    }

    /// Decodes a raw word with this register's layout.
    pub fn decode(&self, word: u32, num_decimals: u8, rendering: FractionRendering) -> String {
        fixed::decode_with(
            word,
            self.fraction_width,
            self.is_signed,
            num_decimals,
            rendering,
        )
    }
}
