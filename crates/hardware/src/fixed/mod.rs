//! Fixed-point codec.
//!
//! Converts between decimal text and the 32-bit register encoding used by the FPGA component.
//! A register word holds an unsigned `[integer].[fraction_width]` binary fixed-point number.
//! Signed registers use **sign-magnitude**: bit 31 is a sign flag and bits 30..0 hold the
//! magnitude in the same layout. This is not two's complement.
//!
//! All arithmetic is integer arithmetic on the full 32-bit container. The register's declared
//! `width` is never used to mask or check the word, and integer overflow wraps silently.
//!
//! The least-significant bit of the fraction field is never set by [`encode`] and is dropped
//! by [`decode`], so the round trip is accurate to `2^-(fraction_width - 1)`.
//! [`FractionRendering::Exact`] renders every fraction bit for words written by hardware.

mod decode;
mod encode;

pub use decode::{decode, decode_with};
pub use encode::encode;

/// Number of fractional decimal digits consumed by [`encode`]; further digits are ignored.
pub const FRACTION_DIGITS: u32 = 9;

/// Default number of decimal places rendered by [`decode`].
pub const DEFAULT_DECIMALS: u8 = 12;

/// Bit 31: sign flag of a signed (sign-magnitude) register.
pub const SIGN_BIT: u32 = 1 << 31;

/// Largest usable fraction width; the fraction field must leave bit 31 addressable.
pub const MAX_FRACTION_WIDTH: u8 = 31;

/// How [`decode_with`] treats the least-significant fraction bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractionRendering {
    /// Drop the fraction LSB before rendering (the historical regctl output).
    #[default]
    DropLsb,
    /// Render every fraction bit.
    Exact,
}

/// Returns a mask covering the low `bits` bits.
#[inline]
const fn low_mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}
