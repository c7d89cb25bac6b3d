//! Decimal text to fixed-point word.

use super::{FRACTION_DIGITS, MAX_FRACTION_WIDTH, SIGN_BIT};
use crate::common::Error;

/// Denominator of the decimal fraction once padded to [`FRACTION_DIGITS`] digits.
const FRACTION_SCALE: u64 = 10u64.pow(FRACTION_DIGITS);

/// A decimal literal split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DecimalLiteral {
    negative: bool,
    /// Integer part, accumulated with wrapping 32-bit arithmetic.
    integer: u32,
    /// Fraction scaled by `10^9` (always below [`FRACTION_SCALE`]).
    fraction: u64,
}

impl DecimalLiteral {
    /// Parses `-?[0-9]*(\.[0-9]*)?` with at least one digit.
    fn parse(text: &str) -> Result<Self, Error> {
        let mut negative = false;
        let mut seen_point = false;
        let mut any_digit = false;
        let mut integer: u32 = 0;
        let mut fraction: u64 = 0;
        let mut fraction_len: u32 = 0;

        for (pos, ch) in text.char_indices() {
            match ch {
                '-' if pos == 0 => negative = true,
                '.' if seen_point => {
                    return Err(Error::malformed(
                        text,
                        format!("second decimal point at position {pos}"),
                    ));
                }
                '.' => seen_point = true,
                '0'..='9' => {
                    any_digit = true;
                    let digit = ch as u32 - '0' as u32;
                    if !seen_point {
                        integer = integer.wrapping_mul(10).wrapping_add(digit);
                    } else if fraction_len < FRACTION_DIGITS {
                        fraction = fraction * 10 + u64::from(digit);
                        fraction_len += 1;
                    }
                }
                other => {
                    return Err(Error::malformed(
                        text,
                        format!("unexpected character '{other}' at position {pos}"),
                    ));
                }
            }
        }

        if !any_digit {
            return Err(Error::malformed(text, "no digits"));
        }

        fraction *= 10u64.pow(FRACTION_DIGITS - fraction_len);

        Ok(Self {
            negative,
            integer,
            fraction,
        })
    }
}

/// Converts decimal text to a fixed-point register word.
///
/// Only the first nine fraction digits are used; shorter fractions are zero-padded, so the
/// binary conversion always works against a denominator of `10^9`. Integer digits that do
/// not fit the integer field wrap with 32-bit arithmetic. For signed registers a leading `-`
/// sets bit 31; for unsigned registers it is ignored.
///
/// # Arguments
///
/// * `text` - Decimal text matching `-?[0-9]*(\.[0-9]*)?`, at least one digit.
/// * `fraction_width` - Number of fraction bits, below 32.
/// * `is_signed` - Whether bit 31 is a sign flag.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] for empty text, stray characters, a misplaced `-`,
/// more than one decimal point, or a fraction width of 32 or more.
pub fn encode(text: &str, fraction_width: u8, is_signed: bool) -> Result<u32, Error> {
    if fraction_width > MAX_FRACTION_WIDTH {
        return Err(Error::malformed(
            text,
            format!("fraction width {fraction_width} does not fit a 32-bit word"),
        ));
    }
    let literal = DecimalLiteral::parse(text)?;
    let width = u32::from(fraction_width);

    let mut word = fraction_bits(literal.fraction, width);
    word = word.wrapping_add(literal.integer.wrapping_shl(width));

    if is_signed && literal.negative {
        word |= SIGN_BIT;
    }
    Ok(word)
}

/// Binary expansion of `fraction / 10^9` into a `width`-bit field, MSB first.
///
/// Produces `width - 1` significant bits; bit 0 of the field stays clear.
fn fraction_bits(fraction: u64, width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    let mut remainder = fraction;
    let mut bits: u32 = 0;
    for _ in 1..width {
        remainder *= 2;
        bits <<= 1;
        if remainder >= FRACTION_SCALE {
            bits |= 1;
            remainder -= FRACTION_SCALE;
        }
    }
    bits << 1
}
