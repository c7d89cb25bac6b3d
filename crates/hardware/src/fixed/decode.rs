//! Fixed-point word to decimal text.

use super::{FractionRendering, SIGN_BIT, low_mask};

/// Renders a fixed-point register word as decimal text, dropping the fraction LSB.
///
/// Equivalent to [`decode_with`] using [`FractionRendering::DropLsb`].
///
/// # Arguments
///
/// * `word` - Raw register contents.
/// * `fraction_width` - Number of fraction bits.
/// * `is_signed` - Whether bit 31 is a sign flag.
/// * `num_decimals` - Number of digits printed after the decimal point (at most 255).
pub fn decode(word: u32, fraction_width: u8, is_signed: bool, num_decimals: u8) -> String {
    decode_with(
        word,
        fraction_width,
        is_signed,
        num_decimals,
        FractionRendering::DropLsb,
    )
}

/// Renders a fixed-point register word as `[-]digits.digits`.
///
/// For signed registers bit 31 is read as the sign and then cleared. The integer part is
/// printed without leading zeros; exactly `num_decimals` fraction digits follow the point.
/// Digits are truncated, never rounded.
pub fn decode_with(
    word: u32,
    fraction_width: u8,
    is_signed: bool,
    num_decimals: u8,
    rendering: FractionRendering,
) -> String {
    let width = u32::from(fraction_width).min(31);
    let mut out = String::with_capacity(usize::from(num_decimals) + 13);

    let mut magnitude = word;
    if is_signed {
        if word & SIGN_BIT != 0 {
            out.push('-');
        }
        magnitude &= !SIGN_BIT;
    }

    out.push_str(&(magnitude >> width).to_string());
    out.push('.');

    let field = u64::from(magnitude) & low_mask(width);
    let (mut frac, bits) = match rendering {
        FractionRendering::DropLsb => (field >> 1, width.saturating_sub(1)),
        FractionRendering::Exact => (field, width),
    };
    let mask = low_mask(bits);

    for _ in 0..num_decimals {
        frac *= 10;
        out.push(char::from(b'0' + (frac >> bits) as u8));
        frac &= mask;
    }
    out
}
