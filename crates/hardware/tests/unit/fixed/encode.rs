//! # Encode Tests
//!
//! Verifies decimal parsing, the nine-digit fraction cutoff, binary fraction conversion,
//! sign-magnitude packing, wrapping of oversized integers, and input validation.

use regctl_core::Error;
use regctl_core::fixed::{SIGN_BIT, encode};
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Known encodings
// ══════════════════════════════════════════════════════════

#[test]
fn one_and_a_half_q28() {
    assert_eq!(encode("1.5", 28, true).unwrap(), 0x1800_0000);
}

#[test]
fn negative_one_and_a_half_sets_sign_bit() {
    let word = encode("-1.5", 28, true).unwrap();
    assert_eq!(word, 0x9800_0000);
    assert_eq!(word & SIGN_BIT, SIGN_BIT);
    assert_eq!(word & !SIGN_BIT, encode("1.5", 28, true).unwrap());
}

#[test]
fn tenth_keeps_fraction_width_minus_one_bits() {
    // 0.1 = 0b0.0001100110011..., seven significant bits then a clear LSB.
    assert_eq!(encode("0.1", 8, false).unwrap(), 0b0001_1000);
}

#[test]
fn fraction_lsb_is_never_set() {
    assert_eq!(encode("0.999999999", 8, false).unwrap(), 0b1111_1110);
    for f in 1..=31 {
        assert_eq!(encode("0.999999999", f, false).unwrap() & 1, 0, "fraction width {f}");
    }
}

#[test]
fn single_fraction_bit_cannot_hold_a_half() {
    assert_eq!(encode("0.5", 1, false).unwrap(), 0);
    assert_eq!(encode("1.5", 1, false).unwrap(), 0b10);
}

#[test]
fn zero_fraction_width_drops_fraction() {
    assert_eq!(encode("3.75", 0, false).unwrap(), 3);
}

#[test]
fn integer_only_and_point_only_forms() {
    assert_eq!(encode("2", 16, false).unwrap(), 2 << 16);
    assert_eq!(encode("2.", 16, false).unwrap(), 2 << 16);
    assert_eq!(encode(".5", 16, false).unwrap(), encode("0.5", 16, false).unwrap());
}

// ══════════════════════════════════════════════════════════
// 2. Fraction digit handling
// ══════════════════════════════════════════════════════════

#[test]
fn digits_past_the_ninth_are_ignored() {
    assert_eq!(
        encode("0.1234567899", 28, false).unwrap(),
        encode("0.123456789", 28, false).unwrap()
    );
    assert_eq!(
        encode("0.123456789999999", 31, false).unwrap(),
        encode("0.123456789", 31, false).unwrap()
    );
}

#[rstest]
#[case(4)]
#[case(12)]
#[case(16)]
#[case(28)]
#[case(31)]
fn short_fractions_are_zero_padded(#[case] fraction_width: u8) {
    assert_eq!(
        encode("0.5", fraction_width, false).unwrap(),
        encode("0.500000000", fraction_width, false).unwrap()
    );
    assert_eq!(
        encode("7.25", fraction_width, false).unwrap(),
        encode("7.250000000", fraction_width, false).unwrap()
    );
}

#[rstest]
fn zero_encodes_to_zero(
    #[values(0, 1, 8, 16, 28, 31)] fraction_width: u8,
    #[values(false, true)] is_signed: bool,
) {
    assert_eq!(encode("0", fraction_width, is_signed).unwrap(), 0);
    assert_eq!(encode("0.000", fraction_width, is_signed).unwrap(), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Sign handling
// ══════════════════════════════════════════════════════════

#[test]
fn negative_zero_is_just_the_sign_bit() {
    assert_eq!(encode("-0", 28, true).unwrap(), SIGN_BIT);
}

#[test]
fn unsigned_register_ignores_minus() {
    assert_eq!(
        encode("-1.5", 28, false).unwrap(),
        encode("1.5", 28, false).unwrap()
    );
}

#[test]
fn sign_is_not_twos_complement() {
    let word = encode("-1", 16, true).unwrap();
    assert_eq!(word, SIGN_BIT | (1 << 16));
    assert_ne!(word, (-(1i32 << 16)) as u32);
}

// ══════════════════════════════════════════════════════════
// 4. Overflow wraps silently
// ══════════════════════════════════════════════════════════

#[test]
fn integer_overflow_wraps_out_of_the_word() {
    // 16 << 28 == 1 << 32
    assert_eq!(encode("16", 28, false).unwrap(), 0);
    assert_eq!(encode("17.5", 28, false).unwrap(), 0x1800_0000);
}

#[test]
fn large_signed_magnitude_collides_with_sign_bit() {
    assert_eq!(encode("8", 28, true).unwrap(), SIGN_BIT);
}

#[test]
fn integer_accumulator_wraps_at_32_bits() {
    // 4294967297 == 2^32 + 1
    assert_eq!(encode("4294967297", 0, false).unwrap(), 1);
}

// ══════════════════════════════════════════════════════════
// 5. Malformed input
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("")]
#[case("-")]
#[case(".")]
#[case("-.")]
#[case("1..2")]
#[case("1.2.3")]
#[case("abc")]
#[case("1e5")]
#[case("+1")]
#[case("1-")]
#[case("--1")]
#[case(" 1")]
#[case("1,5")]
fn malformed_text_is_rejected(#[case] text: &str) {
    match encode(text, 28, true) {
        Err(Error::MalformedInput { input, .. }) => assert_eq!(input, text),
        other => panic!("expected MalformedInput for {text:?}, got {other:?}"),
    }
}

#[test]
fn second_point_reports_position() {
    let err = encode("1.2.3", 28, true).unwrap_err();
    assert!(err.to_string().contains("second decimal point at position 3"));
}

#[test]
fn junk_after_ninth_digit_is_still_rejected() {
    assert!(encode("0.1234567891x", 28, false).is_err());
}

#[test]
fn fraction_width_of_32_is_rejected() {
    assert!(matches!(
        encode("1", 32, false),
        Err(Error::MalformedInput { .. })
    ));
}
