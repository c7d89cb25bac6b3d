//! # Register Access Tests
//!
//! Read and write against an in-memory window: bus transaction counts, readback sources,
//! and the left/right gain scenario from the stock register map.

use rstest::rstest;

use regctl_core::access::{self, AccessOptions, ReadbackMode};
use regctl_core::config::{Config, DisplayConfig};
use regctl_core::fixed::FractionRendering;
use regctl_core::{Error, RegisterDescriptor};

use crate::common::mocks::MockRegion;
use crate::common::{COMPONENT_BASE, gain_register, gain_table};

fn with_readback(mode: ReadbackMode) -> AccessOptions {
    AccessOptions {
        readback: Some(mode),
        ..AccessOptions::default()
    }
}

#[test]
fn gain_write_then_read() {
    let table = gain_table();
    let left = table.resolve("left_gain").unwrap();
    let right = table.resolve("right_gain").unwrap();
    let mut region = MockRegion::new(8);

    let report = access::write(&mut region, left, "-1.5", &AccessOptions::default()).unwrap();
    assert_eq!(report.word, 0x9800_0000);
    assert_eq!(report.readback, None);
    assert_eq!(region.peek(0), 0x9800_0000);
    assert_eq!(region.peek(1), 0);

    let _ = access::write(&mut region, right, "0.25", &AccessOptions::default()).unwrap();
    assert_eq!(region.peek(1), 0x0400_0000);

    let options = AccessOptions::default();
    assert_eq!(access::read(&region, left, &options).unwrap().text, "-1.500000000000");
    assert_eq!(access::read(&region, right, &options).unwrap().text, "0.250000000000");
    assert_eq!((region.reads(), region.writes()), (2, 2));
}

#[test]
fn write_without_readback_is_one_store() {
    let mut region = MockRegion::new(8);
    let _ = access::write(
        &mut region,
        &gain_register("left_gain", 0),
        "1",
        &AccessOptions::default(),
    )
    .unwrap();
    assert_eq!((region.reads(), region.writes()), (0, 1));
}

#[test]
fn codec_readback_decodes_the_written_word() {
    let mut region = MockRegion::new(8).with_stuck_bits(0x1);
    let report = access::write(
        &mut region,
        &gain_register("left_gain", 0),
        "0.1",
        &with_readback(ReadbackMode::Codec),
    )
    .unwrap();
    let back = report.readback.unwrap();
    assert_eq!(back.word, report.word);
    assert_eq!(back.text, "0.099999994039");
    assert_eq!(region.reads(), 0);
}

#[test]
fn memory_readback_reports_what_the_hardware_holds() {
    let mut region = MockRegion::new(8).with_stuck_bits(0x8000_0000);
    let report = access::write(
        &mut region,
        &gain_register("right_gain", 1),
        "2",
        &with_readback(ReadbackMode::Memory),
    )
    .unwrap();
    assert_eq!(report.word, 0x2000_0000);
    let back = report.readback.unwrap();
    assert_eq!(back.word, 0xa000_0000);
    assert_eq!(back.text, "-2.000000000000");
    assert_eq!((region.reads(), region.writes()), (1, 1));
}

#[rstest]
#[case("")]
#[case("1.2.3")]
#[case("abc")]
#[case("--1")]
fn malformed_value_never_touches_the_bus(#[case] text: &str) {
    let mut region = MockRegion::new(8);
    let result = access::write(
        &mut region,
        &gain_register("left_gain", 0),
        text,
        &with_readback(ReadbackMode::Memory),
    );
    assert!(matches!(result, Err(Error::MalformedInput { .. })));
    assert_eq!(region.accesses(), 0);
}

#[test]
fn unsigned_register_ignores_the_sign() {
    let reg = RegisterDescriptor::new("threshold", 32, 16, false, 0, COMPONENT_BASE);
    let mut region = MockRegion::new(4);
    let report = access::write(&mut region, &reg, "-3.5", &AccessOptions::default()).unwrap();
    assert_eq!(report.word, 0x0003_8000);
    assert_eq!(
        access::read(&region, &reg, &AccessOptions::default()).unwrap().text,
        "3.500000000000"
    );
}

#[test]
fn register_outside_the_window_fails() {
    let reg = gain_register("beyond", 2);
    let mut region = MockRegion::new(8);
    assert!(matches!(
        access::write(&mut region, &reg, "1", &AccessOptions::default()),
        Err(Error::OffsetOutOfRange { offset: 2, span: 8 })
    ));
    assert!(access::read(&region, &reg, &AccessOptions::default()).is_err());
    assert_eq!(region.accesses(), 0);
}

#[test]
fn read_is_one_load() {
    let mut region = MockRegion::new(8);
    region.poke(1, 0x1000_0000);
    let reading = access::read(&region, &gain_register("right_gain", 1), &AccessOptions::default())
        .unwrap();
    assert_eq!(reading.word, 0x1000_0000);
    assert_eq!(reading.text, "1.000000000000");
    assert_eq!((region.reads(), region.writes()), (1, 0));
}

#[test]
fn read_honours_precision_and_rendering() {
    let mut region = MockRegion::new(8);
    region.poke(0, 1);
    let reg = gain_register("left_gain", 0);

    let dropped = AccessOptions::default();
    assert_eq!(access::read(&region, &reg, &dropped).unwrap().text, "0.000000000000");

    let exact = AccessOptions {
        rendering: FractionRendering::Exact,
        ..AccessOptions::default()
    };
    assert_eq!(access::read(&region, &reg, &exact).unwrap().text, "0.000000003725");

    let short = AccessOptions {
        num_decimals: 2,
        ..AccessOptions::default()
    };
    region.poke(0, 0x1800_0000);
    assert_eq!(access::read(&region, &reg, &short).unwrap().text, "1.50");
}

#[test]
fn listing_needs_no_bus_access() {
    let region = MockRegion::new(8);
    let table = Config::default().register_table().unwrap();
    assert_eq!(table.names().count(), 2);
    assert_eq!(region.accesses(), 0);
}

#[test]
fn options_follow_display_config() {
    let options = AccessOptions::from_display(&DisplayConfig {
        num_decimals: 5,
        exact_fraction: true,
    });
    assert_eq!(options.num_decimals, 5);
    assert_eq!(options.rendering, FractionRendering::Exact);
    assert_eq!(options.readback, None);

    let defaults = AccessOptions::from_display(&DisplayConfig::default());
    assert_eq!(defaults, AccessOptions::default());
}
