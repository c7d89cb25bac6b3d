//! Register map configuration.
//!
//! This module describes where the FPGA component lives and which registers it exposes. It provides:
//! 1. **Defaults:** The component layout regctl ships with (two signed Q4.28 gain registers
//!    behind the HPS-to-FPGA lightweight bridge).
//! 2. **Structures:** Component window, display precision, and per-register entries.
//! 3. **Loading:** JSON deserialization with every field optional, and conversion into an
//!    immutable [`RegisterTable`].
//!
//! The register layout is data, not code: descriptors carry word offsets, and the physical
//! base address and span are passed separately to the MMIO provider.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::addr::WORD_BYTES;
use crate::common::{Error, PhysAddr};
use crate::regs::{RegisterDescriptor, RegisterTable};

/// Default configuration constants.
mod defaults {
    /// Base address of the HPS-to-FPGA lightweight bridge.
    pub const H2F_LW_BASE_ADDR: u64 = 0xff20_0000;

    /// Offset of the component from the bridge base, as reported by Platform Designer.
    pub const COMPONENT_OFFSET: u64 = 0x0;

    /// Span of the component in bytes (last address - first address + 1).
    pub const COMPONENT_SPAN: usize = 0x8;

    /// Physical memory device.
    pub const DEVICE_PATH: &str = "/dev/mem";

    /// Decimal places printed when rendering a register value.
    pub const NUM_PRINT_DECIMALS: u8 = 12;

    /// Register width in bits.
    pub const REGISTER_WIDTH: u8 = 32;

    /// Fraction bits of the gain registers.
    pub const GAIN_FRACTION_WIDTH: u8 = 28;

    /// Word offset of `left_gain`.
    pub const LEFT_GAIN_OFFSET: u32 = 0x0;

    /// Word offset of `right_gain`.
    pub const RIGHT_GAIN_OFFSET: u32 = 0x1;
}

/// Root configuration.
///
/// Every field has a default, so an empty JSON object yields the stock layout:
///
/// ```
/// use regctl_core::config::Config;
///
/// let config = Config::from_json_str(r#"{ "display": { "num_decimals": 6 } }"#).unwrap();
/// assert_eq!(config.display.num_decimals, 6);
/// assert_eq!(config.registers.len(), 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Where the component's register window lives.
    #[serde(default)]
    pub component: ComponentConfig,

    /// Output formatting.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Registers exposed by the component, in listing order.
    #[serde(default = "Config::default_registers")]
    pub registers: Vec<RegisterConfig>,
}

impl Config {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for invalid JSON or mistyped fields.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigRead`] if the file cannot be read and [`Error::ConfigParse`]
    /// if it is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded register map from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Physical address of the component window.
    pub fn base_addr(&self) -> PhysAddr {
        self.component.base_addr()
    }

    /// Builds the register table, resolving each entry's physical address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a register lies outside the component span or
    /// violates a descriptor constraint (empty name, fraction width of 32 or more).
    pub fn register_table(&self) -> Result<RegisterTable, Error> {
        let base = self.base_addr();
        let span = self.component.span as u64;
        let descriptors = self
            .registers
            .iter()
            .map(|reg| {
                let end = (u64::from(reg.offset) + 1) * WORD_BYTES;
                if end > span {
                    return Err(Error::invalid_config(format!(
                        "register \"{}\" at word offset {} lies outside the {:#x}-byte component span",
                        reg.name, reg.offset, span
                    )));
                }
                Ok(reg.descriptor(base))
            })
            .collect::<Result<Vec<_>, _>>()?;
        RegisterTable::new(descriptors)
    }

    fn default_registers() -> Vec<RegisterConfig> {
        vec![
            RegisterConfig::signed_gain("left_gain", defaults::LEFT_GAIN_OFFSET),
            RegisterConfig::signed_gain("right_gain", defaults::RIGHT_GAIN_OFFSET),
        ]
    }
}

impl Default for Config {
    /// Creates the stock configuration: the gain component behind the lightweight bridge.
    fn default() -> Self {
        Self {
            component: ComponentConfig::default(),
            display: DisplayConfig::default(),
            registers: Self::default_registers(),
        }
    }
}

/// Location of the FPGA component on the bus.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    /// Base address of the bridge the component hangs off.
    #[serde(default = "ComponentConfig::default_bridge_base")]
    pub bridge_base: u64,

    /// Offset of the component from the bridge base.
    #[serde(default = "ComponentConfig::default_component_offset")]
    pub component_offset: u64,

    /// Size of the component's register window in bytes.
    #[serde(default = "ComponentConfig::default_span")]
    pub span: usize,

    /// Physical memory device to map.
    #[serde(default = "ComponentConfig::default_device")]
    pub device: PathBuf,
}

impl ComponentConfig {
    /// Component base address as seen by the HPS.
    pub fn base_addr(&self) -> PhysAddr {
        PhysAddr::new(self.bridge_base.wrapping_add(self.component_offset))
    }

    fn default_bridge_base() -> u64 {
        defaults::H2F_LW_BASE_ADDR
    }

    fn default_component_offset() -> u64 {
        defaults::COMPONENT_OFFSET
    }

    fn default_span() -> usize {
        defaults::COMPONENT_SPAN
    }

    fn default_device() -> PathBuf {
        PathBuf::from(defaults::DEVICE_PATH)
    }
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            bridge_base: defaults::H2F_LW_BASE_ADDR,
            component_offset: defaults::COMPONENT_OFFSET,
            span: defaults::COMPONENT_SPAN,
            device: Self::default_device(),
        }
    }
}

/// How register values are rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Digits printed after the decimal point, 0 to 255.
    #[serde(default = "DisplayConfig::default_num_decimals")]
    pub num_decimals: u8,

    /// Render every fraction bit instead of dropping the LSB.
    #[serde(default)]
    pub exact_fraction: bool,
}

impl DisplayConfig {
    fn default_num_decimals() -> u8 {
        defaults::NUM_PRINT_DECIMALS
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            num_decimals: defaults::NUM_PRINT_DECIMALS,
            exact_fraction: false,
        }
    }
}

/// One register entry of the map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterConfig {
    /// Register name.
    pub name: String,

    /// Register width in bits (informational).
    #[serde(default = "RegisterConfig::default_width")]
    pub width: u8,

    /// Number of fraction bits.
    #[serde(default)]
    pub fraction_width: u8,

    /// Whether bit 31 is a sign flag.
    #[serde(default)]
    pub is_signed: bool,

    /// Offset from the component base, in 32-bit words.
    pub offset: u32,
}

impl RegisterConfig {
    /// Builds the descriptor for this entry relative to `base`.
    pub fn descriptor(&self, base: PhysAddr) -> RegisterDescriptor {
        RegisterDescriptor::new(
            self.name.clone(),
            self.width,
            self.fraction_width,
            self.is_signed,
            self.offset,
            base,
        )
    }

    fn signed_gain(name: &str, offset: u32) -> Self {
        Self {
            name: name.to_owned(),
            width: defaults::REGISTER_WIDTH,
            fraction_width: defaults::GAIN_FRACTION_WIDTH,
            is_signed: true,
            offset,
        }
    }

    fn default_width() -> u8 {
        defaults::REGISTER_WIDTH
    }
}
