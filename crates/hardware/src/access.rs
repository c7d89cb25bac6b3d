//! Register read and write operations.
//!
//! Each operation performs one codec step and one bus transaction against a [`RegisterIo`]
//! window:
//! 1. **Write:** Encode decimal text, store the word at the register's offset, optionally
//!    read it back.
//! 2. **Read:** Load the word at the register's offset and decode it.
//!
//! Failures are reported, never retried. There is no locking: two processes writing the same
//! register race, and keeping them apart is the caller's job.

use crate::common::Error;
use crate::config::DisplayConfig;
use crate::fixed::{DEFAULT_DECIMALS, FractionRendering};
use crate::mmio::RegisterIo;
use crate::regs::RegisterDescriptor;

/// Where a post-write readback value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadbackMode {
    /// Decode the word that was just written. Checks the codec; no extra bus access.
    #[default]
    Codec,
    /// Read the register again and decode what the hardware returns.
    Memory,
}

/// Rendering and readback settings shared by read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOptions {
    /// Digits printed after the decimal point.
    pub num_decimals: u8,
    /// Treatment of the fraction LSB when decoding.
    pub rendering: FractionRendering,
    /// Readback after a write, if any.
    pub readback: Option<ReadbackMode>,
}

impl AccessOptions {
    /// Builds options from the display section of the configuration, with no readback.
    pub fn from_display(display: &DisplayConfig) -> Self {
        Self {
            num_decimals: display.num_decimals,
            rendering: if display.exact_fraction {
                FractionRendering::Exact
            } else {
                FractionRendering::DropLsb
            },
            readback: None,
        }
    }
}

impl Default for AccessOptions {
    fn default() -> Self {
        Self {
            num_decimals: DEFAULT_DECIMALS,
            rendering: FractionRendering::DropLsb,
            readback: None,
        }
    }
}

/// A register word and its decimal rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// Raw register word.
    pub word: u32,
    /// Decoded decimal text.
    pub text: String,
}

/// Result of a register write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Word stored to the register.
    pub word: u32,
    /// Readback value, when requested.
    pub readback: Option<Reading>,
}

/// Encodes `text` and writes it to `reg`.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] before touching the bus if `text` is not a decimal
/// number, and [`Error::OffsetOutOfRange`] if the register lies outside the window.
pub fn write<R>(
    region: &mut R,
    reg: &RegisterDescriptor,
    text: &str,
    options: &AccessOptions,
) -> Result<WriteReport, Error>
where
    R: RegisterIo + ?Sized,
{
    let word = reg.encode(text)?;
    if !reg.is_signed && text.starts_with('-') {
        tracing::warn!(
            "{} is unsigned; ignoring the sign of {}",
            reg.name,
            text
        );
    }

    tracing::debug!("Writing {} ({:#x}) to {} at {}", text, word, reg.name, reg.addr);
    region.write_word(reg.offset, word)?;

    let readback = match options.readback {
        None => None,
        Some(ReadbackMode::Codec) => Some(Reading {
            word,
            text: reg.decode(word, options.num_decimals, options.rendering),
        }),
        Some(ReadbackMode::Memory) => {
            let stored = region.read_word(reg.offset)?;
            if stored != word {
                tracing::warn!(
                    "{} reads back {:#x} after writing {:#x}",
                    reg.name,
                    stored,
                    word
                );
            }
            Some(Reading {
                word: stored,
                text: reg.decode(stored, options.num_decimals, options.rendering),
            })
        }
    };
    if let Some(back) = &readback {
        tracing::debug!("Readback: stored integer value = {:#x}", back.word);
    }

    Ok(WriteReport { word, readback })
}

/// Reads `reg` and decodes it.
///
/// # Errors
///
/// Returns [`Error::OffsetOutOfRange`] if the register lies outside the window.
pub fn read<R>(region: &R, reg: &RegisterDescriptor, options: &AccessOptions) -> Result<Reading, Error>
where
    R: RegisterIo + ?Sized,
{
    tracing::debug!("Reading {} at {}", reg.name, reg.addr);
    let word = region.read_word(reg.offset)?;
    tracing::debug!("Stored integer value = {:#x}", word);

    Ok(Reading {
        word,
        text: reg.decode(word, options.num_decimals, options.rendering),
    })
}
