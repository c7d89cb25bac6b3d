//! Register window trait.
//!
//! Anything that can serve 32-bit word accesses into the component's register window
//! implements [`RegisterIo`]: the `/dev/mem` mapping in production, in-memory buffers in tests.

use crate::common::Error;
use crate::common::addr::WORD_BYTES;

/// Word-addressed access to a mapped register window.
///
/// Offsets are in 32-bit words from the component base. Every call is exactly one bus
/// transaction; nothing is cached or retried.
pub trait RegisterIo {
    /// Returns the size of the window in bytes.
    fn span(&self) -> usize;

    /// Reads the word at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OffsetOutOfRange`] if the word does not lie inside the window.
    fn read_word(&self, offset: u32) -> Result<u32, Error>;

    /// Writes `value` to the word at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OffsetOutOfRange`] if the word does not lie inside the window.
    fn write_word(&mut self, offset: u32, value: u32) -> Result<(), Error>;
}

/// Converts a word offset into a byte offset, checking that the whole word fits in `span`.
///
/// # Errors
///
/// Returns [`Error::OffsetOutOfRange`] when `offset * 4 + 4 > span`.
pub fn byte_offset(offset: u32, span: usize) -> Result<usize, Error> {
    let start = u64::from(offset) * WORD_BYTES;
    if start + WORD_BYTES > span as u64 {
        return Err(Error::OffsetOutOfRange { offset, span });
    }
    Ok(start as usize)
}
