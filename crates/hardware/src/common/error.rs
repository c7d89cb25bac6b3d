//! Error definitions.
//!
//! Every fallible operation in the crate returns [`Error`]. The variants fall into three groups:
//! 1. **Lookup and input:** Unknown register names and malformed decimal text.
//! 2. **Device:** Opening, mapping, unmapping, and out-of-span accesses; these carry the OS error.
//! 3. **Configuration:** Unreadable, unparsable, or inconsistent register maps.
//!
//! All errors are terminal for a single invocation; nothing is retried.

use std::io;
use std::path::PathBuf;

use super::addr::PhysAddr;

/// Errors raised by the codec, register table, configuration, and MMIO provider.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested register name is not in the table.
    ///
    /// `available` lists every configured name, in table order, for diagnostic display.
    #[error("register name \"{name}\" didn't match any registers")]
    UnknownRegister {
        /// Name that was looked up.
        name: String,
        /// All names known to the table.
        available: Vec<String>,
    },

    /// The memory device could not be opened.
    #[error("couldn't open {}: {source}", path.display())]
    DeviceOpenFailed {
        /// Device path (normally `/dev/mem`).
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// `mmap()` of the component window failed.
    #[error("mmap() failed for {span:#x} bytes at {base}: {source}")]
    MapFailed {
        /// Physical base address requested.
        base: PhysAddr,
        /// Span in bytes requested.
        span: usize,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// `munmap()` of the component window failed.
    #[error("munmap() failed: {source}")]
    UnmapFailed {
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A value string is not a plain decimal number.
    #[error("malformed value \"{input}\": {reason}")]
    MalformedInput {
        /// Text as supplied by the caller.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A register word offset lies outside the mapped span.
    #[error("word offset {offset} is outside the mapped span of {span:#x} bytes")]
    OffsetOutOfRange {
        /// Offset in 32-bit words.
        offset: u32,
        /// Span of the mapping in bytes.
        span: usize,
    },

    /// The register map is inconsistent.
    #[error("invalid register configuration: {reason}")]
    InvalidConfig {
        /// Description of the violated constraint.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("couldn't read configuration {}: {source}", path.display())]
    ConfigRead {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for [`Config`](crate::config::Config).
    #[error("couldn't parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl Error {
    /// Returns the OS error number behind a device failure, if there is one.
    ///
    /// Used by the CLI to print the `ERRNO:` diagnostic line.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::DeviceOpenFailed { source, .. }
            | Self::MapFailed { source, .. }
            | Self::UnmapFailed { source } => source.raw_os_error(),
            _ => None,
        }
    }

    /// Builds a [`Error::MalformedInput`] for `input`.
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }

    /// Builds an [`Error::InvalidConfig`].
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
