//! Fixed-point codec tests.

/// Decimal text to register word.
pub mod encode;
