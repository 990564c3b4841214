//! Precis Core - Fundamental types
//!
//! This crate provides the core types used throughout Precis:
//! - `Number`: Arbitrary precision decimal numbers
//! - `PrecisionContext`: The digit budget every `Number` is built under
//! - `PrecisError`: Structured errors with codes and suggestions

mod context;
mod number;
mod error;

pub use context::{PrecisionContext, DEFAULT_DIGITS, MAX_DIGITS};
pub use number::{Number, NumberError};
pub use error::{PrecisError, codes};
