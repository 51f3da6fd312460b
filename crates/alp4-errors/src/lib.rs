//! Error types for the ALP-4.x binding.
//!
//! - [`AlpError`]: every failure the device handle, loader and registry raise
//! - [`ErrorSeverity`]: classification for logging and triage
//! - [`FailureSeverity`]: whether a failed release is raised or only logged
//!
//! # Example
//!
//! ```
//! use alp4_errors::{AlpError, AlpResult, ErrorSeverity};
//!
//! fn check_depth(bit_depth: u8) -> AlpResult<u8> {
//!     if !(1..=8).contains(&bit_depth) {
//!         return Err(AlpError::invalid_argument("bit_depth", "must be 1..=8"));
//!     }
//!     Ok(bit_depth)
//! }
//!
//! let err = check_depth(9).unwrap_err();
//! assert_eq!(err.severity(), ErrorSeverity::Warning);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod severity;

pub use error::AlpError;
pub use severity::{ErrorSeverity, FailureSeverity};

/// A specialized `Result` type for ALP operations.
pub type AlpResult<T = ()> = std::result::Result<T, AlpError>;
