//! Shared test utilities for the ALP-4.x binding.
//!
//! - [`sim`]: [`SimulatedAlp`], an in-memory controller implementing
//!   [`alp4_api::AlpDriver`]
//! - [`mod@must`]: unwrap helpers with `#[track_caller]`
//!
//! ```toml
//! [dev-dependencies]
//! alp4-test-helpers = { workspace = true }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod must;
pub mod sim;

pub use must::*;
pub use sim::{SimCall, SimulatedAlp};
