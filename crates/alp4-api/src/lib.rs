//! ViALUX ALP-4.x API surface for digital micromirror device controllers.
//!
//! This crate is I/O-free. It holds everything that is part of the native
//! library's ABI and can be tested without hardware:
//!
//! - [`codes`]: the numeric parameter-code table, byte-exact with `alp.h`
//! - [`status`]: return codes and their messages
//! - [`records`]: `#[repr(C)]` records for the `...Ex` entry points
//! - [`types`]: identifier newtypes, DMD models, inquiry values
//! - [`driver`]: the [`AlpDriver`] trait mirroring the native entry points

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod codes;
pub mod driver;
pub mod records;
pub mod status;
pub mod types;

pub use driver::{AlpDriver, DriverResult, TimingParams, UserStruct};
pub use records::{
    AlpDmdMask, AlpDynSynchOutGate, AlpLinePut, AlpProjProgress, AlpShearTable, FlutWrite,
};
pub use status::AlpStatus;
pub use types::{
    DataFormat, DeviceId, DeviceState, DisplayGeometry, DmdType, ProjectionState, SequenceId,
};
