//! Rust binding for the ViALUX ALP-4.x DMD controller library.
//!
//! [`Alp4`] owns one allocated device and walks the
//! allocate → upload → timing → run → wait → free lifecycle against it.
//! The native calls go through an [`AlpDriver`]: [`NativeAlp`] for the
//! vendor DLL, or the simulator in `alp4-test-helpers` for tests.
//!
//! ```no_run
//! use alp4::{Alp4, Alp4Config, SequenceTiming};
//!
//! let config = Alp4Config::from_json_file("alp4.json")?;
//! let mut dmd = Alp4::open(&config)?;
//! let frame = vec![0u8; dmd.geometry().pixel_count()];
//! dmd.allocate_sequence(1, 1)?;
//! dmd.upload_images(None, &frame, 0, 0)?;
//! dmd.set_timing(None, &SequenceTiming::default())?;
//! dmd.run(None, true)?;
//! dmd.halt()?;
//! dmd.free()?;
//! # Ok::<(), alp4::AlpError>(())
//! ```
//!
//! Parameter codes live in [`codes`]; the inquiry and control methods pass
//! them through unchanged.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod device;
pub mod registry;
pub mod timing;

pub use alp4_api::codes;
pub use alp4_api::{
    AlpDmdMask, AlpDriver, AlpDynSynchOutGate, AlpProjProgress, AlpShearTable, AlpStatus,
    DataFormat, DeviceId, DeviceState, DisplayGeometry, DmdType, FlutWrite, ProjectionState,
    SequenceId, UserStruct,
};
pub use alp4_errors::{AlpError, AlpResult, ErrorSeverity, FailureSeverity};
pub use alp4_native::{AlpVersion, LibraryConfig, NativeAlp};
pub use config::{Alp4Config, Alp4ConfigBuilder, ReleasePolicy};
pub use device::{Alp4, HandleState, Temperatures};
pub use registry::SequenceInfo;
pub use timing::{LinePut, SequenceTiming};
