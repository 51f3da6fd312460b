//! Native backend for the ALP-4.x binding.
//!
//! Locates the ViALUX DLL ([`LibraryConfig`]), loads it with `libloading`,
//! resolves all 21 entry points up front, and implements
//! [`alp4_api::AlpDriver`] over them ([`NativeAlp`]).
//!
//! ```no_run
//! use alp4_native::{AlpVersion, LibraryConfig, NativeAlp};
//!
//! let config = LibraryConfig::new(AlpVersion::Alp43).with_lib_dir("C:/ALP-4.3/ALP-4.3 API");
//! let driver = NativeAlp::load(&config)?;
//! println!("loaded {}", driver.path().display());
//! # Ok::<(), alp4_errors::AlpError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

mod driver;
pub mod ffi;
pub mod library;

pub use driver::NativeAlp;
pub use library::{AlpVersion, LIB_DIR_ENV, LibraryConfig, Platform};
