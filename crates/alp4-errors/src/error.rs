//! The binding's error type.

use alp4_api::{AlpStatus, SequenceId};

use crate::severity::ErrorSeverity;

/// Errors raised by the ALP-4.x binding.
#[derive(Debug, thiserror::Error)]
pub enum AlpError {
    /// `AlpDevAlloc` failed
    #[error("Failed to allocate ALP device {device_number}: {status}")]
    DeviceUnavailable {
        /// Requested device number, 0 for the first available
        device_number: i32,
        /// Native status
        status: AlpStatus,
    },

    /// DMD type not in the geometry table and the size inquiries failed
    #[error("Unsupported DMD type {code}")]
    UnsupportedDmdType {
        /// Value of `ALP_DEV_DMDTYPE`
        code: i32,
    },

    /// `AlpSeqAlloc` failed
    #[error("Failed to allocate {picture_count} pictures at bit depth {bit_depth}: {status}")]
    AllocationFailed {
        /// Requested bit depth
        bit_depth: u8,
        /// Requested picture count
        picture_count: u32,
        /// Native status
        status: AlpStatus,
    },

    /// `AlpSeqPut` or `AlpSeqPutEx` failed
    #[error("Image transfer to {sequence} failed: {status}")]
    TransferFailed {
        /// Target sequence
        sequence: SequenceId,
        /// Native status
        status: AlpStatus,
    },

    /// `AlpSeqTiming` rejected the timing
    #[error("Timing rejected for {sequence}: {status}")]
    InvalidTiming {
        /// Target sequence
        sequence: SequenceId,
        /// Native status
        status: AlpStatus,
    },

    /// No sequence given and none allocated
    #[error("No sequence specified and none allocated")]
    NoSequence,

    /// Sequence not allocated on this device, or already freed
    #[error("Unknown sequence {0}")]
    UnknownSequence(SequenceId),

    /// Image buffer does not match the sequence layout
    #[error("Buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// Argument rejected before any native call
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Operation not allowed in the current device state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The device was released
    #[error("Device has been freed")]
    DeviceFreed,

    /// Any other native failure
    #[error("{operation} failed: {status}")]
    Native {
        /// Native entry point name
        operation: &'static str,
        /// Native status
        status: AlpStatus,
    },

    /// The vendor library could not be loaded
    #[error("Failed to load ALP library {path}: {reason}")]
    LibraryLoad {
        /// Library path
        path: String,
        /// Loader message
        reason: String,
    },

    /// An entry point is missing from the vendor library
    #[error("Missing symbol {symbol} in ALP library: {reason}")]
    MissingSymbol {
        /// Symbol name
        symbol: &'static str,
        /// Loader message
        reason: String,
    },

    /// The library location cannot be derived on this platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AlpError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AlpError::DeviceUnavailable { .. } => ErrorSeverity::Critical,
            AlpError::UnsupportedDmdType { .. } => ErrorSeverity::Error,
            AlpError::AllocationFailed { .. } => ErrorSeverity::Error,
            AlpError::TransferFailed { .. } => ErrorSeverity::Error,
            AlpError::InvalidTiming { .. } => ErrorSeverity::Error,
            AlpError::NoSequence => ErrorSeverity::Warning,
            AlpError::UnknownSequence(_) => ErrorSeverity::Warning,
            AlpError::BufferLength { .. } => ErrorSeverity::Warning,
            AlpError::InvalidArgument { .. } => ErrorSeverity::Warning,
            AlpError::InvalidState(_) => ErrorSeverity::Warning,
            AlpError::DeviceFreed => ErrorSeverity::Error,
            AlpError::Native { status, .. } => match status {
                AlpStatus::DeviceRemoved | AlpStatus::NotOnline => ErrorSeverity::Critical,
                _ => ErrorSeverity::Error,
            },
            AlpError::LibraryLoad { .. } => ErrorSeverity::Critical,
            AlpError::MissingSymbol { .. } => ErrorSeverity::Critical,
            AlpError::UnsupportedPlatform(_) => ErrorSeverity::Critical,
            AlpError::Config(_) => ErrorSeverity::Error,
            AlpError::Io(_) => ErrorSeverity::Error,
            AlpError::Json(_) => ErrorSeverity::Error,
        }
    }

    /// The native status behind this error, if any.
    pub fn status(&self) -> Option<AlpStatus> {
        match self {
            AlpError::DeviceUnavailable { status, .. }
            | AlpError::AllocationFailed { status, .. }
            | AlpError::TransferFailed { status, .. }
            | AlpError::InvalidTiming { status, .. }
            | AlpError::Native { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the error was raised before reaching the native library.
    pub fn is_rejected_locally(&self) -> bool {
        matches!(
            self,
            AlpError::NoSequence
                | AlpError::UnknownSequence(_)
                | AlpError::BufferLength { .. }
                | AlpError::InvalidArgument { .. }
                | AlpError::InvalidState(_)
                | AlpError::DeviceFreed
        )
    }

    /// Create a native failure error.
    pub fn native(operation: &'static str, status: AlpStatus) -> Self {
        AlpError::Native { operation, status }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        AlpError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Create an invalid state error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        AlpError::InvalidState(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        AlpError::Config(msg.into())
    }
}
