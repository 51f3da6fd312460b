//! Severity levels and release policies.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, the call was rejected before reaching the device
    Warning = 1,
    /// Error, the device refused the operation
    Error = 2,
    /// Critical, the device or library is gone
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// How a failed release (`AlpSeqFree`, `AlpDevFree`) is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureSeverity {
    /// Raise the error to the caller.
    #[default]
    Hard,
    /// Log a warning and carry on.
    Soft,
}

impl FailureSeverity {
    /// True for [`FailureSeverity::Hard`].
    #[must_use]
    pub fn is_hard(self) -> bool {
        matches!(self, FailureSeverity::Hard)
    }
}

impl fmt::Display for FailureSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureSeverity::Hard => write!(f, "hard"),
            FailureSeverity::Soft => write!(f, "soft"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_impact() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
    }

    #[test]
    fn failure_severity_serializes_lowercase() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&FailureSeverity::Soft)?, "\"soft\"");
        let parsed: FailureSeverity = serde_json::from_str("\"hard\"")?;
        assert!(parsed.is_hard());
        Ok(())
    }
}
