//! Handle configuration.

use std::path::Path;

use alp4_errors::{AlpError, AlpResult, FailureSeverity};
use alp4_native::LibraryConfig;
use serde::{Deserialize, Serialize};

/// How failed releases are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleasePolicy {
    /// `AlpDevFree` failures. Default: hard.
    pub device_free: FailureSeverity,
    /// `AlpSeqFree` failures. Default: soft, the sequence is forgotten anyway.
    pub sequence_free: FailureSeverity,
}

impl Default for ReleasePolicy {
    fn default() -> Self {
        Self {
            device_free: FailureSeverity::Hard,
            sequence_free: FailureSeverity::Soft,
        }
    }
}

impl ReleasePolicy {
    /// Raise every release failure.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            device_free: FailureSeverity::Hard,
            sequence_free: FailureSeverity::Hard,
        }
    }
}

/// Configuration of a device handle.
///
/// ```
/// use alp4::{Alp4Config, ReleasePolicy};
///
/// let config = Alp4Config::from_json_str(r#"{
///     "library": { "version": "4.3", "lib_dir": "C:/ALP-4.3 API" },
///     "device_number": 0,
///     "release": { "sequence_free": "hard" }
/// }"#)?;
/// assert_eq!(config.release, ReleasePolicy::strict());
/// # Ok::<(), alp4::AlpError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alp4Config {
    /// Where to find the vendor library.
    pub library: LibraryConfig,
    /// Device to allocate; `None` takes the first available.
    pub device_number: Option<i32>,
    /// Release failure reporting.
    pub release: ReleasePolicy,
}

impl Alp4Config {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> Alp4ConfigBuilder {
        Alp4ConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> AlpResult {
        self.library.validate()?;
        if self.device_number.is_some_and(|n| n < 0) {
            return Err(AlpError::config("device_number must not be negative"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`AlpError::Json`] for malformed input, [`AlpError::Config`] for
    /// invalid values.
    pub fn from_json_str(text: &str) -> AlpResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`AlpError::Io`] when the file cannot be read, otherwise as
    /// [`Alp4Config::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> AlpResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Builder for [`Alp4Config`].
#[derive(Debug, Default)]
pub struct Alp4ConfigBuilder {
    config: Alp4Config,
}

impl Alp4ConfigBuilder {
    /// Set the library lookup.
    #[must_use]
    pub fn library(mut self, library: LibraryConfig) -> Self {
        self.config.library = library;
        self
    }

    /// Allocate a specific device.
    #[must_use]
    pub fn device_number(mut self, number: i32) -> Self {
        self.config.device_number = Some(number);
        self
    }

    /// Set the release policy.
    #[must_use]
    pub fn release(mut self, release: ReleasePolicy) -> Self {
        self.config.release = release;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> AlpResult<Alp4Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alp4_native::AlpVersion;

    #[test]
    fn test_default_policy_is_hard_device_soft_sequence() {
        let policy = ReleasePolicy::default();
        assert!(policy.device_free.is_hard());
        assert!(!policy.sequence_free.is_hard());
    }

    #[test]
    fn test_builder_validates() {
        assert!(matches!(
            Alp4Config::builder().device_number(-1).build(),
            Err(AlpError::Config(_))
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() -> AlpResult {
        let config = Alp4Config::from_json_str(r#"{ "library": { "version": "4.2" } }"#)?;
        assert_eq!(config.library.version, AlpVersion::Alp42);
        assert_eq!(config.device_number, None);
        assert_eq!(config.release, ReleasePolicy::default());
        Ok(())
    }
}
