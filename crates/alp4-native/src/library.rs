//! Locating the vendor library on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use alp4_errors::{AlpError, AlpResult};
use serde::{Deserialize, Serialize};

/// Environment variable consulted when no library directory is configured.
pub const LIB_DIR_ENV: &str = "ALP4_LIB_DIR";

/// Installed ALP API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlpVersion {
    /// ALP-4.1
    #[serde(rename = "4.1")]
    Alp41,
    /// ALP-4.2
    #[serde(rename = "4.2")]
    Alp42,
    /// ALP-4.3
    #[default]
    #[serde(rename = "4.3")]
    Alp43,
}

impl AlpVersion {
    /// File name of the API DLL shipped with this version.
    pub fn dll_name(self) -> &'static str {
        match self {
            AlpVersion::Alp41 | AlpVersion::Alp42 => "alpD41.dll",
            AlpVersion::Alp43 => "alp4395.dll",
        }
    }
}

impl fmt::Display for AlpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlpVersion::Alp41 => write!(f, "4.1"),
            AlpVersion::Alp42 => write!(f, "4.2"),
            AlpVersion::Alp43 => write!(f, "4.3"),
        }
    }
}

/// The platform the library path is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Windows target.
    pub windows: bool,
    /// 64-bit pointers; the vendor ships those DLLs under `x64/`.
    pub x64: bool,
}

impl Platform {
    /// The platform this crate was compiled for.
    pub fn current() -> Self {
        Self {
            windows: cfg!(windows),
            x64: cfg!(target_pointer_width = "64"),
        }
    }
}

/// Where to find the ALP library.
///
/// An explicit `library_path` wins. Otherwise the path is built from
/// `lib_dir` (or `ALP4_LIB_DIR`), an `x64/` subdirectory on 64-bit Windows,
/// and the DLL name of `version`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Installed API version.
    pub version: AlpVersion,
    /// The `ALP-x.y API` directory of the installation.
    pub lib_dir: Option<PathBuf>,
    /// Full path of the library, bypassing the lookup.
    pub library_path: Option<PathBuf>,
}

impl LibraryConfig {
    /// Default lookup for `version`.
    pub fn new(version: AlpVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Set the API directory.
    pub fn with_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lib_dir = Some(dir.into());
        self
    }

    /// Load this exact file.
    pub fn with_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = Some(path.into());
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AlpError::Config`] for empty paths.
    pub fn validate(&self) -> AlpResult {
        if self
            .lib_dir
            .as_deref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(AlpError::config("lib_dir must not be empty"));
        }
        if self
            .library_path
            .as_deref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(AlpError::config("library_path must not be empty"));
        }
        Ok(())
    }

    /// Resolve the library path for the current platform and environment.
    ///
    /// # Errors
    ///
    /// See [`LibraryConfig::resolve_for`].
    pub fn resolve(&self) -> AlpResult<PathBuf> {
        let env_dir = std::env::var_os(LIB_DIR_ENV).map(PathBuf::from);
        self.resolve_for(Platform::current(), env_dir.as_deref())
    }

    /// Resolve the library path for `platform`, with `env_dir` standing in
    /// for `ALP4_LIB_DIR`.
    ///
    /// # Errors
    ///
    /// [`AlpError::UnsupportedPlatform`] when no explicit path is given off
    /// Windows, [`AlpError::Config`] when no directory is known on Windows.
    pub fn resolve_for(&self, platform: Platform, env_dir: Option<&Path>) -> AlpResult<PathBuf> {
        self.validate()?;
        if let Some(path) = &self.library_path {
            return Ok(path.clone());
        }
        if !platform.windows {
            return Err(AlpError::UnsupportedPlatform(
                "the ALP library ships for Windows only; set library_path explicitly".to_string(),
            ));
        }
        let dir = self.lib_dir.as_deref().or(env_dir).ok_or_else(|| {
            AlpError::config(format!(
                "no ALP library directory; set lib_dir or {LIB_DIR_ENV}"
            ))
        })?;
        let mut path = dir.to_path_buf();
        if platform.x64 {
            path.push("x64");
        }
        path.push(self.version.dll_name());
        Ok(path)
    }
}
