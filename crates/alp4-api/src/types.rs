//! Identifiers, DMD models and inquiry values.

use core::fmt;

use crate::codes::*;

/// `ALP_ID` of an allocated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

/// `ALP_ID` of an allocated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device#{}", self.0)
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq#{}", self.0)
    }
}

/// Mirror resolution of a DMD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayGeometry {
    /// Mirror columns.
    pub width: u32,
    /// Mirror rows.
    pub height: u32,
}

impl DisplayGeometry {
    /// Create a geometry.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Mirrors per frame.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row for the given data format.
    #[must_use]
    pub const fn row_bytes(&self, format: DataFormat) -> usize {
        if format.is_binary() {
            (self.width as usize).div_ceil(8)
        } else {
            self.width as usize
        }
    }

    /// Bytes per frame for the given data format.
    #[must_use]
    pub const fn frame_bytes(&self, format: DataFormat) -> usize {
        self.row_bytes(format) * self.height as usize
    }
}

impl fmt::Display for DisplayGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// DMD model reported by `ALP_DEV_DMDTYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmdType {
    /// 0.7" XGA, D3000.
    Xga,
    /// 0.95" SXGA+, D3000.
    SxgaPlus,
    /// 0.95" 1080p, D4x00.
    Hd1080P095A,
    /// 0.7" XGA, D4x00.
    Xga07A,
    /// 0.55" XGA Type A, D4x00.
    Xga055A,
    /// 0.55" XGA Type X, D4x00.
    Xga055X,
    /// 0.96" WUXGA, D4100.
    Wuxga096A,
    /// 0.90" WQXGA at 400 MHz.
    Wqxga400Mhz090A,
    /// 0.90" WQXGA at 480 MHz.
    Wqxga480Mhz090A,
    /// DLP650LNIR WXGA S450.
    WxgaS450,
    /// No DMD connected.
    Disconnect,
    /// A code this binding does not know.
    Other(i32),
}

impl DmdType {
    /// Map an `ALP_DEV_DMDTYPE` value.
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            ALP_DMDTYPE_XGA => DmdType::Xga,
            ALP_DMDTYPE_SXGA_PLUS => DmdType::SxgaPlus,
            ALP_DMDTYPE_1080P_095A => DmdType::Hd1080P095A,
            ALP_DMDTYPE_XGA_07A => DmdType::Xga07A,
            ALP_DMDTYPE_XGA_055A => DmdType::Xga055A,
            ALP_DMDTYPE_XGA_055X => DmdType::Xga055X,
            ALP_DMDTYPE_WUXGA_096A => DmdType::Wuxga096A,
            ALP_DMDTYPE_WQXGA_400MHZ_090A => DmdType::Wqxga400Mhz090A,
            ALP_DMDTYPE_WQXGA_480MHZ_090A => DmdType::Wqxga480Mhz090A,
            ALP_DMDTYPE_WXGA_S450 => DmdType::WxgaS450,
            ALP_DMDTYPE_DISCONNECT => DmdType::Disconnect,
            other => DmdType::Other(other),
        }
    }

    /// The raw code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            DmdType::Xga => ALP_DMDTYPE_XGA,
            DmdType::SxgaPlus => ALP_DMDTYPE_SXGA_PLUS,
            DmdType::Hd1080P095A => ALP_DMDTYPE_1080P_095A,
            DmdType::Xga07A => ALP_DMDTYPE_XGA_07A,
            DmdType::Xga055A => ALP_DMDTYPE_XGA_055A,
            DmdType::Xga055X => ALP_DMDTYPE_XGA_055X,
            DmdType::Wuxga096A => ALP_DMDTYPE_WUXGA_096A,
            DmdType::Wqxga400Mhz090A => ALP_DMDTYPE_WQXGA_400MHZ_090A,
            DmdType::Wqxga480Mhz090A => ALP_DMDTYPE_WQXGA_480MHZ_090A,
            DmdType::WxgaS450 => ALP_DMDTYPE_WXGA_S450,
            DmdType::Disconnect => ALP_DMDTYPE_DISCONNECT,
            DmdType::Other(code) => code,
        }
    }

    /// Mirror resolution of the model, `None` for unknown models.
    #[must_use]
    pub fn geometry(self) -> Option<DisplayGeometry> {
        let geometry = match self {
            DmdType::Xga | DmdType::Xga07A | DmdType::Xga055A | DmdType::Xga055X => {
                DisplayGeometry::new(1024, 768)
            }
            DmdType::SxgaPlus => DisplayGeometry::new(1400, 1050),
            DmdType::Hd1080P095A | DmdType::Disconnect => DisplayGeometry::new(1920, 1080),
            DmdType::Wuxga096A => DisplayGeometry::new(1920, 1200),
            DmdType::Wqxga400Mhz090A | DmdType::Wqxga480Mhz090A => {
                DisplayGeometry::new(2560, 1600)
            }
            DmdType::WxgaS450 => DisplayGeometry::new(1280, 800),
            DmdType::Other(_) => return None,
        };
        Some(geometry)
    }
}

/// Picture data layout selected with `ALP_DATA_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// One byte per pixel, MSB aligned.
    #[default]
    MsbAlign,
    /// One byte per pixel, LSB aligned.
    LsbAlign,
    /// One bit per pixel, top row first.
    BinaryTopDown,
    /// One bit per pixel, bottom row first.
    BinaryBottomUp,
}

impl DataFormat {
    /// Map an `ALP_DATA_FORMAT` value.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            ALP_DATA_MSB_ALIGN => Some(DataFormat::MsbAlign),
            ALP_DATA_LSB_ALIGN => Some(DataFormat::LsbAlign),
            ALP_DATA_BINARY_TOPDOWN => Some(DataFormat::BinaryTopDown),
            ALP_DATA_BINARY_BOTTOMUP => Some(DataFormat::BinaryBottomUp),
            _ => None,
        }
    }

    /// The raw code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            DataFormat::MsbAlign => ALP_DATA_MSB_ALIGN,
            DataFormat::LsbAlign => ALP_DATA_LSB_ALIGN,
            DataFormat::BinaryTopDown => ALP_DATA_BINARY_TOPDOWN,
            DataFormat::BinaryBottomUp => ALP_DATA_BINARY_BOTTOMUP,
        }
    }

    /// True for the packed one-bit-per-pixel formats.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, DataFormat::BinaryTopDown | DataFormat::BinaryBottomUp)
    }
}

/// Value of `ALP_DEV_STATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceState {
    /// `ALP_DEV_BUSY`.
    Busy,
    /// `ALP_DEV_READY`.
    Ready,
    /// `ALP_DEV_IDLE`.
    Idle,
    /// Anything else.
    Other(i32),
}

impl DeviceState {
    /// Map an `ALP_DEV_STATE` value.
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            ALP_DEV_BUSY => DeviceState::Busy,
            ALP_DEV_READY => DeviceState::Ready,
            ALP_DEV_IDLE => DeviceState::Idle,
            other => DeviceState::Other(other),
        }
    }
}

/// Value of `ALP_PROJ_STATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionState {
    /// `ALP_PROJ_ACTIVE`.
    Active,
    /// `ALP_PROJ_IDLE`.
    Idle,
    /// Anything else.
    Other(i32),
}

impl ProjectionState {
    /// Map an `ALP_PROJ_STATE` value.
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            ALP_PROJ_ACTIVE => ProjectionState::Active,
            ALP_PROJ_IDLE => ProjectionState::Idle,
            other => ProjectionState::Other(other),
        }
    }
}
