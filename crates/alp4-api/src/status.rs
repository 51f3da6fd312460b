//! Return codes of the ALP-4.x API.
//!
//! Every entry point returns a C `long`: `ALP_OK` (0) on success, a code from
//! this table otherwise.

use core::fmt;

use crate::codes::ALP_OK;

/// A non-success status returned by the native library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlpStatus {
    /// The specified ALP device has not been found or is not ready.
    NotOnline,
    /// The ALP device is not in idle state.
    NotIdle,
    /// The specified ALP device identifier is not valid.
    NotAvailable,
    /// The specified ALP device is already allocated.
    NotReady,
    /// One of the parameters is invalid.
    ParmInvalid,
    /// Error accessing user data.
    AddrInvalid,
    /// The requested memory is not available.
    MemoryFull,
    /// The sequence specified is currently in use.
    SeqInUse,
    /// The device was stopped while an image data transfer was active.
    Halted,
    /// Initialization error.
    ErrorInit,
    /// Communication error.
    ErrorComm,
    /// The specified ALP has been removed.
    DeviceRemoved,
    /// The onboard FPGA is unconfigured.
    NotConfigured,
    /// The function is not supported by this version of the USB loader driver.
    LoaderVersion,
    /// Waking up the DMD from power-float did not work.
    ErrorPowerDown,
    /// Support in the ALP drivers is missing.
    DriverVersion,
    /// SDRAM initialization failed.
    SdramInit,
    /// A code the table does not know.
    Unknown(i32),
}

impl AlpStatus {
    /// Every known status, in code order.
    pub const KNOWN: [AlpStatus; 17] = [
        AlpStatus::NotOnline,
        AlpStatus::NotIdle,
        AlpStatus::NotAvailable,
        AlpStatus::NotReady,
        AlpStatus::ParmInvalid,
        AlpStatus::AddrInvalid,
        AlpStatus::MemoryFull,
        AlpStatus::SeqInUse,
        AlpStatus::Halted,
        AlpStatus::ErrorInit,
        AlpStatus::ErrorComm,
        AlpStatus::DeviceRemoved,
        AlpStatus::NotConfigured,
        AlpStatus::LoaderVersion,
        AlpStatus::ErrorPowerDown,
        AlpStatus::DriverVersion,
        AlpStatus::SdramInit,
    ];

    /// Map a raw return value to a status. `ALP_OK` maps to `None`.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        let status = match code {
            ALP_OK => return None,
            1001 => AlpStatus::NotOnline,
            1002 => AlpStatus::NotIdle,
            1003 => AlpStatus::NotAvailable,
            1004 => AlpStatus::NotReady,
            1005 => AlpStatus::ParmInvalid,
            1006 => AlpStatus::AddrInvalid,
            1007 => AlpStatus::MemoryFull,
            1008 => AlpStatus::SeqInUse,
            1009 => AlpStatus::Halted,
            1010 => AlpStatus::ErrorInit,
            1011 => AlpStatus::ErrorComm,
            1012 => AlpStatus::DeviceRemoved,
            1013 => AlpStatus::NotConfigured,
            1014 => AlpStatus::LoaderVersion,
            1018 => AlpStatus::ErrorPowerDown,
            1019 => AlpStatus::DriverVersion,
            1020 => AlpStatus::SdramInit,
            other => AlpStatus::Unknown(other),
        };
        Some(status)
    }

    /// Turn a raw return value into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the mapped status for every value other than `ALP_OK`.
    pub fn check(code: i32) -> Result<(), AlpStatus> {
        match Self::from_code(code) {
            None => Ok(()),
            Some(status) => Err(status),
        }
    }

    /// The raw code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            AlpStatus::NotOnline => 1001,
            AlpStatus::NotIdle => 1002,
            AlpStatus::NotAvailable => 1003,
            AlpStatus::NotReady => 1004,
            AlpStatus::ParmInvalid => 1005,
            AlpStatus::AddrInvalid => 1006,
            AlpStatus::MemoryFull => 1007,
            AlpStatus::SeqInUse => 1008,
            AlpStatus::Halted => 1009,
            AlpStatus::ErrorInit => 1010,
            AlpStatus::ErrorComm => 1011,
            AlpStatus::DeviceRemoved => 1012,
            AlpStatus::NotConfigured => 1013,
            AlpStatus::LoaderVersion => 1014,
            AlpStatus::ErrorPowerDown => 1018,
            AlpStatus::DriverVersion => 1019,
            AlpStatus::SdramInit => 1020,
            AlpStatus::Unknown(code) => code,
        }
    }

    /// Name of the code in the vendor header.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AlpStatus::NotOnline => "ALP_NOT_ONLINE",
            AlpStatus::NotIdle => "ALP_NOT_IDLE",
            AlpStatus::NotAvailable => "ALP_NOT_AVAILABLE",
            AlpStatus::NotReady => "ALP_NOT_READY",
            AlpStatus::ParmInvalid => "ALP_PARM_INVALID",
            AlpStatus::AddrInvalid => "ALP_ADDR_INVALID",
            AlpStatus::MemoryFull => "ALP_MEMORY_FULL",
            AlpStatus::SeqInUse => "ALP_SEQ_IN_USE",
            AlpStatus::Halted => "ALP_HALTED",
            AlpStatus::ErrorInit => "ALP_ERROR_INIT",
            AlpStatus::ErrorComm => "ALP_ERROR_COMM",
            AlpStatus::DeviceRemoved => "ALP_DEVICE_REMOVED",
            AlpStatus::NotConfigured => "ALP_NOT_CONFIGURED",
            AlpStatus::LoaderVersion => "ALP_LOADER_VERSION",
            AlpStatus::ErrorPowerDown => "ALP_ERROR_POWER_DOWN",
            AlpStatus::DriverVersion => "ALP_DRIVER_VERSION",
            AlpStatus::SdramInit => "ALP_SDRAM_INIT",
            AlpStatus::Unknown(_) => "ALP_UNKNOWN",
        }
    }

    /// Human-readable message from the vendor documentation.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            AlpStatus::NotOnline => "The specified ALP device has not been found or is not ready.",
            AlpStatus::NotIdle => "The ALP device is not in idle state.",
            AlpStatus::NotAvailable => "The specified ALP device identifier is not valid.",
            AlpStatus::NotReady => "The specified ALP device is already allocated.",
            AlpStatus::ParmInvalid => "One of the parameters is invalid.",
            AlpStatus::AddrInvalid => "Error accessing user data.",
            AlpStatus::MemoryFull => "The requested memory is not available (full?).",
            AlpStatus::SeqInUse => "The sequence specified is currently in use.",
            AlpStatus::Halted => {
                "The ALP device has been stopped while image data transfer was active."
            }
            AlpStatus::ErrorInit => "Initialization error.",
            AlpStatus::ErrorComm => "Communication error.",
            AlpStatus::DeviceRemoved => "The specified ALP has been removed.",
            AlpStatus::NotConfigured => "The onboard FPGA is unconfigured.",
            AlpStatus::LoaderVersion => {
                "The function is not supported by this version of the driver file VlxUsbLd.sys."
            }
            AlpStatus::ErrorPowerDown => {
                "Waking up the DMD from PWR_FLOAT did not work (ALP_DMD_POWER_FLOAT)."
            }
            AlpStatus::DriverVersion => {
                "Support in ALP drivers missing. Update drivers and power-cycle device."
            }
            AlpStatus::SdramInit => "SDRAM Initialization failed.",
            AlpStatus::Unknown(_) => "Unknown ALP return code.",
        }
    }
}

impl fmt::Display for AlpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message())
    }
}

impl std::error::Error for AlpStatus {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_not_a_status() {
        assert_eq!(AlpStatus::from_code(ALP_OK), None);
        assert_eq!(AlpStatus::check(ALP_OK), Ok(()));
    }

    #[test]
    fn known_codes_round_trip() {
        for status in AlpStatus::KNOWN {
            assert_eq!(AlpStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn gaps_in_the_table_are_unknown() {
        for code in [1015, 1016, 1017, 1021, -1] {
            assert_eq!(AlpStatus::from_code(code), Some(AlpStatus::Unknown(code)));
        }
    }

    #[test]
    fn display_includes_name_code_and_message() {
        let table = AlpStatus::KNOWN
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(table, @r"
        ALP_NOT_ONLINE (1001): The specified ALP device has not been found or is not ready.
        ALP_NOT_IDLE (1002): The ALP device is not in idle state.
        ALP_NOT_AVAILABLE (1003): The specified ALP device identifier is not valid.
        ALP_NOT_READY (1004): The specified ALP device is already allocated.
        ALP_PARM_INVALID (1005): One of the parameters is invalid.
        ALP_ADDR_INVALID (1006): Error accessing user data.
        ALP_MEMORY_FULL (1007): The requested memory is not available (full?).
        ALP_SEQ_IN_USE (1008): The sequence specified is currently in use.
        ALP_HALTED (1009): The ALP device has been stopped while image data transfer was active.
        ALP_ERROR_INIT (1010): Initialization error.
        ALP_ERROR_COMM (1011): Communication error.
        ALP_DEVICE_REMOVED (1012): The specified ALP has been removed.
        ALP_NOT_CONFIGURED (1013): The onboard FPGA is unconfigured.
        ALP_LOADER_VERSION (1014): The function is not supported by this version of the driver file VlxUsbLd.sys.
        ALP_ERROR_POWER_DOWN (1018): Waking up the DMD from PWR_FLOAT did not work (ALP_DMD_POWER_FLOAT).
        ALP_DRIVER_VERSION (1019): Support in ALP drivers missing. Update drivers and power-cycle device.
        ALP_SDRAM_INIT (1020): SDRAM Initialization failed.
        ");
    }

    #[test]
    fn unknown_code_keeps_its_value() {
        insta::assert_snapshot!(AlpStatus::Unknown(1016).to_string(), @"ALP_UNKNOWN (1016): Unknown ALP return code.");
    }
}
