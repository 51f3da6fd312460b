//! Sequence timing and partial uploads.

use alp4_api::TimingParams;
use alp4_api::codes::ALP_DEFAULT;
use alp4_errors::{AlpError, AlpResult};

/// Timing of a sequence, in microseconds.
///
/// `None` leaves the value to the device. With both picture and
/// illumination time omitted the device runs at 30 Hz; with only one given
/// it derives the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceTiming {
    /// Display duration of each picture.
    pub illumination_time: Option<u32>,
    /// Period between pictures.
    pub picture_time: Option<u32>,
    /// Delay between frame start and the synch output.
    pub synch_delay: Option<u32>,
    /// Width of the synch output pulse.
    pub synch_pulse_width: Option<u32>,
    /// Delay between trigger input and frame start.
    pub trigger_in_delay: Option<u32>,
}

impl SequenceTiming {
    /// Fixed picture time, illumination filled in by the device.
    #[must_use]
    pub fn with_picture_time(picture_time: u32) -> Self {
        Self {
            picture_time: Some(picture_time),
            ..Self::default()
        }
    }

    /// Set the illumination time.
    #[must_use]
    pub fn illumination(mut self, us: u32) -> Self {
        self.illumination_time = Some(us);
        self
    }

    /// Set the synch output delay and pulse width.
    #[must_use]
    pub fn synch(mut self, delay_us: u32, pulse_width_us: u32) -> Self {
        self.synch_delay = Some(delay_us);
        self.synch_pulse_width = Some(pulse_width_us);
        self
    }

    /// Set the trigger input delay.
    #[must_use]
    pub fn trigger_in_delay(mut self, us: u32) -> Self {
        self.trigger_in_delay = Some(us);
        self
    }

    /// Native arguments, `ALP_DEFAULT` for every omitted value.
    ///
    /// # Errors
    ///
    /// [`AlpError::InvalidArgument`] for values above `i32::MAX`.
    pub fn to_params(&self) -> AlpResult<TimingParams> {
        Ok(TimingParams {
            illuminate_time: native_us("illumination_time", self.illumination_time)?,
            picture_time: native_us("picture_time", self.picture_time)?,
            synch_delay: native_us("synch_delay", self.synch_delay)?,
            synch_pulse_width: native_us("synch_pulse_width", self.synch_pulse_width)?,
            trigger_in_delay: native_us("trigger_in_delay", self.trigger_in_delay)?,
        })
    }
}

fn native_us(name: &'static str, value: Option<u32>) -> AlpResult<i32> {
    value.map_or(Ok(ALP_DEFAULT), |us| native_value(name, us))
}

/// Narrow a count or duration to the library's `long`.
pub(crate) fn native_value(name: &'static str, value: u32) -> AlpResult<i32> {
    i32::try_from(value).map_err(|e| AlpError::invalid_argument(name, format!("{value}: {e}")))
}

/// Section of a sequence written by a partial upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinePut {
    /// First picture.
    pub picture_offset: u32,
    /// Pictures to write, 0 for the rest of the sequence.
    pub picture_count: u32,
    /// First row of each picture.
    pub line_offset: u32,
    /// Rows to write, 0 for every row from `line_offset`.
    pub line_count: u32,
}

impl LinePut {
    /// Rows `line_offset..line_offset + line_count` of one picture.
    #[must_use]
    pub fn lines(picture: u32, line_offset: u32, line_count: u32) -> Self {
        Self {
            picture_offset: picture,
            picture_count: 1,
            line_offset,
            line_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_values_become_default() -> AlpResult {
        assert_eq!(SequenceTiming::default().to_params()?, TimingParams::default());
        Ok(())
    }

    #[test]
    fn test_values_pass_through() -> AlpResult {
        let params = SequenceTiming::with_picture_time(10_000)
            .illumination(8_000)
            .synch(100, 500)
            .trigger_in_delay(20)
            .to_params()?;
        assert_eq!(params.picture_time, 10_000);
        assert_eq!(params.illuminate_time, 8_000);
        assert_eq!(params.synch_delay, 100);
        assert_eq!(params.synch_pulse_width, 500);
        assert_eq!(params.trigger_in_delay, 20);
        Ok(())
    }

    #[test]
    fn test_overflow_is_rejected() {
        let timing = SequenceTiming::with_picture_time(u32::MAX);
        assert!(matches!(
            timing.to_params(),
            Err(AlpError::InvalidArgument {
                name: "picture_time",
                ..
            })
        ));
    }
}
