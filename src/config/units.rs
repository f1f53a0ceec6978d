//! Unit types for step timing.
//!
//! Keeps step rates, timer frequencies and timer periods apart at compile time.

use serde::Deserialize;

/// Step rate in steps per second, as entered by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepsPerSec(pub u16);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

/// Hardware-timer ticks between two step pulses (compare-register value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct TimerTicks(pub u16);

impl TimerTicks {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

/// Frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Hertz(pub u32);

impl Hertz {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Timer period for a step rate, treating `self` as the timer tick frequency.
    ///
    /// Integer division, truncating. Returns `None` for a zero rate, or when the
    /// period would be zero ticks or overflow a 16-bit compare register.
    pub fn period_for(self, rate: StepsPerSec) -> Option<TimerTicks> {
        if rate.0 == 0 {
            return None;
        }
        let ticks = self.0 / u32::from(rate.0);
        match u16::try_from(ticks) {
            Ok(0) | Err(_) => None,
            Ok(t) => Some(TimerTicks(t)),
        }
    }

    /// Length of one timer tick in nanoseconds (truncated).
    pub fn tick_ns(self) -> u32 {
        if self.0 == 0 {
            0
        } else {
            1_000_000_000 / self.0
        }
    }
}
