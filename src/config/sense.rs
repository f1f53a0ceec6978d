//! Sense-line polarity configuration.

use serde::Deserialize;

/// Electrical level at which a sense line means "event occurred".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LinePolarity {
    /// Asserted when the pin reads low (switch to ground, pull-up idle).
    ActiveLow,
    /// Asserted when the pin reads high.
    ActiveHigh,
}

impl LinePolarity {
    /// Whether a raw pin level means the line is asserted.
    #[inline]
    pub fn is_asserted(self, pin_high: bool) -> bool {
        match self {
            LinePolarity::ActiveLow => !pin_high,
            LinePolarity::ActiveHigh => pin_high,
        }
    }
}

/// Polarity of each of the three sense lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SenseConfig {
    /// Forward travel limit.
    pub forward_limit: LinePolarity,
    /// Reverse travel limit.
    pub reverse_limit: LinePolarity,
    /// Home reference switch.
    pub home: LinePolarity,
}

impl Default for SenseConfig {
    fn default() -> Self {
        Self {
            forward_limit: LinePolarity::ActiveLow,
            reverse_limit: LinePolarity::ActiveLow,
            home: LinePolarity::ActiveHigh,
        }
    }
}
