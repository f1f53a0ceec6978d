//! Controller configuration - root configuration structure.

use serde::Deserialize;

use super::sense::SenseConfig;
use super::units::Hertz;

/// 14.7456 MHz crystal with the timer prescaler at 256.
pub const DEFAULT_TIMER_FREQUENCY: Hertz = Hertz(57_600);

/// Root configuration structure from TOML.
///
/// Every field has a default, so an empty document is a valid configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Tick frequency of the step timer.
    #[serde(rename = "timer_frequency_hz")]
    pub timer_frequency: Hertz,

    /// Width of the high phase of a step pulse, in microseconds.
    /// The low phase that follows has the same width.
    pub step_pulse_width_us: u32,

    /// Time the driver gets to settle after being energized, in milliseconds.
    pub power_settle_ms: u32,

    /// Invert direction pin logic.
    pub invert_direction: bool,

    /// Serial transport settings.
    pub serial: SerialConfig,

    /// Sense-line polarities.
    pub sense: SenseConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            timer_frequency: DEFAULT_TIMER_FREQUENCY,
            step_pulse_width_us: 10,
            power_settle_ms: 10,
            invert_direction: false,
            serial: SerialConfig::default(),
            sense: SenseConfig::default(),
        }
    }
}

/// Serial line settings, handed to whatever sets up the transport.
///
/// Framing is fixed at 8 data bits, no parity, one stop bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Line speed.
    pub baud_rate: u32,
    /// Echo received command bytes back to the operator.
    pub echo: bool,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            echo: true,
        }
    }
}
