//! Error types for stepper-bench.
//!
//! Provides unified error handling across configuration, motion control, sense-line
//! monitoring and the serial command interpreter.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-bench operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motion controller or pulse generator error
    Motion(MotionError),
    /// Sense-line read error
    Sense(SenseError),
    /// Command interpreter error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Timer tick frequency must be > 0
    InvalidTimerFrequency(u32),
    /// Step pulse width must be > 0 microseconds
    InvalidPulseWidth(u32),
    /// Serial baud rate must be > 0
    InvalidBaudRate(u32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motion controller errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Steps per second is zero or yields a timer period outside the compare register
    InvalidRate(u16),
    /// `start` was called before a step rate was configured
    NoRateConfigured,
    /// `start` was called with a step target of zero
    NoStepsRequested,
    /// Operation is not allowed while the motor is running
    Busy,
    /// The shared controller has not been installed yet
    NotInitialized,
    /// Output pin operation failed
    PinError,
}

/// Sense-line errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseError {
    /// Reading a sense input failed
    PinError,
}

/// Command interpreter errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Unrecognized command byte
    UnknownCommand(u8),
    /// Unrecognized single-character argument
    InvalidArgument(u8),
    /// Serial transport failed
    Transport,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Sense(e) => write!(f, "Sense error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidTimerFrequency(v) => {
                write!(f, "Invalid timer frequency: {} Hz. Must be > 0", v)
            }
            ConfigError::InvalidPulseWidth(v) => {
                write!(f, "Invalid step pulse width: {} us. Must be > 0", v)
            }
            ConfigError::InvalidBaudRate(v) => write!(f, "Invalid baud rate: {}. Must be > 0", v),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::InvalidRate(v) => write!(f, "Invalid step rate: {} steps per second", v),
            MotionError::NoRateConfigured => write!(f, "Steps per second is 0; no motion"),
            MotionError::NoStepsRequested => write!(f, "Number of steps is 0; no motion"),
            MotionError::Busy => write!(f, "Motor is running"),
            MotionError::NotInitialized => write!(f, "Motion controller not installed"),
            MotionError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for SenseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenseError::PinError => write!(f, "Sense input read failed"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand(b) => write!(f, "Unknown command: 0x{:02x}", b),
            CommandError::InvalidArgument(b) => write!(f, "Invalid argument: 0x{:02x}", b),
            CommandError::Transport => write!(f, "Serial transport failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<SenseError> for Error {
    fn from(e: SenseError) -> Self {
        Error::Sense(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for SenseError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
