//! Hardware stand-ins for unit tests.

use embedded_hal_mock::eh1::delay::NoopDelay;

use crate::config::units::TimerTicks;
use crate::config::ControllerConfig;
use crate::error::Result;
use crate::motion::{Direction, MotionController, SharedMotion};
use crate::motor::{DriverControl, PulseTimer};

/// Driver that only remembers whether it is powered.
#[derive(Debug, Default)]
pub struct NullDriver {
    /// Enable line state.
    pub energized: bool,
}

impl DriverControl for NullDriver {
    fn set_direction(&mut self, _direction: Direction) -> Result<()> {
        Ok(())
    }

    fn energize(&mut self) -> Result<()> {
        self.energized = true;
        Ok(())
    }

    fn de_energize(&mut self) -> Result<()> {
        self.energized = false;
        Ok(())
    }
}

/// Timer that only remembers its period and armed flag.
#[derive(Debug, Default)]
pub struct ArmFlag {
    /// Last programmed period.
    pub period: Option<TimerTicks>,
    /// Whether ticks would fire.
    pub armed: bool,
}

impl PulseTimer for ArmFlag {
    fn set_period(&mut self, ticks: TimerTicks) {
        self.period = Some(ticks);
    }

    fn arm(&mut self) {
        self.armed = true;
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

/// Shared slot over the null doubles.
pub type TestMotion = SharedMotion<NullDriver, ArmFlag, NoopDelay>;

/// Controller on default configuration.
pub fn controller() -> MotionController<NullDriver, ArmFlag, NoopDelay> {
    MotionController::new(
        NullDriver::default(),
        ArmFlag::default(),
        NoopDelay::new(),
        &ControllerConfig::default(),
    )
    .unwrap()
}

/// Slot already holding [`controller`].
pub fn motion() -> TestMotion {
    SharedMotion::with_controller(controller())
}
