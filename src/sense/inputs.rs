//! Sense-line input pins.

use embedded_hal::digital::InputPin;

use crate::config::{LinePolarity, SenseConfig};
use crate::error::{Result, SenseError};

use super::line::{LineState, SenseSnapshot};

/// The three sense inputs with their configured polarities.
///
/// The pins are expected to have pull-ups enabled by whoever configures them.
pub struct SenseInputs<FL, HM, RL>
where
    FL: InputPin,
    HM: InputPin,
    RL: InputPin,
{
    forward_limit: FL,
    home: HM,
    reverse_limit: RL,
    polarity: SenseConfig,
}

impl<FL, HM, RL> SenseInputs<FL, HM, RL>
where
    FL: InputPin,
    HM: InputPin,
    RL: InputPin,
{
    /// Wrap the pins.
    pub fn new(forward_limit: FL, home: HM, reverse_limit: RL, polarity: SenseConfig) -> Self {
        Self {
            forward_limit,
            home,
            reverse_limit,
            polarity,
        }
    }

    /// Read all three lines.
    pub fn read(&mut self) -> Result<SenseSnapshot> {
        Ok(SenseSnapshot {
            forward_limit: read_line(&mut self.forward_limit, self.polarity.forward_limit)?,
            home: read_line(&mut self.home, self.polarity.home)?,
            reverse_limit: read_line(&mut self.reverse_limit, self.polarity.reverse_limit)?,
        })
    }

    /// Give the pins back.
    pub fn release(self) -> (FL, HM, RL) {
        (self.forward_limit, self.home, self.reverse_limit)
    }
}

fn read_line<P: InputPin>(pin: &mut P, polarity: LinePolarity) -> Result<LineState> {
    let high = pin.is_high().map_err(|_| SenseError::PinError)?;
    Ok(LineState::from_asserted(polarity.is_asserted(high)))
}
