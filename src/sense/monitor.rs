//! Sense-line monitor.
//!
//! Runs from the pin-change interrupt. Compares the lines against the previous
//! observation and acts only on lines that actually changed, so a switch that is
//! already closed at power-up, or one that bounces back within one observation,
//! never fires.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use heapless::Vec;

use crate::error::Result;
use crate::motion::{MotionController, SharedMotion};
use crate::motor::{DriverControl, PulseTimer};

use super::inputs::SenseInputs;
use super::line::{classify, SenseAction, SenseLine, SenseSnapshot};

/// Actions from one observation, at most one per line.
pub type SenseActions = Vec<(SenseLine, SenseAction), 3>;

/// What the monitor did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseEvent {
    /// A limit line asserted and motion was stopped.
    LimitTripped(SenseLine),
    /// The home line asserted at this position.
    HomeRecorded {
        /// Captured position.
        position: i32,
    },
}

/// Edge detector for the forward-limit, home and reverse-limit lines.
pub struct SenseLineMonitor<FL, HM, RL>
where
    FL: InputPin,
    HM: InputPin,
    RL: InputPin,
{
    inputs: SenseInputs<FL, HM, RL>,
    snapshot: SenseSnapshot,
}

impl<FL, HM, RL> SenseLineMonitor<FL, HM, RL>
where
    FL: InputPin,
    HM: InputPin,
    RL: InputPin,
{
    /// Create the monitor, seeding the snapshot from the current line levels.
    pub fn new(mut inputs: SenseInputs<FL, HM, RL>) -> Result<Self> {
        let snapshot = inputs.read()?;
        debug!(
            "sense lines at start: fl={} home={} rl={}",
            snapshot.forward_limit == super::LineState::Asserted,
            snapshot.home == super::LineState::Asserted,
            snapshot.reverse_limit == super::LineState::Asserted
        );
        Ok(Self { inputs, snapshot })
    }

    /// Last observed line states.
    #[inline]
    pub fn snapshot(&self) -> SenseSnapshot {
        self.snapshot
    }

    /// Record a new observation and return the actions it calls for.
    ///
    /// Every changed line is classified on its own, in [`SenseLine::PRIORITY`]
    /// order, so simultaneous changes are all handled.
    pub fn observe(&mut self, next: SenseSnapshot) -> SenseActions {
        let mut actions = SenseActions::new();
        for line in self.snapshot.changed(&next) {
            if let Some(action) = classify(line, next.line(line)) {
                // One slot per line, cannot overflow
                let _ = actions.push((line, action));
            }
        }
        self.snapshot = next;
        actions
    }

    /// Handle a pin-change interrupt.
    ///
    /// Reads the lines, then applies all resulting actions inside one critical
    /// section.
    pub fn on_change<DRV, TMR, DLY>(
        &mut self,
        motion: &SharedMotion<DRV, TMR, DLY>,
    ) -> Result<Vec<SenseEvent, 3>>
    where
        DRV: DriverControl,
        TMR: PulseTimer,
        DLY: DelayNs,
    {
        let next = self.inputs.read()?;
        let actions = self.observe(next);
        if actions.is_empty() {
            return Ok(Vec::new());
        }
        motion.with(|ctl| apply(ctl, &actions))
    }

    /// Give the inputs back.
    pub fn release(self) -> SenseInputs<FL, HM, RL> {
        self.inputs
    }
}

/// Apply sense actions to a controller the caller has exclusive access to.
pub fn apply<DRV, TMR, DLY>(
    ctl: &mut MotionController<DRV, TMR, DLY>,
    actions: &[(SenseLine, SenseAction)],
) -> Result<Vec<SenseEvent, 3>>
where
    DRV: DriverControl,
    TMR: PulseTimer,
    DLY: DelayNs,
{
    let mut events = Vec::new();
    for &(line, action) in actions {
        let event = match action {
            SenseAction::Stop => {
                warn!("{} tripped at position {}", line.label(), ctl.state().position());
                ctl.stop()?;
                SenseEvent::LimitTripped(line)
            }
            SenseAction::RecordHome => SenseEvent::HomeRecorded {
                position: ctl.record_home(),
            },
        };
        let _ = events.push(event);
    }
    Ok(events)
}
