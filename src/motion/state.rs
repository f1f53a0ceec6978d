//! Motion bookkeeping shared by the command loop and both interrupt handlers.
//!
//! Pure data and transitions; the hardware side effects live in
//! [`MotionController`](super::MotionController).

use crate::config::units::{StepsPerSec, TimerTicks};
use crate::error::MotionError;

use super::direction::Direction;

/// Counters, position and run flag for the single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionState {
    direction: Direction,
    rate: Option<StepsPerSec>,
    period: Option<TimerTicks>,
    /// Operator step count, kept across stops and reloaded by every start.
    steps_target: u16,
    steps_requested: u16,
    steps_done: u16,
    position: i32,
    home: i32,
    running: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionState {
    /// Power-on state: forward, nothing configured, origin at zero.
    pub const fn new() -> Self {
        Self {
            direction: Direction::Forward,
            rate: None,
            period: None,
            steps_target: 0,
            steps_requested: 0,
            steps_done: 0,
            position: 0,
            home: 0,
            running: false,
        }
    }

    /// Current direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Configured step rate, if any.
    #[inline]
    pub fn rate(&self) -> Option<StepsPerSec> {
        self.rate
    }

    /// Timer period derived from the rate.
    #[inline]
    pub fn period(&self) -> Option<TimerTicks> {
        self.period
    }

    /// Step count last entered by the operator.
    #[inline]
    pub fn steps_target(&self) -> u16 {
        self.steps_target
    }

    /// Step count of the active move; zero once stopped.
    #[inline]
    pub fn steps_requested(&self) -> u16 {
        self.steps_requested
    }

    /// Steps emitted since the last start.
    #[inline]
    pub fn steps_done(&self) -> u16 {
        self.steps_done
    }

    /// Position in steps relative to the power-on origin.
    #[inline]
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Position captured at the last home-line assertion.
    #[inline]
    pub fn home(&self) -> i32 {
        self.home
    }

    /// Whether the pulse generator is armed.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn set_rate(&mut self, rate: StepsPerSec, period: TimerTicks) {
        self.rate = Some(rate);
        self.period = Some(period);
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn request_steps(&mut self, steps: u16) -> Result<(), MotionError> {
        if self.running {
            return Err(MotionError::Busy);
        }
        self.steps_target = steps;
        self.steps_requested = steps;
        self.steps_done = 0;
        Ok(())
    }

    /// Check that a move can start and return the timer period to program.
    pub(crate) fn start_period(&self) -> Result<TimerTicks, MotionError> {
        let period = self.period.ok_or(MotionError::NoRateConfigured)?;
        if self.steps_target == 0 {
            return Err(MotionError::NoStepsRequested);
        }
        Ok(period)
    }

    pub(crate) fn reset_for_start(&mut self) {
        self.steps_requested = self.steps_target;
        self.steps_done = 0;
    }

    pub(crate) fn mark_running(&mut self) {
        self.running = true;
    }

    pub(crate) fn halt(&mut self) {
        self.running = false;
        self.steps_requested = 0;
    }

    /// Whether the next tick should emit a pulse.
    #[inline]
    pub(crate) fn step_pending(&self) -> bool {
        self.steps_done < self.steps_requested
    }

    /// Account for one emitted pulse. Returns the new position.
    pub(crate) fn record_step(&mut self) -> i32 {
        self.steps_done += 1;
        self.position = self.position.wrapping_add(self.direction.sign());
        self.position
    }

    pub(crate) fn record_home(&mut self) -> i32 {
        self.home = self.position;
        self.home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(target: u16) -> MotionState {
        let mut state = MotionState::new();
        state.set_rate(StepsPerSec(100), TimerTicks(576));
        state.request_steps(target).unwrap();
        state
    }

    #[test]
    fn test_power_on_state() {
        let state = MotionState::new();
        assert_eq!(state.direction(), Direction::Forward);
        assert_eq!(state.position(), 0);
        assert_eq!(state.home(), 0);
        assert_eq!(state.steps_requested(), 0);
        assert_eq!(state.steps_done(), 0);
        assert!(!state.is_running());
        assert_eq!(state.rate(), None);
    }

    #[test]
    fn test_start_requires_rate() {
        let mut state = MotionState::new();
        state.request_steps(10).unwrap();
        assert_eq!(state.start_period(), Err(MotionError::NoRateConfigured));
    }

    #[test]
    fn test_start_requires_steps() {
        let state = configured(0);
        assert_eq!(state.start_period(), Err(MotionError::NoStepsRequested));
    }

    #[test]
    fn test_request_while_running_is_rejected() {
        let mut state = configured(5);
        state.reset_for_start();
        state.mark_running();

        assert_eq!(state.request_steps(9), Err(MotionError::Busy));
        assert_eq!(state.steps_target(), 5);
    }

    #[test]
    fn test_steps_run_out() {
        let mut state = configured(3);
        state.reset_for_start();
        state.mark_running();

        let mut pulses = 0;
        while state.step_pending() {
            state.record_step();
            pulses += 1;
        }
        assert_eq!(pulses, 3);
        assert_eq!(state.position(), 3);
        assert_eq!(state.steps_done(), 3);
    }

    #[test]
    fn test_reverse_steps_decrement() {
        let mut state = configured(2);
        state.set_direction(Direction::Reverse);
        state.reset_for_start();
        assert_eq!(state.record_step(), -1);
        assert_eq!(state.record_step(), -2);
    }

    #[test]
    fn test_halt_clears_request_but_keeps_target() {
        let mut state = configured(7);
        state.reset_for_start();
        state.mark_running();
        state.halt();

        assert!(!state.is_running());
        assert_eq!(state.steps_requested(), 0);
        assert!(!state.step_pending());
        assert_eq!(state.steps_target(), 7);

        // A fresh start picks the operator target up again
        state.reset_for_start();
        assert_eq!(state.steps_requested(), 7);
        assert_eq!(state.steps_done(), 0);
    }

    #[test]
    fn test_record_home() {
        let mut state = configured(37);
        state.reset_for_start();
        for _ in 0..37 {
            state.record_step();
        }
        assert_eq!(state.record_home(), 37);
        assert_eq!(state.home(), 37);
    }
}
