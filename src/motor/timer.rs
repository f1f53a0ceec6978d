//! Step timer seam.

use crate::config::units::TimerTicks;

/// Periodic-compare timer that raises the step interrupt.
///
/// Implementations are thin register wrappers. While armed, the timer calls
/// [`StepPulseGenerator::on_tick`](super::StepPulseGenerator::on_tick) once per
/// period.
pub trait PulseTimer {
    /// Load the compare value. Does not change the armed state.
    fn set_period(&mut self, ticks: TimerTicks);

    /// Start counting and raising compare interrupts.
    fn arm(&mut self);

    /// Stop counting. No tick fires after this returns.
    fn disarm(&mut self);
}
