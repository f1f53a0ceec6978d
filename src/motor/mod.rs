//! Motor module for stepper-bench.
//!
//! Driver outputs, the step timer seam and the step pulse generator.

mod driver;
mod pulse;
mod timer;

pub use driver::{DriverControl, DriverOutputs};
pub use pulse::{StepPulseGenerator, TickOutcome};
pub use timer::PulseTimer;
