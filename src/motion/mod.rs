//! Motion module for stepper-bench.
//!
//! Motion state, the controller that keeps it in step with the hardware, and the
//! critical-section slot shared by the command loop and the interrupt handlers.

mod controller;
mod direction;
mod shared;
mod state;

pub use controller::{MotionController, MotionStatus};
pub use direction::Direction;
pub use shared::SharedMotion;
pub use state::MotionState;
