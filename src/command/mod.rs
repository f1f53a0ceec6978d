//! Command module for stepper-bench.
//!
//! Single-character operator commands over a serial line, numeric argument
//! parsing and the interpreter loop that drives the shared motion controller.

mod interpreter;
mod parser;
mod serial;

pub use interpreter::CommandInterpreter;
pub use parser::{parse_decimal, Command, NumberParser, ParseStep, MAX_DIGITS};
pub use serial::SerialPort;
