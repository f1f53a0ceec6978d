//! Bench simulation.
//!
//! Runs the command interpreter, step timer and sense-line monitor against
//! simulated pins and prints the serial session to stdout. The operator script
//! sets a rate, runs a move forward, trips the home sensor half way, backs off
//! and finally hits the reverse limit.
//!
//! Run with: `cargo run --example bench_sim`

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::io::Write;
use std::rc::Rc;

use stepper_bench::{
    config::TimerTicks, CommandInterpreter, ControllerConfig, Direction, DriverControl,
    MotionController, PulseTimer, Result, SenseInputs, SenseLineMonitor, SerialPort,
    SharedMotion, StepPulseGenerator,
};

/// Delay provider that does not wait.
struct InstantDelay;

impl embedded_hal::delay::DelayNs for InstantDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Console standing in for the UART.
struct Console {
    script: VecDeque<u8>,
}

impl SerialPort for Console {
    type Error = ();

    fn read_byte(&mut self) -> core::result::Result<u8, ()> {
        self.script.pop_front().ok_or(())
    }

    fn write_byte(&mut self, byte: u8) -> core::result::Result<(), ()> {
        let mut out = std::io::stdout();
        out.write_all(&[byte]).map_err(|_| ())?;
        if byte == b'\r' {
            out.flush().map_err(|_| ())?;
        }
        Ok(())
    }
}

/// Driver outputs printed as they change.
struct SimDriver;

impl DriverControl for SimDriver {
    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        log::debug!("DIR -> {}", direction.as_char());
        Ok(())
    }

    fn energize(&mut self) -> Result<()> {
        log::debug!("EN -> high");
        Ok(())
    }

    fn de_energize(&mut self) -> Result<()> {
        log::debug!("EN -> low");
        Ok(())
    }
}

/// Timer whose armed flag the main loop polls.
struct SimTimer {
    armed: Rc<Cell<bool>>,
}

impl PulseTimer for SimTimer {
    fn set_period(&mut self, ticks: TimerTicks) {
        log::debug!("OCR1A -> {}", ticks.0);
    }

    fn arm(&mut self) {
        self.armed.set(true);
    }

    fn disarm(&mut self) {
        self.armed.set(false);
    }
}

struct StepPin;

impl embedded_hal::digital::ErrorType for StepPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for StepPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Clone)]
struct SensePin(Rc<Cell<bool>>);

impl embedded_hal::digital::ErrorType for SensePin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for SensePin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = ControllerConfig::default();

    let armed = Rc::new(Cell::new(false));
    let motion = SharedMotion::with_controller(MotionController::new(
        SimDriver,
        SimTimer {
            armed: armed.clone(),
        },
        InstantDelay,
        &config,
    )?);
    let mut generator = StepPulseGenerator::new(StepPin, InstantDelay, &config);

    // Limits idle high, home idle low
    let home = SensePin(Rc::new(Cell::new(false)));
    let reverse_limit = SensePin(Rc::new(Cell::new(true)));
    let mut monitor = SenseLineMonitor::new(SenseInputs::new(
        SensePin(Rc::new(Cell::new(true))),
        home.clone(),
        reverse_limit.clone(),
        config.sense,
    ))?;

    let mut cli = CommandInterpreter::new(
        Console {
            script: VecDeque::new(),
        },
        &config.serial,
    );
    cli.banner()?;

    let session = |cli: &mut CommandInterpreter<Console>, input: &[u8]| -> Result<()> {
        cli.port_mut().script.extend(input.iter().copied());
        while !cli.port().script.is_empty() {
            cli.run_once(&motion)?;
        }
        Ok(())
    };

    // Forward move with the home sensor passing at step 40
    session(&mut cli, b"s100\rn80\rg")?;
    let mut ticks = 0;
    while armed.get() {
        generator.on_tick(&motion)?;
        ticks += 1;
        if ticks == 40 {
            home.0.set(true);
            for event in monitor.on_change(&motion)? {
                println!("  [sense] {:?}", event);
            }
        }
    }
    home.0.set(false);
    monitor.on_change(&motion)?;
    session(&mut cli, b"S")?;

    // Back off and run into the reverse limit
    session(&mut cli, b"drn200\rg")?;
    ticks = 0;
    while armed.get() {
        generator.on_tick(&motion)?;
        ticks += 1;
        if ticks == 120 {
            reverse_limit.0.set(false);
            for event in monitor.on_change(&motion)? {
                println!("  [sense] {:?}", event);
            }
        }
    }
    session(&mut cli, b"S")?;

    println!();
    Ok(())
}
