//! Simulated bench hardware shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

use stepper_bench::config::TimerTicks;
use stepper_bench::sense::SenseEvent;
use stepper_bench::{
    CommandInterpreter, ControllerConfig, Direction, DriverControl, MotionController,
    MotionStatus, PulseTimer, Result, SenseInputs, SenseLineMonitor, SerialPort,
    SharedMotion, StepPulseGenerator, TickOutcome,
};

/// Serial port fed from a script; reads fail once it runs dry.
#[derive(Debug, Default)]
pub struct ScriptedPort {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl ScriptedPort {
    pub fn feed(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    pub fn take_output(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.output).into_owned();
        self.output.clear();
        text
    }
}

impl SerialPort for ScriptedPort {
    type Error = ();

    fn read_byte(&mut self) -> core::result::Result<u8, ()> {
        self.input.pop_front().ok_or(())
    }

    fn write_byte(&mut self, byte: u8) -> core::result::Result<(), ()> {
        self.output.push(byte);
        Ok(())
    }
}

/// Driver that records its outputs in shared cells.
#[derive(Debug, Clone, Default)]
pub struct SimDriver {
    pub energized: Rc<Cell<bool>>,
    pub direction: Rc<Cell<Direction>>,
}

impl DriverControl for SimDriver {
    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        self.direction.set(direction);
        Ok(())
    }

    fn energize(&mut self) -> Result<()> {
        self.energized.set(true);
        Ok(())
    }

    fn de_energize(&mut self) -> Result<()> {
        self.energized.set(false);
        Ok(())
    }
}

/// Step timer that records its period and armed flag.
#[derive(Debug, Clone, Default)]
pub struct SimTimer {
    pub period: Rc<Cell<u16>>,
    pub armed: Rc<Cell<bool>>,
}

impl PulseTimer for SimTimer {
    fn set_period(&mut self, ticks: TimerTicks) {
        self.period.set(ticks.0);
    }

    fn arm(&mut self) {
        self.armed.set(true);
    }

    fn disarm(&mut self) {
        self.armed.set(false);
    }
}

/// STEP output that counts rising edges.
#[derive(Debug, Clone, Default)]
pub struct PulseCounter {
    pub pulses: Rc<Cell<u32>>,
    high: bool,
}

impl ErrorType for PulseCounter {
    type Error = Infallible;
}

impl OutputPin for PulseCounter {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        if !self.high {
            self.pulses.set(self.pulses.get() + 1);
        }
        self.high = true;
        Ok(())
    }
}

/// Input whose electrical level the test controls.
#[derive(Debug, Clone, Default)]
pub struct SimInput(pub Rc<Cell<bool>>);

impl SimInput {
    pub fn high() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn low() -> Self {
        Self(Rc::new(Cell::new(false)))
    }
}

impl ErrorType for SimInput {
    type Error = Infallible;
}

impl InputPin for SimInput {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

pub type BenchMotion = SharedMotion<SimDriver, SimTimer, NoopDelay>;

/// Whole bench on default configuration: limits active-low, home active-high,
/// all lines idle.
pub struct Bench {
    pub motion: BenchMotion,
    pub cli: CommandInterpreter<ScriptedPort>,
    pub generator: StepPulseGenerator<PulseCounter, NoopDelay>,
    pub monitor: SenseLineMonitor<SimInput, SimInput, SimInput>,
    pub driver: SimDriver,
    pub timer: SimTimer,
    pub pulses: Rc<Cell<u32>>,
    pub forward_limit: Rc<Cell<bool>>,
    pub home: Rc<Cell<bool>>,
    pub reverse_limit: Rc<Cell<bool>>,
}

impl Bench {
    pub fn new() -> Self {
        let config = ControllerConfig::default();

        let driver = SimDriver::default();
        let timer = SimTimer::default();
        let controller =
            MotionController::new(driver.clone(), timer.clone(), NoopDelay::new(), &config)
                .unwrap();

        let step = PulseCounter::default();
        let pulses = step.pulses.clone();

        let (fl, hm, rl) = (SimInput::high(), SimInput::low(), SimInput::high());
        let (forward_limit, home, reverse_limit) = (fl.0.clone(), hm.0.clone(), rl.0.clone());
        let monitor =
            SenseLineMonitor::new(SenseInputs::new(fl, hm, rl, config.sense)).unwrap();

        Self {
            motion: SharedMotion::with_controller(controller),
            cli: CommandInterpreter::new(ScriptedPort::default(), &config.serial),
            generator: StepPulseGenerator::new(step, NoopDelay::new(), &config),
            monitor,
            driver,
            timer,
            pulses,
            forward_limit,
            home,
            reverse_limit,
        }
    }

    /// Type `input` and run the interpreter until it is consumed; returns what
    /// the bench printed.
    pub fn type_input(&mut self, input: &[u8]) -> String {
        self.cli.port_mut().feed(input);
        while !self.cli.port().input.is_empty() {
            self.cli.run_once(&self.motion).unwrap();
        }
        self.cli.port_mut().take_output()
    }

    /// Deliver one timer tick if the timer is armed.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.timer.armed.get() {
            return None;
        }
        Some(self.generator.on_tick(&self.motion).unwrap())
    }

    /// Tick until the timer disarms, at most `limit` times; returns the tick count.
    pub fn run_until_idle(&mut self, limit: usize) -> usize {
        let mut ticks = 0;
        while ticks < limit && self.tick().is_some() {
            ticks += 1;
        }
        ticks
    }

    /// Deliver a pin-change interrupt.
    pub fn sense(&mut self) -> Vec<SenseEvent> {
        self.monitor.on_change(&self.motion).unwrap().into_iter().collect()
    }

    pub fn status(&self) -> MotionStatus {
        self.motion.status().unwrap()
    }
}
