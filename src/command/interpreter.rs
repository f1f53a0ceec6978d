//! Serial command loop.
//!
//! Foreground task: blocks on the serial port, echoes each command byte and
//! dispatches it to the shared motion controller. Errors are reported to the
//! operator and the loop carries on; only a failing transport is passed up.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::SerialConfig;
use crate::error::{CommandError, Error, Result};
use crate::motion::{Direction, MotionStatus, SharedMotion};
use crate::motor::{DriverControl, PulseTimer};

use super::parser::{Command, NumberParser, ParseStep};
use super::serial::SerialPort;

const CRLF: &str = "\n\r";
const PROMPT: &str = ">";
const BANNER: &str = "Stepper Motor Bench\n\r";

// Prompts continue the echoed command letter.
const DIRECTION_PROMPT: &str = "irection: forward or reverse <f|r>: ";
const RATE_PROMPT: &str = "teps per second: ";
const STEPS_PROMPT: &str = "steps: ";
const CURRENT_PROMPT: &str = "urrent adjust -- set max current now, hit any key to exit";

const UNKNOWN_COMMAND: &str = " - unknown command";
const HELP: &str = "\n\rCommands\n\r\
\tC - Current measurement mode\n\r\
\tg - go (start motion)\n\r\
\td - motor direction, set to (f)orward or (r)everse\n\r\
\tn - number of steps\n\r\
\ts - steps per second\n\r\
\tS - print status\n\r\
\t<spacebar> - Stop motor motion\n\r\n\r";

/// Command interpreter over a [`SerialPort`].
pub struct CommandInterpreter<P: SerialPort> {
    port: P,
    echo: bool,
}

impl<P: SerialPort> CommandInterpreter<P> {
    /// Create an interpreter on `port`.
    pub fn new(port: P, config: &SerialConfig) -> Self {
        Self {
            port,
            echo: config.echo,
        }
    }

    /// Borrow the port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutably borrow the port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Give the port back.
    pub fn into_port(self) -> P {
        self.port
    }

    /// Send the start-up banner and first prompt.
    pub fn banner(&mut self) -> Result<()> {
        self.write_str(BANNER)?;
        self.write_str(PROMPT)
    }

    /// Serve commands forever.
    pub fn run<DRV, TMR, DLY>(&mut self, motion: &SharedMotion<DRV, TMR, DLY>) -> !
    where
        DRV: DriverControl,
        TMR: PulseTimer,
        DLY: DelayNs,
    {
        loop {
            if self.run_once(motion).is_err() {
                warn!("serial transport error");
            }
        }
    }

    /// Read, echo and execute one command, then prompt.
    ///
    /// # Errors
    ///
    /// Only `CommandError::Transport`; every other failure is reported on the
    /// serial line.
    pub fn run_once<DRV, TMR, DLY>(&mut self, motion: &SharedMotion<DRV, TMR, DLY>) -> Result<()>
    where
        DRV: DriverControl,
        TMR: PulseTimer,
        DLY: DelayNs,
    {
        let byte = self.read()?;
        self.echo(byte)?;

        let outcome = match Command::from_byte(byte) {
            Some(command) => self.execute(command, motion),
            None => Err(CommandError::UnknownCommand(byte).into()),
        };

        if let Err(e) = outcome {
            if e == Error::Command(CommandError::Transport) {
                return Err(e);
            }
            debug!("command {} rejected", byte);
            self.report(&e)?;
        }

        self.write_str(PROMPT)
    }

    fn execute<DRV, TMR, DLY>(
        &mut self,
        command: Command,
        motion: &SharedMotion<DRV, TMR, DLY>,
    ) -> Result<()>
    where
        DRV: DriverControl,
        TMR: PulseTimer,
        DLY: DelayNs,
    {
        match command {
            Command::Newline => self.write_str(CRLF),
            Command::Stop => {
                motion.stop()?;
                self.write_str(CRLF)
            }
            Command::CurrentAdjust => {
                self.write_str(CURRENT_PROMPT)?;
                motion.hold_current()?;
                // Any key ends it; the key itself is swallowed
                let key = self.read();
                let released = motion.release_current();
                key?;
                released?;
                self.write_str(CRLF)
            }
            Command::Direction => {
                self.write_str(DIRECTION_PROMPT)?;
                let arg = self.read()?;
                self.echo(arg)?;
                let direction =
                    Direction::from_byte(arg).ok_or(CommandError::InvalidArgument(arg))?;
                motion.set_direction(direction)?;
                self.write_str(CRLF)
            }
            Command::Go => {
                motion.start()?;
                self.write_str(CRLF)
            }
            Command::Steps => {
                self.write_str(STEPS_PROMPT)?;
                let steps = self.read_u16()?;
                motion.request_steps(steps)
            }
            Command::Rate => {
                self.write_str(RATE_PROMPT)?;
                let rate = self.read_u16()?;
                motion.configure_rate(rate).map(|_| ())
            }
            Command::Status => {
                let (status, tick_ns) =
                    motion.with(|ctl| Ok((ctl.status(), ctl.timer_frequency().tick_ns())))?;
                self.print_status(&status, tick_ns)
            }
        }
    }

    fn report(&mut self, error: &Error) -> Result<()> {
        match error {
            Error::Command(CommandError::UnknownCommand(_)) => {
                self.write_str(UNKNOWN_COMMAND)?;
                self.write_str(HELP)
            }
            Error::Command(CommandError::InvalidArgument(_)) => {
                self.write_str("?")?;
                self.write_str(CRLF)
            }
            Error::Motion(e) => self.print(format_args!("\r\nError: {}{}", e, CRLF)),
            other => self.print(format_args!("\r\nError: {}{}", other, CRLF)),
        }
    }

    fn print_status(&mut self, s: &MotionStatus, tick_ns: u32) -> Result<()> {
        self.print(format_args!("{}Status{}", CRLF, CRLF))?;
        self.print(format_args!("\tposition = {}{}", s.position, CRLF))?;
        self.print(format_args!("\thome = {}{}", s.home, CRLF))?;
        self.print(format_args!("\tnsteps requested = {}{}", s.steps_target, CRLF))?;
        self.print(format_args!(
            "\tsteps per second = {}{}",
            s.rate.map(|r| r.0).unwrap_or(0),
            CRLF
        ))?;
        self.print(format_args!("\tdirection = {}{}", s.direction.as_char(), CRLF))?;
        self.print(format_args!(
            "\tticks ({} ns each) per step = {}{}",
            tick_ns,
            s.period.map(|p| p.0).unwrap_or(0),
            CRLF
        ))?;
        self.print(format_args!("\tsteps done = {}{}", s.steps_done, CRLF))?;
        self.print(format_args!(
            "\trunning = {}{}{}",
            if s.running { "yes" } else { "no" },
            CRLF,
            CRLF
        ))
    }

    /// Numeric argument as `u16`; anything out of range reads as 0.
    fn read_u16(&mut self) -> Result<u16> {
        let value = self.read_number()?;
        Ok(u16::try_from(value).unwrap_or(0))
    }

    fn read_number(&mut self) -> Result<i32> {
        let mut parser = NumberParser::new();
        loop {
            let byte = self.read()?;
            self.echo(byte)?;
            match parser.push(byte) {
                ParseStep::Pending => {}
                ParseStep::Done(value) => {
                    self.write_byte(b'\n')?;
                    return Ok(value);
                }
                ParseStep::TooLong => {
                    debug!("numeric argument too long");
                    self.write_str(CRLF)?;
                    self.write_str("?")?;
                    self.write_str(CRLF)?;
                    return Ok(0);
                }
            }
        }
    }

    fn read(&mut self) -> Result<u8> {
        self.port
            .read_byte()
            .map_err(|_| CommandError::Transport.into())
    }

    fn echo(&mut self, byte: u8) -> Result<()> {
        if self.echo {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.port
            .write_byte(byte)
            .map_err(|_| CommandError::Transport.into())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.port
            .write_str(s)
            .map_err(|_| CommandError::Transport.into())
    }

    fn print(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        fmt::Write::write_fmt(&mut PortWriter(&mut self.port), args)
            .map_err(|_| CommandError::Transport.into())
    }
}

struct PortWriter<'a, P: SerialPort>(&'a mut P);

impl<P: SerialPort> fmt::Write for PortWriter<'_, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s).map_err(|_| fmt::Error)
    }
}
