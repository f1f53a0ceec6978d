//! Command bytes and numeric arguments.

use heapless::Vec;

/// Longest unsigned argument; one more is allowed after a leading sign.
pub const MAX_DIGITS: usize = 5;

/// Operator commands, one byte each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `\r`: blank line.
    Newline,
    /// Space: stop motion.
    Stop,
    /// `C`: energize the driver without stepping until a key is hit.
    CurrentAdjust,
    /// `d`: set direction, followed by `f` or `r`.
    Direction,
    /// `g`: start motion.
    Go,
    /// `n`: number of steps, decimal argument.
    Steps,
    /// `s`: steps per second, decimal argument.
    Rate,
    /// `S`: print status.
    Status,
}

impl Command {
    /// Decode a command byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'\r' => Some(Command::Newline),
            b' ' => Some(Command::Stop),
            b'C' => Some(Command::CurrentAdjust),
            b'd' => Some(Command::Direction),
            b'g' => Some(Command::Go),
            b'n' => Some(Command::Steps),
            b's' => Some(Command::Rate),
            b'S' => Some(Command::Status),
            _ => None,
        }
    }
}

/// Progress of a [`NumberParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStep {
    /// Keep feeding bytes.
    Pending,
    /// Carriage return seen; the value.
    Done(i32),
    /// Length guard exceeded; the argument is discarded.
    TooLong,
}

/// Incremental decimal argument reader, terminated by carriage return.
///
/// No line editing. At most [`MAX_DIGITS`] characters, or one more when the first
/// is `+` or `-`.
#[derive(Debug, Default)]
pub struct NumberParser {
    buf: Vec<u8, { MAX_DIGITS + 1 }>,
}

impl NumberParser {
    /// Empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one received byte.
    pub fn push(&mut self, byte: u8) -> ParseStep {
        if byte == b'\r' {
            return ParseStep::Done(parse_decimal(&self.buf));
        }

        let limit = match self.buf.first() {
            Some(b'+' | b'-') => MAX_DIGITS + 1,
            _ => MAX_DIGITS,
        };
        if self.buf.len() >= limit || self.buf.push(byte).is_err() {
            return ParseStep::TooLong;
        }
        ParseStep::Pending
    }
}

/// Lenient decimal conversion.
///
/// Skips leading blanks, takes an optional sign and then digits up to the first
/// non-digit. Anything without digits is 0.
pub fn parse_decimal(bytes: &[u8]) -> i32 {
    let mut rest = bytes;
    while let [b' ' | b'\t', tail @ ..] = rest {
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add(i32::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}
