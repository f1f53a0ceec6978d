//! Direction of travel.

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Forward (positive step count).
    #[default]
    Forward,
    /// Reverse (negative step count).
    Reverse,
}

impl Direction {
    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// Operator-facing letter, `f` or `r`.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Direction::Forward => 'f',
            Direction::Reverse => 'r',
        }
    }

    /// Parse the operator-facing letter.
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'f' => Some(Direction::Forward),
            b'r' => Some(Direction::Reverse),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_round_trip() {
        for dir in [Direction::Forward, Direction::Reverse] {
            assert_eq!(Direction::from_byte(dir.as_char() as u8), Some(dir));
        }
        assert_eq!(Direction::from_byte(b'F'), None);
        assert_eq!(Direction::from_byte(b'x'), None);
    }

    #[test]
    fn test_sign() {
        assert_eq!(Direction::Forward.sign(), 1);
        assert_eq!(Direction::Reverse.sign(), -1);
        assert_eq!(Direction::default(), Direction::Forward);
    }
}
