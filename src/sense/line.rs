//! Sense lines, their logical states and what an edge on each one means.

/// One of the three sense inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseLine {
    /// End of forward travel.
    ForwardLimit,
    /// Reference position.
    Home,
    /// End of reverse travel.
    ReverseLimit,
}

impl SenseLine {
    /// Evaluation order when several lines change in one observation.
    /// Limits come first so a stop is never delayed behind a home capture.
    pub const PRIORITY: [SenseLine; 3] = [
        SenseLine::ForwardLimit,
        SenseLine::ReverseLimit,
        SenseLine::Home,
    ];

    /// Short label for logs and operator output.
    pub fn label(self) -> &'static str {
        match self {
            SenseLine::ForwardLimit => "forward limit",
            SenseLine::Home => "home",
            SenseLine::ReverseLimit => "reverse limit",
        }
    }
}

/// Logical state of a sense line after polarity has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    /// The event the line reports is present.
    Asserted,
    /// Idle.
    Deasserted,
}

impl LineState {
    /// From an "is asserted" flag.
    #[inline]
    pub fn from_asserted(asserted: bool) -> Self {
        if asserted {
            LineState::Asserted
        } else {
            LineState::Deasserted
        }
    }
}

/// What the monitor does in response to a line changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseAction {
    /// Stop motion.
    Stop,
    /// Capture the current position as home.
    RecordHome,
}

/// Action for a line that just changed to `state`.
///
/// Only transitions into `Asserted` act; releasing a switch does nothing.
pub fn classify(line: SenseLine, state: LineState) -> Option<SenseAction> {
    match (line, state) {
        (SenseLine::ForwardLimit | SenseLine::ReverseLimit, LineState::Asserted) => {
            Some(SenseAction::Stop)
        }
        (SenseLine::Home, LineState::Asserted) => Some(SenseAction::RecordHome),
        (_, LineState::Deasserted) => None,
    }
}

/// Last observed state of all three lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SenseSnapshot {
    /// Forward limit state.
    pub forward_limit: LineState,
    /// Home state.
    pub home: LineState,
    /// Reverse limit state.
    pub reverse_limit: LineState,
}

impl SenseSnapshot {
    /// All lines idle.
    pub const IDLE: SenseSnapshot = SenseSnapshot {
        forward_limit: LineState::Deasserted,
        home: LineState::Deasserted,
        reverse_limit: LineState::Deasserted,
    };

    /// State of one line.
    #[inline]
    pub fn line(&self, line: SenseLine) -> LineState {
        match line {
            SenseLine::ForwardLimit => self.forward_limit,
            SenseLine::Home => self.home,
            SenseLine::ReverseLimit => self.reverse_limit,
        }
    }

    /// Copy with one line replaced.
    pub fn with_line(mut self, line: SenseLine, state: LineState) -> Self {
        match line {
            SenseLine::ForwardLimit => self.forward_limit = state,
            SenseLine::Home => self.home = state,
            SenseLine::ReverseLimit => self.reverse_limit = state,
        }
        self
    }

    /// Lines whose state differs in `next`, in [`SenseLine::PRIORITY`] order.
    pub fn changed<'a>(&'a self, next: &'a SenseSnapshot) -> impl Iterator<Item = SenseLine> + 'a {
        SenseLine::PRIORITY
            .into_iter()
            .filter(move |&line| self.line(line) != next.line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        use LineState::*;
        use SenseLine::*;

        assert_eq!(classify(ForwardLimit, Asserted), Some(SenseAction::Stop));
        assert_eq!(classify(ReverseLimit, Asserted), Some(SenseAction::Stop));
        assert_eq!(classify(Home, Asserted), Some(SenseAction::RecordHome));
        assert_eq!(classify(ForwardLimit, Deasserted), None);
        assert_eq!(classify(ReverseLimit, Deasserted), None);
        assert_eq!(classify(Home, Deasserted), None);
    }

    #[test]
    fn test_changed_lines_in_priority_order() {
        let before = SenseSnapshot::IDLE;
        let after = SenseSnapshot {
            forward_limit: LineState::Asserted,
            home: LineState::Asserted,
            reverse_limit: LineState::Asserted,
        };

        let changed: Vec<_> = before.changed(&after).collect();
        assert_eq!(
            changed,
            vec![SenseLine::ForwardLimit, SenseLine::ReverseLimit, SenseLine::Home]
        );
        assert_eq!(after.changed(&after).count(), 0);
    }

    #[test]
    fn test_with_line() {
        let snap = SenseSnapshot::IDLE.with_line(SenseLine::Home, LineState::Asserted);
        assert_eq!(snap.line(SenseLine::Home), LineState::Asserted);
        assert_eq!(snap.line(SenseLine::ForwardLimit), LineState::Deasserted);
        assert_eq!(snap.changed(&SenseSnapshot::IDLE).collect::<Vec<_>>(), vec![SenseLine::Home]);
    }
}
