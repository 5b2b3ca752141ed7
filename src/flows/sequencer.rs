//! Linear step sequencing shared by the claim wizard and checkout.

/// Where a step sits relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Tracks a 1-based step index bounded to `[1, total]`.
///
/// Moves one step at a time. There is no wraparound and no way to jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequencer {
    current: usize,
    total: usize,
}

impl StepSequencer {
    /// A sequencer at step 1. A zero `total` is treated as a single step.
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Move forward one step. Returns false (and does nothing) on the last step.
    pub fn advance(&mut self) -> bool {
        if self.current < self.total {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move back one step. Returns false (and does nothing) on the first step.
    pub fn retreat(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn status(&self, step: usize) -> StepStatus {
        match step.cmp(&self.current) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }

    /// `current / total` as a whole percentage
    pub fn progress_percent(&self) -> u16 {
        ((self.current * 100) / self.total) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_first_step() {
        let seq = StepSequencer::new(5);
        assert_eq!(seq.current(), 1);
        assert!(seq.is_first());
        assert!(!seq.is_last());
    }

    #[test]
    fn test_advance_stops_at_last_step() {
        let mut seq = StepSequencer::new(5);
        for expected in 2..=5 {
            assert!(seq.advance());
            assert_eq!(seq.current(), expected);
        }
        assert!(!seq.advance());
        assert_eq!(seq.current(), 5);
    }

    #[test]
    fn test_retreat_stops_at_first_step() {
        let mut seq = StepSequencer::new(5);
        assert!(!seq.retreat());
        assert_eq!(seq.current(), 1);

        seq.advance();
        seq.advance();
        assert!(seq.retreat());
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn test_step_status_relative_to_current() {
        let mut seq = StepSequencer::new(5);
        seq.advance();
        seq.advance();
        assert_eq!(seq.status(1), StepStatus::Completed);
        assert_eq!(seq.status(3), StepStatus::Current);
        assert_eq!(seq.status(4), StepStatus::Pending);
    }

    #[test]
    fn test_progress_percent() {
        let mut seq = StepSequencer::new(5);
        assert_eq!(seq.progress_percent(), 20);
        while seq.advance() {}
        assert_eq!(seq.progress_percent(), 100);
    }

    #[test]
    fn test_zero_total_is_single_step() {
        let mut seq = StepSequencer::new(0);
        assert_eq!(seq.total(), 1);
        assert!(seq.is_last());
        assert!(!seq.advance());
    }
}
