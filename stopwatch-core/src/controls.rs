use crate::accumulator::Phase;

/// The four user-initiated events.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Trigger {
    Start,
    Pause,
    Reset,
    Lap,
}

/// Which triggers are currently available.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub reset: bool,
    pub lap: bool,
}

impl Controls {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Fresh => Self {
                start: true,
                pause: false,
                reset: false,
                lap: false,
            },
            Phase::Running => Self {
                start: false,
                pause: true,
                reset: true,
                lap: true,
            },
            Phase::Paused => Self {
                start: true,
                pause: false,
                reset: true,
                lap: true,
            },
        }
    }

    pub fn is_enabled(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Start => self.start,
            Trigger::Pause => self.pause,
            Trigger::Reset => self.reset,
            Trigger::Lap => self.lap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        let fresh = Controls::for_phase(Phase::Fresh);
        assert_eq!(
            [fresh.start, fresh.pause, fresh.reset, fresh.lap],
            [true, false, false, false]
        );
        let running = Controls::for_phase(Phase::Running);
        assert_eq!(
            [running.start, running.pause, running.reset, running.lap],
            [false, true, true, true]
        );
        let paused = Controls::for_phase(Phase::Paused);
        assert_eq!(
            [paused.start, paused.pause, paused.reset, paused.lap],
            [true, false, true, true]
        );
    }

    #[test]
    fn test_is_enabled_matches_fields() {
        let c = Controls::for_phase(Phase::Paused);
        assert!(c.is_enabled(Trigger::Start));
        assert!(!c.is_enabled(Trigger::Pause));
        assert!(c.is_enabled(Trigger::Reset));
        assert!(c.is_enabled(Trigger::Lap));
    }
}
