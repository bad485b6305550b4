use serde::{Deserialize, Serialize};

/// The countdown's current mode. Exactly one phase is current at any
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::ShortBreak => "short break",
            Phase::LongBreak => "long break",
        }
    }

    /// Message announced when this phase becomes current.
    pub fn message(&self) -> &'static str {
        match self {
            Phase::Work => "Time to Work!",
            Phase::ShortBreak | Phase::LongBreak => "Time for a break!",
        }
    }
}

/// Configured phase lengths in seconds. All three are positive, the cli
/// rejects zero before a cycle is ever constructed.
#[derive(Debug, Clone, Copy)]
pub struct PhaseDurations {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl PhaseDurations {
    pub fn of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }
}

/// One completed phase change, produced by the tick that reached zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub completed: Phase,
    pub next: Phase,
}

/// The countdown phase cycle state. All counters are owned by one
/// instance, a fresh timer screen gets a fresh cycle.
#[derive(Debug)]
pub struct CycleState {
    phase: Phase,
    remaining: u32,
    work_count: u32,
    short_break_count: u32,
    long_break_count: u32,
}

impl CycleState {
    /// A new cycle starts in the work phase with all counters at zero.
    pub fn new(durations: &PhaseDurations) -> Self {
        Self {
            phase: Phase::Work,
            remaining: durations.work,
            work_count: 0,
            short_break_count: 0,
            long_break_count: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn work_count(&self) -> u32 {
        self.work_count
    }

    pub fn short_break_count(&self) -> u32 {
        self.short_break_count
    }

    pub fn long_break_count(&self) -> u32 {
        self.long_break_count
    }

    /// Advances the countdown by one second. Returns the transition when
    /// this tick completed the current phase; the cycle is already in the
    /// new phase at that point, with the new phase's full duration
    /// remaining.
    pub fn tick(&mut self, durations: &PhaseDurations) -> Option<Transition> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }
        Some(self.advance(durations))
    }

    /// The single point where phase and counters mutate.
    fn advance(&mut self, durations: &PhaseDurations) -> Transition {
        let completed = self.phase;
        let next = match self.phase {
            Phase::Work => {
                self.work_count += 1;
                // The long break decision is made once, here, from the
                // short break tally: after two short breaks the third
                // break is long.
                if self.short_break_count != 0 && self.short_break_count % 2 == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak => {
                self.short_break_count += 1;
                Phase::Work
            }
            Phase::LongBreak => {
                self.long_break_count += 1;
                Phase::Work
            }
        };
        self.phase = next;
        self.remaining = durations.of(next);
        Transition { completed, next }
    }
}

#[cfg(test)]
mod tests {
    use super::{CycleState, Phase, PhaseDurations, Transition};

    const DURATIONS: PhaseDurations = PhaseDurations {
        work: 1500,
        short_break: 300,
        long_break: 900,
    };

    /// Runs the cycle to the next transition, asserting the countdown
    /// decrements by exactly one per tick on the way there.
    fn run_phase(state: &mut CycleState) -> Transition {
        let mut expected = state.remaining_seconds();
        loop {
            expected -= 1;
            match state.tick(&DURATIONS) {
                None => assert_eq!(state.remaining_seconds(), expected),
                Some(transition) => {
                    assert_eq!(expected, 0);
                    return transition;
                }
            }
        }
    }

    #[test]
    fn starts_in_work_with_full_duration() {
        let state = CycleState::new(&DURATIONS);
        assert_eq!(state.phase(), Phase::Work);
        assert_eq!(state.remaining_seconds(), DURATIONS.work);
        assert_eq!(state.work_count(), 0);
        assert_eq!(state.short_break_count(), 0);
        assert_eq!(state.long_break_count(), 0);
    }

    #[test]
    fn transition_fires_on_the_tick_that_reaches_zero() {
        let durations = PhaseDurations {
            work: 3,
            short_break: 2,
            long_break: 4,
        };
        let mut state = CycleState::new(&durations);
        assert_eq!(state.tick(&durations), None);
        assert_eq!(state.remaining_seconds(), 2);
        assert_eq!(state.tick(&durations), None);
        assert_eq!(state.remaining_seconds(), 1);
        assert_eq!(
            state.tick(&durations),
            Some(Transition {
                completed: Phase::Work,
                next: Phase::ShortBreak,
            })
        );
        assert_eq!(state.phase(), Phase::ShortBreak);
        assert_eq!(state.remaining_seconds(), 2);
        assert_eq!(state.work_count(), 1);
    }

    #[test]
    fn twenty_five_minute_work_rolls_into_five_minute_break() {
        let mut state = CycleState::new(&DURATIONS);
        for _ in 0..1499 {
            assert_eq!(state.tick(&DURATIONS), None);
        }
        let transition = state.tick(&DURATIONS).unwrap();
        assert_eq!(transition.completed, Phase::Work);
        assert_eq!(transition.next, Phase::ShortBreak);
        assert_eq!(state.remaining_seconds(), 300);

        for _ in 0..299 {
            assert_eq!(state.tick(&DURATIONS), None);
        }
        let transition = state.tick(&DURATIONS).unwrap();
        assert_eq!(transition.next, Phase::Work);
        assert_eq!(state.remaining_seconds(), 1500);
        assert_eq!(state.short_break_count(), 1);
    }

    #[test]
    fn first_two_breaks_are_short_third_is_long() {
        let mut state = CycleState::new(&DURATIONS);
        let breaks: Vec<Phase> = (0..3)
            .map(|_| {
                let after_work = run_phase(&mut state);
                assert_eq!(after_work.completed, Phase::Work);
                let kind = after_work.next;
                let back_to_work = run_phase(&mut state);
                assert_eq!(back_to_work.next, Phase::Work);
                kind
            })
            .collect();

        assert_eq!(
            breaks,
            vec![Phase::ShortBreak, Phase::ShortBreak, Phase::LongBreak]
        );
        assert_eq!(state.work_count(), 3);
        assert_eq!(state.short_break_count(), 2);
        assert_eq!(state.long_break_count(), 1);
    }

    #[test]
    fn breaks_stay_long_once_the_short_break_tally_is_even() {
        // Long breaks never increment the short break tally, so once it
        // sits at an even nonzero value every later break is long.
        let mut state = CycleState::new(&DURATIONS);
        let breaks: Vec<Phase> = (0..5)
            .map(|_| {
                let kind = run_phase(&mut state).next;
                run_phase(&mut state);
                kind
            })
            .collect();

        assert_eq!(
            breaks,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
                Phase::LongBreak,
                Phase::LongBreak,
            ]
        );
        assert_eq!(state.short_break_count(), 2);
        assert_eq!(state.long_break_count(), 3);
    }
}
