//! Tick scheduling for interactive play
//!
//! The game core never keeps time. This scheduler decides when the next tick
//! is due, re-arming itself after every tick from the state's current tick
//! interval. Because a new deadline is only set once the previous tick has
//! run, a slow frame delays the next tick instead of queueing extra ones.

use std::time::{Duration, Instant};

use crate::game::{GameState, SessionState};

#[derive(Debug, Clone)]
pub struct TickScheduler {
    start_delay: Duration,
    next_tick: Option<Instant>,
}

impl TickScheduler {
    pub fn new(start_delay: Duration) -> Self {
        Self {
            start_delay,
            next_tick: None,
        }
    }

    /// When the next tick should fire, if one is scheduled at all
    pub fn deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Whether a tick is due at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_tick.is_some_and(|at| at <= now)
    }

    /// Bring the schedule in line with the session after a command.
    ///
    /// Leaving `Running` cancels the pending tick. Entering it schedules one:
    /// after the start delay for a fresh game, after one tick interval when
    /// resuming from a pause.
    pub fn sync(&mut self, state: &GameState, now: Instant) {
        if state.session_state() != SessionState::Running {
            self.next_tick = None;
            return;
        }

        if self.next_tick.is_none() {
            let delay = if state.ticks() == 0 {
                self.start_delay
            } else {
                state.tick_interval()
            };
            self.next_tick = Some(now + delay);
        }
    }

    /// Re-arm after a tick has run, using the interval the tick left behind
    pub fn after_tick(&mut self, state: &GameState, now: Instant) {
        self.next_tick = match state.session_state() {
            SessionState::Running => Some(now + state.tick_interval()),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};

    fn setup() -> (GameEngine, GameState, TickScheduler) {
        let mut engine = GameEngine::new(GameConfig {
            seed: Some(11),
            ..Default::default()
        });
        let state = engine.new_game();
        let scheduler = TickScheduler::new(engine.config().start_delay());
        (engine, state, scheduler)
    }

    #[test]
    fn test_idle_has_no_deadline() {
        let (_, state, mut scheduler) = setup();
        scheduler.sync(&state, Instant::now());
        assert_eq!(scheduler.deadline(), None);
        assert!(!scheduler.is_due(Instant::now()));
    }

    #[test]
    fn test_first_tick_waits_for_start_delay() {
        let (_, mut state, mut scheduler) = setup();
        let now = Instant::now();

        state.start();
        scheduler.sync(&state, now);

        assert_eq!(scheduler.deadline(), Some(now + Duration::from_millis(1000)));
        assert!(!scheduler.is_due(now + Duration::from_millis(999)));
        assert!(scheduler.is_due(now + Duration::from_millis(1000)));
    }

    #[test]
    fn test_sync_keeps_existing_deadline() {
        let (_, mut state, mut scheduler) = setup();
        let now = Instant::now();

        state.start();
        scheduler.sync(&state, now);
        scheduler.sync(&state, now + Duration::from_millis(300));

        assert_eq!(scheduler.deadline(), Some(now + Duration::from_millis(1000)));
    }

    #[test]
    fn test_after_tick_uses_current_interval() {
        let (mut engine, mut state, mut scheduler) = setup();
        let now = Instant::now();

        state.start();
        engine.tick(&mut state);
        scheduler.after_tick(&state, now);
        assert_eq!(scheduler.deadline(), Some(now + state.tick_interval()));
    }

    #[test]
    fn test_pause_cancels_and_resume_rearms() {
        let (mut engine, mut state, mut scheduler) = setup();
        let now = Instant::now();

        state.start();
        engine.tick(&mut state);
        scheduler.after_tick(&state, now);

        state.pause();
        scheduler.sync(&state, now);
        assert_eq!(scheduler.deadline(), None);

        let later = now + Duration::from_secs(5);
        state.resume();
        scheduler.sync(&state, later);
        assert_eq!(scheduler.deadline(), Some(later + state.tick_interval()));
    }

    #[test]
    fn test_game_over_stops_ticking() {
        let (mut engine, mut state, mut scheduler) = setup();
        let now = Instant::now();

        state.start();
        while engine.tick(&mut state).is_some() {
            scheduler.after_tick(&state, now);
        }

        assert!(state.is_game_over());
        assert_eq!(scheduler.deadline(), None);
    }
}
