use std::time::{Duration, Instant};

use crate::game::{GameState, SessionState};

/// Per-session statistics shown in the HUD.
///
/// The play clock only runs while a game is `Running`, so time spent paused
/// or on the game-over screen is not counted.
pub struct GameMetrics {
    accumulated: Duration,
    running_since: Option<Instant>,
    last_session: SessionState,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            running_since: None,
            last_session: SessionState::Idle,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Follow the session state of `state`, starting and stopping the clock
    /// and recording finished games.
    pub fn observe(&mut self, state: &GameState) {
        let session = state.session_state();
        if session == self.last_session {
            return;
        }

        match session {
            SessionState::Running => {
                if self.last_session == SessionState::Idle {
                    self.accumulated = Duration::ZERO;
                }
                self.running_since = Some(Instant::now());
            }
            SessionState::Paused => self.stop_clock(),
            SessionState::GameOver => {
                self.stop_clock();
                self.on_game_over(state.score());
            }
            SessionState::Idle => {
                self.running_since = None;
                self.accumulated = Duration::ZERO;
            }
        }

        self.last_session = session;
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn elapsed_time(&self) -> Duration {
        let running = self
            .running_since
            .map(|since| since.elapsed())
            .unwrap_or(Duration::ZERO);
        self.accumulated + running
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed_time())
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
