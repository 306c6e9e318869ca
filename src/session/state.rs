use std::time::{Duration, Instant};

use crate::session::input::CharStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// One timed typing attempt over a fixed practice text.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub text: Vec<char>,
    pub statuses: Vec<CharStatus>,
    pub cursor: usize,
    pub correct_count: usize,
    pub attempted_count: usize,
    pub started_at: Option<Instant>,
    pub time_limit_secs: u32,
    pub phase: Phase,
}

impl SessionState {
    pub fn new(text: &str, time_limit_secs: u32) -> Self {
        let text: Vec<char> = text.chars().collect();
        let mut statuses = vec![CharStatus::Pending; text.len()];
        if let Some(first) = statuses.first_mut() {
            *first = CharStatus::Active;
        }

        Self {
            text,
            statuses,
            cursor: 0,
            correct_count: 0,
            attempted_count: 0,
            started_at: None,
            time_limit_secs,
            phase: Phase::Idle,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.phase = Phase::Running;
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.text.len()
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.started_at
            .map(|start| now.saturating_duration_since(start))
    }

    /// Seconds remaining on the clock, counted in whole elapsed seconds.
    /// Negative once the limit has passed.
    pub fn time_left(&self, now: Instant) -> i64 {
        let elapsed = self.elapsed(now).map_or(0, |d| d.as_secs() as i64);
        i64::from(self.time_limit_secs) - elapsed
    }

    pub fn text_string(&self) -> String {
        self.text.iter().collect()
    }
}
