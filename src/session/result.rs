use crate::session::state::SessionState;
use crate::session::stats::{LiveStats, correct_words};

/// Final numbers shown in the results overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub wpm: u32,
    pub accuracy: u32,
    pub correct_words: usize,
    pub correct_chars: usize,
    pub attempted_chars: usize,
    pub time_limit_secs: u32,
}

impl SessionResult {
    pub fn from_session(session: &SessionState, stats: &LiveStats) -> Self {
        Self {
            wpm: stats.wpm,
            accuracy: stats.accuracy,
            correct_words: correct_words(session.correct_count),
            correct_chars: session.correct_count,
            attempted_chars: session.attempted_count,
            time_limit_secs: session.time_limit_secs,
        }
    }
}
