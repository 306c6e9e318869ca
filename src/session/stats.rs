use std::time::{Duration, Instant};

use crate::session::state::SessionState;

/// Standard word length used for WPM and word counts.
pub const CHARS_PER_WORD: usize = 5;

/// Words per minute from correct characters, or `None` when no time has
/// passed yet.
pub fn words_per_minute(correct_chars: usize, elapsed: Duration) -> Option<u32> {
    let minutes = elapsed.as_millis() as f64 / 60_000.0;
    if minutes <= 0.0 {
        return None;
    }
    let wpm = (correct_chars as f64 / CHARS_PER_WORD as f64) / minutes;
    Some(wpm.max(0.0).round() as u32)
}

/// Percentage of attempted characters that were correct. Zero attempts is 0%.
pub fn accuracy(correct_chars: usize, attempted_chars: usize) -> u32 {
    if attempted_chars == 0 {
        return 0;
    }
    (correct_chars as f64 / attempted_chars as f64 * 100.0).round() as u32
}

pub fn correct_words(correct_chars: usize) -> usize {
    correct_chars / CHARS_PER_WORD
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiveStats {
    pub wpm: u32,
    pub accuracy: u32,
}

impl LiveStats {
    /// Recomputes from the session counters. Does nothing before the first
    /// keystroke; WPM keeps its previous value while elapsed time is zero.
    pub fn recompute(&mut self, session: &SessionState, now: Instant) {
        let Some(elapsed) = session.elapsed(now) else {
            return;
        };
        if let Some(wpm) = words_per_minute(session.correct_count, elapsed) {
            self.wpm = wpm;
        }
        self.accuracy = accuracy(session.correct_count, session.attempted_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input::process_char;

    #[test]
    fn accuracy_with_no_attempts_is_zero() {
        assert_eq!(accuracy(0, 0), 0);
    }

    #[test]
    fn accuracy_rounds_to_nearest() {
        assert_eq!(accuracy(1, 2), 50);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(7, 7), 100);
    }

    #[test]
    fn wpm_uses_five_char_words() {
        // 50 correct chars in 30s = 10 words in half a minute
        assert_eq!(words_per_minute(50, Duration::from_secs(30)), Some(20));
        assert_eq!(words_per_minute(0, Duration::from_secs(10)), Some(0));
    }

    #[test]
    fn wpm_undefined_at_zero_elapsed() {
        assert_eq!(words_per_minute(10, Duration::ZERO), None);
    }

    #[test]
    fn correct_words_floors() {
        assert_eq!(correct_words(0), 0);
        assert_eq!(correct_words(4), 0);
        assert_eq!(correct_words(14), 2);
    }

    #[test]
    fn recompute_skips_unstarted_session() {
        let session = SessionState::new("abc", 30);
        let mut stats = LiveStats { wpm: 3, accuracy: 4 };
        stats.recompute(&session, Instant::now());
        assert_eq!(stats, LiveStats { wpm: 3, accuracy: 4 });
    }

    #[test]
    fn recompute_keeps_wpm_when_no_time_elapsed() {
        let t0 = Instant::now();
        let mut session = SessionState::new("abc", 30);
        session.start(t0);
        process_char(&mut session, 'a');

        let mut stats = LiveStats::default();
        stats.recompute(&session, t0);
        assert_eq!(stats.wpm, 0);
        assert_eq!(stats.accuracy, 100);

        stats.recompute(&session, t0 + Duration::from_secs(6));
        // 1 char / 5 = 0.2 words over 0.1 minutes
        assert_eq!(stats.wpm, 2);
    }
}
