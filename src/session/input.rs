use crate::session::state::SessionState;

/// Display status of a single character of the practice text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Pending,
    Active,
    Correct,
    Incorrect,
}

impl CharStatus {
    pub fn is_typed(self) -> bool {
        matches!(self, CharStatus::Correct | CharStatus::Incorrect)
    }
}

/// Compares `ch` against the character under the cursor and advances.
///
/// Returns the status recorded for the typed position, or `None` when the
/// cursor is already past the end of the text.
pub fn process_char(session: &mut SessionState, ch: char) -> Option<CharStatus> {
    if session.is_complete() {
        return None;
    }

    let idx = session.cursor;
    let status = if ch == session.text[idx] {
        session.correct_count += 1;
        CharStatus::Correct
    } else {
        CharStatus::Incorrect
    };
    session.attempted_count += 1;
    session.statuses[idx] = status;

    session.cursor += 1;
    if let Some(next) = session.statuses.get_mut(session.cursor) {
        *next = CharStatus::Active;
    }

    Some(status)
}

/// Steps the cursor back one position and undoes that position's contribution
/// to the counters. Returns the status that was reverted.
pub fn process_backspace(session: &mut SessionState) -> Option<CharStatus> {
    if session.cursor == 0 {
        return None;
    }

    if let Some(current) = session.statuses.get_mut(session.cursor) {
        *current = CharStatus::Pending;
    }
    session.cursor -= 1;

    let reverted = session.statuses[session.cursor];
    match reverted {
        CharStatus::Correct => {
            session.correct_count -= 1;
            session.attempted_count -= 1;
        }
        CharStatus::Incorrect => session.attempted_count -= 1,
        CharStatus::Pending | CharStatus::Active => {}
    }
    session.statuses[session.cursor] = CharStatus::Active;

    Some(reverted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(session: &mut SessionState, s: &str) {
        for ch in s.chars() {
            process_char(session, ch);
        }
    }

    #[test]
    fn correct_char_advances_and_activates_next() {
        let mut session = SessionState::new("ab", 30);
        assert_eq!(process_char(&mut session, 'a'), Some(CharStatus::Correct));
        assert_eq!(session.cursor, 1);
        assert_eq!(session.statuses, vec![CharStatus::Correct, CharStatus::Active]);
        assert_eq!((session.correct_count, session.attempted_count), (1, 1));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut session = SessionState::new("I", 30);
        assert_eq!(process_char(&mut session, 'i'), Some(CharStatus::Incorrect));
        assert_eq!((session.correct_count, session.attempted_count), (0, 1));
    }

    #[test]
    fn typing_past_the_end_is_ignored() {
        let mut session = SessionState::new("a", 30);
        typed(&mut session, "a");
        assert!(session.is_complete());
        assert_eq!(process_char(&mut session, 'z'), None);
        assert_eq!(session.cursor, 1);
        assert_eq!(session.attempted_count, 1);
        assert!(!session.statuses.contains(&CharStatus::Active));
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut session = SessionState::new("abc", 30);
        assert_eq!(process_backspace(&mut session), None);
        assert_eq!(session.cursor, 0);
        assert_eq!(session.statuses[0], CharStatus::Active);
    }

    #[test]
    fn backspace_undoes_correct_char() {
        let mut session = SessionState::new("abc", 30);
        typed(&mut session, "ab");
        assert_eq!(process_backspace(&mut session), Some(CharStatus::Correct));
        assert_eq!(session.cursor, 1);
        assert_eq!((session.correct_count, session.attempted_count), (1, 1));
        assert_eq!(
            session.statuses,
            vec![CharStatus::Correct, CharStatus::Active, CharStatus::Pending]
        );
    }

    #[test]
    fn backspace_undoes_incorrect_char() {
        let mut session = SessionState::new("abc", 30);
        typed(&mut session, "ax");
        assert_eq!(process_backspace(&mut session), Some(CharStatus::Incorrect));
        assert_eq!((session.correct_count, session.attempted_count), (1, 1));
    }

    #[test]
    fn backspace_from_end_of_text() {
        let mut session = SessionState::new("ab", 30);
        typed(&mut session, "ab");
        process_backspace(&mut session);
        assert_eq!(session.cursor, 1);
        assert_eq!(session.statuses, vec![CharStatus::Correct, CharStatus::Active]);
    }

    #[test]
    fn exactly_one_active_while_cursor_in_text() {
        let mut session = SessionState::new("the be", 30);
        typed(&mut session, "tx");
        process_backspace(&mut session);
        typed(&mut session, "he b");
        let active = session
            .statuses
            .iter()
            .filter(|s| **s == CharStatus::Active)
            .count();
        assert_eq!(active, 1);
        assert_eq!(session.statuses[session.cursor], CharStatus::Active);
    }
}
