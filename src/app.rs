use std::time::{Instant, SystemTime};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::layout::{Position, Rect};
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigFile, DEFAULT_THEME, TIME_LIMITS};
use crate::generator::TextGenerator;
use crate::generator::words::{WORDS_PER_TEXT, WordSampler};
use crate::session::input;
use crate::session::result::SessionResult;
use crate::session::state::{Phase, SessionState};
use crate::session::stats::LiveStats;
use crate::timer::{Interval, ONE_SECOND};
use crate::ui::layout::{AppLayout, results_rect, retry_button};
use crate::ui::theme::Theme;

/// Text shown by the three live readouts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readouts {
    pub wpm: String,
    pub accuracy: String,
    pub time: String,
}

impl Readouts {
    fn new(time_limit_secs: u32) -> Self {
        Self {
            wpm: "0".to_string(),
            accuracy: "0%".to_string(),
            time: format!("{time_limit_secs}s"),
        }
    }

    fn show_stats(&mut self, stats: &LiveStats) {
        self.wpm = stats.wpm.to_string();
        self.accuracy = format!("{}%", stats.accuracy);
    }
}

/// Modifiers that turn a key into a shortcut rather than a typed character.
fn is_command(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(
        KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META,
    )
}

fn is_restart_shortcut(key: &KeyEvent) -> bool {
    key.code == KeyCode::BackTab
        || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
}

/// The typing test controller. Owns the session, the live stats, the timers
/// and the applied preferences; every state change goes through its methods.
pub struct App {
    pub session: SessionState,
    pub stats: LiveStats,
    pub readouts: Readouts,
    pub last_result: Option<SessionResult>,
    pub config: Config,
    pub theme: Theme,
    pub should_quit: bool,
    accepting_input: bool,
    countdown: Option<Interval>,
    reconcile: Interval,
    store: Option<ConfigFile>,
    disk_config: Option<Config>,
    disk_stamp: Option<SystemTime>,
    generator: WordSampler<SmallRng>,
}

impl App {
    /// Loads preferences from `store` (falling back to defaults) and starts
    /// with a fresh idle session.
    pub fn new(store: ConfigFile, now: Instant) -> Self {
        let config = match store.load() {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}; using default preferences");
                Config::default()
            }
        };
        let disk_stamp = store.modified();
        let mut app = Self::with_config(config, Some(store), SmallRng::from_entropy(), now);
        app.disk_config = Some(app.config.clone());
        app.disk_stamp = disk_stamp;
        app
    }

    /// Builds a controller from already loaded preferences. `store` is where
    /// preference changes are written; `None` keeps them in memory only.
    pub fn with_config(
        mut config: Config,
        store: Option<ConfigFile>,
        rng: SmallRng,
        now: Instant,
    ) -> Self {
        config.validate(&Theme::available_themes());
        let theme = match Theme::load(&config.theme) {
            Some(theme) => theme,
            None => {
                warn!(theme = %config.theme, "theme failed to load, using default");
                config.theme = DEFAULT_THEME.to_string();
                Theme::default()
            }
        };
        let time_limit = config.time;
        info!(theme = %config.theme, time = time_limit, "preferences applied");

        let mut app = Self {
            session: SessionState::new("", time_limit),
            stats: LiveStats::default(),
            readouts: Readouts::new(time_limit),
            last_result: None,
            config,
            theme,
            should_quit: false,
            accepting_input: true,
            countdown: None,
            reconcile: Interval::start(now, ONE_SECOND),
            store,
            disk_config: None,
            disk_stamp: None,
            generator: WordSampler::new(rng),
        };
        app.restart();
        app
    }

    pub fn is_accepting_input(&self) -> bool {
        self.accepting_input
    }

    pub fn is_countdown_armed(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if is_restart_shortcut(&key) {
            self.restart();
            return;
        }
        if key.code == KeyCode::Tab {
            return;
        }

        if !self.accepting_input {
            self.handle_results_key(key);
            return;
        }

        match key.code {
            KeyCode::Backspace => self.backspace(now),
            KeyCode::F(5) => self.restart(),
            KeyCode::F(2) => self.select_time_limit(Config::next_time_limit(self.config.time)),
            KeyCode::F(3) => {
                if let Some(next) = Theme::next_after(&self.config.theme) {
                    self.select_theme(&next);
                }
            }
            KeyCode::Char(ch) if !is_command(key.modifiers) => self.type_char(ch, now),
            _ => {}
        }
    }

    /// Left click at `pos` on a screen of size `area`. With the results
    /// overlay open, the retry button retries and anything outside the
    /// overlay dismisses it. Otherwise only the restart button reacts.
    pub fn handle_click(&mut self, pos: Position, area: Rect) {
        if self.last_result.is_some() {
            let overlay = results_rect(area);
            if retry_button(overlay).contains(pos) {
                self.retry();
            } else if !overlay.contains(pos) {
                self.dismiss_results();
            }
            return;
        }

        if AppLayout::new(area).restart_button.contains(pos) {
            self.restart();
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => self.retry(),
            KeyCode::Esc => self.dismiss_results(),
            _ => {}
        }
    }

    pub fn type_char(&mut self, ch: char, now: Instant) {
        if !self.accepting_input {
            return;
        }
        if !self.session.is_running() {
            self.start_session(now);
        }
        if input::process_char(&mut self.session, ch).is_some() {
            self.refresh_stats(now);
        }
    }

    pub fn backspace(&mut self, now: Instant) {
        if !self.accepting_input {
            return;
        }
        if input::process_backspace(&mut self.session).is_some() {
            self.refresh_stats(now);
        }
    }

    fn start_session(&mut self, now: Instant) {
        self.session.start(now);
        self.countdown = Some(Interval::start(now, ONE_SECOND));
        self.readouts.time = format!("{}s", self.session.time_limit_secs);
        info!(time_limit = self.session.time_limit_secs, "session started");
    }

    fn refresh_stats(&mut self, now: Instant) {
        self.stats.recompute(&self.session, now);
        self.readouts.show_stats(&self.stats);
    }

    /// Advances both periodic timers to `now`.
    pub fn tick(&mut self, now: Instant) {
        let countdown_fired = match self.countdown.as_mut() {
            Some(countdown) => countdown.poll(now),
            None => false,
        };
        if countdown_fired {
            self.update_time(now);
        }

        if self.reconcile.poll(now) {
            self.reconcile_preferences();
        }
    }

    fn update_time(&mut self, now: Instant) {
        self.refresh_stats(now);
        let time_left = self.session.time_left(now);
        if time_left <= 0 {
            self.readouts.time = "0s".to_string();
            self.end_session();
        } else {
            self.readouts.time = format!("{time_left}s");
        }
    }

    fn end_session(&mut self) {
        self.countdown = None;
        self.session.phase = Phase::Idle;
        self.accepting_input = false;

        let result = SessionResult::from_session(&self.session, &self.stats);
        info!(
            wpm = result.wpm,
            accuracy = result.accuracy,
            words = result.correct_words,
            "session ended"
        );
        self.last_result = Some(result);
    }

    /// Starts over with freshly generated text.
    pub fn restart(&mut self) {
        let text = self.generator.generate(WORDS_PER_TEXT);
        self.restart_with_text(&text);
    }

    /// Starts over with the given practice text.
    pub fn restart_with_text(&mut self, text: &str) {
        if self.countdown.take().is_some() {
            debug!("countdown cancelled by restart");
        }
        // a limit changed on disk mid-session was held back until now
        if let Some(pending) = self.disk_config.as_ref().map(|disk| disk.time) {
            if pending != self.config.time {
                self.config.time = pending;
                info!(secs = pending, "pending time limit applied");
            }
        }
        let time_limit = self.config.time;
        self.session = SessionState::new(text, time_limit);
        self.stats = LiveStats::default();
        self.readouts = Readouts::new(time_limit);
        self.last_result = None;
        self.accepting_input = true;
        debug!(chars = self.session.text.len(), "session reset");
    }

    pub fn retry(&mut self) {
        self.restart();
    }

    pub fn dismiss_results(&mut self) {
        self.restart();
    }

    /// User picked a time limit: persist it and start over.
    pub fn select_time_limit(&mut self, secs: u32) {
        if !TIME_LIMITS.contains(&secs) {
            warn!(secs, "ignoring unsupported time limit");
            return;
        }
        self.config.time = secs;
        info!(secs, "time limit selected");
        self.persist();
        self.restart();
    }

    /// User picked a theme: apply and persist it without touching the session.
    pub fn select_theme(&mut self, name: &str) {
        if self.apply_theme(name) {
            self.persist();
        }
    }

    fn apply_theme(&mut self, name: &str) -> bool {
        match Theme::load(name) {
            Some(theme) => {
                self.theme = theme;
                self.config.theme = name.to_string();
                info!(theme = name, "theme applied");
                true
            }
            None => {
                warn!(theme = name, "theme not found");
                false
            }
        }
    }

    fn apply_time_limit(&mut self, secs: u32) {
        self.config.time = secs;
        self.session.time_limit_secs = secs;
        self.readouts.time = format!("{secs}s");
        info!(secs, "time limit applied");
    }

    fn persist(&mut self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        match store.save(&self.config) {
            Ok(()) => {
                self.disk_config = Some(self.config.clone());
                self.disk_stamp = store.modified();
            }
            Err(err) => {
                warn!("{err}; keeping preferences in memory");
                self.disk_config = Some(self.config.clone());
            }
        }
    }

    /// Picks up preference edits made to the file by another process. The
    /// theme applies at once; a new time limit waits until no session runs.
    pub fn reconcile_preferences(&mut self) {
        if let Some(store) = self.store.as_ref() {
            let stamp = store.modified();
            if stamp.is_some() && stamp != self.disk_stamp {
                match store.load() {
                    Ok(mut config) => {
                        config.validate(&Theme::available_themes());
                        debug!(path = %store.path().display(), "preferences changed on disk");
                        self.disk_config = Some(config);
                    }
                    Err(err) => warn!("{err}"),
                }
                self.disk_stamp = stamp;
            }
        }

        let Some(disk) = self.disk_config.clone() else {
            return;
        };
        if disk.theme != self.config.theme {
            self.apply_theme(&disk.theme);
        }
        if disk.time != self.config.time && !self.session.is_running() {
            self.apply_time_limit(disk.time);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::input::CharStatus;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(now: Instant) -> App {
        App::with_config(Config::default(), None, SmallRng::seed_from_u64(3), now)
    }

    #[test]
    fn starts_idle_with_fresh_text() {
        let app = test_app(Instant::now());
        assert!(!app.session.is_running());
        assert_eq!(app.session.text_string().split(' ').count(), WORDS_PER_TEXT);
        assert_eq!(app.readouts, Readouts::new(30));
        assert!(!app.is_countdown_armed());
    }

    #[test]
    fn first_char_starts_session() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.restart_with_text("ab cd");
        app.handle_key(key(KeyCode::Char('a')), t0);

        assert!(app.session.is_running());
        assert_eq!(app.session.started_at, Some(t0));
        assert!(app.is_countdown_armed());
        assert_eq!(app.session.cursor, 1);
    }

    #[test]
    fn backspace_never_starts_session() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.handle_key(key(KeyCode::Backspace), t0);
        assert!(!app.session.is_running());
        assert!(!app.is_countdown_armed());
    }

    #[test]
    fn named_keys_and_command_chords_are_ignored() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        for code in [KeyCode::Enter, KeyCode::Left, KeyCode::Esc, KeyCode::F(1)] {
            app.handle_key(key(code), t0);
        }
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL), t0);
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::ALT), t0);
        assert_eq!(app.session.cursor, 0);
        assert!(!app.session.is_running());
    }

    #[test]
    fn shifted_char_is_typed() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.restart_with_text("I a");
        app.handle_key(KeyEvent::new(KeyCode::Char('I'), KeyModifiers::SHIFT), t0);
        assert_eq!(app.session.statuses[0], CharStatus::Correct);
    }

    #[test]
    fn plain_tab_changes_nothing() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.restart_with_text("ab");
        app.handle_key(key(KeyCode::Char('a')), t0);
        app.handle_key(key(KeyCode::Tab), t0);
        assert_eq!(app.session.cursor, 1);
        assert!(app.session.is_running());
    }

    #[test]
    fn shift_tab_restarts() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.restart_with_text("ab");
        app.handle_key(key(KeyCode::Char('a')), t0);
        app.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), t0);

        assert_eq!(app.session.cursor, 0);
        assert!(!app.session.is_running());
        assert!(!app.is_countdown_armed());
        assert_eq!(app.session.text_string().split(' ').count(), WORDS_PER_TEXT);
    }

    #[test]
    fn countdown_updates_time_readout() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.handle_key(key(KeyCode::Char('x')), t0);
        app.tick(t0 + Duration::from_millis(500));
        assert_eq!(app.readouts.time, "30s");
        app.tick(t0 + Duration::from_secs(1));
        assert_eq!(app.readouts.time, "29s");
        app.tick(t0 + Duration::from_secs(12));
        assert_eq!(app.readouts.time, "18s");
    }

    #[test]
    fn time_selector_persists_nothing_without_store_and_restarts() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.handle_key(key(KeyCode::Char('x')), t0);
        app.handle_key(key(KeyCode::F(2)), t0);

        assert_eq!(app.config.time, 60);
        assert_eq!(app.session.time_limit_secs, 60);
        assert_eq!(app.readouts.time, "60s");
        assert!(!app.session.is_running());
    }

    #[test]
    fn unsupported_time_limit_is_rejected() {
        let mut app = test_app(Instant::now());
        app.select_time_limit(45);
        assert_eq!(app.config.time, 30);
    }

    #[test]
    fn theme_selector_keeps_session() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.restart_with_text("ab");
        app.handle_key(key(KeyCode::Char('a')), t0);
        app.select_theme("paper");

        assert_eq!(app.config.theme, "paper");
        assert_eq!(app.theme.name, "paper");
        assert_eq!(app.session.cursor, 1);
        assert!(app.session.is_running());
    }

    #[test]
    fn unknown_configured_theme_falls_back_consistently() {
        let config = Config {
            theme: "no-such-theme".to_string(),
            time: 60,
        };
        let app = App::with_config(config, None, SmallRng::seed_from_u64(3), Instant::now());
        assert_eq!(app.config.theme, DEFAULT_THEME);
        assert_eq!(app.theme.name, DEFAULT_THEME);
        assert_eq!(app.config.time, 60);
    }

    #[test]
    fn restart_button_click_restarts() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.restart_with_text("ab");
        app.handle_key(key(KeyCode::Char('a')), t0);

        let area = Rect::new(0, 0, 80, 24);
        app.handle_click(Position::new(0, 0), area);
        assert!(app.session.is_running());

        let button = AppLayout::new(area).restart_button;
        app.handle_click(Position::new(button.x, button.y), area);
        assert!(!app.session.is_running());
        assert_eq!(app.session.cursor, 0);
    }

    #[test]
    fn unknown_theme_is_not_applied() {
        let mut app = test_app(Instant::now());
        app.select_theme("neon");
        assert_eq!(app.config.theme, "cyber");
    }

    #[test]
    fn results_keys_restart_and_reopen_input() {
        let t0 = Instant::now();
        let mut app = test_app(t0);
        app.handle_key(key(KeyCode::Char('x')), t0);
        app.tick(t0 + Duration::from_secs(30));
        assert!(!app.is_accepting_input());

        app.handle_key(key(KeyCode::Char('q')), t0);
        assert!(app.last_result.is_some());

        app.handle_key(key(KeyCode::Esc), t0);
        assert!(app.last_result.is_none());
        assert!(app.is_accepting_input());
        assert_eq!(app.readouts.time, "30s");
    }
}
