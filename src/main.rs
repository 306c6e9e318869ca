use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keysprint::app::App;
use keysprint::config::ConfigFile;
use keysprint::event::{AppEvent, EventHandler};
use keysprint::ui::components::footer::Footer;
use keysprint::ui::components::results::ResultsOverlay;
use keysprint::ui::components::stats_bar::StatsBar;
use keysprint::ui::components::typing_area::TypingArea;
use keysprint::ui::layout::{AppLayout, results_rect};
use keysprint::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "keysprint", version, about = "Terminal typing speed test")]
struct Cli {
    #[arg(short, long, help = "Preferences file (defaults to the user config directory)")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Time limit in seconds (15, 30, 60 or 120)")]
    time: Option<u32>,

    #[arg(long, help = "Print the available themes and exit")]
    list_themes: bool,
}

/// Sends `tracing` output to a log file so it never lands on the alternate
/// screen. Logging stays off when the file cannot be opened.
fn init_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("keysprint")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("keysprint.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_env("KEYSPRINT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("keysprint=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }

    init_logging();

    let store = ConfigFile::new(cli.config.unwrap_or_else(ConfigFile::default_path));
    info!(path = %store.path().display(), "keysprint starting");
    let mut app = App::new(store, Instant::now());

    if let Some(theme_name) = cli.theme {
        app.select_theme(&theme_name);
    }
    if let Some(secs) = cli.time {
        app.select_time_limit(secs);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    info!("keysprint exiting");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let event = events.next()?;
        let now = Instant::now();
        match event {
            AppEvent::Key(key) => handle_key(app, key, now),
            AppEvent::Mouse(mouse) => {
                let size = terminal.size()?;
                handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
            }
            AppEvent::Tick | AppEvent::Resize => {}
        }
        app.tick(now);

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    if key.code == KeyCode::Esc && app.last_result.is_none() {
        app.should_quit = true;
        return;
    }

    app.handle_key(key, now);
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
        app.handle_click(Position::new(mouse.column, mouse.row), area);
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    frame.render_widget(
        StatsBar::new(&app.readouts, app.config.time, &app.config.theme, &app.theme),
        layout.header,
    );
    frame.render_widget(TypingArea::new(&app.session, &app.theme), layout.main);
    frame.render_widget(Footer::new(&app.theme, layout.restart_button), layout.footer);

    if let Some(result) = &app.last_result {
        frame.render_widget(ResultsOverlay::new(result, &app.theme), results_rect(area));
    }
}
