mod ui;

use blink::{
    app_dirs::AppDirs,
    clock::MonotonicClock,
    game::{Game, Reaction},
    presenter::Board,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    settings::{DelayMode, RoundsTarget, Settings},
    timer::TimerQueue,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const TICK_RATE_MS: u64 = 50;

/// reaction-time tui: wait for green, hit space, beat your best
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A reaction-time game for the terminal. Wait for the stage to turn green, then hit space or enter as fast as you can. Pressing early voids the round."
)]
pub struct Cli {
    /// range of the random wait before the signal [default: medium]
    #[clap(short = 'd', long, value_enum)]
    delay: Option<DelayMode>,

    /// rounds per series: a positive number, or ∞ / inf for endless play [default: 5]
    #[clap(short = 'r', long)]
    rounds: Option<RoundsTarget>,

    /// seed for the delay generator, for repeatable sessions
    #[clap(long, hide = true)]
    seed: Option<u64>,
}

impl Cli {
    fn to_settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            delay_mode: self.delay.unwrap_or(defaults.delay_mode),
            rounds_target: self.rounds.unwrap_or(defaults.rounds_target),
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub struct App {
    pub game: Game<Board, TimerQueue, MonotonicClock>,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let settings = cli.to_settings();
        tracing::info!(
            delay_mode = %settings.delay_mode,
            rounds_target = %settings.rounds_target,
            "starting session"
        );

        Self {
            game: Game::new(
                settings,
                Board::new(),
                TimerQueue::new(),
                MonotonicClock::new(),
                cli.rng(),
            ),
        }
    }

    fn cycle_delay_mode(&mut self) {
        let next = self.game.settings().delay_mode.next();
        self.game.set_delay_mode(next);
        // the settings line changed even when the game did not
        self.game.presenter_mut().mark_dirty();
    }

    fn cycle_rounds_target(&mut self) {
        let next = self.game.settings().rounds_target.next();
        self.game.set_rounds_target(next);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_tracing();

    let mut app = App::new(&cli);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("session ended with error: {e}");
    }
    result
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than writing over the TUI
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut candidates = Vec::new();
    if let Some(path) = AppDirs::log_path() {
        candidates.push(path);
    }
    candidates.push(PathBuf::from(".blink").join("blink.log"));

    let mut warnings = Vec::new();
    for candidate in candidates {
        if let Some(parent) = candidate.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warnings.push(format!("failed to create log dir {}: {e}", parent.display()));
                continue;
            }
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step_within(app.game.next_timer_in()) {
            GameEvent::Tick => {}
            GameEvent::Closed => {
                tracing::error!("terminal input closed, quitting");
                break;
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Key(key) => {
                if !handle_key(app, key) {
                    break;
                }
            }
        }

        app.game.pump_timers();

        if app.game.presenter_mut().take_dirty() {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    Ok(())
}

/// Returns false when the app should quit
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Reaction::Recorded(ms) = app.game.react() {
                tracing::info!(ms, "reaction");
            }
        }
        KeyCode::Char('s') | KeyCode::Char('S') => app.game.start(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.game.reset(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.cycle_delay_mode(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.cycle_rounds_target(),
        _ => {}
    }

    true
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
