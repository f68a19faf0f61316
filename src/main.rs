use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use typerzone::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TyperEvent},
    App, Control, Difficulty,
};

const POLL_RATE_MS: u64 = 100;

/// typing speed practice with difficulty tiers and live feedback
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the displayed sentence before the countdown runs out and get your words per minute and accuracy."
)]
pub struct Cli {
    /// difficulty level to start with
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// path to a JSON config file
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// tracing filter for the log file, e.g. "debug" or "typerzone=trace"
    #[clap(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Merge CLI overrides on top of the loaded config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = match cli.config_store().load() {
        Ok(config) => cli.apply(config),
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e).exit();
        }
    };

    if let Some(path) = AppDirs::log_path() {
        if let Err(e) = logging::init(&config.log_level, &path) {
            eprintln!("logging disabled: {e}");
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.difficulty);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(POLL_RATE_MS)),
    );

    tracing::info!(difficulty = %app.typing.difficulty(), "starting");

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            TyperEvent::Key(key) => {
                if app.on_key(key, Instant::now()) == Control::Quit {
                    break;
                }
            }
            TyperEvent::Disconnected => {
                tracing::warn!("terminal input closed, exiting");
                break;
            }
            TyperEvent::Resize | TyperEvent::Tick => {}
        }

        app.advance_countdown(Instant::now());
    }

    Ok(())
}
