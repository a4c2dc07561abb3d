use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use quickfox::{
    app::App,
    app_dirs::AppDirs,
    best::BestScore,
    config::{Config, ConfigStore, FileConfigStore},
    input::{action_for_key, action_for_paste},
    logging,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    sentences::SentenceProvider,
    session::strip_newlines,
    store::SqliteStore,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Instant,
};
use tracing::{error, info, warn};

/// terminal typing speed test with a persistent best score
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a random sentence as fast and accurately as you can. Shows live time, wpm and accuracy, and remembers your best wpm across runs."
)]
pub struct Cli {
    /// custom prompt to type instead of the built-in sentences
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// path of the best-score database
    #[clap(long)]
    db: Option<PathBuf>,

    /// path of the config file
    #[clap(long)]
    config: Option<PathBuf>,

    /// print the stored best wpm and exit
    #[clap(long, conflicts_with = "reset_best")]
    show_best: bool,

    /// clear the stored best wpm and exit
    #[clap(long)]
    reset_best: bool,

    /// write the effective config to the config file and exit
    #[clap(long, conflicts_with_all = ["show_best", "reset_best"])]
    init_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// The custom prompt as it will be typed; line breaks can't be entered
    fn prompt(&self) -> Option<String> {
        self.prompt.as_deref().map(strip_newlines)
    }

    /// CLI flag, then config file, then the default state dir
    fn db_path(&self, config: &Config) -> Option<PathBuf> {
        self.db
            .clone()
            .or_else(|| config.db_path.clone())
            .or_else(AppDirs::db_path)
    }
}

fn open_best(path: Option<PathBuf>) -> Result<BestScore, Box<dyn Error>> {
    let store = match path {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::open_in_memory()?,
    };
    Ok(BestScore::new(Box::new(store)))
}

/// Undo raw mode, bracketed paste and the alternate screen.
///
/// Every step is attempted; the first failure is returned.
fn restore_terminal<W: Write>(backend: &mut CrosstermBackend<W>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(backend, DisableBracketedPaste, LeaveAlternateScreen);
    let cursor = backend.show_cursor();
    raw.and(screen).and(cursor)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let prompt = cli.prompt();
    if prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, "prompt must not be empty")
            .exit();
    }

    let store = cli.config_store();
    let (config, config_err) = store.load_or_default();
    let _log_guard = AppDirs::log_dir().and_then(|dir| logging::init(&dir, &config.log_filter).ok());
    if let Some(err) = &config_err {
        warn!(error = %err, path = %store.path().display(), "using default config");
    }

    if cli.init_config {
        if let Some(err) = config_err {
            // keep the user's broken file rather than overwrite it with defaults
            return Err(err.into());
        }
        store.save(&config)?;
        println!("{}", store.path().display());
        return Ok(());
    }

    let db_path = cli.db_path(&config);
    let mut best = open_best(db_path.clone())?;

    if cli.show_best {
        println!("{}", best.current());
        return Ok(());
    }
    if cli.reset_best {
        best.clear();
        println!("best wpm reset");
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    info!(db = ?db_path, tick_ms = config.tick_rate_ms, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        SentenceProvider::from_prompt(prompt),
        best,
        config.tick_rate(),
    );
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_rate()),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    // restore the terminal even when the loop failed
    let restored = restore_terminal(terminal.backend_mut());

    if let Err(err) = &result {
        error!(error = %err, "event loop failed");
    }
    result?;
    restored?;
    Ok(())
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit() {
        let limit = app
            .next_wakeup(Instant::now())
            .unwrap_or_else(|| runner.interval());

        let redraw = match runner.step_within(limit) {
            AppEvent::Tick => {
                let animating = app.is_animating();
                app.on_tick(Instant::now());
                // one last frame when the flash wears off
                animating
            }
            AppEvent::Resize => true,
            AppEvent::Key(key) => {
                if let Some(action) = action_for_key(key) {
                    app.handle(action, Instant::now());
                }
                app.on_tick(Instant::now());
                true
            }
            AppEvent::Paste(text) => {
                app.handle(action_for_paste(text), Instant::now());
                app.on_tick(Instant::now());
                true
            }
            AppEvent::Closed => {
                warn!("terminal input closed, leaving");
                break;
            }
        };

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
