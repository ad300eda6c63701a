pub mod ui;

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
    fs,
    io::{self, stdin},
    path::PathBuf,
};
use webbrowser::Browser;

use unwind::{
    app::{App, AppAction},
    app_dirs::AppDirs,
    capabilities::Capabilities,
    config::{Config, ConfigStore, FileConfigStore},
    insights::{export_csv, export_json, snapshot},
    logging,
    mood::MoodStore,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    storage::{MemoryStorage, SqliteStorage, StoragePort},
    triggers::{analyze, respond},
};

use crate::ui::screen::current_screen;

/// a guided three-minute mental reset in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A guided three-minute mental reset: check in with how you feel, follow a 4-7-8 breathing pacer, and leave with an affirmation. Completed sessions are kept in a local mood log."
)]
pub struct Cli {
    /// mood preselected at check-in, 1 (Low) to 5 (Amazing)
    #[clap(short = 'm', long, value_parser = clap::value_parser!(u8).range(1..=5))]
    mood: Option<u8>,

    /// don't write completed sessions to the mood log
    #[clap(long)]
    no_record: bool,

    /// ask for voice guidance (needs a speech command such as espeak or say)
    #[clap(long)]
    voice: bool,

    /// classify TEXT like a check-in and print the result as JSON, then exit
    #[clap(long, value_name = "TEXT")]
    analyze: Option<String>,

    /// print mood log statistics as JSON, then exit
    #[clap(long)]
    stats: bool,

    /// write the 30-day wellness snapshot as JSON to PATH, then exit
    #[clap(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// write the full mood log as CSV to PATH, then exit
    #[clap(long, value_name = "PATH")]
    export_csv: Option<PathBuf>,

    /// persist --mood / --no-record / --voice as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn is_headless(&self) -> bool {
        self.analyze.is_some()
            || self.stats
            || self.export.is_some()
            || self.export_csv.is_some()
            || self.save_config
    }

    /// Flags override whatever the config file says
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(mood) = self.mood {
            config.default_mood = mood - 1;
        }
        if self.no_record {
            config.record_sessions = false;
        }
        if self.voice {
            config.voice = true;
        }
        config
    }
}

fn open_storage(record: bool) -> Box<dyn StoragePort> {
    if !record {
        return Box::new(MemoryStorage::new());
    }
    match AppDirs::db_path().map(SqliteStorage::open) {
        Some(Ok(store)) => Box::new(store),
        Some(Err(e)) => {
            log::warn!("mood log unavailable, keeping this session in memory: {e}");
            Box::new(MemoryStorage::new())
        }
        None => {
            log::warn!("no state directory, keeping this session in memory");
            Box::new(MemoryStorage::new())
        }
    }
}

fn run_headless(cli: &Cli, config: Config) -> Result<(), Box<dyn Error>> {
    if cli.save_config {
        let store = FileConfigStore::new();
        store.save(&config)?;
        println!("saved {}", store.path().display());
    }

    if let Some(text) = &cli.analyze {
        let analysis = analyze(text);
        let response = respond(&analysis);
        let out = serde_json::json!({ "analysis": analysis, "response": response });
        println!("{}", serde_json::to_string_pretty(&out)?);
    }

    if !(cli.stats || cli.export.is_some() || cli.export_csv.is_some()) {
        return Ok(());
    }

    // the log is only read here, so always open the persistent store
    let store = MoodStore::new(open_storage(true));
    if cli.stats {
        println!("{}", serde_json::to_string_pretty(&store.stats())?);
    }

    let entries = store.entries();
    if let Some(path) = &cli.export {
        let json = export_json(&snapshot(&entries, chrono::Local::now()))?;
        fs::write(path, json)?;
        println!("wrote {}", path.display());
    }
    if let Some(path) = &cli.export_csv {
        export_csv(&entries, fs::File::create(path)?)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.apply_to(FileConfigStore::new().load());

    if cli.is_headless() {
        logging::init_stderr_logger();
        return run_headless(&cli, config);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(e) = logging::init_file_logger(&path) {
            eprintln!("logging disabled: {e}");
        }
    }

    let capabilities = Capabilities::probe();
    let storage = open_storage(config.record_sessions);
    let mut app = App::new(config, capabilities, storage);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::seconds());

    loop {
        terminal.draw(|f| current_screen(app.view).render(app, f))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => match app.on_key(key) {
                AppAction::Continue => {}
                AppAction::Quit => break,
                AppAction::OpenSupport => {
                    if Browser::is_available() {
                        if let Err(e) = webbrowser::open(&app.config.support_url) {
                            log::warn!("could not open {}: {e}", app.config.support_url);
                        }
                    }
                }
            },
        }
    }

    log::info!("exiting");
    Ok(())
}
