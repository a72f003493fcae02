use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, info};

use mortgage_calculator::{
    app::App,
    clipboard::Osc52Clipboard,
    config::Cli,
    location::{AddressBar, History},
    logging::{self, LogTarget},
    report,
    storage::{FileStorage, Storage},
    sync::StateSynchronizer,
    ui,
};

const TICK_RATE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = match (&cli.log_file, cli.is_batch()) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Discard,
    };
    logging::init(target, &cli.log_level)?;

    let storage = FileStorage::new(cli.storage_path());
    debug!(path = %storage.path().display(), "using settings file");
    let history = AddressBar::open(cli.start_url())
        .with_context(|| format!("cannot open link '{}'", cli.start_url()))?;
    let sync = StateSynchronizer::start(storage, history);

    if cli.is_batch() {
        return run_batch(&cli, &sync);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(sync, Box::new(Osc52Clipboard::new(io::stdout())));
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_batch<S: Storage, H: History>(cli: &Cli, sync: &StateSynchronizer<S, H>) -> Result<()> {
    if let Some(path) = &cli.csv {
        report::export_to_csv(path, sync.results())?;
        info!(path = %path.display(), rows = sync.results().len(), "results exported");
    }

    if cli.print {
        if sync.results().is_empty() {
            println!("Enter a mortgage amount to see results.");
        } else {
            print!("{}", report::text_table(sync.results()));
        }
        println!();
        println!("Link: {}", sync.share_url()?);
    }
    Ok(())
}

fn run_app<B: Backend, S: Storage, H: History>(
    terminal: &mut Terminal<B>,
    mut app: App<S, H>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    return Ok(());
                }
            }
        }
        app.tick(Instant::now());
    }
}
