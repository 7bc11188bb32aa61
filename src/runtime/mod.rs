use std::sync::Arc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::fetch::{AudioFetcher, HttpFetcher};
use crate::store::PlaybackStore;
use crate::transport::{RodioElement, TransportController};

mod event_loop;
mod logging;
mod settings;
mod startup;
mod views;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warning) = settings::load_settings();
    logging::init(&settings.log);
    log::info!("soundshelf {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(msg) = warning {
        log::warn!("{msg}");
    }

    let source = startup::catalog_source(&settings);
    let catalog = startup::load_catalog(&source, &settings.catalog)?;
    log::info!(
        "catalog ready: {} tracks, {} packs",
        catalog.tracks.len(),
        catalog.packs.len()
    );

    let fetcher: Arc<dyn AudioFetcher> = Arc::new(HttpFetcher::new(&settings.fetch));
    let element = RodioElement::open(Arc::clone(&fetcher))?;
    let mut controller = TransportController::new(element);
    let mut store = PlaybackStore::new(settings.audio.initial_volume);

    let mut app = App::new(catalog, settings.ui.dark_mode);
    app.source = Some(source.display().to_string());

    let mut views = views::Views::new(&settings.waveform, fetcher);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            event_loop::Session {
                app: &mut app,
                store: &mut store,
                controller: &mut controller,
                views: &mut views,
            },
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    run_result
}
