//! Interactive catalog browser TUI main loop.

/// Browser state types.
pub mod state;
mod ui;

use std::io;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use moviegrid_api::tmdb::{CatalogApi, MovieDetail, MoviePage};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Handle;

use self::state::{BrowserState, Effect};
use crate::fetch::FetchDispatcher;
use crate::source::CatalogSource;

/// In-flight requests of both pages.
struct Fetches {
    catalog: FetchDispatcher<MoviePage>,
    detail: FetchDispatcher<MovieDetail>,
}

/// Runs the browser TUI until the user quits. Returns the final state so the
/// caller can report the last shareable link.
///
/// Blocks the calling thread; fetches run on `handle`, so call this from
/// `tokio::task::spawn_blocking` (or a plain thread) rather than from inside
/// an async task.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub fn run_browser<A: CatalogApi + Sync + 'static>(
    handle: &Handle,
    source: &CatalogSource<A>,
    mut state: BrowserState,
    initial: Vec<Effect>,
) -> Result<BrowserState> {
    let mut fetches = Fetches {
        catalog: FetchDispatcher::new(handle.clone()),
        detail: FetchDispatcher::new(handle.clone()),
    };
    execute(initial, source, &mut fetches, &mut state);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, source, &mut fetches, &mut state);

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result.map(|()| state)
}

/// Main event loop.
fn run_event_loop<A: CatalogApi + Sync + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    source: &CatalogSource<A>,
    fetches: &mut Fetches,
    state: &mut BrowserState,
) -> Result<()> {
    let mut main_area_width: u16 = 0;

    loop {
        drain_completions(fetches, state);

        terminal
            .draw(|frame| {
                main_area_width = ui::draw(frame, state);
            })
            .context("failed to draw TUI")?;
        state.set_columns(ui::columns_for(main_area_width));

        if event::poll(std::time::Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            let effects = state.handle_key(key.code, key.modifiers);
            if execute(effects, source, fetches, state) {
                return Ok(());
            }
        }
    }
}

/// Applies every completion that has arrived since the last tick.
fn drain_completions(fetches: &mut Fetches, state: &mut BrowserState) {
    while let Some(completion) = fetches.catalog.try_recv() {
        state.apply_catalog(completion);
    }
    while let Some(completion) = fetches.detail.try_recv() {
        state.apply_detail(completion);
    }
}

/// Executes effects. Returns `true` to exit.
fn execute<A: CatalogApi + Sync + 'static>(
    effects: Vec<Effect>,
    source: &CatalogSource<A>,
    fetches: &mut Fetches,
    state: &mut BrowserState,
) -> bool {
    for effect in effects {
        match effect {
            Effect::FetchCatalog(request) => {
                let ticket = request.ticket;
                fetches.catalog.dispatch(ticket, source.page_task(request));
            }
            Effect::FetchDetail(request) => {
                let ticket = request.ticket;
                fetches.detail.dispatch(ticket, source.detail_task(request));
            }
            Effect::CancelDetail => fetches.detail.cancel(),
            Effect::OpenUrl(url) => {
                if let Err(err) = open::that(url.as_str()) {
                    tracing::debug!(%url, error = %err, "failed to open URL");
                    state.status = Some(format!("failed to open {url}: {err}"));
                }
            }
            Effect::Quit => return true,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::indexing_slicing)]

    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::catalog::CatalogView;
    use crate::format::DateStyle;
    use crate::share::{Route, ShareLink};
    use crate::testing::{MockCatalog, movie, page_of, popular_fixture};

    fn browser(route: &Route) -> (BrowserState, Vec<Effect>) {
        let link = ShareLink::parse("https://moviegrid.app/").unwrap();
        BrowserState::new(route, link, DateStyle::Iso)
    }

    #[tokio::test]
    async fn test_execute_dispatches_and_drains_catalog() {
        // Arrange
        let api = MockCatalog::new().with_page("", popular_fixture());
        let source = CatalogSource::new(api, "en-US");
        let mut fetches = Fetches {
            catalog: FetchDispatcher::new(Handle::current()),
            detail: FetchDispatcher::new(Handle::current()),
        };
        let (mut state, effects) = browser(&Route::Catalog {
            search: String::new(),
            page: 1,
        });

        // Act
        let quit = execute(effects, &source, &mut fetches, &mut state);
        let completion = fetches.catalog.recv().await.unwrap();
        state.apply_catalog(completion);

        // Assert
        assert!(!quit);
        let CatalogView::Grid(grid) = state.catalog_view() else {
            panic!("expected grid");
        };
        assert_eq!(grid.cards.len(), 20);
        assert!(!grid.previous_enabled);
        assert!(grid.next_enabled);
    }

    #[tokio::test]
    async fn test_superseded_page_request_is_aborted() {
        // Arrange: the link opens page 2, which is slow; page 1 answers at once
        let api = MockCatalog::new()
            .with_page("", page_of(1, 2, vec![movie(1, "Fast")]))
            .with_page("", page_of(2, 2, vec![movie(2, "Slow")]))
            .with_delay(2, Duration::from_millis(200));
        let source = CatalogSource::new(api, "en-US");
        let mut fetches = Fetches {
            catalog: FetchDispatcher::new(Handle::current()),
            detail: FetchDispatcher::new(Handle::current()),
        };
        let (mut state, effects) = browser(&Route::Catalog {
            search: String::new(),
            page: 2,
        });
        execute(effects, &source, &mut fetches, &mut state);

        // Act
        let previous = state.handle_key(KeyCode::Char('p'), KeyModifiers::NONE);
        execute(previous, &source, &mut fetches, &mut state);
        let completion = fetches.catalog.recv().await.unwrap();
        state.apply_catalog(completion);
        tokio::time::sleep(Duration::from_millis(300)).await;
        drain_completions(&mut fetches, &mut state);

        // Assert
        assert_eq!(state.catalog.query().page(), 1);
        assert_eq!(state.catalog.movies()[0].title, "Fast");
        assert!(fetches.catalog.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_quit_effect_stops_execution() {
        // Arrange
        let source = CatalogSource::new(MockCatalog::new(), "en-US");
        let mut fetches = Fetches {
            catalog: FetchDispatcher::new(Handle::current()),
            detail: FetchDispatcher::new(Handle::current()),
        };
        let (mut state, _) = browser(&Route::Movie(None));

        // Act
        let quit = execute(vec![Effect::Quit], &source, &mut fetches, &mut state);

        // Assert
        assert!(quit);
    }
}
