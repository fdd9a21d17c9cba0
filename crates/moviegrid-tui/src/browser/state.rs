//! Browser state: both controllers, the address bar and key handling.
//!
//! Key handling never performs IO. It returns [`Effect`]s that the event
//! loop executes.

use crossterm::event::{KeyCode, KeyModifiers};
use moviegrid_api::tmdb::{MovieDetail, MoviePage, PosterSize};
use url::Url;

use crate::catalog::{CatalogController, CatalogRequest, CatalogView};
use crate::detail::{DetailController, DetailRequest, DetailView};
use crate::fetch::Completion;
use crate::format::{DateStyle, Poster};
use crate::share::{AddressBar, Route, ShareLink};

/// Visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Card grid.
    Catalog,
    /// Single movie.
    Detail,
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// Side effect requested by key handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a catalog request, superseding the one in flight.
    FetchCatalog(CatalogRequest),
    /// Run a detail request, superseding the one in flight.
    FetchDetail(DetailRequest),
    /// Abort the detail request in flight.
    CancelDetail,
    /// Open a URL in the system browser.
    OpenUrl(Url),
    /// Leave the browser.
    Quit,
}

/// State for the browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Catalog page controller.
    pub catalog: CatalogController,
    /// Detail page controller.
    pub detail: DetailController,
    /// Shareable link of the visible page.
    pub address: AddressBar,
    /// Visible page.
    pub screen: Screen,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Date layout for cards and the detail page.
    pub date_style: DateStyle,
    /// One-line status message for the footer.
    pub status: Option<String>,
    selected: usize,
    columns: usize,
}

impl BrowserState {
    /// Creates the browser at `route`. Returns the state and the initial fetches.
    ///
    /// The catalog is always fetched so that leaving a detail page opened
    /// from a link shows a populated grid.
    #[must_use]
    pub fn new(route: &Route, link: ShareLink, date_style: DateStyle) -> (Self, Vec<Effect>) {
        let query = route.query_state();
        let address = AddressBar::new(link, &query);
        let mut state = Self {
            catalog: CatalogController::new(query),
            detail: DetailController::new(),
            address,
            screen: Screen::Catalog,
            input_mode: InputMode::Normal,
            date_style,
            status: None,
            selected: 0,
            columns: 1,
        };

        let mut effects = vec![Effect::FetchCatalog(state.catalog.fetch_current_page())];
        if let Route::Movie(Some(movie_id)) = route {
            effects.extend(state.open_detail(*movie_id));
        }
        (state, effects)
    }

    /// Returns the selected card index.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Sets the number of cards per grid row.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    /// Returns the catalog view model.
    #[must_use]
    pub fn catalog_view(&self) -> CatalogView {
        CatalogView::from_controller(&self.catalog, self.date_style)
    }

    /// Returns the detail view model.
    #[must_use]
    pub fn detail_view(&self) -> DetailView {
        DetailView::from_controller(&self.detail, self.date_style)
    }

    /// Applies a catalog completion.
    pub fn apply_catalog(&mut self, completion: Completion<MoviePage>) {
        if self.catalog.complete(completion.ticket, completion.result) {
            self.clamp_selection();
        }
    }

    /// Applies a detail completion.
    pub fn apply_detail(&mut self, completion: Completion<MovieDetail>) {
        self.detail.complete(completion.ticket, completion.result);
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Vec<Effect> {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Quit];
        }
        self.status = None;
        match (self.input_mode, self.screen) {
            (InputMode::Search, _) => self.handle_search_input(code),
            (InputMode::Normal, Screen::Catalog) => self.handle_catalog_input(code),
            (InputMode::Normal, Screen::Detail) => self.handle_detail_input(code),
        }
    }

    /// Search mode: every edit starts a new search.
    fn handle_search_input(&mut self, code: KeyCode) -> Vec<Effect> {
        let mut text = String::from(self.catalog.query().search());
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return Vec::new();
            }
            KeyCode::Backspace => {
                if text.pop().is_none() {
                    return Vec::new();
                }
            }
            KeyCode::Char(c) => text.push(c),
            _ => return Vec::new(),
        }
        let request = self.catalog.set_search_text(text);
        self.selected = 0;
        self.address.reflect_catalog(self.catalog.query());
        vec![Effect::FetchCatalog(request)]
    }

    fn handle_catalog_input(&mut self, code: KeyCode) -> Vec<Effect> {
        let request = match code {
            KeyCode::Char('q') => return vec![Effect::Quit],
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_selection(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(self.columns);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(self.columns);
                None
            }
            KeyCode::Char('n') | KeyCode::PageDown => self.turn_page(true),
            KeyCode::Char('p') | KeyCode::PageUp => self.turn_page(false),
            KeyCode::Char('r') => Some(self.catalog.fetch_current_page()),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
                None
            }
            KeyCode::Enter => {
                let movie_id = self.catalog.movies().get(self.selected).map(|m| m.id);
                return movie_id.map_or_else(Vec::new, |id| self.open_detail(id));
            }
            KeyCode::Char('o') => {
                let poster = self.catalog.movies().get(self.selected).map(|m| {
                    Poster::from_path(m.poster_path.as_deref(), PosterSize::Original)
                });
                return self.open_poster(poster);
            }
            _ => None,
        };

        let Some(request) = request else {
            return Vec::new();
        };
        self.address.reflect_catalog(self.catalog.query());
        vec![Effect::FetchCatalog(request)]
    }

    fn handle_detail_input(&mut self, code: KeyCode) -> Vec<Effect> {
        match code {
            KeyCode::Char('q') => vec![Effect::Quit],
            KeyCode::Esc | KeyCode::Backspace => {
                self.screen = Screen::Catalog;
                let _ = self.detail.set_movie_id(None);
                self.address.reflect_catalog(self.catalog.query());
                vec![Effect::CancelDetail]
            }
            KeyCode::Char('r') => self
                .detail
                .reload()
                .map(Effect::FetchDetail)
                .into_iter()
                .collect(),
            KeyCode::Char('o') => {
                let poster = self.detail.status().success().map(|m| {
                    Poster::from_path(m.poster_path.as_deref(), PosterSize::Original)
                });
                self.open_poster(poster)
            }
            _ => Vec::new(),
        }
    }

    fn open_detail(&mut self, movie_id: u64) -> Vec<Effect> {
        self.screen = Screen::Detail;
        self.address.reflect_movie(movie_id);
        self.detail
            .set_movie_id(Some(movie_id))
            .map(Effect::FetchDetail)
            .into_iter()
            .collect()
    }

    fn open_poster(&mut self, poster: Option<Poster>) -> Vec<Effect> {
        match poster {
            Some(Poster::Image(url)) => vec![Effect::OpenUrl(url)],
            Some(Poster::Placeholder) => {
                self.status = Some(String::from("No poster for this movie"));
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Moves one page; the selection restarts at the first card.
    fn turn_page(&mut self, forward: bool) -> Option<CatalogRequest> {
        let request = if forward {
            self.catalog.go_to_next_page()
        } else {
            self.catalog.go_to_previous_page()
        };
        if request.is_some() {
            self.selected = 0;
        }
        request
    }

    fn move_selection(&mut self, step: usize) {
        let last = self.catalog.movies().len().saturating_sub(1);
        self.selected = self.selected.saturating_add(step).min(last);
    }

    fn clamp_selection(&mut self) {
        let last = self.catalog.movies().len().saturating_sub(1);
        self.selected = self.selected.min(last);
    }
}
