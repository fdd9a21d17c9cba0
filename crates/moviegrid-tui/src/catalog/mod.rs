//! Catalog (list page): controller, view model and rendering.

mod state;
pub(crate) mod ui;
mod view;

pub use state::{CatalogController, CatalogRequest};
pub use view::{CatalogGrid, CatalogView, MovieCard};
