//! Detail page: controller, view model and rendering.

mod state;
pub(crate) mod ui;
mod view;

pub use state::{DetailController, DetailRequest};
pub use view::{DetailPanel, DetailView};
