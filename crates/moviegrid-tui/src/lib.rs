//! Catalog and detail views for moviegrid.
//!
//! Controllers are plain state machines that can be driven without a
//! terminal; the `browser` module wires them to `ratatui` + `crossterm`.

/// Interactive terminal browser (event loop and key handling).
pub mod browser;
/// Catalog (list page) controller and view.
pub mod catalog;
/// Detail page controller and view.
pub mod detail;
/// Request tickets, fetch status and task dispatch.
pub mod fetch;
/// Display formatting helpers.
pub mod format;
/// Query state owned by the catalog controller.
pub mod query;
/// Shareable links and the address bar.
pub mod share;
/// Catalog source shared by the controllers.
pub mod source;

#[cfg(test)]
pub(crate) mod testing;
