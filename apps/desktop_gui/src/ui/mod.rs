//! UI layer for desktop GUI: app shell, search form, result table, and theme.

pub mod app;
pub mod form;
pub mod results;
pub mod theme;

pub use app::SearchFormApp;

#[cfg(test)]
pub(crate) mod headless;
