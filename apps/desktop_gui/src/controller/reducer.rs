//! Applies backend events to the view model the UI renders from.

use client_core::UiState;

use crate::controller::events::{UiError, UiEvent};

pub struct SearchView {
    pub search: UiState,
    pub status: String,
    pub backend_error: Option<UiError>,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            search: UiState::default(),
            status: "Starting...".to_string(),
            backend_error: None,
        }
    }
}

impl SearchView {
    pub fn report_error(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), "{}", err.message());
        self.status = format!("{}: {}", err.label(), err.message());
        self.backend_error = Some(err);
    }
}

pub fn apply_ui_event(view: &mut SearchView, event: UiEvent) {
    match event {
        UiEvent::Info(message) => view.status = message,
        UiEvent::StateChanged(state) => {
            if state.loading() {
                view.status = "Searching...".to_string();
            }
            view.search = state;
        }
        UiEvent::Error(err) => view.report_error(err),
    }
}
