use client_core::UiState;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use tokio::sync::watch;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{apply_ui_event, SearchView};
use crate::ui::{form::SearchForm, results::show_results, theme};

pub struct SearchFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state_rx: watch::Receiver<UiState>,
    form: SearchForm,
    view: SearchView,
}

impl SearchFormApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        state_rx: watch::Receiver<UiState>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state_rx,
            form: SearchForm::default(),
            view: SearchView::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.view, event);
        }
        // Only the newest snapshot matters; intermediate ones may be skipped.
        if self.state_rx.has_changed().unwrap_or(false) {
            let snapshot = self.state_rx.borrow_and_update().clone();
            apply_ui_event(&mut self.view, UiEvent::StateChanged(snapshot));
        }
    }

    fn show_form_card(&mut self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(theme::CARD_WIDTH);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("User Search").color(egui::Color32::WHITE));
            });
            ui.add_space(8.0);

            if let Some(err) = &self.view.backend_error {
                ui.label(
                    egui::RichText::new(format!("{}: {}", err.label(), err.message()))
                        .color(theme::ERROR_COLOR)
                        .small(),
                );
            }

            let error_message = self.view.search.error_message();
            if !error_message.is_empty() {
                ui.label(
                    egui::RichText::new(error_message)
                        .color(theme::ERROR_COLOR)
                        .heading(),
                );
                ui.add_space(6.0);
            }

            if let Some(query) = self.form.show(ui) {
                if let Err(err) =
                    dispatch_backend_command(&self.cmd_tx, BackendCommand::Search { query })
                {
                    self.view.report_error(err);
                }
            }
        });
    }

    fn show_results_area(&mut self, ui: &mut egui::Ui) {
        ui.allocate_ui(egui::vec2(theme::CARD_WIDTH, ui.available_height()), |ui| {
            if self.view.search.loading() {
                ui.label("Loading...");
            } else {
                show_results(ui, self.view.search.results());
            }
        });
    }

    fn draw(&mut self, ctx: &egui::Context) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.view.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                self.show_form_card(ui);
                ui.add_space(16.0);
                self.show_results_area(ui);
            });
        });
    }
}

impl eframe::App for SearchFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.draw(ctx);
    }
}
