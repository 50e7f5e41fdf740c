//! Runtime bridge between UI command queue and backend event intake.
//!
//! The worker thread owns a Tokio runtime and the [`RequestCoordinator`]. UI
//! state snapshots published by the coordinator are mirrored into a watch
//! channel the UI reads each frame, so the latest snapshot is never lost to a
//! full event queue. The UI never mutates search state itself.

use std::{sync::Arc, thread};

use client_core::{ClientSettings, HttpSearchTransport, RequestCoordinator, UiState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::error::SearchError;
use tokio::sync::watch;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Delivers events to the UI thread and wakes it up.
#[derive(Clone)]
struct UiNotifier {
    ui_tx: Sender<UiEvent>,
    state_tx: Arc<watch::Sender<UiState>>,
    repaint: egui::Context,
}

impl UiNotifier {
    fn publish_state(&self, snapshot: UiState) {
        self.state_tx.send_replace(snapshot);
        self.repaint.request_repaint();
    }

    fn send(&self, event: UiEvent) {
        if self.ui_tx.try_send(event).is_err() {
            tracing::warn!("ui event queue unavailable; dropping backend event");
        }
        self.repaint.request_repaint();
    }

    fn startup_failure(&self, message: String) {
        tracing::error!("{message}");
        self.send(UiEvent::Error(UiError::from_message(
            UiErrorContext::BackendStartup,
            message,
        )));
    }
}

pub fn launch(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    state_tx: watch::Sender<UiState>,
    repaint: egui::Context,
) {
    let notify = UiNotifier {
        ui_tx,
        state_tx: Arc::new(state_tx),
        repaint,
    };
    thread::spawn(move || {
        notify.send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                notify.startup_failure(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ));
                return;
            }
        };

        runtime.block_on(async move {
            let transport = match HttpSearchTransport::new(&settings) {
                Ok(transport) => transport,
                Err(err) => {
                    notify.startup_failure(format!(
                        "backend worker startup failure: invalid search settings: {err}"
                    ));
                    return;
                }
            };
            tracing::info!(endpoint = %transport.endpoint(), "search backend ready");

            let coordinator = RequestCoordinator::new(transport);
            let forwarder = tokio::spawn(forward_states(coordinator.subscribe(), notify.clone()));
            notify.send(UiEvent::Info("Ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Search { query } => {
                        let submission = coordinator.submit(query);
                        let request_id = submission.id();
                        let report = notify.clone();
                        tokio::spawn(async move {
                            match submission.settled().await {
                                Ok(records) => report.send(UiEvent::Info(format!(
                                    "Found {} result(s)",
                                    records.len()
                                ))),
                                Err(SearchError::Cancelled) => {
                                    tracing::debug!(
                                        request_id = request_id.0,
                                        "search cancelled before settling"
                                    );
                                }
                                Err(err) => {
                                    tracing::debug!(
                                        request_id = request_id.0,
                                        "search settled with error: {err}"
                                    );
                                }
                            }
                        });
                    }
                }
            }

            tracing::info!("ui disconnected; stopping search backend");
            coordinator.shutdown();
            forwarder.abort();
        });
    });
}

async fn forward_states(mut states: watch::Receiver<UiState>, notify: UiNotifier) {
    while states.changed().await.is_ok() {
        let snapshot = states.borrow_and_update().clone();
        notify.publish_state(snapshot);
    }
}
