//! Worker thread owning the tokio runtime and the remote client. Commands
//! come in over the crossbeam queue; outcomes go back as [`UiEvent`]s.

use std::thread;

use client_core::{GenealogyStore, RemoteClient, RemoteError};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub endpoint: Url,
    pub origin: String,
}

pub fn launch(config: BackendConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendGone {
                    reason: err.to_string(),
                });
                return;
            }
        };

        runtime.block_on(async move {
            let client = RemoteClient::new(config.endpoint, config.origin);
            // The loop ends when the UI drops its sender, which tears the
            // worker down with the window.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchRoster { generation } => {
                        info!(generation, "backend: fetch_roster");
                        match client.fetch_all().await {
                            Ok(raw) => {
                                let persons = raw.iter().map(|row| row.coerce()).collect();
                                let _ = ui_tx.try_send(UiEvent::RosterLoaded {
                                    generation,
                                    persons,
                                });
                            }
                            Err(err) => {
                                // Read failures stay in the log; the roster
                                // keeps its previous value.
                                error!(generation, "backend: fetch_roster failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::FetchFailed { generation });
                            }
                        }
                    }
                    BackendCommand::AppendPerson { request } => {
                        info!(id = %request.id, "backend: append_person");
                        match client.append(&request).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::PersonAppended {
                                    person: request.coerced(),
                                });
                            }
                            Err(RemoteError::Rejected { message }) => {
                                error!("backend: append_person rejected: {message}");
                                let _ = ui_tx.try_send(UiEvent::AppendRejected { message });
                            }
                            Err(err) => {
                                error!("backend: append_person failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::AppendFailed {
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        });
    });
}
