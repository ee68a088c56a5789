//! Worker thread bridging the UI command queue and the crawler endpoint.

use std::thread;

use client_core::{load_settings, CrawlerClient, DealsGateway, FetchError};
use crossbeam_channel::{Receiver, Sender};
use shared::protocol::{FetchDealsRequest, FetchDealsResponse};

pub enum BackendCommand {
    Submit { request: FetchDealsRequest },
}

pub enum UiEvent {
    Info(String),
    SubmissionResolved(Result<FetchDealsResponse, FetchError>),
}

pub fn spawn_backend_thread(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "Backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = CrawlerClient::from_settings(&load_settings());
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit { request } => {
                        let outcome = client.fetch_deals(&request).await;
                        let _ = ui_tx.try_send(UiEvent::SubmissionResolved(outcome));
                    }
                }
            }
        });
    });
}
