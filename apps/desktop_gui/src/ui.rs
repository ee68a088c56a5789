//! Credential form, submission status, and results panel.

use std::time::Duration;

use client_core::{FetchError, SubmissionController, SubmissionEffect, SubmissionState};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::egui;
use shared::domain::{Deal, Site};
use shared::protocol::FetchDealsResponse;

use crate::backend_bridge::{BackendCommand, UiEvent};

pub struct DealFetcherApp {
    controller: SubmissionController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    focus_password: bool,
}

impl DealFetcherApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            controller: SubmissionController::new(Site::Fo1),
            cmd_tx,
            ui_rx,
            status: String::new(),
            focus_password: false,
        }
    }

    fn drain_backend_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::SubmissionResolved(outcome) => {
                    if self.controller.resolve(outcome) == Some(SubmissionEffect::FocusPassword) {
                        self.focus_password = true;
                    }
                }
            }
        }
    }

    fn submit_clicked(&mut self) {
        let request = match self.controller.begin_submit() {
            Ok(request) => request,
            Err(rejection) => {
                self.status = rejection.to_string();
                return;
            }
        };

        match self.cmd_tx.try_send(BackendCommand::Submit { request }) {
            Ok(()) => tracing::debug!("queued ui->backend submit command"),
            // The submission already entered InFlight; settle it here so a
            // dead or saturated worker cannot leave it outstanding forever.
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.controller
                    .resolve(Err(FetchError::Unreachable { source: None }));
                self.status = "Backend worker unavailable; retry submission".to_string();
            }
        }
    }

    fn form(&mut self, ui: &mut egui::Ui) {
        let mut site = self.controller.site();
        egui::ComboBox::from_label("Website")
            .selected_text(site.label())
            .show_ui(ui, |ui| {
                for candidate in Site::ALL {
                    ui.selectable_value(&mut site, candidate, candidate.label());
                }
            });
        if site != self.controller.site() {
            self.controller.change_site(site);
        }

        ui.label("Username (email)");
        let mut username = self.controller.username().to_string();
        if ui.text_edit_singleline(&mut username).changed() {
            self.controller.set_username(username);
        }

        ui.label("Password");
        let mut password = self.controller.password().to_string();
        let response = ui.add(egui::TextEdit::singleline(&mut password).password(true));
        if response.changed() {
            self.controller.set_password(password);
        }
        if self.focus_password {
            response.request_focus();
            self.focus_password = false;
        }

        let in_flight = self.controller.is_in_flight();
        let button_label = if in_flight { "Logging in..." } else { "Send" };
        if ui
            .add_enabled(!in_flight, egui::Button::new(button_label))
            .clicked()
        {
            self.submit_clicked();
        }
    }

    fn results(&self, ui: &mut egui::Ui) {
        match self.controller.state() {
            SubmissionState::Idle | SubmissionState::InFlight => {}
            SubmissionState::Failed { message, .. } => {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
            SubmissionState::Succeeded { result } => render_result(ui, result),
        }
    }
}

fn render_result(ui: &mut egui::Ui, result: &FetchDealsResponse) {
    ui.heading("Server Response");
    ui.label(format!("Website: {}", result.website));
    if let Some(token) = &result.token {
        ui.label("Token:");
        ui.monospace(token);
    }
    ui.label("Deals:");
    if result.deals.is_empty() {
        ui.label("No deals found.");
        return;
    }
    for deal in &result.deals {
        ui.strong(&deal.title);
        let meta = deal_meta_line(deal);
        if !meta.is_empty() {
            ui.weak(meta);
        }
    }
}

fn deal_meta_line(deal: &Deal) -> String {
    let mut parts = Vec::new();
    if let Some(asset_class) = &deal.asset_class {
        parts.push(format!("Asset class: {asset_class}"));
    }
    if let Some(status) = &deal.status {
        parts.push(format!("Status: {status}"));
    }
    if let Some(currency) = &deal.currency {
        parts.push(format!("Currency: {currency}"));
    }
    if let Some(minimum_ticket) = deal.minimum_ticket {
        parts.push(format!("Minimum ticket: {minimum_ticket}"));
    }
    parts.join("  ")
}

impl eframe::App for DealFetcherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_backend_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Site Crawler Login");
            ui.label("Choose a website, enter credentials, and fetch available deals.");
            ui.separator();
            self.form(ui);
            if !self.status.is_empty() {
                ui.weak(&self.status);
            }
            ui.separator();
            self.results(ui);
        });

        // Resolution arrives over the channel, not through input events.
        if self.controller.is_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::DealId;

    #[test]
    fn meta_line_skips_absent_fields() {
        let deal = Deal {
            id: DealId(1),
            title: "Deal A".to_string(),
            asset_class: Some("Equity".to_string()),
            status: None,
            currency: None,
            minimum_ticket: Some(50_000),
        };
        assert_eq!(deal_meta_line(&deal), "Asset class: Equity  Minimum ticket: 50000");
    }

    #[test]
    fn disconnected_backend_settles_the_submission_as_unreachable() {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(16);
        let (_ui_tx, ui_rx) = crossbeam_channel::bounded(64);
        drop(cmd_rx);

        let mut app = DealFetcherApp::new(cmd_tx, ui_rx);
        app.controller.set_username("a@b.com");
        app.controller.set_password("x");
        app.submit_clicked();

        assert!(!app.controller.is_in_flight());
        assert!(matches!(
            app.controller.state(),
            SubmissionState::Failed {
                kind: client_core::FailureKind::Unreachable,
                ..
            }
        ));
        assert!(!app.status.is_empty());
    }

    #[test]
    fn meta_line_is_empty_when_no_metadata_is_present() {
        let deal = Deal {
            id: DealId(2),
            title: "Deal B".to_string(),
            asset_class: None,
            status: None,
            currency: None,
            minimum_ticket: None,
        };
        assert!(deal_meta_line(&deal).is_empty());
    }
}
