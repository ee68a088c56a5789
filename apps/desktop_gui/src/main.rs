mod backend_bridge;
mod ui;

use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::{spawn_backend_thread, BackendCommand, UiEvent};
use crate::ui::DealFetcherApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    spawn_backend_thread(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Site Crawler Login")
            .with_inner_size([640.0, 560.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Site Crawler Login",
        options,
        Box::new(|_cc| Ok(Box::new(DealFetcherApp::new(cmd_tx, ui_rx)))),
    )
}
