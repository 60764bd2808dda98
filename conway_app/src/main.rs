// main.rs - Desktop front end for the bounded Game of Life editor

use eframe::egui;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::EnvFilter;

use conway::session::Waker;
use conway::{Config, FileStore, Session, TokioTimer};

mod surface;
mod ui;

use ui::LifeApp;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(error = %err, "could not start async runtime");
            std::process::exit(1);
        }
    };

    let store = match runtime.block_on(FileStore::open(&config.store_path)) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, path = %config.store_path.display(), "could not open snapshot store");
            std::process::exit(1);
        }
    };

    // The egui context only exists once the window does; until then queued
    // events are picked up by the first frame anyway.
    let repaint_ctx: Arc<OnceLock<egui::Context>> = Arc::new(OnceLock::new());
    let waker_ctx = repaint_ctx.clone();
    let waker: Waker = Arc::new(move || {
        if let Some(ctx) = waker_ctx.get() {
            ctx.request_repaint();
        }
    });

    let timer = TokioTimer::new(runtime.handle().clone());
    let session = match Session::open_with_waker(&config, store, timer, runtime.handle().clone(), Some(waker)) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    let (board_w, board_h) = session.reconciler().extent(session.grid());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([(board_w + 40.0).max(560.0), board_h + 170.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| {
            let _ = repaint_ctx.set(cc.egui_ctx.clone());
            Box::new(LifeApp::new(session, runtime))
        }),
    )
}
