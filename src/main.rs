mod app;

use macroquad::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    app::window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "snake vibes starting");
    app::run().await;
    info!("bye");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
