use anyhow::Context;
use axum::Router;
use folio_server::{api, app, config};
use std::net::SocketAddr;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    folio_telemetry::init();

    let (cfg, cfg_path) = config::Config::load().context("loading config")?;
    info!(?cfg_path, "config loaded");

    let addr: SocketAddr = cfg.bind_addr().parse().context("invalid bind address")?;
    let state = app::AppState::new(cfg);
    let router: Router = api::build_router(state.clone());

    info!(
        %addr,
        folder = %state.lister.settings().folder.display(),
        version = env!("CARGO_PKG_VERSION"),
        "folio-server listening"
    );

    let server = axum::serve(tokio::net::TcpListener::bind(addr).await?, router);

    let graceful = server.with_graceful_shutdown(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("ctrl-c received; draining in-flight requests");
        state.begin_shutdown();
    });

    if let Err(e) = graceful.await {
        error!(error = %e, "server error");
    }

    Ok(())
}
