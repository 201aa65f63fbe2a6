//! `jobboard` command-line client.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use jobboard::ClientSettings;
use jobboard::inbound::cli::{Cli, ViewOptions, execute};
use jobboard::outbound::http::HttpBackend;
use jobboard::outbound::session::FileSessionStore;
use jobboard::store::{AppStore, Gateways};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let outcome = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = outcome {
        warn!(error = %e, "tracing init failed");
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("jobboard")])
        .wrap_err("load client settings")?;
    init_tracing(settings.json_logs);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("build tokio runtime")?;
    runtime.block_on(async_main(cli, &settings))
}

async fn async_main(cli: Cli, settings: &ClientSettings) -> Result<()> {
    let base = settings.api_base_url().wrap_err("parse api_base_url")?;
    let backend = HttpBackend::new(base, settings.request_timeout()).wrap_err("build HTTP client")?;
    let session_dir = settings.session_dir();
    let sessions = FileSessionStore::open(&session_dir)
        .wrap_err_with(|| format!("open session directory {session_dir}"))?;
    debug!(path = %sessions.location(), "session store ready");

    let store = AppStore::new(Gateways::from_backend(Arc::new(backend)), Arc::new(sessions));
    let mut session = store.auth.restore_session()?;
    let view = ViewOptions {
        page_size: settings.page_size(),
        json: cli.json,
    };
    let mut stdout = io::stdout().lock();
    execute(&store, &mut session, cli.command, view, &mut stdout).await?;
    Ok(())
}
