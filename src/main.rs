mod configuration;
mod data_source;
mod fallback;
mod page;
mod pipeline;
mod qr;
mod render;
mod session;
mod view_state;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::Write;

use crate::configuration::Configuration;
use crate::data_source::PoolsClient;
use crate::page::Page;
use crate::session::Session;

fn main() -> Result<()> {
    env_logger::init();

    let config = Configuration::parse();
    info!(
        "Reading pools from {} ({:?} fallback)",
        config.base_url(),
        config.fallback
    );
    let rt = tokio::runtime::Runtime::new().context("cannot start the runtime")?;
    let client = PoolsClient::new(&config).context("cannot build the HTTP client")?;

    let mut session = Session::new(Page::new());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{session}")?;
    out.flush()?;

    let loaded = rt.block_on(client.load());
    session.page_mut().finish_loading(loaded);
    info!("Pools loaded ({:?})", session.page().origin());

    writeln!(out, "{session}")?;
    if config.interactive {
        session::run(&mut session, std::io::stdin().lock(), &mut out)?;
    }
    Ok(())
}
