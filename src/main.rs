use anyhow::Result;
use api_client::ApiClient;
use args::Args;
use chart::TuiRenderer;
use clap::Parser;
use runner::{Outcome, Runner};
use std::{io, process};
use tracing_subscriber::EnvFilter;

mod api_client;
mod args;
mod chart;
mod error;
mod names;
mod review;
mod runner;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("warn")?;

    let client = ApiClient::new(&args.base_url, Args::parse_secret(&args.api_key)?)?;
    let renderer = TuiRenderer::new(!args.no_color);

    let outcome = Runner::new(client, renderer).run(&args.steam_id, args.year)?;

    match outcome {
        Outcome::Rendered => Ok(()),
        Outcome::NotFound(reason) => {
            println!("{}", reason);
            process::exit(-1);
        }
    }
}

/// Routes `log` records through a fmt subscriber on stderr, filtered by `RUST_LOG`.
fn init_logging(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}
