mod app;
mod clipboard;
mod config;
mod effects;
mod logging;
mod once;
mod ui;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use digest_logging::{digest_error, digest_info, digest_warn};

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = config::load(cli.config.as_deref()).context("loading configuration")?;
    config.apply_cli(&cli);

    if cli.print_config {
        println!("{}", config.to_ron()?);
        return Ok(ExitCode::SUCCESS);
    }

    if cli.once {
        logging::initialize(&config, false);
        let url = cli.url.as_deref().unwrap_or_default();
        digest_info!("One-shot summary of {} via {}", url, config.server_url);
        let succeeded = once::run_once(&config, url, &mut io::stdout(), &mut io::stderr())?;
        if !succeeded {
            digest_warn!("One-shot summary failed");
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    logging::initialize(&config, true);
    digest_info!("Starting Vibe Digest against {}", config.server_url);
    if let Err(err) = app::run_app(&config, cli.url) {
        digest_error!("Terminal UI stopped: {:#}", err);
        return Err(err);
    }
    Ok(ExitCode::SUCCESS)
}
