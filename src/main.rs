//! `simple-wol` - Wake-on-LAN device manager
//!
//! Command-line front end: loads the device file, runs one command against it and
//! exits with a non-zero status when the command fails.

// The command line is only in the binary, not the library
mod cli;

use anyhow::{Context, Result};
use cli::CommandLine;
use cli::commands::{self, Session};
use simple_wol::error::{WolError, get_user_friendly_error};
use simple_wol::network::parse_broadcast_target;
use simple_wol::utils::{self, LoggingOptions};
use simple_wol::{ConfigManager, WakeOnLanSender};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = CommandLine::parse_args();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLine) -> Result<ExitCode> {
    utils::init_logging(&LoggingOptions {
        verbose: cli.verbose,
        log_dir: cli.log_dir.clone(),
    })
    .context("Failed to initialize logging system")?;

    let manager = cli
        .config
        .clone()
        .map_or_else(ConfigManager::default, ConfigManager::new);
    let sender = build_sender(&cli)?;

    let mut session =
        Session::open(manager, sender).context("Failed to load the device list")?;
    info!("Device list ready");

    commands::run(&mut session, cli.command)
}

/// Sender configured from `--broadcast` and `--bind`
fn build_sender(cli: &CommandLine) -> Result<WakeOnLanSender> {
    let mut sender = WakeOnLanSender::new();
    if let Some(ref target) = cli.broadcast {
        let addr = parse_broadcast_target(target).context("Invalid --broadcast value")?;
        sender = sender.with_broadcast_addr(addr);
    }
    if let Some(bind) = cli.bind {
        sender = sender.with_bind_addr(bind);
    }
    info!("Broadcast-mode devices use {}", sender.broadcast_addr());
    Ok(sender)
}

/// Print a user-facing message for `e`, with hints for library errors
fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<WolError>() {
        Some(wol_error) => {
            let context = e.to_string();
            let details = get_user_friendly_error(wol_error);
            if context == wol_error.to_string() {
                eprintln!("{details}");
            } else {
                eprintln!("{context}\n\n{details}");
            }
        }
        None => eprintln!("Error: {e:#}"),
    }
}
