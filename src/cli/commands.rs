//! Command handlers
//!
//! Every handler works on a [`Session`]: the device registry loaded at startup,
//! the manager that persists it, and the sender used for wake requests. Handlers
//! that change the registry save it before returning.

use super::{Commands, Field};
use anyhow::{Context, Result, bail};
use simple_wol::validation::{self, DeviceInput};
use simple_wol::{ConfigManager, Device, DeviceRegistry, SortKey, WakeOnLanSender};
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{info, warn};

/// State shared by all commands for one invocation
pub struct Session {
    manager: ConfigManager,
    registry: DeviceRegistry,
    sender: WakeOnLanSender,
}

impl Session {
    /// Load the registry through `manager`
    pub fn open(manager: ConfigManager, sender: WakeOnLanSender) -> Result<Self> {
        let mut registry = DeviceRegistry::new();
        registry.load(&manager)?;
        Ok(Self {
            manager,
            registry,
            sender,
        })
    }

    fn persist(&self) -> Result<()> {
        self.registry.save(&self.manager)?;
        Ok(())
    }
}

/// Run `command`, prompting on stdin where confirmation is needed
pub fn run(session: &mut Session, command: Commands) -> Result<ExitCode> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    match command {
        Commands::List => list(session),
        Commands::Add {
            name,
            mac,
            ip,
            port,
            force,
        } => add(
            session,
            DeviceInput {
                name,
                mac_address: mac,
                ip_address: ip,
                port,
            },
            force,
        ),
        Commands::Edit {
            name,
            new_name,
            mac,
            ip,
            port,
            force,
        } => edit(
            session,
            &name,
            EditFields {
                name: new_name,
                mac,
                ip,
                port,
            },
            force,
        ),
        Commands::Remove { name, yes } => remove(session, &name, yes, &mut input),
        Commands::Sort { key, reverse } => sort(session, key.into(), reverse),
        Commands::Wake { names, all } => wake(session, &names, all),
        Commands::WakeMac { mac, ip, port } => wake_mac(session, &mac, ip.as_deref(), port),
        Commands::Export { path } => export(session, &path),
        Commands::Import { path, yes } => import(session, &path, yes, &mut input),
        Commands::Validate { field, value } => Ok(validate(field, &value)),
    }
}

fn list(session: &Session) -> Result<ExitCode> {
    if session.registry.is_empty() {
        println!(
            "No devices configured in {}",
            session.manager.get_config_path().display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    print!("{}", format_table(session.registry.devices()));
    Ok(ExitCode::SUCCESS)
}

/// Render devices as aligned columns with a header row
fn format_table(devices: &[Device]) -> String {
    const HEADERS: [&str; 4] = ["Device Name", "MAC Address", "IP Address", "Port"];

    let rows: Vec<[String; 4]> = devices
        .iter()
        .map(|d| {
            [
                d.name.clone(),
                d.mac_address.clone(),
                d.target_label().to_string(),
                d.port.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 4]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_row(HEADERS);
    for row in &rows {
        push_row([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]);
    }
    out
}

fn add(session: &mut Session, input: DeviceInput, force: bool) -> Result<ExitCode> {
    let device = input.into_device(force)?;
    warn_if_ip_forced(&device);

    println!("Added {}", device.name);
    session.registry.add(device);
    session.persist()?;
    Ok(ExitCode::SUCCESS)
}

/// Replacement values for `edit`; `None` keeps the current value
struct EditFields {
    name: Option<String>,
    mac: Option<String>,
    ip: Option<String>,
    port: Option<String>,
}

fn edit(session: &mut Session, name: &str, fields: EditFields, force: bool) -> Result<ExitCode> {
    let current = session.registry.find(name)?;

    // Unchanged fields are validated again, like re-submitting a filled-in form
    let input = DeviceInput {
        name: fields.name.unwrap_or_else(|| current.name.clone()),
        mac_address: fields.mac.unwrap_or_else(|| current.mac_address.clone()),
        ip_address: fields.ip.unwrap_or_else(|| current.ip_address.clone()),
        port: fields.port.unwrap_or_else(|| current.port.to_string()),
    };
    let device = input.into_device(force)?;
    warn_if_ip_forced(&device);

    let replaced = session.registry.replace(name, device)?;
    session.persist()?;
    println!("Updated {}", replaced.name);
    Ok(ExitCode::SUCCESS)
}

fn warn_if_ip_forced(device: &Device) {
    if !device.is_broadcast() && !validation::validate_ip(&device.ip_address) {
        warn!(
            "Keeping IP address '{}' for '{}' although it is not a valid IPv4 address",
            device.ip_address, device.name
        );
    }
}

fn remove(
    session: &mut Session,
    name: &str,
    yes: bool,
    input: &mut impl BufRead,
) -> Result<ExitCode> {
    let device_name = session.registry.find(name)?.name.clone();
    if !yes && !confirm(&format!("Remove '{device_name}'?"), input)? {
        println!("Cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    let removed = session.registry.remove(name)?;
    session.persist()?;
    println!("Removed {}", removed.name);
    Ok(ExitCode::SUCCESS)
}

fn sort(session: &mut Session, key: SortKey, reverse: bool) -> Result<ExitCode> {
    if session.registry.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    session.registry.sort_by(key, reverse);
    session.persist()?;
    print!("{}", format_table(session.registry.devices()));
    Ok(ExitCode::SUCCESS)
}

fn wake(session: &Session, names: &[String], all: bool) -> Result<ExitCode> {
    let targets: Vec<Device> = if all {
        session.registry.devices().to_vec()
    } else {
        names
            .iter()
            .map(|name| session.registry.find(name).cloned())
            .collect::<simple_wol::Result<_>>()?
    };

    if targets.is_empty() {
        println!("No devices to wake");
        return Ok(ExitCode::SUCCESS);
    }

    let reports = session.sender.wake_all(&targets);
    let mut failed = 0;
    for report in &reports {
        match report.result {
            Ok(addr) => println!("Sent magic packet to {} ({addr})", report.device_name),
            Err(ref e) => {
                failed += 1;
                eprintln!("Failed to wake {}: {e}", report.device_name);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} wake requests failed", reports.len());
    }
    Ok(ExitCode::SUCCESS)
}

fn wake_mac(session: &Session, mac: &str, ip: Option<&str>, port: u16) -> Result<ExitCode> {
    let addr = session.sender.wake_by_address(mac, ip, port)?;
    println!("Sent magic packet for {} to {addr}", mac.to_uppercase());
    Ok(ExitCode::SUCCESS)
}

fn export(session: &Session, path: &Path) -> Result<ExitCode> {
    if session.registry.is_empty() {
        warn!("Export skipped: no devices");
        println!("No devices to export");
        return Ok(ExitCode::SUCCESS);
    }

    session
        .registry
        .export(&session.manager, path)
        .with_context(|| format!("Failed to export devices to {}", path.display()))?;
    println!(
        "Exported {} devices to {}",
        session.registry.len(),
        path.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn import(
    session: &mut Session,
    path: &Path,
    yes: bool,
    input: &mut impl BufRead,
) -> Result<ExitCode> {
    let prompt = format!(
        "Replace all {} current devices with the contents of {}?",
        session.registry.len(),
        path.display()
    );
    if !yes && !session.registry.is_empty() && !confirm(&prompt, input)? {
        println!("Cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    let count = session.registry.import(&session.manager, path)?;
    session.persist()?;
    info!("Registry replaced from {}", path.display());
    println!("Imported {count} devices from {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn validate(field: Field, value: &str) -> ExitCode {
    let valid = match field {
        Field::Mac => validation::validate_mac(value),
        Field::Ip => validation::validate_ip(value),
        Field::Port => validation::parse_port(value).is_ok(),
    };

    if valid {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("invalid");
        ExitCode::FAILURE
    }
}

/// Ask a yes/no question; anything but `y`/`yes` is a no
fn confirm(prompt: &str, input: &mut impl BufRead) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush().context("Failed to write prompt")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
