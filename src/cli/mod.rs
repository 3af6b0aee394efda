//! Command-line interface
//!
//! Argument definitions live here; [`commands`] carries them out against a
//! [`commands::Session`].

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use simple_wol::SortKey;
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "simple-wol", version)]
#[command(about = "Manage network devices and wake them with Wake-on-LAN.")]
pub struct CommandLine {
    /// Device file [default: $SIMPLE_WOL_CONFIG or ./devices.json]
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Broadcast address or network for devices without an IP
    /// (e.g. 192.168.1.255 or 192.168.1.0/24) [default: 255.255.255.255]
    #[arg(long, global = true, value_name = "ADDR")]
    pub broadcast: Option<String>,

    /// Local IPv4 address to send from, selecting the outgoing interface
    #[arg(long, global = true, value_name = "ADDR")]
    pub bind: Option<Ipv4Addr>,

    /// Log informational messages
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Write logs to this directory instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List configured devices
    #[command(alias = "ls")]
    List,
    /// Add a device
    Add {
        /// Display name
        name: String,
        /// MAC address (AA:BB:CC:DD:EE:FF or AA-BB-CC-DD-EE-FF)
        mac: String,
        /// IPv4 address; leave out to use broadcast mode
        #[arg(long, default_value = "")]
        ip: String,
        /// UDP port (usually 9 or 7)
        #[arg(long, default_value = "9", allow_hyphen_values = true)]
        port: String,
        /// Keep an IP address that does not validate
        #[arg(long)]
        force: bool,
    },
    /// Change a device; unspecified fields keep their value
    Edit {
        /// Current device name
        name: String,
        /// New display name
        #[arg(long)]
        new_name: Option<String>,
        /// New MAC address
        #[arg(long)]
        mac: Option<String>,
        /// New IPv4 address; pass "" for broadcast mode
        #[arg(long)]
        ip: Option<String>,
        /// New UDP port
        #[arg(long, allow_hyphen_values = true)]
        port: Option<String>,
        /// Keep an IP address that does not validate
        #[arg(long)]
        force: bool,
    },
    /// Remove a device
    #[command(alias = "rm")]
    Remove {
        /// Device name
        name: String,
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Reorder the device list
    Sort {
        /// Column to sort by
        #[arg(value_enum)]
        key: SortColumn,
        /// Sort descending
        #[arg(long, short = 'r')]
        reverse: bool,
    },
    /// Send magic packets to configured devices
    #[command(alias = "w")]
    Wake {
        /// Device names
        #[arg(required_unless_present = "all")]
        names: Vec<String>,
        /// Wake every configured device
        #[arg(long, short = 'a', conflicts_with = "names")]
        all: bool,
    },
    /// Send a magic packet to a MAC address that is not configured
    WakeMac {
        /// MAC address
        mac: String,
        /// IPv4 address or host name; leave out to broadcast
        #[arg(long)]
        ip: Option<String>,
        /// UDP port
        #[arg(long, default_value_t = simple_wol::config::DEFAULT_PORT)]
        port: u16,
    },
    /// Write the device list to a backup file
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Replace the device list with the contents of a backup file
    Import {
        /// Source file
        path: PathBuf,
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Check a value without changing anything
    Validate {
        /// Kind of value
        #[arg(value_enum)]
        field: Field,
        /// Value to check
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Name,
    Mac,
    Ip,
    Port,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => SortKey::Name,
            SortColumn::Mac => SortKey::MacAddress,
            SortColumn::Ip => SortKey::IpAddress,
            SortColumn::Port => SortKey::Port,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Mac,
    Ip,
    Port,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
