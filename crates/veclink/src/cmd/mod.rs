use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod info;
pub mod listen;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to a peer and send one value.
    Send(SendArgs),
    /// Listen and print received values.
    Listen(ListenArgs),
    /// Show protocol constants and limits.
    Info(InfoArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Listen(args) => listen::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Peer address (host:port).
    pub addr: String,
    /// JSON payload to convert and send.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read a JSON payload from file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<std::path::PathBuf>,
    /// Advertise LZ4 compression in the handshake.
    #[arg(long)]
    pub compress: bool,
    /// Wait for one response value and print it.
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Address to bind (host:port).
    pub addr: String,
    /// Advertise LZ4 compression in the handshake.
    #[arg(long)]
    pub compress: bool,
    /// Send each received value back to the sender.
    #[arg(long)]
    pub echo: bool,
    /// Exit after receiving N values.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {}
