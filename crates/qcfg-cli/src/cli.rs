use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "qcfg",
    about = "Versioned configuration files with backup-on-save",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file selecting the storage backend (defaults to local files)
    #[arg(long, global = true, value_name = "FILE")]
    pub backend_config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the stored Version of a config
    Version(VersionArgs),
    /// Print a stored config
    Show(ShowArgs),
    /// Create a config holding only a Version
    Init(InitArgs),
    /// Set one field of a stored config (the previous file is kept as <name>.old)
    Set(SetArgs),
    /// List fields of the first config that differ from the second
    Diff(DiffArgs),
    /// Allocate a free local TCP port
    Port(PortArgs),
    /// Count the trust roots available with extra certificates from a path
    Certs(CertsArgs),
}

#[derive(Args)]
pub struct VersionArgs {
    pub name: String,
}

#[derive(Args)]
pub struct ShowArgs {
    pub name: String,
}

#[derive(Args)]
pub struct InitArgs {
    pub name: String,
    #[arg(long = "version", value_name = "VERSION")]
    pub version: String,
    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct SetArgs {
    pub name: String,
    /// Field name; dots address nested maps (`server.listen`)
    pub key: String,
    /// JSON literal, or plain text when it does not parse as JSON
    pub value: String,
}

#[derive(Args)]
pub struct DiffArgs {
    pub a: String,
    pub b: String,
    /// Compare values instead of field names
    #[arg(long)]
    pub deep: bool,
}

#[derive(Args)]
pub struct PortArgs {
    /// Probe the port right after this one instead of asking the kernel
    #[arg(long, value_name = "PORT")]
    pub after: Option<String>,
}

#[derive(Args)]
pub struct CertsArgs {
    /// PEM file or directory of PEM files
    pub path: PathBuf,
}
