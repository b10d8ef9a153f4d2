//! Command-line interface for pcix

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "pcix")]
#[command(about = "Interactive PCI/PCIe topology explorer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the lshw executable used for inventory collection
    #[arg(long, default_value = "/usr/bin/lshw")]
    pub lshw: PathBuf,

    /// Root of the per-device sysfs attribute directory
    #[arg(long, default_value = "/sys/bus/pci/devices")]
    pub sysfs_root: PathBuf,

    /// Append structured logs to this file (logging is off otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Draw tree glyphs and pane borders with plain ASCII
    #[arg(long)]
    pub ascii: bool,
}
