//! pcix - interactive PCI/PCIe topology explorer
//!
//! Collects the host inventory once at startup (lshw + sysfs), builds the
//! device tree, and hands it to the terminal interface.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pcix::cli::Cli;
use pcix::tui::{self, App, Theme};
use pcix_common::lshw;
use pcix_common::SysfsSource;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error occurred: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    pcix::logging::init(cli.log_file.as_deref())?;

    let raw = lshw::run_inventory(&cli.lshw).context("collecting hardware inventory")?;
    let report = lshw::parse_report(&raw).context("parsing hardware inventory")?;
    let sysfs = SysfsSource::new(&cli.sysfs_root);
    let tree = lshw::build_tree(&report, &sysfs).context("building device tree")?;
    info!(nodes = tree.len(), "device tree built");

    let hostname = sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string());
    let theme = if cli.ascii {
        Theme::ascii()
    } else {
        Theme::unicode()
    };

    let app = App::new(tree, hostname, theme).context("initializing view")?;
    tui::run(app).context("running terminal interface")
}
