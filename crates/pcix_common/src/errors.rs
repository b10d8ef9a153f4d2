//! Error taxonomy for inventory ingestion
//!
//! Every variant here is fatal at startup: ingestion runs exactly once,
//! before the interactive loop, and a failed build never yields a partial
//! tree. Navigation has no error states at all; it no-ops at structural
//! boundaries instead.

use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("running inventory command {command}: {source}")]
    Command {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("inventory command {command} exited with {status}")]
    CommandStatus { command: String, status: ExitStatus },

    #[error("inventory report is neither an object nor a one-element array: {0}")]
    Shape(String),

    #[error("parsing numa_node for device {address}: {source}")]
    Numa {
        address: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("reading sysfs attribute {path}: {source}")]
    Sysfs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no PCI buses found in inventory")]
    NoPciBuses,
}
