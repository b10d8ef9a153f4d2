//! Shared device-inventory model for pcix
//!
//! Everything the terminal interface navigates lives here: the per-function
//! device record, the arena-backed device tree, the cursor, and the two
//! ingestion collaborators (lshw report parsing, sysfs augmentation).
//! No TUI dependencies in this crate.

pub mod device;
pub mod errors;
pub mod lshw;
pub mod nav;
pub mod sysfs;
pub mod tree;

pub use device::DeviceRecord;
pub use errors::InventoryError;
pub use nav::Cursor;
pub use sysfs::{SysfsAttrs, SysfsSource};
pub use tree::{DeviceTree, NodeId, NodeRef, TreeItem};
