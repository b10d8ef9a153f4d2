//! Per-device attribute augmentation from sysfs
//!
//! lshw does not report NUMA affinity, so those attributes are scraped from
//! the per-device sysfs directory. A missing attribute file is an absent
//! field, not an error; an unreadable or unparseable file aborts the whole
//! build.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::InventoryError;

/// Attributes not provided by the inventory report.
///
/// Held by [`crate::DeviceRecord`] as an explicit sub-structure; both fields
/// stay `None` when the underlying files do not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysfsAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numa_node: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_cpulist: Option<String>,
}

/// Reader for the per-device sysfs attribute directory.
///
/// The root is `/sys/bus/pci/devices` in production and a temp directory in
/// tests; devices are keyed by bus address (`0000:01:00.0`).
#[derive(Debug, Clone)]
pub struct SysfsSource {
    root: PathBuf,
}

impl SysfsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read NUMA node and CPU affinity for one device.
    pub fn attrs_for(&self, address: &str) -> Result<SysfsAttrs, InventoryError> {
        let device_dir = self.root.join(address);
        let mut attrs = SysfsAttrs::default();

        let numa_path = device_dir.join("numa_node");
        match fs::read_to_string(&numa_path) {
            Ok(raw) => {
                let value = raw
                    .trim_end()
                    .parse()
                    .map_err(|source| InventoryError::Numa {
                        address: address.to_string(),
                        source,
                    })?;
                attrs.numa_node = Some(value);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(InventoryError::Sysfs {
                    path: numa_path,
                    source,
                })
            }
        }

        let cpulist_path = device_dir.join("local_cpulist");
        match fs::read_to_string(&cpulist_path) {
            Ok(raw) => attrs.local_cpulist = Some(raw.trim_end().to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(InventoryError::Sysfs {
                    path: cpulist_path,
                    source,
                })
            }
        }

        Ok(attrs)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
