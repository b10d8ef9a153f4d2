//! Per-function device record
//!
//! A flat attribute bag describing one PCI function, shaped the way lshw
//! emits it. Immutable after construction; every record is owned by exactly
//! one tree node.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sysfs::SysfsAttrs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRecord {
    pub id: String,
    pub class: String,
    pub claimed: bool,
    pub handle: String,
    pub description: String,
    pub product: String,
    pub vendor: String,
    pub physid: String,
    pub businfo: String,
    pub version: String,
    pub width: u64,
    pub clock: u64,
    pub serial: String,
    pub slot: String,
    pub units: String,
    pub size: u64,
    pub configuration: Map<String, Value>,
    pub capabilities: Map<String, Value>,
    /// Attributes scraped from sysfs, absent until augmentation runs.
    #[serde(flatten)]
    pub sysfs: SysfsAttrs,
}

impl DeviceRecord {
    /// One-line label shown in the tree pane: `<class> | <body>`.
    ///
    /// The body field depends on the device class; bridges are most usefully
    /// identified by handle, buses by description, and common leaf classes by
    /// product name.
    pub fn display_label(&self) -> String {
        let body = match self.class.as_str() {
            "bridge" => &self.handle,
            "bus" => &self.description,
            "display" | "memory" | "communication" | "generic" | "network" => &self.product,
            _ => &self.description,
        };
        format!("{} | {}", self.class, body)
    }

    /// Bus address portion of `businfo`.
    ///
    /// `businfo` has the form `pci@0000:01:00.0`; anything that does not
    /// split into exactly two parts on `@` yields `None`, which callers treat
    /// as "skip augmentation", not as an error.
    pub fn bus_address(&self) -> Option<&str> {
        let mut parts = self.businfo.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(address), None) => Some(address),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(class: &str) -> DeviceRecord {
        DeviceRecord {
            class: class.to_string(),
            handle: "PCI0".to_string(),
            description: "NVMe SSD".to_string(),
            product: "Ethernet Controller".to_string(),
            ..DeviceRecord::default()
        }
    }

    #[test]
    fn test_label_bridge_uses_handle() {
        assert_eq!(record("bridge").display_label(), "bridge | PCI0");
    }

    #[test]
    fn test_label_bus_uses_description() {
        assert_eq!(record("bus").display_label(), "bus | NVMe SSD");
    }

    #[test]
    fn test_label_network_uses_product() {
        assert_eq!(record("network").display_label(), "network | Ethernet Controller");
    }

    #[test]
    fn test_label_unlisted_class_uses_description() {
        assert_eq!(record("storage").display_label(), "storage | NVMe SSD");
    }

    #[test]
    fn test_bus_address_split() {
        let mut rec = DeviceRecord::default();
        rec.businfo = "pci@0000:01:00.0".to_string();
        assert_eq!(rec.bus_address(), Some("0000:01:00.0"));
    }

    #[test]
    fn test_bus_address_without_separator() {
        let mut rec = DeviceRecord::default();
        rec.businfo = "pci".to_string();
        assert_eq!(rec.bus_address(), None);
    }

    #[test]
    fn test_bus_address_with_extra_separator() {
        let mut rec = DeviceRecord::default();
        rec.businfo = "pci@0000@extra".to_string();
        assert_eq!(rec.bus_address(), None);
    }

    #[test]
    fn test_bus_address_empty() {
        assert_eq!(DeviceRecord::default().bus_address(), None);
    }
}
