//! Inventory ingestion: lshw invocation, report parsing, tree building
//!
//! The external tool emits one nested JSON document for the whole machine.
//! Some lshw versions wrap that document in a single-element array, so the
//! parser tries the bare-object shape first and falls back to the array
//! shape. Only the PCI branches of the report become tree nodes; everything
//! else (CPUs, memory banks, other buses) is discarded.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::device::DeviceRecord;
use crate::errors::InventoryError;
use crate::sysfs::{SysfsAttrs, SysfsSource};
use crate::tree::{DeviceTree, NodeId};

/// One element of the raw report: an attribute bag plus nested children.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LshwNode {
    #[serde(flatten)]
    pub record: DeviceRecord,
    pub children: Vec<LshwNode>,
}

/// Invoke the inventory tool and capture its JSON report.
pub fn run_inventory(command: &Path) -> Result<Vec<u8>, InventoryError> {
    let display = command.display().to_string();
    let output = Command::new(command)
        .arg("-json")
        .output()
        .map_err(|source| InventoryError::Command {
            command: display.clone(),
            source,
        })?;
    if !output.status.success() {
        return Err(InventoryError::CommandStatus {
            command: display,
            status: output.status,
        });
    }
    Ok(output.stdout)
}

/// Parse a report that is either a bare object or a one-element array.
pub fn parse_report(raw: &[u8]) -> Result<LshwNode, InventoryError> {
    match serde_json::from_slice::<LshwNode>(raw) {
        Ok(report) => Ok(report),
        Err(object_err) => {
            let reports: Vec<LshwNode> = serde_json::from_slice(raw)
                .map_err(|_| InventoryError::Shape(object_err.to_string()))?;
            reports
                .into_iter()
                .next()
                .ok_or_else(|| InventoryError::Shape("report array is empty".to_string()))
        }
    }
}

/// Build the device tree from a parsed report.
///
/// The report root is the machine itself and its first child is the
/// motherboard/core element; of that element's children, only branches whose
/// type tag starts with `pci` are admitted. Each admitted branch and its
/// descendants are augmented from sysfs and appended depth-first, preserving
/// report order.
pub fn build_tree(report: &LshwNode, sysfs: &SysfsSource) -> Result<DeviceTree, InventoryError> {
    let mut tree = DeviceTree::new();

    if let Some(core) = report.children.first() {
        for branch in &core.children {
            if !branch.record.id.starts_with("pci") {
                debug!(id = %branch.record.id, "dropping non-PCI branch");
                continue;
            }
            attach(&mut tree, DeviceTree::ROOT, branch, sysfs)?;
        }
    }

    if tree.is_empty() {
        return Err(InventoryError::NoPciBuses);
    }
    Ok(tree)
}

fn attach(
    tree: &mut DeviceTree,
    parent: NodeId,
    raw: &LshwNode,
    sysfs: &SysfsSource,
) -> Result<(), InventoryError> {
    let id = tree.push_child(parent, augmented(raw, sysfs)?);
    for child in &raw.children {
        attach(tree, id, child, sysfs)?;
    }
    Ok(())
}

fn augmented(raw: &LshwNode, sysfs: &SysfsSource) -> Result<DeviceRecord, InventoryError> {
    let attrs = match raw.record.bus_address() {
        Some(address) => sysfs.attrs_for(address)?,
        // No usable bus address means augmentation is skipped, silently.
        None => SysfsAttrs::default(),
    };
    let mut record = raw.record.clone();
    record.sysfs = attrs;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeItem;
    use std::fs;

    const REPORT_OBJECT: &str = r#"{
        "id": "machine",
        "class": "system",
        "children": [
            {
                "id": "core",
                "class": "bus",
                "children": [
                    {
                        "id": "pci:0",
                        "class": "bridge",
                        "handle": "PCIBUS:0000:00",
                        "businfo": "pci@0000:00:00.0",
                        "children": [
                            {
                                "id": "network",
                                "class": "network",
                                "product": "Ethernet Controller",
                                "businfo": "pci@0000:01:00.0",
                                "width": 64,
                                "configuration": {"driver": "e1000e"}
                            }
                        ]
                    },
                    {"id": "cpu", "class": "processor"},
                    {"id": "memory", "class": "memory"}
                ]
            }
        ]
    }"#;

    fn empty_sysfs() -> (tempfile::TempDir, SysfsSource) {
        let dir = tempfile::tempdir().unwrap();
        let source = SysfsSource::new(dir.path());
        (dir, source)
    }

    #[test]
    fn test_parse_bare_object() {
        let report = parse_report(REPORT_OBJECT.as_bytes()).unwrap();
        assert_eq!(report.record.id, "machine");
        assert_eq!(report.children.len(), 1);
    }

    #[test]
    fn test_parse_array_wrapped_report_matches_object() {
        let wrapped = format!("[{REPORT_OBJECT}]");
        let from_array = parse_report(wrapped.as_bytes()).unwrap();
        let from_object = parse_report(REPORT_OBJECT.as_bytes()).unwrap();
        assert_eq!(from_array.record, from_object.record);
        assert_eq!(from_array.children.len(), from_object.children.len());
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(matches!(
            parse_report(b"42").unwrap_err(),
            InventoryError::Shape(_)
        ));
        assert!(matches!(
            parse_report(b"[]").unwrap_err(),
            InventoryError::Shape(_)
        ));
        assert!(matches!(
            parse_report(b"not json").unwrap_err(),
            InventoryError::Shape(_)
        ));
    }

    #[test]
    fn test_build_admits_only_pci_branches() {
        let report = parse_report(REPORT_OBJECT.as_bytes()).unwrap();
        let (_dir, sysfs) = empty_sysfs();

        let tree = build_tree(&report, &sysfs).unwrap();
        let top = tree.children(DeviceTree::ROOT);
        assert_eq!(top.len(), 1);
        assert_eq!(tree.record(top[0]).id, "pci:0");

        // The cpu and memory siblings are gone; the PCI subtree is intact.
        assert_eq!(tree.len(), 3);
        let nic = tree.children(top[0])[0];
        assert_eq!(tree.record(nic).product, "Ethernet Controller");
    }

    #[test]
    fn test_build_preserves_report_order_and_indices() {
        let report = parse_report(
            br#"{
                "id": "machine",
                "children": [{"id": "core", "children": [
                    {"id": "pci:0"},
                    {"id": "pci:1"},
                    {"id": "pci:2"}
                ]}]
            }"#,
        )
        .unwrap();
        let (_dir, sysfs) = empty_sysfs();

        let tree = build_tree(&report, &sysfs).unwrap();
        let top = tree.children(DeviceTree::ROOT);
        assert_eq!(top.len(), 3);
        for (expected, &id) in top.iter().enumerate() {
            assert_eq!(tree.sibling_index(id), expected);
            assert_eq!(tree.record(id).id, format!("pci:{expected}"));
        }
    }

    #[test]
    fn test_build_without_pci_branches_is_an_error() {
        let report = parse_report(
            br#"{"id": "machine", "children": [{"id": "core", "children": [{"id": "cpu"}]}]}"#,
        )
        .unwrap();
        let (_dir, sysfs) = empty_sysfs();
        assert!(matches!(
            build_tree(&report, &sysfs).unwrap_err(),
            InventoryError::NoPciBuses
        ));
    }

    #[test]
    fn test_build_on_childless_report_is_an_error() {
        let report = parse_report(br#"{"id": "machine"}"#).unwrap();
        let (_dir, sysfs) = empty_sysfs();
        assert!(matches!(
            build_tree(&report, &sysfs).unwrap_err(),
            InventoryError::NoPciBuses
        ));
    }

    #[test]
    fn test_build_augments_from_sysfs() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("0000:01:00.0");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("numa_node"), "0\n").unwrap();
        fs::write(device.join("local_cpulist"), "0-15\n").unwrap();
        let sysfs = SysfsSource::new(dir.path());

        let report = parse_report(REPORT_OBJECT.as_bytes()).unwrap();
        let tree = build_tree(&report, &sysfs).unwrap();

        let bridge = tree.children(DeviceTree::ROOT)[0];
        let nic = tree.children(bridge)[0];
        assert_eq!(tree.record(nic).sysfs.numa_node, Some(0));
        assert_eq!(tree.record(nic).sysfs.local_cpulist.as_deref(), Some("0-15"));
        // The bridge has no sysfs entry in the fixture; its fields stay unset.
        assert_eq!(tree.record(bridge).sysfs, SysfsAttrs::default());
    }

    #[test]
    fn test_build_aborts_on_bad_augmentation() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("0000:00:00.0");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("numa_node"), "garbage\n").unwrap();
        let sysfs = SysfsSource::new(dir.path());

        let report = parse_report(REPORT_OBJECT.as_bytes()).unwrap();
        assert!(matches!(
            build_tree(&report, &sysfs).unwrap_err(),
            InventoryError::Numa { .. }
        ));
    }

    #[test]
    fn test_malformed_businfo_skips_augmentation() {
        let report = parse_report(
            br#"{
                "id": "machine",
                "children": [{"id": "core", "children": [
                    {"id": "pci:0", "businfo": "pci"}
                ]}]
            }"#,
        )
        .unwrap();
        let (_dir, sysfs) = empty_sysfs();

        let tree = build_tree(&report, &sysfs).unwrap();
        let top = tree.children(DeviceTree::ROOT)[0];
        assert_eq!(tree.record(top).sysfs, SysfsAttrs::default());
    }

    #[test]
    fn test_raw_nodes_expose_capability_interface_after_build() {
        let report = parse_report(REPORT_OBJECT.as_bytes()).unwrap();
        let (_dir, sysfs) = empty_sysfs();
        let tree = build_tree(&report, &sysfs).unwrap();

        let roots: Vec<_> = tree.top_level().collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].text(), "bridge | PCIBUS:0000:00");
        assert_eq!(roots[0].child(0).unwrap().text(), "network | Ethernet Controller");
    }
}
