//! Final ordering of classified records

use crate::cable::collect_cables;
use crate::device::collect_devices;
use model::{CableSummary, DeviceSummary, RawNode, SystemReport};
use serde::Serialize;
use tracing::debug;

/// Sort devices by path (stable, byte-wise)
pub fn sort_devices(devices: &mut [DeviceSummary]) {
    devices.sort_by(|a, b| a.path.cmp(&b.path));
}

/// Sort cables by name (stable, byte-wise)
pub fn sort_cables(cables: &mut [CableSummary]) {
    cables.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Classify every device under the USB roots, sorted by path
pub fn classify_devices(usb_roots: &[RawNode]) -> Vec<DeviceSummary> {
    let mut devices = collect_devices(usb_roots);
    sort_devices(&mut devices);
    devices
}

/// Classify every smart cable under the Thunderbolt roots, sorted by name
pub fn classify_cables(thunderbolt_roots: &[RawNode]) -> Vec<CableSummary> {
    let mut cables = collect_cables(thunderbolt_roots);
    sort_cables(&mut cables);
    cables
}

/// Both result lists from one report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub devices: Vec<DeviceSummary>,
    pub cables: Vec<CableSummary>,
}

impl Inventory {
    /// Classify a decoded report
    pub fn from_report(report: &SystemReport) -> Self {
        Self::from_roots(&report.usb_nodes, &report.thunderbolt_nodes)
    }

    /// Classify USB and Thunderbolt roots directly
    pub fn from_roots(usb_roots: &[RawNode], thunderbolt_roots: &[RawNode]) -> Self {
        let inventory = Self {
            devices: classify_devices(usb_roots),
            cables: classify_cables(thunderbolt_roots),
        };
        debug!(
            "Classified {} devices and {} cables",
            inventory.devices.len(),
            inventory.cables.len()
        );
        inventory
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.cables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> RawNode {
        RawNode::new().with("_name", name).with("product_id", "0x1")
    }

    #[test]
    fn test_devices_sorted_by_path() {
        let roots = vec![RawNode::new().with("_name", "Bus").with(
            "_items",
            vec![named("Zeta"), named("alpha"), named("Beta")],
        )];

        let paths: Vec<_> = classify_devices(&roots).into_iter().map(|d| d.path).collect();
        // Ordinal comparison puts uppercase before lowercase
        assert_eq!(paths, vec!["Bus > Beta", "Bus > Zeta", "Bus > alpha"]);
    }

    #[test]
    fn test_device_sort_is_stable() {
        let roots = vec![
            named("Same").with("serial_num", "first"),
            named("Same").with("serial_num", "second"),
        ];

        let serials: Vec<_> = classify_devices(&roots)
            .into_iter()
            .filter_map(|d| d.serial_number)
            .collect();
        assert_eq!(serials, vec!["first", "second"]);
    }

    #[test]
    fn test_cables_sorted_by_name() {
        let roots = vec![
            RawNode::new().with("_name", "b cable"),
            RawNode::new().with("_name", "a cable"),
        ];

        let names: Vec<_> = classify_cables(&roots).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["a cable", "b cable"]);
    }

    #[test]
    fn test_empty_inventory() {
        let inventory = Inventory::from_report(&SystemReport::default());
        assert!(inventory.is_empty());
    }
}
