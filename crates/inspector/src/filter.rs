//! Search and visibility filters over a classified inventory

use classifier::Inventory;
use model::{CableSummary, DeviceSummary};

/// Narrows an inventory without reordering it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Case-insensitive substring of the record's space-joined fields;
    /// empty matches everything
    pub search: String,
    /// Drop devices flagged as built-in
    pub hide_built_in: bool,
}

impl Filter {
    pub fn matches_device(&self, device: &DeviceSummary) -> bool {
        if self.hide_built_in && device.is_built_in {
            return false;
        }
        self.matches_haystack(&[
            Some(device.name.as_str()),
            device.vendor.as_deref(),
            device.vendor_id.as_deref(),
            device.product_id.as_deref(),
            Some(device.path.as_str()),
        ])
    }

    pub fn matches_cable(&self, cable: &CableSummary) -> bool {
        self.matches_haystack(&[
            Some(cable.name.as_str()),
            cable.vendor.as_deref(),
            cable.product_id.as_deref(),
            cable.serial_number.as_deref(),
        ])
    }

    /// Missing fields still take a slot, so a query can span neighbours
    fn matches_haystack(&self, fields: &[Option<&str>]) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let haystack = fields
            .iter()
            .map(|field| field.unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        haystack.contains(&self.search.to_lowercase())
    }

    /// Copy of `inventory` holding only matching records, in their original order
    pub fn apply(&self, inventory: &Inventory) -> Inventory {
        Inventory {
            devices: inventory
                .devices
                .iter()
                .filter(|d| self.matches_device(d))
                .cloned()
                .collect(),
            cables: inventory
                .cables
                .iter()
                .filter(|c| self.matches_cable(c))
                .cloned()
                .collect(),
        }
    }
}
