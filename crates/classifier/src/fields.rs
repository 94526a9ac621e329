//! Aliased field extraction
//!
//! The same attribute shows up under different keys depending on the OS
//! release and firmware (`vendor_id`, `idVendor`, `vendor-id`, ...). Every
//! lookup goes through an ordered alias table; the first alias holding a
//! usable value wins. Nothing here fails: a miss is simply `None`.

use model::{NodeValue, RawNode};

/// Ordered alias tables
///
/// Order matters and is part of the compatibility contract with the
/// enumeration tool's output.
pub mod aliases {
    pub const NAME: &[&str] = &["_name", "name"];
    pub const CHILDREN: &[&str] = &["_items", "items"];

    pub const DEVICE_IDENTIFYING: &[&str] = &[
        "vendor_id",
        "idVendor",
        "vendorID",
        "product_id",
        "idProduct",
        "device_speed",
        "spusb_device_speed",
    ];
    pub const DEVICE_VENDOR: &[&str] = &["vendor", "manufacturer", "Vendor Name", "vendor_id"];
    pub const DEVICE_VENDOR_ID: &[&str] = &["vendor_id", "idVendor", "vendor-id"];
    pub const DEVICE_PRODUCT_ID: &[&str] = &["product_id", "idProduct", "product-id"];
    pub const DEVICE_SERIAL: &[&str] = &["serial_num", "serial_number", "Serial Number"];
    pub const DEVICE_LOCATION: &[&str] = &["location_id", "Location ID"];
    pub const DEVICE_BSD_NAME: &[&str] = &["bsd_name", "BSD Name"];
    pub const DEVICE_USB_VERSION: &[&str] = &["usb_version", "bcdUSB", "bcd_device"];
    pub const DEVICE_SPEED: &[&str] = &["device_speed", "spusb_device_speed", "speed"];
    pub const CURRENT_REQUIRED: &[&str] = &["current_required", "spusb_current_required"];
    pub const CURRENT_AVAILABLE: &[&str] = &[
        "current_available",
        "spusb_current_available",
        "spusb_bus_power_available",
    ];
    pub const EXTRA_CURRENT: &[&str] = &["extra_current", "spusb_current_extra"];
    pub const INTERFACE_COUNT: &[&str] =
        &["num_interfaces", "spusb_num_interfaces", "number_of_interfaces"];
    pub const INTERFACE_NUMBER: &[&str] = &["interface_number", "bInterfaceNumber"];
    pub const DEVICE_CLASS: &[&str] = &["usb_device_class", "Device Class", "class"];
    pub const DEVICE_SUBCLASS: &[&str] = &["usb_device_subclass", "Device Subclass", "subclass"];
    pub const DEVICE_PROTOCOL: &[&str] = &["usb_device_protocol", "Device Protocol", "protocol"];
    pub const PRODUCT_NAME: &[&str] = &["product_name"];
    pub const DEVICE_CABLE_TYPE: &[&str] = &["cable_type"];

    pub const CABLE_NAME: &[&str] = &["_name", "name", "device_name"];
    pub const CABLE_VENDOR: &[&str] = &["vendor", "vendor_name", "Manufacturer"];
    pub const CABLE_PRODUCT_ID: &[&str] = &["product_id", "idProduct"];
    pub const CABLE_SERIAL: &[&str] = &["serial_number", "Serial Number"];
    pub const CABLE_TYPE: &[&str] = &["cable_type", "device_type"];
    pub const CABLE_DEVICE_TYPE: &[&str] = &["device_type"];
    pub const CABLE_MAX_SPEED: &[&str] =
        &["cable_speed", "device_speed", "current_link_speed", "link_speed"];
    pub const CABLE_PROTOCOLS: &[&str] = &[
        "supported_protocols",
        "protocols",
        "transport_support",
        "supported_modes",
    ];
}

/// First non-empty string (or stringified number) among `keys`
pub fn first_text(node: &RawNode, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| node.get(key).and_then(NodeValue::scalar_text))
}

/// First non-negative integer among `keys`
///
/// Accepts numbers and strings that parse as an integer. Floats are
/// truncated.
pub fn first_count(node: &RawNode, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|key| match node.get(key)? {
        NodeValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        NodeValue::Text(s) => s.parse().ok(),
        _ => None,
    })
}

/// List of strings under the first usable alias
///
/// An array contributes its string and numeric entries. A single string is
/// wrapped as a one-element list. An empty array ends the search with an
/// empty list; an array with no usable entries moves on to the next alias.
pub fn string_list(node: &RawNode, keys: &[&str]) -> Vec<String> {
    for key in keys {
        match node.get(key) {
            Some(NodeValue::List(items)) => {
                if items.is_empty() {
                    return Vec::new();
                }
                let values: Vec<String> = items.iter().filter_map(NodeValue::scalar_text).collect();
                if !values.is_empty() {
                    return values;
                }
            }
            Some(NodeValue::Text(s)) if !s.is_empty() => return vec![s.clone()],
            _ => {}
        }
    }
    Vec::new()
}

/// Whether any of `keys` is present with a non-null value
pub fn has_any_key(node: &RawNode, keys: &[&str]) -> bool {
    keys.iter().any(|key| node.contains(key))
}

/// Child nodes under the first children alias holding a list
///
/// Entries that are not nodes are skipped.
pub fn children(node: &RawNode) -> impl Iterator<Item = &RawNode> {
    aliases::CHILDREN
        .iter()
        .find_map(|key| node.get(key).and_then(NodeValue::as_list))
        .unwrap_or_default()
        .iter()
        .filter_map(NodeValue::as_node)
}

/// Node display name, if any
pub fn node_name(node: &RawNode) -> Option<String> {
    first_text(node, aliases::NAME)
}
