//! Test utilities for usb-inspector
//!
//! Provides node builders and a captured report fixture for testing across
//! crates.
//!
//! # Example
//!
//! ```
//! use common::test_utils::{bus_node, mock_device_node};
//!
//! let bus = bus_node("USB31Bus", vec![mock_device_node("Mouse", "0x046d", "0xc077")]);
//! assert!(bus.contains("_items"));
//! ```

use model::{NodeValue, RawNode, SystemReport};

/// A trimmed `system_profiler -json SPUSBDataType SPThunderboltDataType`
/// capture from a laptop with a dock, external SSD and two smart cables
pub const SAMPLE_REPORT_JSON: &str = r#"{
  "SPUSBDataType": [
    {
      "_name": "USB31Bus",
      "host_controller": "AppleT8103USBXHCI",
      "_items": [
        {
          "_name": "USB3.1 Hub",
          "bcd_device": "4.73",
          "device_speed": "super_speed",
          "location_id": "0x01100000 / 1",
          "manufacturer": "VIA Labs, Inc.",
          "product_id": "0x0817",
          "vendor_id": "0x2109  (VIA Labs, Inc.)",
          "usb_device_class": "Hub",
          "_items": [
            {
              "_name": "Portable SSD T7",
              "bcd_device": "1.00",
              "bsd_name": "disk4",
              "device_speed": "Up to 10 Gb/s",
              "location_id": "0x01110000 / 2",
              "manufacturer": "Samsung",
              "product_id": "0x4001",
              "serial_num": "S5SXNS0R123456",
              "vendor_id": "0x04e8  (Samsung Electronics Co., Ltd.)",
              "current_required": "896",
              "current_available": "900",
              "Media": [{ "_name": "PSSD T7", "bsd_name": "disk4" }]
            },
            {
              "_name": "LG UltraFine Display Controls",
              "bcd_device": "0.02",
              "device_speed": "full_speed",
              "location_id": "0x01120000 / 3",
              "manufacturer": "LG Electronics Inc.",
              "product_id": "0x9a40",
              "vendor_id": "0x043e",
              "num_interfaces": 2
            }
          ]
        },
        {
          "_name": "Apple Internal Keyboard / Trackpad",
          "device_speed": "full_speed",
          "location_id": "0x01200000 / 4",
          "manufacturer": "Apple Inc.",
          "product_id": "0x0342",
          "vendor_id": "apple_vendor_id"
        }
      ]
    },
    {
      "_name": "USB20Bus",
      "_items": [
        {
          "_name": "Logitech USB Mouse",
          "device_speed": "low_speed",
          "location_id": "0x02100000 / 1",
          "manufacturer": "Logitech",
          "product_id": "0xc077",
          "vendor_id": "0x046d",
          "current_required": "100",
          "_items": [
            { "_name": "HID Interface", "bInterfaceNumber": 0 }
          ]
        },
        {
          "_name": "Anker Charger",
          "product_id": "0x5001",
          "current_required": "500 mA"
        }
      ]
    }
  ],
  "SPThunderboltDataType": [
    {
      "_name": "thunderboltusb4_bus_0",
      "device_name_key": "MacBook Pro",
      "_items": [
        {
          "_name": "Thunderbolt 4 Cable",
          "cable_type": "Thunderbolt 4",
          "vendor_name": "Apple Inc.",
          "product_id": 4660,
          "serial_number": "C4ABC123",
          "cable_speed": "Up to 40 Gb/s",
          "supported_protocols": ["USB4", "DisplayPort", "PCIe"]
        },
        {
          "_name": "USB-C Charge Cable",
          "device_type": "cable",
          "vendor_name": "Generic",
          "supported_protocols": "USB 2.0"
        }
      ]
    }
  ]
}"#;

/// Decode [`SAMPLE_REPORT_JSON`]
pub fn sample_report() -> SystemReport {
    SystemReport::from_json(SAMPLE_REPORT_JSON.as_bytes())
        .expect("sample report fixture must decode")
}

/// Create a bus (or hub) node with the given children under `_items`
pub fn bus_node(name: &str, children: Vec<RawNode>) -> RawNode {
    RawNode::new().with("_name", name).with("_items", children)
}

/// Create a minimal device node carrying vendor and product IDs
///
/// # Example
/// ```
/// use common::test_utils::mock_device_node;
///
/// let node = mock_device_node("Keyboard", "0x05ac", "0x0342");
/// assert!(node.contains("vendor_id"));
/// ```
pub fn mock_device_node(name: &str, vendor_id: &str, product_id: &str) -> RawNode {
    RawNode::new()
        .with("_name", name)
        .with("vendor_id", vendor_id)
        .with("product_id", product_id)
}

/// Create a cable node with a serial number and protocol list
pub fn mock_cable_node(name: &str, serial: &str, protocols: &[&str]) -> RawNode {
    RawNode::new()
        .with("_name", name)
        .with("cable_type", "Thunderbolt 4")
        .with("serial_number", serial)
        .with(
            "supported_protocols",
            protocols.iter().map(|p| NodeValue::from(*p)).collect::<Vec<_>>(),
        )
}

/// Build a synthetic USB topology
///
/// Produces `buses` root buses, each with `hubs_per_bus` hubs holding
/// `devices_per_hub` devices. Used by benchmarks and property tests.
pub fn synthetic_usb_tree(
    buses: usize,
    hubs_per_bus: usize,
    devices_per_hub: usize,
) -> Vec<RawNode> {
    (0..buses)
        .map(|b| {
            let hubs = (0..hubs_per_bus)
                .map(|h| {
                    let devices = (0..devices_per_hub)
                        .map(|d| {
                            mock_device_node(
                                &format!("Device {}-{}-{}", b, h, d),
                                &format!("0x{:04x}", 0x1000 + d),
                                &format!("0x{:04x}", 0x2000 + h),
                            )
                            .with("device_speed", "Up to 480 Mb/s")
                            .with("location_id", format!("0x{:02x}{:02x}{:02x}00", b, h, d))
                        })
                        .collect();
                    bus_node(&format!("Hub {}-{}", b, h), devices)
                        .with("vendor_id", "0x2109")
                        .with("usb_device_class", "Hub")
                })
                .collect();
            bus_node(&format!("USB{}Bus", b), hubs)
        })
        .collect()
}

/// Build a single chain of nested unnamed nodes `depth` levels deep
pub fn deep_chain(depth: usize) -> RawNode {
    let mut node = mock_device_node("Leaf", "0x1234", "0x5678");
    for _ in 0..depth {
        node = RawNode::new().with("_items", vec![node]);
    }
    node
}
