//! Hardware-tree classification for usb-inspector
//!
//! Walks the USB and Thunderbolt trees from an enumeration report and turns
//! every device and smart-cable node into a flat, classified record.
//!
//! The whole pipeline is a pure function of its input: no I/O, no global
//! state, and two runs over the same report produce identical output.
//!
//! # Example
//!
//! ```
//! use classifier::Inventory;
//! use model::SystemReport;
//!
//! let report = SystemReport::from_json(br#"{
//!     "SPUSBDataType": [{
//!         "_name": "USB20Bus",
//!         "_items": [{
//!             "_name": "Flash Drive",
//!             "vendor_id": "0x0781",
//!             "bsd_name": "disk2"
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let inventory = Inventory::from_report(&report);
//! assert_eq!(inventory.devices.len(), 1);
//! assert_eq!(inventory.devices[0].path, "USB20Bus > Flash Drive");
//! assert!(inventory.cables.is_empty());
//! ```

pub mod assemble;
pub mod cable;
pub mod device;
pub mod fields;
pub mod walker;

pub use assemble::{Inventory, classify_cables, classify_devices, sort_cables, sort_devices};
pub use walker::{MAX_DEPTH, PATH_SEPARATOR, Visit, walk};
