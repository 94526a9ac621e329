//! Data model for usb-inspector
//!
//! This crate defines the raw hardware-tree representation produced by the
//! platform enumeration tool, the decoded report holding the USB and
//! Thunderbolt topologies, and the flat summary records the classifier emits.
//!
//! # Example
//!
//! ```
//! use model::SystemReport;
//!
//! let json = br#"{
//!     "SPUSBDataType": [{ "_name": "USB31Bus", "_items": [] }],
//!     "SPThunderboltDataType": []
//! }"#;
//!
//! let report = SystemReport::from_json(json).unwrap();
//! assert_eq!(report.usb_nodes.len(), 1);
//! assert!(report.thunderbolt_nodes.is_empty());
//! ```

pub mod current;
pub mod error;
pub mod node;
pub mod report;
pub mod types;

pub use current::MilliAmps;
pub use error::{ReportError, Result};
pub use node::{NodeValue, RawNode};
pub use report::{SystemReport, THUNDERBOLT_DATA_TYPE, USB_DATA_TYPE};
pub use types::{CableSummary, DataPowerState, DeviceSummary, Transport, VideoCapability};
