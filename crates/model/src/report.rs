//! Decoded enumeration report
//!
//! The enumeration tool prints one JSON object keyed by data type. Only the
//! USB and Thunderbolt topologies are read; anything else is ignored.

use crate::error::{ReportError, Result};
use crate::node::RawNode;
use serde_json::Value;

/// Top-level key holding the USB topology
pub const USB_DATA_TYPE: &str = "SPUSBDataType";

/// Top-level key holding the Thunderbolt topology
pub const THUNDERBOLT_DATA_TYPE: &str = "SPThunderboltDataType";

/// Root nodes of both topologies from one enumeration snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemReport {
    /// Roots of the USB tree (usually one per bus)
    pub usb_nodes: Vec<RawNode>,
    /// Roots of the Thunderbolt tree (usually one per controller)
    pub thunderbolt_nodes: Vec<RawNode>,
}

impl SystemReport {
    /// Decode a raw JSON payload
    ///
    /// A missing or non-array collection decodes to an empty list. A payload
    /// whose top level is not an object is rejected.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(ReportError::MalformedJson);
        };

        Ok(Self {
            usb_nodes: roots(map.remove(USB_DATA_TYPE)),
            thunderbolt_nodes: roots(map.remove(THUNDERBOLT_DATA_TYPE)),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.usb_nodes.is_empty() && self.thunderbolt_nodes.is_empty()
    }
}

fn roots(collection: Option<Value>) -> Vec<RawNode> {
    match collection {
        Some(Value::Array(items)) => items.into_iter().filter_map(RawNode::from_json).collect(),
        _ => Vec::new(),
    }
}
