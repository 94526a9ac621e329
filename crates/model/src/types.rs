//! Summary record definitions
//!
//! This module defines the flat records produced by classification, along
//! with the inferred link properties attached to each of them.

use crate::current::MilliAmps;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inferred USB / Thunderbolt generation of a device link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Low / Full speed - 1.5 / 12 Mbps
    Usb1,
    /// High speed - 480 Mbps
    Usb2,
    /// SuperSpeed - 5 Gbps
    Usb3,
    /// SuperSpeed+ - 10 Gbps
    Usb31,
    /// SuperSpeed+ 2x2 - 20 Gbps
    Usb32,
    /// USB4 - 40 Gbps
    Usb4,
    /// Link behind a Thunderbolt cable
    Thunderbolt,
    Unknown,
}

impl Transport {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Transport::Usb1 => "USB 1.x",
            Transport::Usb2 => "USB 2.0",
            Transport::Usb3 => "USB 3.0",
            Transport::Usb31 => "USB 3.1",
            Transport::Usb32 => "USB 3.2",
            Transport::Usb4 => "USB4",
            Transport::Thunderbolt => "Thunderbolt / USB4",
            Transport::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a link carries data, only bus power, or cannot be told
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataPowerState {
    DataAndPower,
    PowerOnly,
    Unknown,
}

impl DataPowerState {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            DataPowerState::DataAndPower => "Data + Power",
            DataPowerState::PowerOnly => "Power Only",
            DataPowerState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DataPowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a device or cable can carry a display signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCapability {
    Capable,
    NotCapable,
    Unknown,
}

impl VideoCapability {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            VideoCapability::Capable => "Video Ready",
            VideoCapability::NotCapable => "Not Supported",
            VideoCapability::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for VideoCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One USB device found in the hardware tree
///
/// Optional fields are either a meaningful non-empty value or `None`; they
/// are never empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    /// Ancestor names joined by `" > "`, ending with this device
    pub path: String,
    pub name: String,
    pub vendor: Option<String>,
    pub vendor_id: Option<String>,
    pub product_id: Option<String>,
    pub serial_number: Option<String>,
    pub location_id: Option<String>,
    /// BSD device node (e.g. `disk2`) for storage devices
    pub bsd_name: Option<String>,
    pub usb_version: Option<String>,
    /// Free-form speed description (e.g. `"Up to 480 Mb/s"`)
    pub speed: Option<String>,
    pub current_required: Option<MilliAmps>,
    pub current_available: Option<MilliAmps>,
    pub extra_current: Option<MilliAmps>,
    pub interface_count: u32,
    pub device_class: Option<String>,
    pub device_subclass: Option<String>,
    pub device_protocol: Option<String>,
    pub transport: Transport,
    pub data_power_state: DataPowerState,
    pub video_capability: VideoCapability,
    /// Part of the host system rather than a user-attached peripheral
    pub is_built_in: bool,
}

impl DeviceSummary {
    /// Identity key: serial number, else location ID, else path
    pub fn id(&self) -> &str {
        self.serial_number
            .as_deref()
            .or(self.location_id.as_deref())
            .unwrap_or(&self.path)
    }
}

/// One smart cable found in the Thunderbolt tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableSummary {
    pub name: String,
    pub vendor: Option<String>,
    pub product_id: Option<String>,
    pub serial_number: Option<String>,
    pub cable_type: Option<String>,
    pub max_speed: Option<String>,
    /// Protocol names in discovery order (duplicates kept)
    pub supported_protocols: Vec<String>,
    pub video_capability: VideoCapability,
}

impl CableSummary {
    /// Identity key: serial number, else `vendor-pid-name`
    pub fn id(&self) -> String {
        match &self.serial_number {
            Some(serial) => serial.clone(),
            None => format!(
                "{}-{}-{}",
                self.vendor.as_deref().unwrap_or("vendor"),
                self.product_id.as_deref().unwrap_or("pid"),
                self.name
            ),
        }
    }
}
