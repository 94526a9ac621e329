//! USB device classification
//!
//! Every rule set below is ordered and the first match wins. The raw tree
//! rarely states transport, power role or video support outright, so each is
//! inferred from whichever signals happen to be present.

use crate::fields::{aliases, children, first_count, first_text, has_any_key, node_name};
use crate::walker::{Visit, walk};
use model::{DataPowerState, DeviceSummary, MilliAmps, RawNode, Transport, VideoCapability};
use tracing::trace;

/// Substring rules applied to a lowercased speed description
///
/// Checked top to bottom, so "5" claims any description containing it,
/// including "Up to 1.5 Mb/s". macOS reports low-speed links as
/// `low_speed`, which falls through to the last rule.
const SPEED_RULES: &[(&[&str], Transport)] = &[
    (&["40"], Transport::Usb4),
    (&["20"], Transport::Usb32),
    (&["10"], Transport::Usb31),
    (&["5", "super"], Transport::Usb3),
    (&["480", "high"], Transport::Usb2),
    (&["12", "1.5", "full", "low"], Transport::Usb1),
];

const VIDEO_KEYWORDS: &[&str] = &[
    "display",
    "displayport",
    "dp",
    "hdmi",
    "video",
    "monitor",
    "dock",
];
const NO_VIDEO_KEYWORDS: &[&str] = &["power adapter", "charger"];

/// Bus keywords are spelled with spaces: the compact root names macOS uses
/// (`USB31Bus`) appear in every descendant's path and must not match.
const BUILT_IN_KEYWORDS: &[&str] = &[
    "bluetooth",
    "camera",
    "facetime",
    "isight",
    "fingerprint",
    "touch bar",
    "touchbar",
    "keyboard",
    "trackpad",
    "internal",
    "built-in",
    "controller",
    "root hub",
    "usb bus",
    "usb 2.0 bus",
    "usb 3.0 bus",
    "usb 3.1 bus",
    "apple internal",
    "t2 controller",
];

/// Peripherals Apple ships inside its own machines
const APPLE_BUILT_IN_KEYWORDS: &[&str] = &["keyboard", "trackpad", "mouse", "camera", "bluetooth"];

const APPLE_VENDOR_ID: &str = "05ac";

/// Whether a device belongs to the host or was plugged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeviceKind {
    BuiltIn,
    External,
}

/// Infer the link generation
///
/// A Thunderbolt cable type decides outright. Otherwise the speed
/// description is consulted before the USB version string.
pub fn infer_transport(
    usb_version: Option<&str>,
    speed: Option<&str>,
    cable_type: Option<&str>,
) -> Transport {
    if cable_type.is_some_and(|t| t.to_lowercase().contains("thunderbolt")) {
        return Transport::Thunderbolt;
    }

    speed
        .and_then(transport_from_speed)
        .or_else(|| usb_version.and_then(transport_from_version))
        .unwrap_or(Transport::Unknown)
}

fn transport_from_speed(speed: &str) -> Option<Transport> {
    let speed = speed.to_lowercase();
    SPEED_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| speed.contains(n)))
        .map(|(_, transport)| *transport)
}

/// Read a version string such as `"2.0"`, `"USB 3.2"` or `"usb4"`
///
/// Single-digit generations only match as a whole major number, so a device
/// release like `"2.14"` is USB 2 and never USB4.
fn transport_from_version(version: &str) -> Option<Transport> {
    let version = version.trim().to_lowercase();
    let number = version
        .strip_prefix("usb")
        .unwrap_or(version.as_str())
        .trim_start();
    let major_is = |major: &str| {
        number == major
            || number
                .strip_prefix(major)
                .is_some_and(|rest| rest.starts_with('.'))
    };

    if version.contains("usb4") || version.contains("usb 4") || major_is("4") {
        Some(Transport::Usb4)
    } else if version.contains("3.2") {
        Some(Transport::Usb32)
    } else if version.contains("3.1") {
        Some(Transport::Usb31)
    } else if version.contains("3.0") || major_is("3") {
        Some(Transport::Usb3)
    } else if major_is("2") {
        Some(Transport::Usb2)
    } else if major_is("1") {
        Some(Transport::Usb1)
    } else {
        None
    }
}

/// Infer whether the link carries data
///
/// Any one of a BSD node, an interface or a reported speed means data flows.
/// Failing those, a current draw alone means the port only supplies power.
pub fn infer_data_power(
    bsd_name: Option<&str>,
    interface_count: u32,
    speed: Option<&str>,
    current_required: Option<MilliAmps>,
) -> DataPowerState {
    if bsd_name.is_some_and(|n| !n.is_empty()) {
        return DataPowerState::DataAndPower;
    }
    if interface_count > 0 {
        return DataPowerState::DataAndPower;
    }
    if speed.is_some_and(|s| !s.is_empty()) {
        return DataPowerState::DataAndPower;
    }
    if current_required.is_some() {
        return DataPowerState::PowerOnly;
    }
    DataPowerState::Unknown
}

/// Guess display support from the names around a device
pub fn infer_device_video(
    path: &str,
    name: &str,
    vendor: Option<&str>,
    product_name: Option<&str>,
) -> VideoCapability {
    let haystack = haystack(&[Some(path), Some(name), vendor, product_name]);

    if VIDEO_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        VideoCapability::Capable
    } else if NO_VIDEO_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        VideoCapability::NotCapable
    } else {
        VideoCapability::Unknown
    }
}

pub(crate) fn infer_kind(
    path: &str,
    path_segments: usize,
    name: &str,
    vendor: Option<&str>,
    vendor_id: Option<&str>,
    device_class: Option<&str>,
) -> DeviceKind {
    let haystack = haystack(&[Some(path), Some(name), vendor, vendor_id]);

    if BUILT_IN_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        return DeviceKind::BuiltIn;
    }
    if vendor_id.is_some_and(is_apple_vendor_id)
        && APPLE_BUILT_IN_KEYWORDS.iter().any(|k| haystack.contains(k))
    {
        return DeviceKind::BuiltIn;
    }
    if device_class.is_some_and(|c| c.to_lowercase().contains("hub")) {
        return DeviceKind::BuiltIn;
    }
    // Shallow hubs hang directly off a bus and are part of the machine
    if path_segments <= 2 && path.to_lowercase().contains("hub") {
        return DeviceKind::BuiltIn;
    }
    DeviceKind::External
}

/// Accepts `0x05ac`, `05AC`, `0x05ac (Apple Inc.)` and `apple_vendor_id`
fn is_apple_vendor_id(vendor_id: &str) -> bool {
    let lowered = vendor_id.trim().to_lowercase();
    let token = lowered.split_whitespace().next().unwrap_or_default();
    let hex = token.strip_prefix("0x").unwrap_or(token);
    hex == APPLE_VENDOR_ID || token == "apple_vendor_id"
}

fn haystack(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .map(|p| p.unwrap_or_default().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a node describes a device rather than a bus or interface
pub fn is_device_node(node: &RawNode) -> bool {
    has_any_key(node, aliases::DEVICE_IDENTIFYING)
}

/// Explicit interface count, else the number of interface-looking children
pub fn interface_count(node: &RawNode) -> u32 {
    if let Some(explicit) = first_count(node, aliases::INTERFACE_COUNT) {
        return explicit;
    }
    let counted = children(node).filter(|child| is_interface_node(child)).count();
    u32::try_from(counted).unwrap_or(u32::MAX)
}

fn is_interface_node(node: &RawNode) -> bool {
    has_any_key(node, aliases::INTERFACE_NUMBER)
        || node_name(node).is_some_and(|n| n.to_lowercase().contains("interface"))
}

/// Build the summary for one visited device node
pub fn summarize_device(visit: &Visit<'_>) -> DeviceSummary {
    let node = visit.node;
    let path = visit.path_description();

    let name = node_name(node).unwrap_or_else(|| "Unnamed device".to_string());
    let vendor = first_text(node, aliases::DEVICE_VENDOR);
    let vendor_id = first_text(node, aliases::DEVICE_VENDOR_ID);
    let product_id = first_text(node, aliases::DEVICE_PRODUCT_ID);
    let bsd_name = first_text(node, aliases::DEVICE_BSD_NAME);
    let usb_version = first_text(node, aliases::DEVICE_USB_VERSION);
    let speed = first_text(node, aliases::DEVICE_SPEED);
    let current_required =
        MilliAmps::parse(first_text(node, aliases::CURRENT_REQUIRED).as_deref());
    let device_class = first_text(node, aliases::DEVICE_CLASS);
    let product_name = first_text(node, aliases::PRODUCT_NAME);
    let cable_type = first_text(node, aliases::DEVICE_CABLE_TYPE);
    let interface_count = interface_count(node);

    let transport = infer_transport(
        usb_version.as_deref(),
        speed.as_deref(),
        cable_type.as_deref(),
    );
    let data_power_state =
        infer_data_power(bsd_name.as_deref(), interface_count, speed.as_deref(), current_required);
    let video_capability =
        infer_device_video(&path, &name, vendor.as_deref(), product_name.as_deref());
    let kind = infer_kind(
        &path,
        visit.segments.len(),
        &name,
        vendor.as_deref(),
        vendor_id.as_deref(),
        device_class.as_deref(),
    );

    trace!(
        path = %path,
        transport = %transport,
        power = %data_power_state,
        video = %video_capability,
        built_in = kind == DeviceKind::BuiltIn,
        "Classified device"
    );

    DeviceSummary {
        path,
        name,
        vendor,
        vendor_id,
        product_id,
        serial_number: first_text(node, aliases::DEVICE_SERIAL),
        location_id: first_text(node, aliases::DEVICE_LOCATION),
        bsd_name,
        usb_version,
        speed,
        current_required,
        current_available: MilliAmps::parse(
            first_text(node, aliases::CURRENT_AVAILABLE).as_deref(),
        ),
        extra_current: MilliAmps::parse(first_text(node, aliases::EXTRA_CURRENT).as_deref()),
        interface_count,
        device_class,
        device_subclass: first_text(node, aliases::DEVICE_SUBCLASS),
        device_protocol: first_text(node, aliases::DEVICE_PROTOCOL),
        transport,
        data_power_state,
        video_capability,
        is_built_in: kind == DeviceKind::BuiltIn,
    }
}

/// Every device under `roots`, in discovery (pre-order) order
///
/// Devices are not de-duplicated: two nodes sharing a serial, location or
/// path both appear.
pub fn collect_devices(roots: &[RawNode]) -> Vec<DeviceSummary> {
    walk(roots)
        .iter()
        .filter(|visit| is_device_node(visit.node))
        .map(summarize_device)
        .collect()
}
