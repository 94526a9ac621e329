//! Smart cable classification
//!
//! Only cables with an e-marker chip show up in the Thunderbolt tree, so the
//! records here are whatever firmware the cable chose to report.

use crate::fields::{aliases, first_text, has_any_key, string_list};
use crate::walker::walk;
use model::{CableSummary, RawNode, VideoCapability};
use tracing::{debug, trace};

/// Whether a node describes a cable
pub fn is_cable_node(node: &RawNode) -> bool {
    if has_any_key(node, aliases::DEVICE_CABLE_TYPE) {
        return true;
    }
    let mentions_cable =
        |keys: &[&str]| first_text(node, keys).is_some_and(|v| v.to_lowercase().contains("cable"));
    mentions_cable(aliases::NAME) || mentions_cable(aliases::CABLE_DEVICE_TYPE)
}

/// Decide whether a cable can carry a display signal
///
/// Checked in order: DisplayPort in the protocol list, a Thunderbolt cable
/// type, USB4/Thunderbolt in the protocol list, a display-ish name. With none
/// of those, an empty protocol list is unknown and anything else is not
/// capable.
pub fn cable_video(protocols: &[String], cable_type: Option<&str>, name: &str) -> VideoCapability {
    let normalized: Vec<String> = protocols.iter().map(|p| p.to_lowercase()).collect();

    if normalized
        .iter()
        .any(|p| p.contains("displayport") || p.contains("dp ") || p == "dp")
    {
        return VideoCapability::Capable;
    }
    if cable_type.is_some_and(|t| t.to_lowercase().contains("thunderbolt")) {
        return VideoCapability::Capable;
    }
    if normalized
        .iter()
        .any(|p| p.contains("usb4") || p.contains("thunderbolt"))
    {
        return VideoCapability::Capable;
    }
    let name = name.to_lowercase();
    if name.contains("display") || name.contains("hdmi") {
        return VideoCapability::Capable;
    }
    if normalized.is_empty() {
        return VideoCapability::Unknown;
    }
    VideoCapability::NotCapable
}

/// Build the summary for one cable node
pub fn summarize_cable(node: &RawNode) -> CableSummary {
    let name = first_text(node, aliases::CABLE_NAME).unwrap_or_else(|| "Cable".to_string());
    let cable_type = first_text(node, aliases::CABLE_TYPE);
    let supported_protocols = string_list(node, aliases::CABLE_PROTOCOLS);
    let video_capability = cable_video(&supported_protocols, cable_type.as_deref(), &name);

    trace!(name = %name, video = %video_capability, "Classified cable");

    CableSummary {
        name,
        vendor: first_text(node, aliases::CABLE_VENDOR),
        product_id: first_text(node, aliases::CABLE_PRODUCT_ID),
        serial_number: first_text(node, aliases::CABLE_SERIAL),
        cable_type,
        max_speed: first_text(node, aliases::CABLE_MAX_SPEED),
        supported_protocols,
        video_capability,
    }
}

/// Add a cable, replacing an earlier record with the same serial number
///
/// The replacement keeps the earlier record's position. Cables without a
/// serial never merge.
pub fn merge_cable(cables: &mut Vec<CableSummary>, cable: CableSummary) {
    let existing = cable.serial_number.as_ref().and_then(|serial| {
        cables
            .iter()
            .position(|c| c.serial_number.as_ref() == Some(serial))
    });

    match existing {
        Some(index) => {
            debug!(
                "Cable serial {} seen again, keeping the later record",
                cable.serial_number.as_deref().unwrap_or_default()
            );
            cables[index] = cable;
        }
        None => cables.push(cable),
    }
}

/// Every cable under `roots`, de-duplicated, in first-discovery order
pub fn collect_cables(roots: &[RawNode]) -> Vec<CableSummary> {
    let mut cables = Vec::new();
    for visit in walk(roots) {
        if is_cable_node(visit.node) {
            merge_cable(&mut cables, summarize_cable(visit.node));
        }
    }
    cables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protocols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_cable_node() {
        assert!(is_cable_node(&RawNode::new().with("cable_type", "")));
        assert!(is_cable_node(&RawNode::new().with("_name", "Apple USB-C Cable")));
        assert!(is_cable_node(&RawNode::new().with("device_type", "CABLE")));
        assert!(!is_cable_node(&RawNode::new().with("_name", "Thunderbolt Bus")));
    }

    #[test]
    fn test_video_displayport_protocol() {
        assert_eq!(
            cable_video(&protocols(&["DisplayPort"]), None, "x"),
            VideoCapability::Capable
        );
        assert_eq!(cable_video(&protocols(&["DP"]), None, "x"), VideoCapability::Capable);
        assert_eq!(
            cable_video(&protocols(&["DP Alt Mode"]), None, "x"),
            VideoCapability::Capable
        );
    }

    #[test]
    fn test_video_thunderbolt_type() {
        assert_eq!(
            cable_video(&[], Some("Thunderbolt 3"), "x"),
            VideoCapability::Capable
        );
    }

    #[test]
    fn test_video_usb4_protocol() {
        assert_eq!(cable_video(&protocols(&["USB4"]), None, "x"), VideoCapability::Capable);
        assert_eq!(
            cable_video(&protocols(&["Thunderbolt"]), None, "x"),
            VideoCapability::Capable
        );
    }

    #[test]
    fn test_video_name() {
        assert_eq!(
            cable_video(&protocols(&["USB 2.0"]), None, "HDMI Cable"),
            VideoCapability::Capable
        );
    }

    #[test]
    fn test_video_unknown_and_not_capable() {
        assert_eq!(cable_video(&[], None, "Cable"), VideoCapability::Unknown);
        assert_eq!(
            cable_video(&protocols(&["USB 2.0"]), Some("USB-C"), "Charge Cable"),
            VideoCapability::NotCapable
        );
    }

    #[test]
    fn test_video_dp_needs_word_boundary() {
        // "dpx" is neither "dp" nor "dp "
        assert_eq!(
            cable_video(&protocols(&["dpx"]), None, "Cable"),
            VideoCapability::NotCapable
        );
    }

    #[test]
    fn test_summarize_defaults() {
        let cable = summarize_cable(&RawNode::new().with("cable_type", "USB-C"));
        assert_eq!(cable.name, "Cable");
        assert_eq!(cable.vendor, None);
        assert!(cable.supported_protocols.is_empty());
        assert_eq!(cable.video_capability, VideoCapability::Unknown);
    }

    #[test]
    fn test_merge_replaces_in_place() {
        let mut cables = Vec::new();
        let make = |name: &str, serial: Option<&str>| CableSummary {
            name: name.to_string(),
            vendor: None,
            product_id: None,
            serial_number: serial.map(str::to_string),
            cable_type: None,
            max_speed: None,
            supported_protocols: Vec::new(),
            video_capability: VideoCapability::Unknown,
        };

        merge_cable(&mut cables, make("first", Some("S1")));
        merge_cable(&mut cables, make("second", None));
        merge_cable(&mut cables, make("third", None));
        merge_cable(&mut cables, make("replacement", Some("S1")));

        let names: Vec<_> = cables.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["replacement", "second", "third"]);
    }
}
