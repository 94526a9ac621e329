//! Integration tests for report decoding
//!
//! Feeds payloads shaped like real enumeration output through
//! `SystemReport` and checks how the raw node model represents them.

use model::{NodeValue, RawNode, ReportError, SystemReport};

const MIXED_PAYLOAD: &str = r#"{
  "SPUSBDataType": [
    {
      "_name": "USB31Bus",
      "host_controller": "AppleT8103USBXHCI",
      "_items": [
        {
          "_name": "Flash Drive",
          "vendor_id": 1921,
          "current_required": 224.0,
          "removable": true,
          "Media": [{ "_name": "Cruzer", "size": null }]
        }
      ]
    },
    "not a node",
    42
  ],
  "SPThunderboltDataType": [
    { "_name": "thunderboltusb4_bus_0", "_items": [] }
  ],
  "SPDisplaysDataType": [{ "_name": "ignored" }]
}"#;

fn first_child(node: &RawNode) -> &RawNode {
    node.get("_items")
        .and_then(NodeValue::as_list)
        .and_then(|items| items.first())
        .and_then(NodeValue::as_node)
        .unwrap()
}

// ============================================================================
// Decoding
// ============================================================================

mod decoding {
    use super::*;

    #[test]
    fn test_non_object_roots_are_skipped() {
        let report = SystemReport::from_json(MIXED_PAYLOAD.as_bytes()).unwrap();
        assert_eq!(report.usb_nodes.len(), 1);
        assert_eq!(report.thunderbolt_nodes.len(), 1);
    }

    #[test]
    fn test_value_shapes_are_preserved() {
        let report = SystemReport::from_json(MIXED_PAYLOAD.as_bytes()).unwrap();
        let drive = first_child(&report.usb_nodes[0]);

        assert!(matches!(drive.get("vendor_id"), Some(NodeValue::Number(_))));
        assert!(matches!(drive.get("removable"), Some(NodeValue::Bool(true))));
        assert_eq!(
            drive.get("current_required").and_then(NodeValue::scalar_text).as_deref(),
            Some("224")
        );

        let media = drive.get("Media").and_then(NodeValue::as_list).unwrap();
        let cruzer = media[0].as_node().unwrap();
        assert!(!cruzer.contains("size"));
        assert!(cruzer.get("size").is_some_and(NodeValue::is_null));
    }

    #[test]
    fn test_unrelated_data_types_are_ignored() {
        let report = SystemReport::from_json(MIXED_PAYLOAD.as_bytes()).unwrap();
        let names: Vec<_> = report
            .usb_nodes
            .iter()
            .chain(&report.thunderbolt_nodes)
            .filter_map(|n| n.get("_name").and_then(NodeValue::as_str))
            .collect();
        assert_eq!(names, vec!["USB31Bus", "thunderboltusb4_bus_0"]);
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let a = SystemReport::from_json(MIXED_PAYLOAD.as_bytes()).unwrap();
        let b = SystemReport::from_json(MIXED_PAYLOAD.as_bytes()).unwrap();
        assert_eq!(a, b);
    }
}

// ============================================================================
// Errors
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_syntax_error() {
        let err = SystemReport::from_json(b"{ \"SPUSBDataType\": [").unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }

    #[test]
    fn test_top_level_array_is_malformed() {
        let err = SystemReport::from_json(b"[]").unwrap_err();
        assert!(matches!(err, ReportError::MalformedJson));
        assert_eq!(err.to_string(), "Failed to decode system_profiler JSON payload.");
    }

    #[test]
    fn test_empty_payload() {
        assert!(matches!(
            SystemReport::from_json(b"").unwrap_err(),
            ReportError::Json(_)
        ));
    }
}
