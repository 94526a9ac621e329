//! Property-based tests for the classification pipeline
//!
//! Generates arbitrary hardware trees and checks the ordering, determinism
//! and field invariants that must hold for every input.

use classifier::{Inventory, classify_cables, classify_devices};
use model::{MilliAmps, NodeValue, RawNode};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = NodeValue> {
    prop_oneof![
        Just(NodeValue::Null),
        any::<bool>().prop_map(NodeValue::from),
        any::<i64>().prop_map(NodeValue::from),
        "[ -~]{0,12}".prop_map(NodeValue::from),
    ]
}

fn key() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "_name",
        "name",
        "vendor_id",
        "idProduct",
        "device_speed",
        "serial_num",
        "serial_number",
        "bsd_name",
        "current_required",
        "num_interfaces",
        "cable_type",
        "supported_protocols",
        "usb_version",
    ])
}

fn leaf() -> impl Strategy<Value = RawNode> {
    prop::collection::vec((key(), scalar()), 0..6)
        .prop_map(|fields| fields.into_iter().fold(RawNode::new(), |n, (k, v)| n.with(k, v)))
}

fn tree() -> impl Strategy<Value = RawNode> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        (leaf(), prop::collection::vec(inner, 0..6))
            .prop_map(|(node, children)| node.with("_items", children))
    })
}

proptest! {
    #[test]
    fn prop_devices_sorted_by_path(roots in prop::collection::vec(tree(), 0..4)) {
        let devices = classify_devices(&roots);
        prop_assert!(devices.windows(2).all(|w| w[0].path <= w[1].path));
    }

    #[test]
    fn prop_cables_sorted_by_name(roots in prop::collection::vec(tree(), 0..4)) {
        let cables = classify_cables(&roots);
        prop_assert!(cables.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn prop_classification_is_deterministic(
        usb in prop::collection::vec(tree(), 0..3),
        thunderbolt in prop::collection::vec(tree(), 0..3),
    ) {
        prop_assert_eq!(
            Inventory::from_roots(&usb, &thunderbolt),
            Inventory::from_roots(&usb, &thunderbolt)
        );
    }

    #[test]
    fn prop_cable_serials_are_unique(roots in prop::collection::vec(tree(), 0..4)) {
        let cables = classify_cables(&roots);
        let mut serials: Vec<_> = cables.iter().filter_map(|c| c.serial_number.clone()).collect();
        let before = serials.len();
        serials.sort();
        serials.dedup();
        prop_assert_eq!(before, serials.len());
    }

    #[test]
    fn prop_optional_fields_never_empty(roots in prop::collection::vec(tree(), 0..4)) {
        for d in classify_devices(&roots) {
            for value in [&d.vendor_id, &d.product_id, &d.serial_number, &d.bsd_name, &d.speed]
                .into_iter()
                .flatten()
            {
                prop_assert!(!value.is_empty());
            }
            prop_assert!(!d.name.is_empty());
        }
    }

    #[test]
    fn prop_current_parse_matches_digits(input in "[ -~]{0,16}") {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        let parsed = MilliAmps::parse(Some(&input));
        match digits.parse::<u32>() {
            Ok(expected) => prop_assert_eq!(parsed, Some(MilliAmps(expected))),
            Err(_) => prop_assert_eq!(parsed, None),
        }
    }
}
