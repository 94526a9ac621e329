//! Console and JSON output

use classifier::Inventory;
use model::{CableSummary, DeviceSummary};
use std::io::{self, Write};

const NO_DEVICES: &str = "No USB devices were reported by system_profiler.";
const NO_CABLES: &str =
    "No smart USB-C / Thunderbolt cables detected (many passive cables lack firmware and will not appear).";

/// Labelled detail lines for a device, skipping absent values
///
/// Shared by the console output and the TUI details dialog.
pub fn device_fields(device: &DeviceSummary) -> Vec<(&'static str, String)> {
    let mut fields = vec![("Path", device.path.clone())];

    if let Some(vendor) = &device.vendor {
        fields.push(("Vendor", vendor.clone()));
    }
    if let (Some(vid), Some(pid)) = (&device.vendor_id, &device.product_id) {
        fields.push(("VID:PID", format!("{}:{}", vid, pid)));
    }
    let optional = [
        ("Serial", &device.serial_number),
        ("Location", &device.location_id),
        ("BSD Name", &device.bsd_name),
        ("USB Version", &device.usb_version),
        ("Speed", &device.speed),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            fields.push((label, value.clone()));
        }
    }
    let currents = [
        ("Current Available", device.current_available),
        ("Current Draw", device.current_required),
        ("Extra Operating Current", device.extra_current),
    ];
    for (label, value) in currents {
        if let Some(value) = value {
            fields.push((label, value.to_string()));
        }
    }
    if device.interface_count > 0 {
        fields.push(("Interfaces", device.interface_count.to_string()));
    }
    if let Some(class) = &device.device_class {
        fields.push((
            "Class/Subclass/Protocol",
            format!(
                "{}/{}/{}",
                class,
                device.device_subclass.as_deref().unwrap_or("?"),
                device.device_protocol.as_deref().unwrap_or("?")
            ),
        ));
    }

    fields.push(("Transport", device.transport.to_string()));
    fields.push(("Data/Power", device.data_power_state.to_string()));
    fields.push(("Video", device.video_capability.to_string()));
    fields.push(("Built-in", yes_no(device.is_built_in).to_string()));
    fields
}

/// Labelled detail lines for a cable, skipping absent values
pub fn cable_fields(cable: &CableSummary) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();

    let optional = [
        ("Vendor", &cable.vendor),
        ("Product ID", &cable.product_id),
        ("Serial", &cable.serial_number),
        ("Type", &cable.cable_type),
        ("Max Speed", &cable.max_speed),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            fields.push((label, value.clone()));
        }
    }
    if !cable.supported_protocols.is_empty() {
        fields.push(("Protocols", cable.supported_protocols.join(", ")));
    }
    fields.push(("Video", cable.video_capability.to_string()));
    fields
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Write the human-readable report
pub fn write_text<W: Write>(out: &mut W, inventory: &Inventory) -> io::Result<()> {
    write_section_title(out, "USB Devices")?;
    if inventory.devices.is_empty() {
        writeln!(out, "{}", NO_DEVICES)?;
    } else {
        for device in &inventory.devices {
            writeln!(out, "• {}", device.name)?;
            write_fields(out, &device_fields(device))?;
            writeln!(out)?;
        }
    }

    write_section_title(out, "USB4 / Thunderbolt Cables")?;
    if inventory.cables.is_empty() {
        writeln!(out, "{}", NO_CABLES)?;
    } else {
        for cable in &inventory.cables {
            writeln!(out, "• {}", cable.name)?;
            write_fields(out, &cable_fields(cable))?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn write_section_title<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n=== {} ===", title)
}

fn write_fields<W: Write>(out: &mut W, fields: &[(&'static str, String)]) -> io::Result<()> {
    for (label, value) in fields {
        writeln!(out, "  {}: {}", label, value)?;
    }
    Ok(())
}

/// Write `{"devices": [...], "cables": [...]}`, pretty-printed
pub fn write_json<W: Write>(out: &mut W, inventory: &Inventory) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, inventory)?;
    writeln!(out)
}
