//! Heuristic device-type guesses from an address pair.
//!
//! The prefix table and octet ranges are a rough placeholder policy, not
//! verified against real device data.

use common::DeviceType;
use std::net::Ipv4Addr;

/// OUI prefixes (upper-case, `:`-separated) mapped to a display label.
pub const VENDOR_PREFIXES: &[(&str, &str)] = &[
    ("B8:27:EB", "Raspberry Pi"),
    ("DC:A6:32", "Raspberry Pi"),
    ("E4:5F:01", "Raspberry Pi"),
    ("00:17:88", "Philips Hue"),
    ("00:0C:29", "Virtual Machine"),
    ("00:50:56", "Virtual Machine"),
    ("00:05:69", "Virtual Machine"),
    ("08:00:27", "Virtual Machine"),
    ("3C:E0:72", "Smartphone"),
    ("A4:83:E7", "Smartphone"),
    ("68:D9:3C", "Smartphone"),
    ("00:1A:11", "Smartphone"),
    ("00:25:00", "Smartphone"),
];

/// Classifies a device. Rules apply in order: gateway-style last octet,
/// vendor prefix, last-octet range, then unknown.
pub fn classify(ip: Ipv4Addr, mac: Option<&str>) -> DeviceType {
    let last_octet = ip.octets()[3];

    if last_octet == 1 || last_octet == 254 {
        return DeviceType::Router;
    }

    if let Some(label) = mac.and_then(vendor_for_mac) {
        return DeviceType::Vendor(label.to_string());
    }

    match last_octet {
        0..=19 => DeviceType::NetworkDevice,
        100..=150 => DeviceType::Computer,
        151..=200 => DeviceType::MobileDevice,
        _ => DeviceType::Unknown,
    }
}

/// Looks up the vendor label for a MAC in any case and with `:` or `-`.
pub fn vendor_for_mac(mac: &str) -> Option<&'static str> {
    let prefix: String = mac.get(..8)?.to_ascii_uppercase().replace('-', ":");
    VENDOR_PREFIXES
        .iter()
        .find(|(oui, _)| *oui == prefix)
        .map(|(_, label)| *label)
}
