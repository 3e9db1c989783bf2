//! Extraction of addresses from the text output of OS networking commands.
//!
//! Every function here is pure: it takes command output and returns typed
//! values, so each OS format can be covered by a fixture test.

use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv4Addr;

static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").expect("IPv4 pattern compiles")
});

// macOS prints octets without leading zeros ("0:11:2:33:44:55"), so one or
// two hex digits are accepted per group. The token must stand alone between
// whitespace, otherwise hostnames like "a-b-c-d-e-f.lan" would match.
static MAC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\s)([0-9a-f]{1,2}(?:[:-][0-9a-f]{1,2}){5})(?:\s|$)")
        .expect("MAC pattern compiles")
});

/// One usable row of `arp -a` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpEntry {
    /// Zero-based line number in the raw output, including skipped lines.
    pub line_index: usize,
    pub ip: Ipv4Addr,
    /// Normalized MAC, `None` for incomplete entries.
    pub mac: Option<String>,
}

/// Returns the first valid dotted-quad in `text`.
pub fn extract_first_ipv4(text: &str) -> Option<Ipv4Addr> {
    IPV4_PATTERN
        .find_iter(text)
        .find_map(|m| m.as_str().parse::<Ipv4Addr>().ok())
}

/// Returns the first MAC-like token in `text`, normalized.
pub fn extract_mac(text: &str) -> Option<String> {
    MAC_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| normalize_mac(m.as_str()))
}

/// Normalizes a six-group MAC address to lower-case hex pairs joined by `:`.
///
/// `AA-BB-CC-DD-EE-FF` becomes `aa:bb:cc:dd:ee:ff`, and `0:1b:63:a:b:c`
/// becomes `00:1b:63:0a:0b:0c`.
pub fn normalize_mac(raw: &str) -> Option<String> {
    let groups: Vec<&str> = raw.trim().split(|c| c == ':' || c == '-').collect();
    if groups.len() != 6 {
        return None;
    }

    let mut octets = Vec::with_capacity(6);
    for group in groups {
        if group.is_empty() || group.len() > 2 || !group.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        octets.push(format!("{:0>2}", group.to_ascii_lowercase()));
    }
    Some(octets.join(":"))
}

/// Parses the ARP table as printed by `arp -a` on Linux, macOS or Windows.
///
/// Lines without an IPv4 address are skipped. Windows prints an
/// `Interface: <addr> --- 0x..` header per adapter, which names the local
/// address rather than a neighbour and is skipped as well.
pub fn parse_arp_table(output: &str) -> Vec<ArpEntry> {
    output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("Interface:"))
        .filter_map(|(line_index, line)| {
            let ip = extract_first_ipv4(line)?;
            Some(ArpEntry {
                line_index,
                ip,
                mac: extract_mac(line),
            })
        })
        .collect()
}

/// Extracts the gateway address from the output of a gateway command.
///
/// With `line_filter` set, only lines containing that text are considered,
/// the way `ipconfig | findstr "Default Gateway"` narrows the output.
pub fn parse_gateway(output: &str, line_filter: Option<&str>) -> Option<Ipv4Addr> {
    match line_filter {
        Some(filter) => output
            .lines()
            .filter(|line| line.contains(filter))
            .find_map(extract_first_ipv4),
        None => extract_first_ipv4(output),
    }
}
