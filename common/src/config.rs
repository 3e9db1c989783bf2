use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::result::Result as StdResult;
use crate::error::ScannerError;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn load() -> StdResult<Self, ScannerError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>()
                .map_err(|e| ScannerError::ValidationError(format!("PORT={}: {}", raw, e)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            port,
        })
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScanDepth {
    Quick,
    Thorough,
}

/// Runtime scanner settings, changed through `POST /configure`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScannerSettings {
    /// Milliseconds between front-end refreshes.
    pub scan_interval: u64,
    pub scan_depth: ScanDepth,
    /// IPv4 CIDR blocks (or single addresses) hidden from device listings.
    pub excluded_ip_ranges: Vec<String>,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            scan_interval: 60_000,
            scan_depth: ScanDepth::Quick,
            excluded_ip_ranges: Vec::new(),
        }
    }
}

/// Partial settings; fields left out keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub scan_interval: Option<u64>,
    pub scan_depth: Option<ScanDepth>,
    pub excluded_ip_ranges: Option<Vec<String>>,
}

impl ScannerSettings {
    /// Applies `update` on top of the current values. Nothing changes if any
    /// excluded range fails to parse.
    pub fn merge(&mut self, update: SettingsUpdate) -> StdResult<(), ScannerError> {
        if let Some(ranges) = &update.excluded_ip_ranges {
            parse_ranges(ranges)?;
        }

        if let Some(interval) = update.scan_interval {
            self.scan_interval = interval;
        }
        if let Some(depth) = update.scan_depth {
            self.scan_depth = depth;
        }
        if let Some(ranges) = update.excluded_ip_ranges {
            self.excluded_ip_ranges = ranges;
        }
        Ok(())
    }

    pub fn excluded_networks(&self) -> Vec<Ipv4Network> {
        // Ranges are validated on merge; anything unparsable here is ignored.
        self.excluded_ip_ranges
            .iter()
            .filter_map(|range| range.trim().parse().ok())
            .collect()
    }

    pub fn is_excluded(&self, ip: Ipv4Addr) -> bool {
        self.excluded_networks().iter().any(|net| net.contains(ip))
    }
}

fn parse_ranges(ranges: &[String]) -> StdResult<Vec<Ipv4Network>, ScannerError> {
    ranges
        .iter()
        .map(|range| {
            range.trim().parse::<Ipv4Network>().map_err(|e| {
                ScannerError::ValidationError(format!("invalid excluded range '{}': {}", range, e))
            })
        })
        .collect()
}
