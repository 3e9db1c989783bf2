use common::ScannerSettings;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Body of `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// Always "running" while the server answers
    pub status: String,
    /// Crate version of the service
    pub version: String,
    /// Whether a python interpreter answered `--version`
    pub python_available: bool,
    /// Platform identifier (`linux`, `darwin`, `win32`)
    pub platform: String,
}

/// Importability of the optional python scanning modules
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleAvailability {
    pub scapy: bool,
    pub nmap: bool,
    pub netifaces: bool,
    pub psutil: bool,
}

impl ModuleAvailability {
    pub fn set(&mut self, module: &str, available: bool) {
        match module {
            "scapy" => self.scapy = available,
            "nmap" => self.nmap = available,
            "netifaces" => self.netifaces = available,
            "psutil" => self.psutil = available,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceInfo {
    /// OS interface name, e.g. `eth0`
    pub name: String,
    pub address: Ipv4Addr,
}

/// Body of `GET /scanner-status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerStatus {
    pub python_available: bool,
    pub modules: ModuleAvailability,
    /// Platform identifier, same value as `ServiceStatus::platform`
    pub os: String,
    /// Detected gateway, or the built-in default
    pub default_gateway: Ipv4Addr,
    /// The gateway's /24 in CIDR notation
    pub network_range: String,
    /// Selected local interface, absent when none qualifies
    pub interface: Option<InterfaceInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigureResponse {
    pub success: bool,
    /// Settings after the update was applied
    pub settings: ScannerSettings,
}
