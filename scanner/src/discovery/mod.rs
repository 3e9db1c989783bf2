//! Best-effort discovery of devices on the local subnet.
//!
//! A pass combines the first non-loopback IPv4 interface, the default
//! gateway and the OS ARP table into a list of `NetworkDevice`s. Discovery
//! never fails: if a step other than gateway detection goes wrong, the
//! caller gets a fixed two-entry fallback list.

pub mod classifier;
pub mod parser;
pub mod platform;
pub mod probe;

use common::{
    DeviceStatus, DeviceType, NetworkDevice, Result, ScannerError, LOCAL_ID, ROUTER_ID, UNKNOWN_MAC,
};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

pub use classifier::classify;
pub use parser::{normalize_mac, ArpEntry};
pub use platform::{GatewayCommand, Platform};
pub use probe::{HostProbe, SystemProbe};

/// Used when the gateway command fails or prints no address.
pub const DEFAULT_GATEWAY: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);

pub const FALLBACK_ROUTER_MAC: &str = "00:11:22:33:44:55";
pub const FALLBACK_LOCAL_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 100);
pub const FALLBACK_LOCAL_MAC: &str = "11:22:33:44:55:66";

pub const PYTHON_MODULES: [&str; 4] = ["scapy", "nmap", "netifaces", "psutil"];

/// Interface selected as "this computer".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInterface {
    pub name: String,
    pub address: Ipv4Addr,
}

pub struct DeviceDiscovery {
    /// OS strategy, fixed at construction
    platform: Platform,
    /// Access to interfaces and subprocesses
    probe: Arc<dyn HostProbe>,
}

impl DeviceDiscovery {
    pub fn new(platform: Platform, probe: Arc<dyn HostProbe>) -> Self {
        Self { platform, probe }
    }

    /// Discovery against the running host.
    pub fn system() -> Self {
        Self::new(Platform::detect(), Arc::new(SystemProbe))
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Lists the devices currently visible on the local network.
    ///
    /// Blocks while `arp` and the gateway command run. Errors are logged and
    /// replaced by [`fallback_devices`].
    pub fn list_devices(&self) -> Vec<NetworkDevice> {
        match self.discover() {
            Ok(devices) => {
                info!("Discovered {} devices", devices.len());
                devices
            }
            Err(e) => {
                warn!("Network discovery failed, serving fallback devices: {}", e);
                fallback_devices()
            }
        }
    }

    /// Runs a full discovery pass and returns the device with `ip`, if any.
    /// Excluded ranges are applied by the server on top of this.
    pub fn find_device(&self, ip: Ipv4Addr) -> Option<NetworkDevice> {
        self.list_devices().into_iter().find(|device| device.ip == ip)
    }

    fn discover(&self) -> Result<Vec<NetworkDevice>> {
        let local = self.local_interface()?;
        let gateway = self.default_gateway();

        let arp_output = self.probe.run_command("arp", &["-a"])?;
        let entries = parser::parse_arp_table(&arp_output);
        debug!("Parsed {} ARP entries", entries.len());

        let local_mac = self.probe
            .interface_mac(&local.name)
            .unwrap_or_else(|| UNKNOWN_MAC.to_string());
        let router_mac = entries
            .iter()
            .find(|entry| entry.ip == gateway)
            .and_then(|entry| entry.mac.clone())
            .unwrap_or_else(|| UNKNOWN_MAC.to_string());

        let mut devices = vec![local_device(local.address, local_mac)];
        let mut seen: HashSet<Ipv4Addr> = HashSet::from([local.address]);

        if seen.insert(gateway) {
            devices.push(router_device(gateway, router_mac));
        }

        for entry in entries {
            if entry.ip == gateway || !seen.insert(entry.ip) {
                continue;
            }
            devices.push(arp_device(entry));
        }

        Ok(devices)
    }

    /// First non-loopback IPv4 interface.
    pub fn local_interface(&self) -> Result<LocalInterface> {
        self.probe
            .interfaces()?
            .into_iter()
            .find_map(|(name, addr)| match addr {
                IpAddr::V4(address) if !address.is_loopback() => {
                    Some(LocalInterface { name, address })
                }
                _ => None,
            })
            .ok_or_else(|| {
                ScannerError::InterfaceError("no non-loopback IPv4 interface".to_string())
            })
    }

    /// Default gateway of the host, or [`DEFAULT_GATEWAY`] when it cannot
    /// be determined.
    pub fn default_gateway(&self) -> Ipv4Addr {
        let command = self.platform.gateway_command();
        match self.probe.run_command(command.program, command.args) {
            Ok(output) => parser::parse_gateway(&output, command.line_filter).unwrap_or_else(|| {
                debug!("No gateway address in {} output, using default", command.program);
                DEFAULT_GATEWAY
            }),
            Err(e) => {
                warn!("Gateway lookup failed, using {}: {}", DEFAULT_GATEWAY, e);
                DEFAULT_GATEWAY
            }
        }
    }

    pub fn python_available(&self) -> bool {
        self.probe
            .run_command(self.platform.python_command(), &["--version"])
            .is_ok()
    }

    pub fn python_module_available(&self, module: &str) -> bool {
        let statement = format!("import {}", module);
        self.probe
            .run_command(self.platform.python_command(), &["-c", &statement])
            .is_ok()
    }
}

/// The fixed list served when discovery fails.
pub fn fallback_devices() -> Vec<NetworkDevice> {
    vec![
        router_device(DEFAULT_GATEWAY, FALLBACK_ROUTER_MAC.to_string()),
        local_device(FALLBACK_LOCAL_IP, FALLBACK_LOCAL_MAC.to_string()),
    ]
}

fn local_device(ip: Ipv4Addr, mac: String) -> NetworkDevice {
    NetworkDevice {
        id: LOCAL_ID.to_string(),
        ip,
        mac,
        name: "This Computer".to_string(),
        device_type: DeviceType::Computer,
        status: DeviceStatus::Online,
    }
}

fn router_device(ip: Ipv4Addr, mac: String) -> NetworkDevice {
    NetworkDevice {
        id: ROUTER_ID.to_string(),
        ip,
        mac,
        name: "Router".to_string(),
        device_type: DeviceType::Router,
        status: DeviceStatus::Online,
    }
}

fn arp_device(entry: ArpEntry) -> NetworkDevice {
    let device_type = classify(entry.ip, entry.mac.as_deref());
    NetworkDevice {
        id: format!("dev-{}", entry.line_index),
        ip: entry.ip,
        mac: entry.mac.unwrap_or_else(|| UNKNOWN_MAC.to_string()),
        name: format!("Device {}", entry.line_index + 1),
        device_type,
        status: DeviceStatus::Online,
    }
}
