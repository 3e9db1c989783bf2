use common::{Result, ScannerError};
use log::debug;
use std::net::IpAddr;
use std::process::Command;

use super::parser::normalize_mac;

/// Read-only access to the host's network state.
pub trait HostProbe: Send + Sync {
    /// Interfaces as `(name, address)` pairs, in OS order.
    fn interfaces(&self) -> Result<Vec<(String, IpAddr)>>;

    /// Normalized MAC of the named interface, if the OS reports one.
    fn interface_mac(&self, name: &str) -> Option<String>;

    /// Runs `program` to completion and returns its stdout. A spawn failure
    /// or non-zero exit is an error.
    fn run_command(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// `HostProbe` backed by the running system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl HostProbe for SystemProbe {
    fn interfaces(&self) -> Result<Vec<(String, IpAddr)>> {
        Ok(local_ip_address::list_afinet_netifas()?)
    }

    fn interface_mac(&self, name: &str) -> Option<String> {
        match mac_address::mac_address_by_name(name) {
            Ok(Some(addr)) => normalize_mac(&addr.to_string()),
            Ok(None) => None,
            Err(e) => {
                debug!("Could not read MAC of {}: {}", name, e);
                None
            }
        }
    }

    fn run_command(&self, program: &str, args: &[&str]) -> Result<String> {
        let command_line = format_command(program, args);
        debug!("Running {}", command_line);

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| ScannerError::CommandFailed(format!("{}: {}", command_line, e)))?;

        if !output.status.success() {
            return Err(ScannerError::CommandFailed(format!(
                "{} exited with {}: {}",
                command_line,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub fn format_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
