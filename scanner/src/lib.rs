pub mod server;
pub mod discovery;
pub mod models;

pub use discovery::{DeviceDiscovery, HostProbe, Platform, SystemProbe};
pub use server::ScannerServer;
