//! HTTP server exposing local network discovery to the dashboard.
//!
//! Holds the discovery engine and the runtime scanner settings, and runs
//! blocking discovery work off the actix workers.

use crate::discovery::{DeviceDiscovery, PYTHON_MODULES};
use crate::models::{InterfaceInfo, ModuleAvailability, ScannerStatus, ServiceStatus};
use actix_web::{web, App, HttpServer};
use common::{Config, NetworkDevice, Result, ScannerError, ScannerSettings, SettingsUpdate};
use ipnetwork::Ipv4Network;
use log::{debug, info};
use parking_lot::RwLock;
use std::net::Ipv4Addr;
use std::sync::Arc;

pub mod handlers;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local scanner service exposing discovery results over HTTP
pub struct ScannerServer {
    /// Discovery engine, shared with blocking tasks
    discovery: Arc<DeviceDiscovery>,
    /// Live settings, replaced by `/configure`
    settings: Arc<RwLock<ScannerSettings>>,
    /// Listen address
    config: Config,
}

impl ScannerServer {
    pub fn new(config: Config, discovery: DeviceDiscovery) -> Self {
        Self {
            discovery: Arc::new(discovery),
            settings: Arc::new(RwLock::new(ScannerSettings::default())),
            config,
        }
    }

    pub fn settings(&self) -> ScannerSettings {
        self.settings.read().clone()
    }

    /// Merges `update` into the live settings and returns the result.
    pub fn update_settings(&self, update: SettingsUpdate) -> Result<ScannerSettings> {
        let mut settings = self.settings.write();
        settings.merge(update)?;
        info!("Scanner settings updated: {:?}", *settings);
        Ok(settings.clone())
    }

    /// Devices from a fresh discovery pass, minus excluded ranges.
    pub async fn visible_devices(&self) -> Result<Vec<NetworkDevice>> {
        let discovery = Arc::clone(&self.discovery);
        let mut devices = run_blocking(move || discovery.list_devices()).await?;

        let settings = self.settings();
        if !settings.excluded_ip_ranges.is_empty() {
            let before = devices.len();
            devices.retain(|device| device.is_role_entry() || !settings.is_excluded(device.ip));
            debug!("Excluded ranges hid {} devices", before - devices.len());
        }
        Ok(devices)
    }

    /// Looks `ip` up in a fresh discovery pass. Anything that is not a
    /// visible device, including text that is not an address, is not found.
    pub async fn find_device(&self, ip: &str) -> Result<NetworkDevice> {
        let not_found = || ScannerError::DeviceNotFound(ip.to_string());
        let addr: Ipv4Addr = ip.parse().map_err(|_| not_found())?;

        let discovery = Arc::clone(&self.discovery);
        let device = run_blocking(move || discovery.find_device(addr)).await?;

        let settings = self.settings();
        device
            .filter(|device| device.is_role_entry() || !settings.is_excluded(device.ip))
            .ok_or_else(not_found)
    }

    pub async fn service_status(&self) -> Result<ServiceStatus> {
        let discovery = Arc::clone(&self.discovery);
        let python_available = run_blocking(move || discovery.python_available()).await?;

        Ok(ServiceStatus {
            status: "running".to_string(),
            version: VERSION.to_string(),
            python_available,
            platform: self.discovery.platform().identifier().to_string(),
        })
    }

    pub async fn scanner_status(&self) -> Result<ScannerStatus> {
        let discovery = Arc::clone(&self.discovery);
        run_blocking(move || -> Result<ScannerStatus> {
            let python_available = discovery.python_available();
            let mut modules = ModuleAvailability::default();
            if python_available {
                for module in PYTHON_MODULES {
                    modules.set(module, discovery.python_module_available(module));
                }
            }

            let default_gateway = discovery.default_gateway();
            let network = Ipv4Network::new(default_gateway, 24)?;
            let interface = discovery
                .local_interface()
                .ok()
                .map(|local| InterfaceInfo { name: local.name, address: local.address });

            Ok(ScannerStatus {
                python_available,
                modules,
                os: discovery.platform().identifier().to_string(),
                default_gateway,
                network_range: format!("{}/{}", network.network(), network.prefix()),
                interface,
            })
        })
        .await?
    }

    pub async fn start(&self) -> Result<()> {
        let address = self.config.socket_address();
        let server = web::Data::new(self.clone());

        info!("Starting HTTP server on {}", address);
        HttpServer::new(move || {
            App::new()
                .app_data(server.clone())
                .configure(configure)
                .wrap(
                    actix_cors::Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                )
        })
        .bind(&address)?
        .run()
        .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

impl Clone for ScannerServer {
    fn clone(&self) -> Self {
        Self {
            discovery: Arc::clone(&self.discovery),
            settings: Arc::clone(&self.settings),
            config: self.config.clone(),
        }
    }
}

/// Registers the scanner routes. The app must carry `web::Data<ScannerServer>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ScannerError::ValidationError(err.to_string()).into()),
    )
    .service(web::resource("/status").route(web::get().to(handlers::get_status)))
    .service(web::resource("/devices").route(web::get().to(handlers::get_devices)))
    .service(web::resource("/device/{ip}").route(web::get().to(handlers::get_device)))
    .service(web::resource("/scanner-status").route(web::get().to(handlers::get_scanner_status)))
    .service(web::resource("/configure").route(web::post().to(handlers::configure_scanner)))
    .service(web::resource("/scan").route(web::post().to(handlers::trigger_scan)));
}

async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ScannerError::InternalError(e.to_string()))
}
