//! Main entry point for the local network scanner service

use actix_web::main as actix_main;
use chrono::Local;
use clap::Parser;
use common::{Config, Result};
use env_logger::fmt::Color;
use env_logger::Builder;
use log::{info, LevelFilter};
use scanner_service::{DeviceDiscovery, ScannerServer};
use std::io::Write;

const BANNER: &str = r#"
╔═══════════════════════════════════════════════════════════════════╗
║                                                                   ║
║   Local Network Scanner v1.0.0                                    ║
║   ARP-table device discovery for the network dashboard            ║
║                                                                   ║
╚═══════════════════════════════════════════════════════════════════╝
"#;

#[derive(Parser)]
#[command(name = "network-scanner", version, about = "Local network device discovery service")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides BIND_ADDRESS)
    #[arg(long)]
    bind: Option<String>,
}

fn setup_logger() {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            let mut timestamp_style = buf.style();
            let mut level_style = buf.style();
            let mut target_style = buf.style();
            let mut message_style = buf.style();

            let level_color = match record.level() {
                log::Level::Error => Color::Red,
                log::Level::Warn => Color::Yellow,
                log::Level::Info => Color::Green,
                log::Level::Debug => Color::Cyan,
                log::Level::Trace => Color::White,
            };

            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            writeln!(
                buf,
                "{} {} [{}] {}",
                timestamp_style.set_color(Color::Rgb(100, 100, 100)).value(timestamp),
                level_style.set_color(level_color).value(record.level()),
                target_style.set_color(Color::Blue).value(record.target()),
                message_style.set_color(Color::White).value(record.args())
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
}

#[actix_main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger();

    println!("{}", BANNER);

    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    info!("Configuration loaded: {}", config.socket_address());

    let discovery = DeviceDiscovery::system();
    info!("Platform detected: {}", discovery.platform().identifier());

    info!("View devices: http://localhost:{}/devices", config.port);
    info!("Check status: http://localhost:{}/status", config.port);

    ScannerServer::new(config, discovery).start().await
}
