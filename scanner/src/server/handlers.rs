//! HTTP request handlers for the scanner service

use super::ScannerServer;
use crate::models::ConfigureResponse;
use actix_web::{web, HttpResponse};
use common::{Result, SettingsUpdate};
use log::{debug, info};
use serde_json::json;

pub async fn get_status(server: web::Data<ScannerServer>) -> Result<HttpResponse> {
    let status = server.service_status().await?;
    Ok(HttpResponse::Ok().json(status))
}

pub async fn get_devices(server: web::Data<ScannerServer>) -> Result<HttpResponse> {
    let devices = server.visible_devices().await?;
    debug!("Serving {} devices", devices.len());
    Ok(HttpResponse::Ok().json(devices))
}

/// Returns one device by IP, or 404 `{"error": "Device not found"}`.
pub async fn get_device(
    server: web::Data<ScannerServer>,
    ip: web::Path<String>,
) -> Result<HttpResponse> {
    let device = server.find_device(&ip).await?;
    Ok(HttpResponse::Ok().json(device))
}

pub async fn get_scanner_status(server: web::Data<ScannerServer>) -> Result<HttpResponse> {
    let status = server.scanner_status().await?;
    Ok(HttpResponse::Ok().json(status))
}

pub async fn configure_scanner(
    server: web::Data<ScannerServer>,
    update: web::Json<SettingsUpdate>,
) -> Result<HttpResponse> {
    let settings = server.update_settings(update.into_inner())?;
    Ok(HttpResponse::Ok().json(ConfigureResponse {
        success: true,
        settings,
    }))
}

/// Acknowledges a scan request. Every `/devices` call already scans.
pub async fn trigger_scan() -> HttpResponse {
    info!("Network scan triggered");
    HttpResponse::Ok().json(json!({ "status": "Scan initiated" }))
}
