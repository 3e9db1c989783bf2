use actix_web::{HttpResponse, ResponseError};
use ipnetwork::IpNetworkError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScannerError>;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Command failed: {0}")]
    CommandFailed(String),
    #[error("Network interface error: {0}")]
    InterfaceError(String),
    #[error("Device not found")]
    DeviceNotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for ScannerError {
    fn from(err: std::io::Error) -> Self {
        ScannerError::CommandFailed(err.to_string())
    }
}

impl From<IpNetworkError> for ScannerError {
    fn from(err: IpNetworkError) -> Self {
        ScannerError::ValidationError(err.to_string())
    }
}

impl From<local_ip_address::Error> for ScannerError {
    fn from(err: local_ip_address::Error) -> Self {
        ScannerError::InterfaceError(err.to_string())
    }
}

impl ResponseError for ScannerError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({ "error": self.to_string() });
        match self {
            Self::DeviceNotFound(_) => HttpResponse::NotFound().json(body),
            Self::ValidationError(_) => HttpResponse::BadRequest().json(body),
            Self::CommandFailed(_) |
            Self::InterfaceError(_) |
            Self::InternalError(_) => {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}
