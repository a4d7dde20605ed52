use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::auth::Principal;
use crate::listings::domain::PLACEHOLDER_IMAGE_URL;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub media: MediaConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let placeholder_image_url = env::var("APP_PLACEHOLDER_IMAGE_URL")
            .unwrap_or_else(|_| PLACEHOLDER_IMAGE_URL.to_string());
        let storage_public_base = env::var("APP_STORAGE_PUBLIC_BASE")
            .unwrap_or_else(|_| "https://storage.gramstay.local/room_images".to_string());

        let session = SessionConfig {
            user_id: env::var("APP_SESSION_USER_ID").ok().filter(|v| !v.is_empty()),
            user_email: env::var("APP_SESSION_USER_EMAIL").ok(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            media: MediaConfig {
                placeholder_image_url,
                storage_public_base,
            },
            session,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Image fallback and object storage addressing.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub placeholder_image_url: String,
    pub storage_public_base: String,
}

/// Optional principal restored at startup, standing in for an identity
/// provider's persisted session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

impl SessionConfig {
    pub fn principal(&self) -> Option<Principal> {
        let id = self.user_id.clone()?;
        let email = self
            .user_email
            .clone()
            .unwrap_or_else(|| format!("{id}@gramstay.local"));
        Some(Principal { id, email })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost { source: std::net::AddrParseError },
}
