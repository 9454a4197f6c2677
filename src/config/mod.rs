use std::env;
use std::net::{IpAddr, SocketAddr};

/// Deployment stage, parsed from `REVIEW_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeStage {
    Development,
    Staging,
    Production,
}

impl RuntimeStage {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "stage" | "staging" => Self::Staging,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the review service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: RuntimeStage,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    /// Read the `REVIEW_*` variables, falling back to local-development
    /// defaults. A `.env` file in the working directory is honored.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = env_or("REVIEW_PORT", "8600")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Self {
            environment: RuntimeStage::parse(&env_or("REVIEW_ENV", "development")),
            server: ServerConfig {
                host: env_or("REVIEW_HOST", "127.0.0.1"),
                port,
            },
            telemetry: TelemetryConfig {
                log_level: env_or("REVIEW_LOG_LEVEL", "info"),
            },
        })
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host` must be a literal IP address; "localhost" is accepted as a
    /// convenience and resolved to the v4 loopback.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filtering controls handed to the telemetry bootstrap.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("REVIEW_PORT must be a u16 port number")]
    InvalidPort,
    #[error("REVIEW_HOST must be an IP address or 'localhost'")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
}
