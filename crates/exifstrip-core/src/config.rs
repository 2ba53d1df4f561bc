//! Configuration module
//!
//! Configuration is resolved once at process start. The destination bucket is the
//! only required setting; its absence is a startup failure, never a per-object one.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::{DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_PORT};
use crate::storage_types::StorageBackend;

/// Output format of the tracing fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    destination_bucket: String,
    storage_backend: StorageBackend,
    s3_region: Option<String>,
    aws_region: Option<String>,
    s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    local_storage_path: Option<String>,
    server_port: u16,
    environment: String,
    log_format: LogFormat,
    max_file_size_bytes: usize,
}

/// Parse a positive size in megabytes into bytes.
fn parse_size_mb(value: &str) -> Result<usize, anyhow::Error> {
    let mb = value
        .parse::<usize>()
        .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE_MB must be a positive number, got '{}'", value))?;
    if mb == 0 {
        return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
    }
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large: {}", value))
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a map-backed closure so they never
    /// touch the real process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let destination_bucket = non_empty("DEST_BUCKET")
            .ok_or_else(|| anyhow::anyhow!("DEST_BUCKET must be set to the destination bucket"))?;

        let storage_backend = match non_empty("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let server_port = match non_empty("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let environment = non_empty("ENVIRONMENT")
            .or_else(|| non_empty("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let log_format = match non_empty("LOG_FORMAT") {
            Some(value) => value.parse::<LogFormat>()?,
            None => LogFormat::Text,
        };

        let max_file_size_bytes = match non_empty("MAX_FILE_SIZE_MB") {
            Some(value) => parse_size_mb(&value)?,
            None => DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
        };

        let config = Config {
            destination_bucket,
            storage_backend,
            s3_region: non_empty("S3_REGION"),
            aws_region: non_empty("AWS_REGION"),
            s3_endpoint: non_empty("S3_ENDPOINT"),
            local_storage_path: non_empty("LOCAL_STORAGE_PATH"),
            server_port,
            environment,
            log_format,
            max_file_size_bytes,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.destination_bucket.contains('/') {
            return Err(anyhow::anyhow!(
                "DEST_BUCKET must be a bucket name, not a path: {}",
                self.destination_bucket
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn destination_bucket(&self) -> &str {
        &self.destination_bucket
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.aws_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_bytes
    }
}
