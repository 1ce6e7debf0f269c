//! Configuration module
//!
//! Settings are read from the process environment (and a `.env` file when
//! present). Unparsable values fall back to their defaults; `SERVER_PORT` is
//! the one value that must parse when set.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const SERVER_PORT: u16 = 8000;
const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;
const KEEP_UPLOADED_FILES_HOURS: f64 = 1.0;
const CLEANUP_INTERVAL_SECS: u64 = 3600;
const CONVERSION_TIMEOUT_SECS: u64 = 300;
const MAX_CONCURRENT_CONVERSIONS: usize = 4;
const ENGINE_INIT_ATTEMPTS: u32 = 5;
const ENGINE_INIT_BACKOFF_MS: u64 = 1000;

/// Server and process-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_format: String,
}

/// Upload intake and janitor settings
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_file_size: usize,
    /// Lower-cased, always with a leading dot (".pdf")
    pub allowed_extensions: Vec<String>,
    pub upload_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub cleanup_after_processing: bool,
    pub keep_uploaded_files_hours: f64,
    /// 0 = periodic sweep disabled
    pub cleanup_interval_secs: u64,
}

/// Conversion engine settings
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub docling_serve_url: String,
    pub conversion_timeout_secs: u64,
    pub do_ocr: bool,
    pub do_table_structure: bool,
    pub max_concurrent_conversions: usize,
    pub init_attempts: u32,
    pub init_backoff_ms: u64,
}

#[derive(Clone)]
pub struct Config {
    pub base: BaseConfig,
    pub uploads: UploadConfig,
    pub engine: EngineConfig,
    pub api_key: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base", &self.base)
            .field("uploads", &self.uploads)
            .field("engine", &self.engine)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes the process environment.
    pub fn from_source<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = match var("SERVER_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let base = BaseConfig {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "INFO".to_string()),
            log_format: var("LOG_FORMAT")
                .unwrap_or_else(|| "pretty".to_string())
                .to_lowercase(),
        };

        let uploads = UploadConfig {
            max_file_size: var("MAX_FILE_SIZE")
                .unwrap_or_else(|| MAX_FILE_SIZE.to_string())
                .parse()
                .unwrap_or(MAX_FILE_SIZE),
            allowed_extensions: parse_extensions(
                &var("ALLOWED_EXTENSIONS").unwrap_or_else(|| ".pdf".to_string()),
            ),
            upload_dir: PathBuf::from(
                var("UPLOAD_DIR").unwrap_or_else(|| "/app/uploads".to_string()),
            ),
            temp_dir: PathBuf::from(var("TEMP_DIR").unwrap_or_else(|| "/app/temp".to_string())),
            cleanup_after_processing: var("CLEANUP_AFTER_PROCESSING")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            keep_uploaded_files_hours: var("KEEP_UPLOADED_FILES_HOURS")
                .unwrap_or_else(|| KEEP_UPLOADED_FILES_HOURS.to_string())
                .parse::<f64>()
                .ok()
                .filter(|hours| hours.is_finite() && *hours >= 0.0)
                .unwrap_or(KEEP_UPLOADED_FILES_HOURS),
            cleanup_interval_secs: var("CLEANUP_INTERVAL_SECS")
                .unwrap_or_else(|| CLEANUP_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(CLEANUP_INTERVAL_SECS),
        };

        let engine = EngineConfig {
            docling_serve_url: var("DOCLING_SERVE_URL")
                .unwrap_or_else(|| "http://localhost:5001".to_string())
                .trim_end_matches('/')
                .to_string(),
            conversion_timeout_secs: var("CONVERSION_TIMEOUT_SECS")
                .unwrap_or_else(|| CONVERSION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONVERSION_TIMEOUT_SECS),
            do_ocr: var("DO_OCR")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            do_table_structure: var("DO_TABLE_STRUCTURE")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            max_concurrent_conversions: var("MAX_CONCURRENT_CONVERSIONS")
                .unwrap_or_else(|| MAX_CONCURRENT_CONVERSIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONCURRENT_CONVERSIONS),
            init_attempts: var("ENGINE_INIT_ATTEMPTS")
                .unwrap_or_else(|| ENGINE_INIT_ATTEMPTS.to_string())
                .parse()
                .unwrap_or(ENGINE_INIT_ATTEMPTS),
            init_backoff_ms: var("ENGINE_INIT_BACKOFF_MS")
                .unwrap_or_else(|| ENGINE_INIT_BACKOFF_MS.to_string())
                .parse()
                .unwrap_or(ENGINE_INIT_BACKOFF_MS),
        };

        Ok(Config {
            base,
            uploads,
            engine,
            api_key: var("API_KEY").filter(|key| !key.is_empty()),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.uploads.max_file_size == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE must be greater than zero"));
        }

        if self.uploads.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        let url = &self.engine.docling_serve_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "DOCLING_SERVE_URL must be an http:// or https:// URL"
            ));
        }

        if Duration::try_from_secs_f64(self.uploads.keep_uploaded_files_hours * 3600.0).is_err() {
            return Err(anyhow::anyhow!(
                "KEEP_UPLOADED_FILES_HOURS must be a non-negative number of hours that fits a duration"
            ));
        }

        if self.engine.max_concurrent_conversions == 0 {
            return Err(anyhow::anyhow!(
                "MAX_CONCURRENT_CONVERSIONS must be greater than zero"
            ));
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_host(&self) -> &str {
        &self.base.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn max_file_size(&self) -> usize {
        self.uploads.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.uploads.allowed_extensions
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.uploads.upload_dir
    }

    pub fn temp_dir(&self) -> &PathBuf {
        &self.uploads.temp_dir
    }

    /// Directories the janitor sweeps.
    pub fn scan_dirs(&self) -> Vec<PathBuf> {
        vec![self.uploads.upload_dir.clone(), self.uploads.temp_dir.clone()]
    }

    /// Sweep retention window. Saturates at `Duration::MAX` for windows too
    /// large to represent; `validate` rejects those.
    pub fn retention(&self) -> Duration {
        Duration::try_from_secs_f64(self.uploads.keep_uploaded_files_hours * 3600.0)
            .unwrap_or(Duration::MAX)
    }

    pub fn cleanup_interval(&self) -> Option<Duration> {
        match self.uploads.cleanup_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn conversion_timeout(&self) -> Duration {
        Duration::from_secs(self.engine.conversion_timeout_secs)
    }
}

fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && s != ".")
        .map(|s| {
            if s.starts_with('.') {
                s
            } else {
                format!(".{}", s)
            }
        })
        .collect()
}
