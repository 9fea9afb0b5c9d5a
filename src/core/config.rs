use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::shared::constants::DEFAULT_MAX_DRAFTS;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub catalog: CatalogConfig,
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Where the lookup tables come from.
/// `None` means the tables bundled with the binary.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// JSON file with the charge descriptions (and optionally durations)
    pub charges_path: Option<PathBuf>,
    /// JSON file with the public affairs office directory
    pub offices_path: Option<PathBuf>,
}

/// Limits and locale of the report drafts
#[derive(Debug, Clone)]
pub struct ReportsConfig {
    /// Open drafts kept in memory before the oldest is evicted
    pub max_drafts: usize,
    /// Zone the violation time is printed in
    pub mail_timezone: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
            reports: ReportsConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = parse_list(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "weg-li API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Parking violation reports for local authorities".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, String> {
        let charges_path = optional_path("CHARGES_PATH")?;
        let offices_path = optional_path("OFFICES_PATH")?;

        Ok(Self {
            charges_path,
            offices_path,
        })
    }
}

impl ReportsConfig {
    pub const DEFAULT_MAX_DRAFTS: usize = DEFAULT_MAX_DRAFTS;
    pub const DEFAULT_MAIL_TIMEZONE: Tz = chrono_tz::Europe::Berlin;

    pub fn from_env() -> Result<Self, String> {
        let max_drafts = match env::var("MAX_DRAFTS") {
            Ok(value) => parse_max_drafts(&value)?,
            Err(_) => Self::DEFAULT_MAX_DRAFTS,
        };

        let mail_timezone = match env::var("MAIL_TIMEZONE") {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse::<Tz>()
                .map_err(|_| format!("Invalid MAIL_TIMEZONE: {}", value))?,
            _ => Self::DEFAULT_MAIL_TIMEZONE,
        };

        Ok(Self {
            max_drafts,
            mail_timezone,
        })
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            max_drafts: Self::DEFAULT_MAX_DRAFTS,
            mail_timezone: Self::DEFAULT_MAIL_TIMEZONE,
        }
    }
}

fn parse_max_drafts(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err("MAX_DRAFTS must be a positive number".to_string()),
        Ok(n) => Ok(n),
    }
}

fn optional_path(key: &str) -> Result<Option<PathBuf>, String> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => {
            let path = PathBuf::from(value.trim());
            if path.is_file() {
                Ok(Some(path))
            } else {
                Err(format!("{} points to a missing file: {}", key, path.display()))
            }
        }
        Err(_) => Ok(None),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
