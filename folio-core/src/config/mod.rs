//! Configuration management for Folio Core

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Path unauthenticated visitors are redirected to
    pub sign_in_path: String,
    /// Database configuration
    pub database: DatabaseConfig,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Media host configuration
    pub media: MediaConfig,
    /// Administrator enrollment configuration
    pub admin_enrollment: AdminEnrollmentConfig,
    /// Logging and metrics configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub access_token_ttl_secs: i64,
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// API base URL (e.g., https://api.cloudinary.com)
    pub api_base_url: String,
    /// Cloud name; uploads fail when unset
    pub cloud_name: Option<String>,
    /// Preferred unsigned upload preset
    pub upload_preset: Option<String>,
    /// Presets tried in order after the preferred one is rejected
    pub fallback_presets: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.cloudinary.com".to_string(),
            cloud_name: None,
            upload_preset: None,
            fallback_presets: vec!["eportfolio_signed".to_string(), "ml_default".to_string()],
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminEnrollmentConfig {
    /// Emails allowed to self-register as administrators
    pub allowed_emails: Vec<String>,
    /// Shared secret required at administrator registration; enrollment is
    /// closed when unset
    pub enrollment_secret: Option<String>,
}

impl AdminEnrollmentConfig {
    pub fn is_allowed_email(&self, email: &str) -> bool {
        self.allowed_emails
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(email.trim()))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" or "pretty"
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: false,
        }
    }
}

/// Split a comma-separated env value, dropping empty entries
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            sign_in_path: env::var("SIGN_IN_PATH").unwrap_or_else(|_| "/login".to_string()),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").context("JWT_SECRET is required")?,
                issuer: env::var("JWT_ISSUER")
                    .unwrap_or_else(|_| "https://folio.local".to_string()),
                access_token_ttl_secs: env::var("JWT_ACCESS_TOKEN_TTL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()
                    .unwrap_or(3600),
            },
            media: {
                let defaults = MediaConfig::default();
                MediaConfig {
                    api_base_url: env::var("MEDIA_API_BASE_URL")
                        .unwrap_or(defaults.api_base_url),
                    cloud_name: env::var("MEDIA_CLOUD_NAME").ok().filter(|s| !s.is_empty()),
                    upload_preset: env::var("MEDIA_UPLOAD_PRESET")
                        .ok()
                        .filter(|s| !s.is_empty()),
                    fallback_presets: env::var("MEDIA_FALLBACK_PRESETS")
                        .map(|s| parse_list(&s))
                        .unwrap_or(defaults.fallback_presets),
                    timeout_secs: env::var("MEDIA_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(defaults.timeout_secs),
                }
            },
            admin_enrollment: AdminEnrollmentConfig {
                allowed_emails: env::var("ADMIN_ALLOWED_EMAILS")
                    .map(|s| parse_list(&s))
                    .unwrap_or_default(),
                enrollment_secret: env::var("ADMIN_ENROLLMENT_SECRET")
                    .ok()
                    .filter(|s| !s.is_empty()),
            },
            telemetry: TelemetryConfig {
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|s| s.to_lowercase() == "true")
                    .unwrap_or(false),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
