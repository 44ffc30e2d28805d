//! Back-office configuration, loaded from environment variables at startup.

/// Runtime configuration.
///
/// Every field has a default so the back-office starts without any environment
/// variable set.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `tracing` filter used when `RUST_LOG` is unset (default: `"info"`).
    pub log_filter: String,

    /// Mailbox capacity of every table and of the bucket (default: `32`).
    pub channel_capacity: usize,

    /// Public base URL of the file storage (default: `"http://localhost:54321/storage/v1/object/public"`).
    pub storage_url: String,

    /// Bucket holding uploaded images (default: `"images"`).
    pub bucket: String,

    /// Currency suffix of prices (default: `"€"`).
    pub currency: String,

    /// `chrono` format of dates in lists (default: `"%d/%m/%Y"`).
    pub date_format: String,

    /// Decimal separator of prices (default: `','`).
    pub decimal_separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_owned(),
            channel_capacity: 32,
            storage_url: "http://localhost:54321/storage/v1/object/public".to_owned(),
            bucket: "images".to_owned(),
            currency: "€".to_owned(),
            date_format: "%d/%m/%Y".to_owned(),
            decimal_separator: ',',
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_filter: env_or("BACKOFFICE_LOG", &defaults.log_filter),
            channel_capacity: parse_env("BACKOFFICE_CHANNEL_CAPACITY", defaults.channel_capacity).max(1),
            storage_url: env_or("BACKOFFICE_STORAGE_URL", &defaults.storage_url)
                .trim_end_matches('/')
                .to_owned(),
            bucket: env_or("BACKOFFICE_BUCKET", &defaults.bucket),
            currency: env_or("BACKOFFICE_CURRENCY", &defaults.currency),
            date_format: env_or("BACKOFFICE_DATE_FORMAT", &defaults.date_format),
            decimal_separator: parse_env("BACKOFFICE_DECIMAL_SEPARATOR", defaults.decimal_separator),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
