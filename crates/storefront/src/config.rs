//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (used in the sitemap)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SANITY_PROJECT_ID` - Sanity project; when unset the built-in catalog is served
//! - `SANITY_DATASET` - Dataset name (default: production)
//! - `SANITY_API_VERSION` - Query API version (default: 2024-01-01)
//! - `SANITY_READ_TOKEN` - Read token for the live API
//! - `SANITY_REVALIDATE_SECS` - Cache lifetime for CDN reads (default: 60)
//! - `SANITY_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `SHOP_CURRENCY` - ISO currency code for prices (default: USD)
//! - `CATALOG_CATEGORIES` - Listing pills as `value:Label` pairs, comma separated
//! - `SHOP_PHONE`, `SHOP_WHATSAPP`, `SHOP_INSTAGRAM_URL`, `SHOP_EMAIL` - Contact channels
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use la_fleur_core::{CategoryOption, CurrencyCode};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Listing pills used when `CATALOG_CATEGORIES` is unset.
pub const DEFAULT_CATEGORIES: &str =
    "baskets:Baskets,bouquets:Bouquets,flowers-in-a-box:Flowers in a Box";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Content store; `None` serves the built-in catalog
    pub sanity: Option<SanityConfig>,
    /// Shop presentation settings
    pub shop: ShopConfig,
    /// Error tracking
    pub sentry: SentryConfig,
}

/// Sanity content store configuration.
///
/// Implements `Debug` manually to redact the read token.
#[derive(Clone)]
pub struct SanityConfig {
    /// Project id (e.g., zp7mbokg)
    pub project_id: String,
    /// Dataset name
    pub dataset: String,
    /// Query API version date (e.g., 2024-01-01)
    pub api_version: String,
    /// Read token for the live API (server-side only)
    pub read_token: Option<SecretString>,
    /// How long CDN reads are served from the in-process cache
    pub revalidate: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("read_token", &self.read_token.as_ref().map(|_| "[REDACTED]"))
            .field("revalidate", &self.revalidate)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// How the shop presents prices and categories, and how customers reach it.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Currency used to format prices
    pub currency: CurrencyCode,
    /// Category pills on the listing and home pages
    pub categories: Vec<CategoryOption>,
    /// Phone number for `tel:` links
    pub phone: Option<String>,
    /// WhatsApp number (digits, international format)
    pub whatsapp: Option<String>,
    /// Instagram profile URL
    pub instagram_url: Option<String>,
    /// Contact email address
    pub email: Option<String>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::USD,
            categories: parse_categories(DEFAULT_CATEGORIES).unwrap_or_default(),
            phone: None,
            whatsapp: None,
            instagram_url: None,
            email: None,
        }
    }
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// DSN; tracking is disabled when unset
    pub dsn: Option<String>,
    /// Environment tag (e.g., production)
    pub environment: Option<String>,
    /// Error event sample rate
    pub sample_rate: f32,
    /// Performance trace sample rate
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.1,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the read token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            host,
            port,
            base_url,
            sanity: SanityConfig::from_env()?,
            shop: ShopConfig::from_env()?,
            sentry: SentryConfig::from_env()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SanityConfig {
    /// `None` when `SANITY_PROJECT_ID` is unset or blank.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(project_id) = get_optional_env("SANITY_PROJECT_ID") else {
            return Ok(None);
        };

        let read_token = match get_optional_env("SANITY_READ_TOKEN") {
            Some(token) => {
                validate_secret_strength(&token, "SANITY_READ_TOKEN")?;
                Some(SecretString::from(token))
            }
            None => None,
        };

        Ok(Some(Self {
            project_id,
            dataset: get_env_or_default("SANITY_DATASET", "production"),
            api_version: get_env_or_default("SANITY_API_VERSION", "2024-01-01"),
            read_token,
            revalidate: Duration::from_secs(parse_env("SANITY_REVALIDATE_SECS", "60")?),
            timeout: Duration::from_secs(parse_env("SANITY_TIMEOUT_SECS", "10")?),
        }))
    }
}

impl ShopConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let categories = get_env_or_default("CATALOG_CATEGORIES", DEFAULT_CATEGORIES);
        let categories = parse_categories(&categories)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_CATEGORIES".to_string(), e))?;

        Ok(Self {
            currency: parse_env("SHOP_CURRENCY", "USD")?,
            categories,
            phone: get_optional_env("SHOP_PHONE"),
            whatsapp: get_optional_env("SHOP_WHATSAPP")
                .map(|n| n.chars().filter(char::is_ascii_digit).collect()),
            instagram_url: get_optional_env("SHOP_INSTAGRAM_URL"),
            email: get_optional_env("SHOP_EMAIL"),
        })
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse `value:Label` pairs separated by commas.
///
/// A pair without a label uses the value's title-cased form.
///
/// # Errors
///
/// Returns a message naming the first malformed pair.
pub fn parse_categories(raw: &str) -> Result<Vec<CategoryOption>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (value, label) = pair.split_once(':').unwrap_or((pair, ""));
            let value = value.trim();
            let label = label.trim();
            if value.is_empty() {
                return Err(format!("empty category value in '{pair}'"));
            }
            let label = if label.is_empty() {
                la_fleur_core::Category::new(value).label()
            } else {
                label.to_string()
            };
            Ok(CategoryOption::new(value, label))
        })
        .collect()
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real tokens are random; low entropy means someone typed it
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the token from the Sanity dashboard."
            ),
        ));
    }

    Ok(())
}
