use chrono::Duration;
use coach_core::otp::{OtpPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_TTL_HOURS};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Whether the session cookie carries the `Secure` attribute (default: `true`).
    pub cookie_secure: bool,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// One-time passcode lifetime and retry ceiling.
    pub otp: OtpConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `COOKIE_SECURE`        | `true`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let cookie_secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            cookie_secure,
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env(),
        }
    }
}

/// Longest accepted `OTP_TTL_HOURS`: ten years.
pub const MAX_OTP_TTL_HOURS: i64 = 24 * 365 * 10;

/// OTP settings.
#[derive(Debug, Clone, Copy)]
pub struct OtpConfig {
    /// Code lifetime in hours (default: 720, i.e. 30 days).
    pub ttl_hours: i64,
    /// Generation attempts before giving up on a unique code (default: 10).
    pub max_attempts: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_hours: DEFAULT_TTL_HOURS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OtpConfig {
    /// Checked constructor. The lifetime must lie in `1..=MAX_OTP_TTL_HOURS`
    /// and at least one generation attempt is required.
    pub fn new(ttl_hours: i64, max_attempts: u32) -> Result<Self, String> {
        if !(1..=MAX_OTP_TTL_HOURS).contains(&ttl_hours) {
            return Err(format!(
                "OTP_TTL_HOURS must be between 1 and {MAX_OTP_TTL_HOURS}, got {ttl_hours}"
            ));
        }
        if max_attempts == 0 {
            return Err("OTP_MAX_ATTEMPTS must be positive".to_string());
        }
        Ok(Self {
            ttl_hours,
            max_attempts,
        })
    }

    /// | Env Var            | Default |
    /// |--------------------|---------|
    /// | `OTP_TTL_HOURS`    | `720`   |
    /// | `OTP_MAX_ATTEMPTS` | `10`    |
    ///
    /// # Panics
    ///
    /// Panics if either value does not parse or is out of range.
    pub fn from_env() -> Self {
        let ttl_hours: i64 = std::env::var("OTP_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TTL_HOURS.to_string())
            .parse()
            .expect("OTP_TTL_HOURS must be a valid i64");

        let max_attempts: u32 = std::env::var("OTP_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse()
            .expect("OTP_MAX_ATTEMPTS must be a valid u32");

        Self::new(ttl_hours, max_attempts).unwrap_or_else(|msg| panic!("{msg}"))
    }

    /// The issuing policy. The lifetime is clamped to the accepted range.
    pub fn policy(&self) -> OtpPolicy {
        OtpPolicy {
            ttl: Duration::hours(self.ttl_hours.clamp(1, MAX_OTP_TTL_HOURS)),
            max_attempts: self.max_attempts,
        }
    }
}
