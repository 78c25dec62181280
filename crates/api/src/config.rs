use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Accepted session lifetimes, in days.
const SESSION_TTL_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=365;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite database path; `.db` is appended when it has no extension.
    pub db_path: String,
    /// Directory holding the browser client's pages and assets.
    pub public_dir: PathBuf,
    /// Allowed CORS origins. Empty disables cross-origin access.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Lifetime of a login session in days (default: `7`).
    pub session_ttl_days: i64,
    /// Mark the session cookie `Secure` (set when `APP_ENV=production`).
    pub secure_cookies: bool,
    /// Login attempts allowed per client within one window (default: `20`).
    pub login_rate_limit_max: u32,
    /// Length of the login rate-limit window in seconds (default: `900`).
    pub login_rate_limit_window_secs: u64,
    /// Key the login limiter on the hop appended by one reverse proxy
    /// (default: `true`). When unset, the socket peer address is used.
    pub trust_proxy: bool,
    /// Credentials of the admin account seeded into an empty user table.
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            db_path: "wos.db".into(),
            public_dir: PathBuf::from("public"),
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            session_ttl_days: 7,
            secure_cookies: false,
            login_rate_limit_max: 20,
            login_rate_limit_window_secs: 900,
            trust_proxy: true,
            admin_username: "admin".into(),
            admin_password: "admin".into(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default   |
    /// |--------------------------------|-----------|
    /// | `HOST`                         | `0.0.0.0` |
    /// | `PORT`                         | `3000`    |
    /// | `DB_PATH`                      | `wos.db`  |
    /// | `PUBLIC_DIR`                   | `public`  |
    /// | `CORS_ORIGINS`                 | (empty)   |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`      |
    /// | `SESSION_TTL_DAYS`             | `7`       |
    /// | `APP_ENV`                      | (unset)   |
    /// | `LOGIN_RATE_LIMIT_MAX`         | `20`      |
    /// | `LOGIN_RATE_LIMIT_WINDOW_SECS` | `900`     |
    /// | `TRUST_PROXY`                  | `true`    |
    /// | `ADMIN_USERNAME`               | `admin`   |
    /// | `ADMIN_PASSWORD`               | `admin`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |name: &str, default: String| lookup(name).unwrap_or(default);

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    expected: "comma-separated list of origins",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let session_ttl_days = parse(
            &lookup,
            "SESSION_TTL_DAYS",
            defaults.session_ttl_days,
            "number of days",
        )?;
        if !SESSION_TTL_DAYS_RANGE.contains(&session_ttl_days) {
            return Err(ConfigError::Invalid {
                name: "SESSION_TTL_DAYS",
                expected: "number of days from 1 to 365",
                value: session_ttl_days.to_string(),
            });
        }

        Ok(Self {
            host: text("HOST", defaults.host),
            port: parse(&lookup, "PORT", defaults.port, "u16")?,
            db_path: text("DB_PATH", defaults.db_path),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            cors_origins,
            request_timeout_secs: parse(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
                "u64",
            )?,
            session_ttl_days,
            secure_cookies: lookup("APP_ENV").is_some_and(|env| env == "production"),
            login_rate_limit_max: parse(
                &lookup,
                "LOGIN_RATE_LIMIT_MAX",
                defaults.login_rate_limit_max,
                "u32",
            )?,
            login_rate_limit_window_secs: parse(
                &lookup,
                "LOGIN_RATE_LIMIT_WINDOW_SECS",
                defaults.login_rate_limit_window_secs,
                "u64",
            )?,
            trust_proxy: parse(&lookup, "TRUST_PROXY", defaults.trust_proxy, "boolean")?,
            admin_username: text("ADMIN_USERNAME", defaults.admin_username),
            admin_password: text("ADMIN_PASSWORD", defaults.admin_password),
        })
    }
}

fn parse<F, T>(lookup: &F, name: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value: raw,
        }),
    }
}
