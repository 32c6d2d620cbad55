/*
 * Responsibility
 * - Load settings from the environment (listen address, signing secret, token lifetimes, CORS)
 * - Validate settings (fail startup when something required is missing)
 * - Loaded once in app::run and passed explicitly; nothing here is mutated after startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEV_JWT_SECRET: &str = "dev-secret";
const MIN_PRODUCTION_SECRET_LEN: usize = 32;
// 10 years
const MAX_TOKEN_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Where the request context takes its permission set from.
///
/// - `Claims`: trust the permissions embedded in a verified access credential.
///   Revocation only takes effect when the holder refreshes.
/// - `Registry`: resolve the verified role against the role registry on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionSource {
    #[default]
    Claims,
    Registry,
}

impl FromStr for PermissionSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claims" => Ok(Self::Claims),
            "registry" => Ok(Self::Registry),
            _ => Err(ConfigError::Invalid("PERMISSION_SOURCE")),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A seeded staff login for the stub account directory (`STAFF_ACCOUNTS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffAccount {
    pub email: String,
    pub role: String,
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout_seconds: u64,
    pub body_limit_bytes: usize,
    // process-wide; 0 disables
    pub rate_limit_per_minute: u32,

    // HS256 signing secret shared by issuance and verification
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub auth_audience: String,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
    pub token_leeway_seconds: u64,

    pub permission_source: PermissionSource,
    pub staff_accounts: Vec<StaffAccount>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_audience", &self.auth_audience)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_seconds", &self.refresh_token_ttl_seconds)
            .field("token_leeway_seconds", &self.token_leeway_seconds)
            .field("permission_source", &self.permission_source)
            .field("staff_accounts", &self.staff_accounts)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let addr = parse_addr(&host, std::env::var("PORT").ok().as_deref())?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = parse_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let request_timeout_seconds = env_u64("REQUEST_TIMEOUT_SECONDS", 30)?;
        let body_limit_bytes = usize::try_from(env_u64("BODY_LIMIT_BYTES", 1024 * 1024)?)
            .map_err(|_| ConfigError::Invalid("BODY_LIMIT_BYTES"))?;
        let rate_limit_per_minute = u32::try_from(env_u64("RATE_LIMIT_PER_MINUTE", 100)?)
            .map_err(|_| ConfigError::Invalid("RATE_LIMIT_PER_MINUTE"))?;

        let jwt_secret = resolve_secret(std::env::var("JWT_SECRET").ok(), app_env)?;

        let auth_issuer =
            std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "storefront-api".to_string());
        let auth_audience =
            std::env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "storefront-api".to_string());

        let access_token_ttl_seconds = env_u64("ACCESS_TOKEN_TTL_SECONDS", 900)?; // 15 min
        let refresh_token_ttl_seconds = env_u64("REFRESH_TOKEN_TTL_SECONDS", 604_800)?; // 7 days
        let token_leeway_seconds = env_u64("TOKEN_LEEWAY_SECONDS", 0)?;

        validate_ttls(access_token_ttl_seconds, refresh_token_ttl_seconds)?;

        let permission_source = match std::env::var("PERMISSION_SOURCE") {
            Ok(v) => v.parse()?,
            Err(_) => PermissionSource::default(),
        };

        let staff_accounts =
            parse_staff_accounts(&std::env::var("STAFF_ACCOUNTS").unwrap_or_default())?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_timeout_seconds,
            body_limit_bytes,
            rate_limit_per_minute,
            jwt_secret,
            auth_issuer,
            auth_audience,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
            token_leeway_seconds,
            permission_source,
            staff_accounts,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Development settings with defaults; no environment access.
    pub(crate) fn for_tests() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            request_timeout_seconds: 30,
            body_limit_bytes: 1024 * 1024,
            rate_limit_per_minute: 100,
            jwt_secret: "unit-test-secret".to_string(),
            auth_issuer: "storefront-api".to_string(),
            auth_audience: "storefront-api".to_string(),
            access_token_ttl_seconds: 900,
            refresh_token_ttl_seconds: 604_800,
            token_leeway_seconds: 0,
            permission_source: PermissionSource::Claims,
            staff_accounts: Vec::new(),
        }
    }
}

fn parse_addr(host: &str, port: Option<&str>) -> Result<SocketAddr, ConfigError> {
    let port: u16 = match port {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
        None => 3000,
    };

    SocketAddr::from_str(&format!("{}:{}", host, port)).map_err(|_| ConfigError::Invalid("HOST"))
}

fn validate_ttls(access: u64, refresh: u64) -> Result<(), ConfigError> {
    if access == 0 || access > MAX_TOKEN_TTL_SECONDS {
        return Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"));
    }
    if refresh <= access || refresh > MAX_TOKEN_TTL_SECONDS {
        return Err(ConfigError::Invalid("REFRESH_TOKEN_TTL_SECONDS"));
    }
    Ok(())
}

fn env_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn resolve_secret(raw: Option<String>, app_env: AppEnv) -> Result<String, ConfigError> {
    match raw.filter(|s| !s.is_empty()) {
        Some(secret) if app_env.is_production() && secret.len() < MIN_PRODUCTION_SECRET_LEN => {
            Err(ConfigError::Invalid("JWT_SECRET"))
        }
        Some(secret) => Ok(secret),
        None if app_env.is_production() => Err(ConfigError::Missing("JWT_SECRET")),
        None => {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            Ok(DEV_JWT_SECRET.to_string())
        }
    }
}

/// `STAFF_ACCOUNTS=owner@example.com=owner,ops@example.com=fulfillment`
fn parse_staff_accounts(raw: &str) -> Result<Vec<StaffAccount>, ConfigError> {
    parse_list(raw)
        .into_iter()
        .map(|entry| {
            let (email, role) = entry
                .split_once('=')
                .ok_or(ConfigError::Invalid("STAFF_ACCOUNTS"))?;
            let (email, role) = (email.trim(), role.trim());
            if email.is_empty() || role.is_empty() {
                return Err(ConfigError::Invalid("STAFF_ACCOUNTS"));
            }
            Ok(StaffAccount {
                email: email.to_ascii_lowercase(),
                role: role.to_string(),
            })
        })
        .collect()
}
