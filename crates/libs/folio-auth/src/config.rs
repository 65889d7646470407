//! Authentication configuration.
//!
//! Collects the signing secret, algorithm, and token lifetime into one
//! immutable value that is read once at startup and injected wherever keys
//! are needed. Nothing in this crate reads the environment after
//! construction.

use jsonwebtoken::Algorithm;

/// Default signing algorithm when `JWT_ALGORITHM` is unset.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Default token lifetime in minutes when `TOKEN_TTL_MINUTES` is unset.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Signing key material and token policy.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric signing secret.
    pub secret_key: String,
    /// JWT signing algorithm.
    pub algorithm: Algorithm,
    /// Lifetime of issued tokens, in minutes.
    pub token_ttl_minutes: i64,
}

/// Get required environment variable or panic.
fn get_env_variable(var: &str) -> String {
    std::env::var(var).expect(&format!("Env Variable '{}' missing", var))
}

impl AuthConfig {
    /// Create authentication configuration from environment variables.
    ///
    /// Reads `JWT_SECRET` (required), `JWT_ALGORITHM` (default `HS256`), and
    /// `TOKEN_TTL_MINUTES` (default 30).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use folio_auth::config::AuthConfig;
    ///
    /// let config = AuthConfig::from_env();
    /// ```
    pub fn from_env() -> Self {
        let algorithm = match std::env::var("JWT_ALGORITHM") {
            Ok(name) => name
                .parse::<Algorithm>()
                .expect("Invalid JWT_ALGORITHM value"),
            Err(_) => DEFAULT_ALGORITHM,
        };
        let token_ttl_minutes = match std::env::var("TOKEN_TTL_MINUTES") {
            Ok(minutes) => minutes
                .parse::<i64>()
                .expect("Invalid TOKEN_TTL_MINUTES value"),
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };
        Self {
            secret_key: get_env_variable("JWT_SECRET"),
            algorithm,
            token_ttl_minutes,
        }
    }

    /// Configuration with defaults for everything but the secret.
    pub fn with_secret(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            algorithm: DEFAULT_ALGORITHM,
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }
}

impl std::fmt::Display for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}
