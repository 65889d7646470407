pub mod auth_body;
pub mod config;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;

/// Token type reported in authentication responses.
pub const TOKEN_TYPE: &str = "Bearer";

/// HTTP header carrying the bearer token.
pub const AUTH_HEADER: &str = "Authorization";

/// Prefix of the header value before the token itself.
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";

/// Issuer claim stamped into every token.
pub const ISS: &str = "folio";
