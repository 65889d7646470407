//! JWT token management for the folio authentication system.
//!
//! This module provides signing and validation of the JSON Web Tokens used
//! for stateless authentication. Keys are built from an injected
//! [`AuthConfig`] at construction time; there is no ambient key material and
//! no environment access at encode/decode time.
//!
//! # Usage
//!
//! Construct a [`Jwt`] once from configuration and reuse it for all token
//! operations:
//!
//! ```rust
//! use folio_auth::config::AuthConfig;
//! use folio_auth::jwt::Jwt;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
//! struct UserClaims {
//!     sub: String,
//!     exp: i64,
//! }
//!
//! let jwt = Jwt::new(&AuthConfig::with_secret("MySuperSecret"));
//!
//! let claims = UserClaims {
//!     sub: "alice".to_string(),
//!     exp: 4118335200,
//! };
//!
//! let token = jwt.encode(&claims).unwrap();
//! let decoded = jwt.decode::<UserClaims>(&token).unwrap();
//! assert_eq!(claims, decoded.claims);
//! ```

use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::AuthConfig;
use crate::prelude::*;

/// Signing and verification keys for JWT operations.
///
/// Holds the encoding key, decoding key, and validation rules derived from
/// one [`AuthConfig`]. Cheap to clone; every clone shares the same secret.
#[derive(Clone)]
pub struct Jwt {
    /// Header stamped on every signed token.
    header: Header,
    /// Key used for signing new tokens.
    encoding: EncodingKey,
    /// Key used for verifying existing tokens.
    decoding: DecodingKey,
    /// Validation rules applied on decode.
    validation: Validation,
}

impl Jwt {
    /// Creates a key pair and validation rules from the provided config.
    ///
    /// Expiry is validated with zero leeway: a token is rejected the moment
    /// its `exp` claim is in the past. Clock skew is not compensated.
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.secret_key.as_bytes();
        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        Self {
            header: Header::new(config.algorithm),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Creates a signed JWT token from the provided claims.
    ///
    /// # Security Notes
    ///
    /// - Claims are not encrypted, only signed for integrity
    /// - Include an `exp` claim; decoding requires one
    /// - Keep the payload minimal to reduce token size and attack surface
    pub fn encode<T>(&self, body: &T) -> Result<String>
    where
        T: Serialize,
    {
        Ok(encode(&self.header, body, &self.encoding)?)
    }

    /// Validates a JWT token and extracts its claims.
    ///
    /// The signature is verified first, then the `exp` claim. An expired
    /// token fails with [`Error::TokenExpired`]; every other failure (wrong
    /// key, corrupted or forged token, malformed payload, missing claims)
    /// collapses to [`Error::InvalidToken`]. Callers are expected to present
    /// both to clients as a single "unauthenticated" response.
    pub fn decode<T>(&self, token: &str) -> Result<TokenData<T>>
    where
        T: DeserializeOwned,
    {
        decode(token, &self.decoding, &self.validation).map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => Error::TokenExpired,
            _ => Error::InvalidToken,
        })
    }
}
