//! Credential verification and token management for web requests.
//!
//! [`Auth`] is the single entry point the HTTP layer uses for everything
//! security-related: verifying a username/password pair, minting a signed
//! token for a verified user, and turning a presented token back into a live
//! user record. It is constructed once at startup from injected
//! configuration and cloned into middleware and handlers.

use chrono::{TimeDelta, Utc};
use folio_auth::{
    ISS, auth_body::AuthBody, config::AuthConfig, jwt::Jwt, secret_hash::is_secret_valid,
};
use folio_models::{db::connection::DbConnection, user::User};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::CtxError;
use crate::prelude::*;
use crate::user::UserLoginRequest;

/// JWT claims carried by every issued token.
///
/// The subject is the username; account state (active flag, existence) is
/// deliberately not encoded. It is re-read from the store on every request
/// so that administrative changes apply immediately.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthToken {
    /// Subject (username).
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Expiration time.
    pub exp: i64,
    /// Issued at time.
    pub iat: i64,
}

impl AuthToken {
    /// Creates claims for the given user expiring `token_duration` from now.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use folio_web::auth_token::AuthToken;
    /// use chrono::TimeDelta;
    ///
    /// let claims = AuthToken::new("alice", TimeDelta::minutes(30)).unwrap();
    /// assert_eq!(claims.sub, "alice");
    /// assert!(claims.exp > claims.iat);
    /// ```
    pub fn new(username: &str, token_duration: TimeDelta) -> Result<Self> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(token_duration)
            .ok_or(Error::AuthTokenCreation)?;

        Ok(Self {
            sub: username.to_string(),
            iss: String::from(ISS),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        })
    }
}

/// Authentication service: credential checks, token issuance, and the
/// per-request token-to-user resolution.
#[derive(Clone)]
pub struct Auth {
    /// User store handle.
    pub connection: DbConnection,
    jwt: Jwt,
    token_ttl: TimeDelta,
}

impl Auth {
    /// Builds the service from the user store and injected key material.
    pub fn new(connection: DbConnection, config: &AuthConfig) -> Self {
        Self {
            connection,
            jwt: Jwt::new(config),
            token_ttl: TimeDelta::minutes(config.token_ttl_minutes),
        }
    }

    /// Verifies a username/password pair against the store.
    ///
    /// Unknown usernames and wrong passwords both come back as
    /// [`Error::WrongCredentials`]; the response shape must not reveal
    /// whether the username exists. The failed attempt is logged with the
    /// attempted username for auditing.
    pub fn authenticate(&self, auth: &UserLoginRequest) -> Result<User> {
        if auth.username.is_empty() || auth.password.is_empty() {
            return Err(Error::MissingCredentials);
        }
        let Some(user) = User::fetch_by_username(&auth.username, &self.connection)? else {
            warn!("Login failed: invalid credentials for user '{}'", auth.username);
            return Err(Error::WrongCredentials);
        };
        if !is_secret_valid(&auth.password, &user.hash) {
            warn!("Login failed: invalid credentials for user '{}'", auth.username);
            return Err(Error::WrongCredentials);
        }
        Ok(user)
    }

    /// Mints a signed token for the given username using the configured TTL.
    pub fn issue_token(&self, username: &str) -> Result<AuthBody> {
        let claims = AuthToken::new(username, self.token_ttl)?;
        let token = self.jwt.encode(&claims).map_err(|err| {
            error!("Failed to encode JWT {err}");
            err
        })?;
        Ok(AuthBody::new(token))
    }

    /// Full login: verify credentials, then issue a token.
    pub fn login(&self, auth: &UserLoginRequest) -> Result<AuthBody> {
        let user = self.authenticate(auth)?;
        info!("User logged in successfully: {}", user.username);
        self.issue_token(&user.username)
    }

    /// Resolves a presented token to a live, active user.
    ///
    /// The token only proves who the caller was when it was signed; the
    /// account is re-read from the store on every call so deactivation or
    /// deletion takes effect on the next request, unexpired tokens
    /// notwithstanding.
    pub fn authorize(&self, token: &str) -> core::result::Result<User, CtxError> {
        let claims = self.jwt.decode::<AuthToken>(token)?.claims;

        let user = User::fetch_by_username(&claims.sub, &self.connection)
            .map_err(|err| {
                error!("User lookup failed during authorization: {err}");
                CtxError::Store
            })?
            .ok_or(CtxError::UnknownUser)?;

        if !user.is_active {
            warn!("Rejected token for inactive user '{}'", user.username);
            return Err(CtxError::InactiveUser);
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_expire_after_ttl() -> Result<()> {
        let claims = AuthToken::new("alice", TimeDelta::minutes(30))?;
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert_eq!(claims.iss, ISS);
        Ok(())
    }

    #[test]
    fn overflowing_ttl_is_an_error() {
        let result = AuthToken::new("alice", TimeDelta::MAX);
        assert!(matches!(result, Err(Error::AuthTokenCreation)));
    }
}
