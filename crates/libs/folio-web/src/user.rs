//! User management operations for web handlers.

use folio_auth::secret_hash::generate_secret_hash;
use folio_models::{
    db::connection::DbConnection,
    user::{User, UserChanges, UserCreate},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::prelude::*;

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 50;
const PASSWORD_MIN_LEN: usize = 6;

/// API representation of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserApi {
    pub id: Uuid,
    pub username: String,
    pub is_active: bool,
}

/// Registration payload.
#[derive(Debug, Deserialize, Serialize)]
pub struct UserPost {
    pub username: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Deserialize, Serialize)]
pub struct UserLoginRequest {
    pub username: String,
    pub password: String,
}

/// Partial user update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

impl From<User> for UserApi {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            is_active: value.is_active,
        }
    }
}

impl UserLoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(Error::Validation(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(Error::Validation(format!(
            "Password must be at least {PASSWORD_MIN_LEN} characters"
        )));
    }
    Ok(())
}

/// Registers a new user from the provided payload.
///
/// The password is hashed before anything touches the store; registration
/// either persists the complete row or nothing. A taken username is
/// reported identically whether it is caught by the pre-check or by the
/// unique constraint on concurrent registration.
pub fn create_user(payload: UserPost, connection: &DbConnection) -> Result<UserApi> {
    info!("Attempting to register user: {}", payload.username);
    validate_username(&payload.username)?;
    validate_password(&payload.password)?;

    if User::fetch_by_username(&payload.username, connection)?.is_some() {
        warn!(
            "Registration failed: username '{}' already exists",
            payload.username
        );
        return Err(Error::UsernameTaken);
    }

    let hash = generate_secret_hash(&payload.password)?;
    let model = UserCreate {
        username: payload.username,
        hash,
    };
    let user = match model.save(connection) {
        Ok(user) => user,
        Err(err) if err.is_unique_violation() => return Err(Error::UsernameTaken),
        Err(err) => return Err(err.into()),
    };

    info!(
        "User registered successfully: {} (ID: {})",
        user.username, user.id
    );
    Ok(user.into())
}

/// Page of users.
pub fn list_users(connection: &DbConnection, skip: i64, limit: i64) -> Result<Vec<UserApi>> {
    let users = User::fetch_all(connection, skip, limit)?;
    Ok(users.into_iter().map(UserApi::from).collect())
}

pub fn get_user(target: &Uuid, connection: &DbConnection) -> Result<UserApi> {
    User::fetch_by_id(target, connection)?
        .map(UserApi::from)
        .ok_or(Error::NotFound("User"))
}

/// Applies a partial update to a user.
///
/// A provided password is re-hashed; the plaintext never reaches the store.
pub fn update_user(
    target: &Uuid,
    payload: UserUpdate,
    connection: &DbConnection,
) -> Result<UserApi> {
    if let Some(username) = &payload.username {
        validate_username(username)?;
    }
    let hash = match &payload.password {
        Some(password) => {
            validate_password(password)?;
            Some(generate_secret_hash(password)?)
        }
        None => None,
    };

    let changes = UserChanges {
        username: payload.username,
        hash,
        is_active: payload.is_active,
    };
    let user = match User::update(target, &changes, connection) {
        Ok(user) => user,
        Err(err) if err.is_unique_violation() => return Err(Error::UsernameTaken),
        Err(err) => return Err(err.into()),
    };

    user.map(UserApi::from).ok_or(Error::NotFound("User"))
}

pub fn delete_user(target: &Uuid, connection: &DbConnection) -> Result<()> {
    if !User::delete(target, connection)? {
        return Err(Error::NotFound("User"));
    }
    info!("User account deleted successfully (ID: {})", target);
    Ok(())
}
