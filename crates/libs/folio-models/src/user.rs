//! User account model and queries.
//!
//! The stored `hash` is the user's Argon2 password hash. `User` deliberately
//! does not implement `Serialize`; the hash must never leave this layer in
//! an API response or a log line.

use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::users::dsl::*};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// A stored user account.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable user row; the password is already hashed by the caller.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCreate {
    pub username: String,
    pub hash: String,
}

/// Partial update; unset fields keep their stored value.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    pub username: Option<String>,
    pub hash: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.hash.is_none() && self.is_active.is_none()
    }
}

impl UserCreate {
    pub fn save(self, connection: &DbConnection) -> Result<User> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(users)
            .values(&self)
            .returning(User::as_returning())
            .get_result(conn)?)
    }
}

impl User {
    pub fn fetch_by_id(target: &Uuid, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(User::by_id(target)
            .select(User::as_select())
            .get_result(conn)
            .optional()?)
    }

    pub fn fetch_by_username(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(User::by_username(target)
            .select(User::as_select())
            .get_result(conn)
            .optional()?)
    }

    pub fn fetch_all(connection: &DbConnection, skip: i64, limit: i64) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(users
            .select(User::as_select())
            .order(created_at.asc())
            .offset(skip)
            .limit(limit)
            .load(conn)?)
    }

    /// Applies a partial update; an all-unset changeset is a no-op read.
    pub fn update(
        target: &Uuid,
        changes: &UserChanges,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        if changes.is_empty() {
            return Self::fetch_by_id(target, connection);
        }
        let conn = &mut connection.pool.get()?;

        Ok(diesel::update(users.filter(id.eq(target)))
            .set(changes)
            .returning(User::as_returning())
            .get_result(conn)
            .optional()?)
    }

    /// Returns true when a row was deleted.
    pub fn delete(target: &Uuid, connection: &DbConnection) -> Result<bool> {
        let conn = &mut connection.pool.get()?;

        let deleted = diesel::delete(users.filter(id.eq(target))).execute(conn)?;
        Ok(deleted > 0)
    }
}

impl User {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: &Uuid) -> _ {
        crate::schema::users::dsl::users.filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_username(target: &str) -> _ {
        crate::schema::users::dsl::users.filter(username.eq(target))
    }
}
