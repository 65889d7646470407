//! Author model and queries.

use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::authors::dsl::*};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// A stored author.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::authors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable author row.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::authors)]
pub struct AuthorCreate {
    pub name: String,
}

/// Partial update; unset fields keep their stored value.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::authors)]
pub struct AuthorChanges {
    pub name: Option<String>,
}

impl AuthorChanges {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

impl AuthorCreate {
    pub fn save(self, connection: &DbConnection) -> Result<Author> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(authors)
            .values(&self)
            .returning(Author::as_returning())
            .get_result(conn)?)
    }
}

impl Author {
    pub fn fetch_by_id(target: &Uuid, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(Author::by_id(target)
            .select(Author::as_select())
            .get_result(conn)
            .optional()?)
    }

    pub fn fetch_all(connection: &DbConnection, skip: i64, limit: i64) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(authors
            .select(Author::as_select())
            .order(created_at.asc())
            .offset(skip)
            .limit(limit)
            .load(conn)?)
    }

    /// Applies a partial update; an all-unset changeset is a no-op read.
    pub fn update(
        target: &Uuid,
        changes: &AuthorChanges,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        if changes.is_empty() {
            return Self::fetch_by_id(target, connection);
        }
        let conn = &mut connection.pool.get()?;

        Ok(diesel::update(authors.filter(id.eq(target)))
            .set(changes)
            .returning(Author::as_returning())
            .get_result(conn)
            .optional()?)
    }

    /// Returns true when a row was deleted. Books referencing the author
    /// are removed by the `ON DELETE CASCADE` foreign key.
    pub fn delete(target: &Uuid, connection: &DbConnection) -> Result<bool> {
        let conn = &mut connection.pool.get()?;

        let deleted = diesel::delete(authors.filter(id.eq(target))).execute(conn)?;
        Ok(deleted > 0)
    }
}

impl Author {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: &Uuid) -> _ {
        crate::schema::authors::dsl::authors.filter(id.eq(target))
    }
}
