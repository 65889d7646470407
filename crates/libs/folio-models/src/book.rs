//! Book model and queries.

use crate::author::Author;
use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::books::dsl::*};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// A stored book, belonging to exactly one author.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(Author))]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable book row.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::books)]
pub struct BookCreate {
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// Partial update; unset fields keep their stored value.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::books)]
pub struct BookChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author_id: Option<Uuid>,
}

impl BookChanges {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.author_id.is_none()
    }
}

impl BookCreate {
    pub fn save(self, connection: &DbConnection) -> Result<Book> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(books)
            .values(&self)
            .returning(Book::as_returning())
            .get_result(conn)?)
    }
}

impl Book {
    pub fn fetch_by_id(target: &Uuid, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(Book::by_id(target)
            .select(Book::as_select())
            .get_result(conn)
            .optional()?)
    }

    pub fn fetch_all(connection: &DbConnection, skip: i64, limit: i64) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(books
            .select(Book::as_select())
            .order(created_at.asc())
            .offset(skip)
            .limit(limit)
            .load(conn)?)
    }

    /// Page of the given author's books.
    pub fn fetch_by_author(
        target: &Uuid,
        connection: &DbConnection,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(Book::by_author(target)
            .select(Book::as_select())
            .order(created_at.asc())
            .offset(skip)
            .limit(limit)
            .load(conn)?)
    }

    /// Every book of the given author, unpaginated.
    pub fn fetch_for_author(target: &Uuid, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(Book::by_author(target)
            .select(Book::as_select())
            .order(created_at.asc())
            .load(conn)?)
    }

    /// Applies a partial update; an all-unset changeset is a no-op read.
    pub fn update(
        target: &Uuid,
        changes: &BookChanges,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        if changes.is_empty() {
            return Self::fetch_by_id(target, connection);
        }
        let conn = &mut connection.pool.get()?;

        Ok(diesel::update(books.filter(id.eq(target)))
            .set(changes)
            .returning(Book::as_returning())
            .get_result(conn)
            .optional()?)
    }

    /// Returns true when a row was deleted.
    pub fn delete(target: &Uuid, connection: &DbConnection) -> Result<bool> {
        let conn = &mut connection.pool.get()?;

        let deleted = diesel::delete(books.filter(id.eq(target))).execute(conn)?;
        Ok(deleted > 0)
    }
}

impl Book {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: &Uuid) -> _ {
        crate::schema::books::dsl::books.filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_author(target: &Uuid) -> _ {
        crate::schema::books::dsl::books.filter(author_id.eq(target))
    }
}
