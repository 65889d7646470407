//! Author management operations for web handlers.

use folio_models::{
    author::{Author, AuthorChanges, AuthorCreate},
    book::Book,
    db::connection::DbConnection,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::book::BookApi;
use crate::prelude::*;

const NAME_MAX_LEN: usize = 100;

/// API representation of an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorApi {
    pub id: Uuid,
    pub name: String,
}

/// Author detail response including their books.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorWithBooks {
    pub id: Uuid,
    pub name: String,
    pub books: Vec<BookApi>,
}

/// Creation payload.
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthorPost {
    pub name: String,
}

/// Partial author update.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AuthorUpdate {
    pub name: Option<String>,
}

impl From<Author> for AuthorApi {
    fn from(value: Author) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX_LEN {
        return Err(Error::Validation(format!(
            "Author name must be between 1 and {NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub fn create_author(payload: AuthorPost, connection: &DbConnection) -> Result<AuthorApi> {
    validate_name(&payload.name)?;
    let author = AuthorCreate { name: payload.name }.save(connection)?;
    info!(
        "Author created successfully: {} (ID: {})",
        author.name, author.id
    );
    Ok(author.into())
}

/// Page of authors.
pub fn list_authors(connection: &DbConnection, skip: i64, limit: i64) -> Result<Vec<AuthorApi>> {
    let authors = Author::fetch_all(connection, skip, limit)?;
    Ok(authors.into_iter().map(AuthorApi::from).collect())
}

/// Author detail with all their books.
pub fn get_author(target: &Uuid, connection: &DbConnection) -> Result<AuthorWithBooks> {
    let author = Author::fetch_by_id(target, connection)?.ok_or(Error::NotFound("Author"))?;
    let books = Book::fetch_for_author(&author.id, connection)?;

    Ok(AuthorWithBooks {
        id: author.id,
        name: author.name,
        books: books.into_iter().map(BookApi::from).collect(),
    })
}

pub fn update_author(
    target: &Uuid,
    payload: AuthorUpdate,
    connection: &DbConnection,
) -> Result<AuthorApi> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }
    let changes = AuthorChanges { name: payload.name };
    Author::update(target, &changes, connection)?
        .map(AuthorApi::from)
        .ok_or(Error::NotFound("Author"))
}

/// Deletes an author; their books go with them (cascading foreign key).
pub fn delete_author(target: &Uuid, connection: &DbConnection) -> Result<()> {
    if !Author::delete(target, connection)? {
        return Err(Error::NotFound("Author"));
    }
    info!("Author deleted successfully (ID: {})", target);
    Ok(())
}
