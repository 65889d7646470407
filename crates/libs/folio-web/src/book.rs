//! Book management operations for web handlers.

use folio_models::{
    author::Author,
    book::{Book, BookChanges, BookCreate},
    db::connection::DbConnection,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::author::AuthorApi;
use crate::prelude::*;

const TITLE_MAX_LEN: usize = 200;
const DESCRIPTION_MAX_LEN: usize = 1000;

/// API representation of a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookApi {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// Book detail response including the author.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
    pub author: AuthorApi,
}

/// Creation payload.
#[derive(Debug, Deserialize, Serialize)]
pub struct BookPost {
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// Partial book update. A `description` can be replaced but not cleared;
/// absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author_id: Option<Uuid>,
}

impl From<Book> for BookApi {
    fn from(value: Book) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            author_id: value.author_id,
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_LEN {
        return Err(Error::Validation(format!(
            "Book title must be between 1 and {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(Error::Validation(format!(
            "Book description must be at most {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// The referenced author must exist before a book can point at them.
fn require_author(target: &Uuid, connection: &DbConnection) -> Result<()> {
    if Author::fetch_by_id(target, connection)?.is_none() {
        return Err(Error::UnknownAuthor(*target));
    }
    Ok(())
}

pub fn create_book(payload: BookPost, connection: &DbConnection) -> Result<BookApi> {
    validate_title(&payload.title)?;
    if let Some(description) = &payload.description {
        validate_description(description)?;
    }
    require_author(&payload.author_id, connection)?;

    let book = BookCreate {
        title: payload.title,
        description: payload.description,
        author_id: payload.author_id,
    }
    .save(connection)?;

    info!("Book created successfully: {} (ID: {})", book.title, book.id);
    Ok(book.into())
}

/// Page of books, optionally restricted to one author.
pub fn list_books(
    connection: &DbConnection,
    author: Option<&Uuid>,
    skip: i64,
    limit: i64,
) -> Result<Vec<BookApi>> {
    let books = match author {
        Some(author) => Book::fetch_by_author(author, connection, skip, limit)?,
        None => Book::fetch_all(connection, skip, limit)?,
    };
    Ok(books.into_iter().map(BookApi::from).collect())
}

/// Book detail with its author.
pub fn get_book(target: &Uuid, connection: &DbConnection) -> Result<BookWithAuthor> {
    let book = Book::fetch_by_id(target, connection)?.ok_or(Error::NotFound("Book"))?;
    let author =
        Author::fetch_by_id(&book.author_id, connection)?.ok_or(Error::NotFound("Author"))?;

    Ok(BookWithAuthor {
        id: book.id,
        title: book.title,
        description: book.description,
        author_id: book.author_id,
        author: author.into(),
    })
}

pub fn update_book(
    target: &Uuid,
    payload: BookUpdate,
    connection: &DbConnection,
) -> Result<BookApi> {
    if let Some(title) = &payload.title {
        validate_title(title)?;
    }
    if let Some(description) = &payload.description {
        validate_description(description)?;
    }
    if let Some(author) = &payload.author_id {
        require_author(author, connection)?;
    }

    let changes = BookChanges {
        title: payload.title,
        description: payload.description,
        author_id: payload.author_id,
    };
    Book::update(target, &changes, connection)?
        .map(BookApi::from)
        .ok_or(Error::NotFound("Book"))
}

pub fn delete_book(target: &Uuid, connection: &DbConnection) -> Result<()> {
    if !Book::delete(target, connection)? {
        return Err(Error::NotFound("Book"));
    }
    info!("Book deleted successfully (ID: {})", target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_length_is_enforced() {
        assert!(validate_title("").is_err());
        assert!(validate_title("The Dispossessed").is_ok());
        assert!(validate_title(&"a".repeat(201)).is_err());
    }

    #[test]
    fn description_length_is_enforced() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"a".repeat(1001)).is_err());
    }
}
