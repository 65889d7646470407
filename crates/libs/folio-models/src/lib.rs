//! Database models and ORM layer for the folio bookstore backend.
//!
//! Provides Diesel-based database models, queries, and connection management
//! for users, authors, and books.
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio_models::{author::Author, db::{config::DbConfig, connection::DbConnection}};
//!
//! // Get database connection
//! let config = DbConfig::from_env();
//! let conn = DbConnection::new(&config);
//!
//! // Query for authors
//! let authors = Author::fetch_all(&conn, 0, 100).unwrap();
//! println!("Found {} authors", authors.len());
//! ```

pub mod author;
pub mod book;
pub mod db;
pub mod error;
pub mod prelude;
mod schema;
pub mod user;
