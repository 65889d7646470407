//! Error types for the Folio Bookstore Service.

/// Errors that can occur while running the service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Models(#[from] folio_models::error::Error),

    #[error(transparent)]
    Web(#[from] folio_web::error::Error),
}
