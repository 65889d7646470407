//! Context resolver for extracting the authenticated user from requests.

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use folio_auth::{AUTH_HEADER, AUTH_HEADER_PREFIX};

use crate::{auth_token::Auth, ctx::Ctx, error::CtxError, prelude::*};

/// Middleware resolving the request context from the bearer token.
///
/// Extracts the token from the `Authorization` header, validates it, and
/// re-reads the account from the store. The outcome, either a `Ctx` or the
/// reason it could not be built, is inserted into the request extensions;
/// routes that require authentication reject from there, public routes
/// never look.
///
/// # Examples
///
/// ```rust,ignore
/// let app: Router<()> = Router::new()
///     .layer(axum::middleware::from_fn_with_state(auth, mw_ctx_resolver));
/// ```
pub async fn mw_ctx_resolver(
    State(auth): State<Auth>,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = headers
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
        .ok_or(CtxError::Auth(folio_auth::error::Error::TokenMissing))
        .and_then(|token| auth.authorize(token))
        .map(|user| Ctx::new(user.into()));

    req.extensions_mut().insert(ctx);

    next.run(req).await
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<core::result::Result<Ctx, CtxError>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}
