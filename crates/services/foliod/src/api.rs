use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use folio_auth::{auth_body::AuthBody, config::AuthConfig};
use folio_models::db::connection::DbConnection;
use folio_web::{
    auth_token::Auth,
    author::{
        AuthorApi, AuthorPost, AuthorUpdate, AuthorWithBooks, create_author, delete_author,
        get_author, list_authors, update_author,
    },
    book::{
        BookApi, BookPost, BookUpdate, BookWithAuthor, create_book, delete_book, get_book,
        list_books, update_book,
    },
    ctx::{Ctx, resolver::mw_ctx_resolver},
    mw_auth::mw_require_auth,
    pagination::Pagination,
    user::{
        UserApi, UserLoginRequest, UserPost, UserUpdate, create_user, delete_user, get_user,
        list_users, update_user,
    },
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use std::net::SocketAddr;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::prelude::*;
use folio_web::prelude::Result as WebResult;

/// Shared state for the API handlers.
#[derive(Clone)]
pub struct Bookstore {
    pub connection: DbConnection,
    pub auth: Auth,
}

fn v1(path: &str) -> String {
    format!("/v1/{path}")
}

pub async fn setup_api(
    connection: DbConnection,
    config: AuthConfig,
) -> Result<JoinHandle<Result<()>>> {
    let auth = Auth::new(connection.clone(), &config);
    let state = Bookstore {
        connection,
        auth: auth.clone(),
    };

    let auth_routes = Router::new()
        .route(&v1("auth/register"), post(register))
        .route(&v1("auth/login"), post(login));

    let user_routes = Router::new()
        .route(&v1("users/me"), get(read_me))
        .route(&v1("users"), get(read_users))
        .route(
            &v1("users/{id}"),
            get(read_user).put(put_user).delete(remove_user),
        )
        .route_layer(middleware::from_fn(mw_require_auth));

    let author_routes = Router::new()
        .route(&v1("authors"), get(read_authors).post(post_author))
        .route(
            &v1("authors/{id}"),
            get(read_author).put(put_author).delete(remove_author),
        );

    let book_routes = Router::new()
        .route(&v1("books"), get(read_books).post(post_book))
        .route(
            &v1("books/{id}"),
            get(read_book).put(put_book).delete(remove_book),
        );

    let app = Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .merge(author_routes)
        .merge(book_routes)
        .route(&v1("health"), get(health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(auth, mw_ctx_resolver))
        .with_state(state);

    // run it with hyper
    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::debug!("listening on {}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        Ok(())
    });

    Ok(handle)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/* Auth */

async fn register(
    State(state): State<Bookstore>,
    Json(payload): Json<UserPost>,
) -> WebResult<(StatusCode, Json<UserApi>)> {
    let user = create_user(payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<Bookstore>,
    Json(payload): Json<UserLoginRequest>,
) -> WebResult<Json<AuthBody>> {
    info!("Login attempt for user: {}", payload.username);
    Ok(Json(state.auth.login(&payload)?))
}

/* Users */

async fn read_me(ctx: Ctx) -> Json<UserApi> {
    info!("User {} retrieved their profile", ctx.user.username);
    Json(ctx.user)
}

async fn read_users(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Query(page): Query<Pagination>,
) -> WebResult<Json<Vec<UserApi>>> {
    info!(
        "User {} requested user list (skip={}, limit={})",
        ctx.user.username,
        page.skip(),
        page.limit()
    );
    Ok(Json(list_users(
        &state.connection,
        page.skip(),
        page.limit(),
    )?))
}

async fn read_user(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Path(id): Path<Uuid>,
) -> WebResult<Json<UserApi>> {
    info!(
        "User {} requested details for user ID: {}",
        ctx.user.username, id
    );
    Ok(Json(get_user(&id, &state.connection)?))
}

async fn put_user(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpdate>,
) -> WebResult<Json<UserApi>> {
    ctx.require_self(&id)?;
    info!("User {} updating their profile", ctx.user.username);
    Ok(Json(update_user(&id, payload, &state.connection)?))
}

async fn remove_user(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Path(id): Path<Uuid>,
) -> WebResult<StatusCode> {
    ctx.require_self(&id)?;
    info!("User {} deleting their account", ctx.user.username);
    delete_user(&id, &state.connection)?;
    Ok(StatusCode::NO_CONTENT)
}

/* Authors */

async fn read_authors(
    State(state): State<Bookstore>,
    Query(page): Query<Pagination>,
) -> WebResult<Json<Vec<AuthorApi>>> {
    Ok(Json(list_authors(
        &state.connection,
        page.skip(),
        page.limit(),
    )?))
}

async fn read_author(
    State(state): State<Bookstore>,
    Path(id): Path<Uuid>,
) -> WebResult<Json<AuthorWithBooks>> {
    Ok(Json(get_author(&id, &state.connection)?))
}

async fn post_author(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Json(payload): Json<AuthorPost>,
) -> WebResult<(StatusCode, Json<AuthorApi>)> {
    info!("User {} creating author: {}", ctx.user.username, payload.name);
    let author = create_author(payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(author)))
}

async fn put_author(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Path(id): Path<Uuid>,
    Json(payload): Json<AuthorUpdate>,
) -> WebResult<Json<AuthorApi>> {
    info!("User {} updating author ID: {}", ctx.user.username, id);
    Ok(Json(update_author(&id, payload, &state.connection)?))
}

async fn remove_author(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Path(id): Path<Uuid>,
) -> WebResult<StatusCode> {
    info!("User {} deleting author ID: {}", ctx.user.username, id);
    delete_author(&id, &state.connection)?;
    Ok(StatusCode::NO_CONTENT)
}

/* Books */

/// `?author_id=<uuid>` filter for the book list.
#[derive(Debug, Deserialize)]
struct BookFilter {
    author_id: Option<Uuid>,
}

async fn read_books(
    State(state): State<Bookstore>,
    Query(page): Query<Pagination>,
    Query(filter): Query<BookFilter>,
) -> WebResult<Json<Vec<BookApi>>> {
    Ok(Json(list_books(
        &state.connection,
        filter.author_id.as_ref(),
        page.skip(),
        page.limit(),
    )?))
}

async fn read_book(
    State(state): State<Bookstore>,
    Path(id): Path<Uuid>,
) -> WebResult<Json<BookWithAuthor>> {
    Ok(Json(get_book(&id, &state.connection)?))
}

async fn post_book(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Json(payload): Json<BookPost>,
) -> WebResult<(StatusCode, Json<BookApi>)> {
    info!("User {} creating book: {}", ctx.user.username, payload.title);
    let book = create_book(payload, &state.connection)?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn put_book(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Path(id): Path<Uuid>,
    Json(payload): Json<BookUpdate>,
) -> WebResult<Json<BookApi>> {
    info!("User {} updating book ID: {}", ctx.user.username, id);
    Ok(Json(update_book(&id, payload, &state.connection)?))
}

async fn remove_book(
    State(state): State<Bookstore>,
    ctx: Ctx,
    Path(id): Path<Uuid>,
) -> WebResult<StatusCode> {
    info!("User {} deleting book ID: {}", ctx.user.username, id);
    delete_book(&id, &state.connection)?;
    Ok(StatusCode::NO_CONTENT)
}
