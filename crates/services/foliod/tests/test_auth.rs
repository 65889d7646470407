use std::error::Error;

use common::{FOLIOD, login, register, test_context::TestContext};
use diesel::prelude::*;
use folio_auth::auth_body::AuthBody;
use folio_web::user::{UserApi, UserLoginRequest, UserPost, UserUpdate};
use reqwest::StatusCode;
use serial_test::serial;

mod common;

#[tokio::test]
#[serial]
async fn test_register_and_login() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let payload = UserPost {
        username: String::from("alice"),
        password: String::from("secret1"),
    };
    let body: serde_json::Value = FOLIOD
        .post(&client, "auth/register", &payload, None)
        .await?;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["is_active"], true);
    // The password must not appear in the response in any form.
    assert!(body.get("password").is_none());
    assert!(body.get("hash").is_none());

    // Second registration with the same username fails.
    let status = FOLIOD
        .post_status(&client, "auth/register", &payload, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Wrong password is rejected without revealing which part was wrong.
    let status = FOLIOD
        .post_status(
            &client,
            "auth/login",
            &UserLoginRequest::new("alice", "wrong"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // So is an unknown username.
    let status = FOLIOD
        .post_status(
            &client,
            "auth/login",
            &UserLoginRequest::new("nobody", "secret1"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token: AuthBody = login(&client, "alice", "secret1").await?;
    assert_eq!(token.token_type, "Bearer");

    let me: UserApi = FOLIOD
        .get(&client, "users/me", Some(&token.access_token))
        .await?;
    assert_eq!(me.username, "alice");

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_protected_routes_require_token() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let status = FOLIOD.get_status(&client, "users/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let status = FOLIOD
        .get_status(&client, "users/me", Some("not-a-valid-token"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let status = FOLIOD.get_status(&client, "users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_deactivated_user_is_rejected_mid_session() -> Result<(), Box<dyn Error>> {
    let (mut db, client) = TestContext::from_env();

    register(&client, "carol", "secret1").await?;
    let token: AuthBody = login(&client, "carol", "secret1").await?;

    // The token works.
    let status = FOLIOD
        .get_status(&client, "users/me", Some(&token.access_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Deactivate the account behind the token's back.
    diesel::sql_query("UPDATE users SET is_active = FALSE WHERE username = 'carol'")
        .execute(&mut db.conn)
        .expect("Couldn't deactivate user");

    // The unexpired, properly signed token no longer grants access.
    let status = FOLIOD
        .get_status(&client, "users/me", Some(&token.access_token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_deleted_user_is_rejected_mid_session() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let user = register(&client, "dave", "secret1").await?;
    let token: AuthBody = login(&client, "dave", "secret1").await?;

    let status = FOLIOD
        .delete(
            &client,
            &format!("users/{}", user.id),
            Some(&token.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The account is gone; the still-valid token resolves to nobody.
    let status = FOLIOD
        .get_status(&client, "users/me", Some(&token.access_token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_users_can_only_mutate_themselves() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    register(&client, "alice", "secret1").await?;
    let bob = register(&client, "bob", "secret2").await?;
    let alice_token: AuthBody = login(&client, "alice", "secret1").await?;

    let update = UserUpdate {
        username: Some(String::from("mallory")),
        ..Default::default()
    };
    let status = FOLIOD
        .put_status(
            &client,
            &format!("users/{}", bob.id),
            &update,
            Some(&alice_token.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let status = FOLIOD
        .delete(
            &client,
            &format!("users/{}", bob.id),
            Some(&alice_token.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_self_update() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    let user = register(&client, "alice", "secret1").await?;
    let token: AuthBody = login(&client, "alice", "secret1").await?;

    // Updating the password invalidates the old one for future logins.
    let update = UserUpdate {
        password: Some(String::from("betterpassword")),
        ..Default::default()
    };
    let status = FOLIOD
        .put_status(
            &client,
            &format!("users/{}", user.id),
            &update,
            Some(&token.access_token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let status = FOLIOD
        .post_status(
            &client,
            "auth/login",
            &UserLoginRequest::new("alice", "secret1"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token: AuthBody = login(&client, "alice", "betterpassword").await?;

    // Renaming the account works with a fresh token...
    let update = UserUpdate {
        username: Some(String::from("alice2")),
        ..Default::default()
    };
    let updated: UserApi = FOLIOD
        .put(
            &client,
            &format!("users/{}", user.id),
            &update,
            Some(&token.access_token),
        )
        .await?;
    assert_eq!(updated.username, "alice2");

    // ...but tokens carry the old username as subject and die with it.
    let status = FOLIOD
        .get_status(&client, "users/me", Some(&token.access_token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login(&client, "alice2", "betterpassword").await?;

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_register_validation() -> Result<(), Box<dyn Error>> {
    let (_db, client) = TestContext::from_env();

    // Username too short.
    let payload = UserPost {
        username: String::from("al"),
        password: String::from("secret1"),
    };
    let status = FOLIOD
        .post_status(&client, "auth/register", &payload, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Password too short.
    let payload = UserPost {
        username: String::from("alice"),
        password: String::from("short"),
    };
    let status = FOLIOD
        .post_status(&client, "auth/register", &payload, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}
