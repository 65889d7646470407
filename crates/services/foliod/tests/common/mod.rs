#![allow(dead_code)]

use std::error::Error;

use api_client::ApiClient;
use folio_auth::auth_body::AuthBody;
use folio_web::user::{UserApi, UserLoginRequest, UserPost};

pub mod api_client;
pub mod db_test_context;
pub mod test_context;

pub static FOLIOD: ApiClient = ApiClient {
    url: "http://localhost:3000/v1",
};

pub fn from_env(var: &str) -> String {
    std::env::var(var).expect(&format!("Env Variable '{}' missing", var))
}

pub async fn register(
    client: &reqwest::Client,
    username: &str,
    password: &str,
) -> Result<UserApi, Box<dyn Error>> {
    let payload = UserPost {
        username: String::from(username),
        password: String::from(password),
    };
    FOLIOD.post(client, "auth/register", &payload, None).await
}

pub async fn login(
    client: &reqwest::Client,
    username: &str,
    password: &str,
) -> Result<AuthBody, Box<dyn Error>> {
    let payload = UserLoginRequest::new(username, password);
    FOLIOD.post(client, "auth/login", &payload, None).await
}
