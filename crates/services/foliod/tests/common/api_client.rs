use std::{error::Error, str::FromStr};

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};

pub struct ApiClient {
    pub url: &'static str,
}

impl ApiClient {
    fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        token: Option<&str>,
    ) -> Result<T, Box<dyn Error>> {
        let url = Url::from_str(&self.path(endpoint))?;
        let response = Self::with_token(client.get(url), token)
            .send()
            .await?
            .text()
            .await?;
        Ok(serde_json::from_str(&response)?)
    }

    pub async fn get_status(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        token: Option<&str>,
    ) -> StatusCode {
        let url = Url::from_str(&self.path(endpoint)).unwrap();
        Self::with_token(client.get(url), token)
            .send()
            .await
            .expect("Failed to send get request")
            .status()
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, Box<dyn Error>> {
        let url = Url::from_str(&self.path(endpoint))?;
        let response = Self::with_token(client.post(url), token)
            .json(body)
            .send()
            .await?
            .text()
            .await?;
        Ok(serde_json::from_str(&response)?)
    }

    pub async fn post_status<B: Serialize>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: &B,
        token: Option<&str>,
    ) -> StatusCode {
        let url = Url::from_str(&self.path(endpoint)).unwrap();
        Self::with_token(client.post(url), token)
            .json(body)
            .send()
            .await
            .expect("Failed to send post request")
            .status()
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, Box<dyn Error>> {
        let url = Url::from_str(&self.path(endpoint))?;
        let response = Self::with_token(client.put(url), token)
            .json(body)
            .send()
            .await?
            .text()
            .await?;
        Ok(serde_json::from_str(&response)?)
    }

    pub async fn put_status<B: Serialize>(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        body: &B,
        token: Option<&str>,
    ) -> StatusCode {
        let url = Url::from_str(&self.path(endpoint)).unwrap();
        Self::with_token(client.put(url), token)
            .json(body)
            .send()
            .await
            .expect("Failed to send put request")
            .status()
    }

    pub async fn delete(
        &self,
        client: &reqwest::Client,
        endpoint: &str,
        token: Option<&str>,
    ) -> StatusCode {
        let url = Url::from_str(&self.path(endpoint)).unwrap();
        Self::with_token(client.delete(url), token)
            .send()
            .await
            .expect("Failed to send delete request")
            .status()
    }
}
