use std::time::Duration;

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use skyfare_core::{StoreError, StoreResult};

/// Shared HTTP client for the hosted REST collections.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> StoreResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> StoreResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> StoreResult<T> {
        let response = self
            .http
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> StoreResult<()> {
        let response = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        Self::check(response)?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> StoreResult<T> {
        let response = Self::check(response)?;
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn check(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound),
            status => Err(StoreError::Status {
                code: status.as_u16(),
            }),
        }
    }
}
