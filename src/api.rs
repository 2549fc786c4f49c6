//! API client for the search process backend.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::model::SearchSnapshot;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Http(response.status()));
        }
        Ok(response.json::<T>().await?)
    }

    async fn post<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Http(response.status()));
        }
        Ok(())
    }

    /// One-shot snapshot fetch, used at startup.
    pub async fn fetch_snapshot(&self) -> Result<SearchSnapshot, ApiError> {
        self.get("/api/data").await
    }

    /// Cache-busted snapshot fetch for the poll loop: the backend rewrites
    /// the data file in place, so each tick carries a fresh epoch-ms query
    /// parameter.
    pub async fn fetch_snapshot_fresh(&self) -> Result<SearchSnapshot, ApiError> {
        let t = chrono::Utc::now().timestamp_millis();
        self.get(&format!("/api/data?t={t}")).await
    }

    pub async fn start_search(&self, pattern: &str) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct StartRequest<'a> {
            pattern: &'a str,
        }
        self.post("/api/start-search", Some(&StartRequest { pattern }))
            .await
    }

    pub async fn pause_search(&self) -> Result<(), ApiError> {
        self.post::<()>("/api/pause-search", None).await
    }

    pub async fn resume_search(&self) -> Result<(), ApiError> {
        self.post::<()>("/api/resume-search", None).await
    }

    pub async fn stop_server(&self) -> Result<(), ApiError> {
        self.post::<()>("/api/stop-server", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = ApiClient::new("http://localhost:8000/");
        assert_eq!(api.base_url(), "http://localhost:8000");
    }
}
