// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin HTTP transport trait. The activity provider, chat adapters, and
//! analyzer all go through this instead of holding a `reqwest::Client`
//! directly, so tests can substitute a recorded/fake client.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out")]
    Timeout,
    #[error("non-2xx response: status {status}, body: {body}")]
    Status { status: u16, body: String },
    #[error("response body was not valid JSON: {0}")]
    InvalidJson(String),
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::InvalidJson(e.to_string()))
    }
}

/// A request body, already serialized, plus its declared content type.
pub enum Body {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
    Bytes { content_type: String, data: Vec<u8> },
    None,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError>;

    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Body,
    ) -> Result<HttpResponse, HttpError>;
}

/// Production client backed by `reqwest`.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Connect(e.to_string()))?;
        Ok(Self { client })
    }

    fn map_err(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Connect(err.to_string())
        }
    }

    async fn to_response(resp: reqwest::Response) -> Result<HttpResponse, HttpError> {
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(Self::map_err)?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, HttpError> {
        let mut req = self.client.get(url);
        for (k, v) in headers {
            req = req.header(*k, *v);
        }
        let resp = req.send().await.map_err(Self::map_err)?;
        Self::to_response(resp).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Body,
    ) -> Result<HttpResponse, HttpError> {
        let mut req = self.client.post(url);
        for (k, v) in headers {
            req = req.header(*k, *v);
        }
        req = match body {
            Body::Json(value) => req.json(&value),
            Body::Form(pairs) => req.form(&pairs),
            Body::Bytes { content_type, data } => req.header("content-type", content_type).body(data),
            Body::None => req,
        };
        let resp = req.send().await.map_err(Self::map_err)?;
        Self::to_response(resp).await
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub headers: Vec<(String, String)>,
    }

    /// A scripted client: each call to `get`/`post` pops the next queued
    /// response (or the last one, if only one was queued).
    pub struct FakeHttpClient {
        responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl FakeHttpClient {
        pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().clone()
        }

        fn next(&self) -> Result<HttpResponse, HttpError> {
            let mut responses = self.responses.lock();
            if responses.len() > 1 {
                responses.remove(0)
            } else {
                responses
                    .first()
                    .cloned()
                    .unwrap_or(Err(HttpError::Connect("no fake response queued".into())))
            }
        }
    }

    #[async_trait]
    impl HttpClient for FakeHttpClient {
        async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, HttpError> {
            self.requests.lock().push(RecordedRequest {
                method: "GET",
                url: url.to_string(),
                headers: headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            });
            self.next()
        }

        async fn post(
            &self,
            url: &str,
            headers: &[(&str, &str)],
            _body: Body,
        ) -> Result<HttpResponse, HttpError> {
            self.requests.lock().push(RecordedRequest {
                method: "POST",
                url: url.to_string(),
                headers: headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            });
            self.next()
        }
    }
}
