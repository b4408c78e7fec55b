// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Three-leg external file upload against the chat Web API:
//! `getUploadURLExternal` → PUT bytes → `completeUploadExternal`, with an
//! optional public-share flow.

use crate::http::{Body, HttpClient, HttpError};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("transport error: {0}")]
    Http(#[from] HttpError),
    #[error("upstream API error: {0}")]
    Api(String),
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub title: String,
    pub channel_id: Option<String>,
    pub initial_comment: Option<String>,
    pub share_publicly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub file_id: String,
    pub permalink: Option<String>,
    pub permalink_public: Option<String>,
}

#[async_trait]
pub trait UploadAdapter: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome, UploadError>;
}

pub struct WebApiUploadAdapter<H: HttpClient> {
    http: H,
    base_url: String,
    bot_token: String,
}

impl<H: HttpClient> WebApiUploadAdapter<H> {
    pub fn new(http: H, base_url: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), bot_token: bot_token.into() }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.bot_token)
    }

    async fn get_upload_url(&self, filename: &str, length: usize) -> Result<(String, String), UploadError> {
        let url = format!("{}/files.getUploadURLExternal", self.base_url);
        let auth = self.auth_header();
        let resp = self
            .http
            .post(
                &url,
                &[("Authorization", auth.as_str())],
                Body::Form(vec![
                    ("filename".into(), filename.to_string()),
                    ("length".into(), length.to_string()),
                ]),
            )
            .await?;
        if !resp.is_success() {
            return Err(UploadError::Http(HttpError::Status { status: resp.status, body: resp.body }));
        }
        let payload: Value = resp.json()?;
        check_ok(&payload)?;
        let upload_url = payload["upload_url"].as_str().unwrap_or_default().to_string();
        let file_id = payload["file_id"].as_str().unwrap_or_default().to_string();
        Ok((upload_url, file_id))
    }

    async fn put_bytes(&self, upload_url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), UploadError> {
        let resp = self
            .http
            .post(upload_url, &[], Body::Bytes { content_type: content_type.to_string(), data: bytes })
            .await?;
        if !resp.is_success() {
            return Err(UploadError::Http(HttpError::Status { status: resp.status, body: resp.body }));
        }
        Ok(())
    }

    async fn complete_upload(
        &self,
        file_id: &str,
        title: &str,
        channel_id: Option<&str>,
        initial_comment: Option<&str>,
    ) -> Result<Option<String>, UploadError> {
        let url = format!("{}/files.completeUploadExternal", self.base_url);
        let auth = self.auth_header();
        let files = serde_json::json!([{ "id": file_id, "title": title }]);
        let mut form = vec![("files".to_string(), files.to_string())];
        if let Some(channel_id) = channel_id {
            form.push(("channel_id".to_string(), channel_id.to_string()));
        }
        if let Some(comment) = initial_comment {
            form.push(("initial_comment".to_string(), comment.to_string()));
        }
        let resp = self.http.post(&url, &[("Authorization", auth.as_str())], Body::Form(form)).await?;
        if !resp.is_success() {
            return Err(UploadError::Http(HttpError::Status { status: resp.status, body: resp.body }));
        }
        let payload: Value = resp.json()?;
        check_ok(&payload)?;
        let permalink = payload["files"][0]["permalink"].as_str().map(str::to_string);
        Ok(permalink)
    }

    async fn share_publicly(&self, file_id: &str) -> Option<String> {
        let url = format!("{}/files.sharedPublicURL", self.base_url);
        let auth = self.auth_header();
        let resp = self
            .http
            .post(&url, &[("Authorization", auth.as_str())], Body::Form(vec![("file".into(), file_id.to_string())]))
            .await
            .ok()?;
        if resp.is_success() {
            if let Ok(payload) = resp.json::<Value>() {
                if check_ok(&payload).is_ok() {
                    if let Some(link) = payload["file"]["permalink_public"].as_str() {
                        return Some(link.to_string());
                    }
                }
            }
        }
        self.files_info_permalink_public(file_id).await
    }

    async fn files_info_permalink_public(&self, file_id: &str) -> Option<String> {
        let url = format!("{}/files.info?file={file_id}", self.base_url);
        let auth = self.auth_header();
        let resp = self.http.get(&url, &[("Authorization", auth.as_str())]).await.ok()?;
        if !resp.is_success() {
            return None;
        }
        let payload: Value = resp.json().ok()?;
        if check_ok(&payload).is_err() {
            return None;
        }
        payload["file"]["permalink_public"].as_str().map(str::to_string)
    }
}

fn check_ok(payload: &Value) -> Result<(), UploadError> {
    let ok = payload.get("ok").and_then(Value::as_bool).unwrap_or(false);
    if ok {
        return Ok(());
    }
    let error = payload.get("error").and_then(Value::as_str).unwrap_or("unknown error");
    let extra = payload["response_metadata"]["messages"]
        .as_array()
        .map(|messages| {
            messages
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|s| !s.is_empty());
    let message = match extra {
        Some(extra) => format!("{error}: {extra}"),
        None => error.to_string(),
    };
    Err(UploadError::Api(message))
}

#[async_trait]
impl<H: HttpClient> UploadAdapter for WebApiUploadAdapter<H> {
    async fn upload(&self, request: UploadRequest) -> Result<UploadOutcome, UploadError> {
        let (upload_url, file_id) = self.get_upload_url(&request.filename, request.bytes.len()).await?;
        self.put_bytes(&upload_url, request.bytes, &request.content_type).await?;
        let permalink = self
            .complete_upload(&file_id, &request.title, request.channel_id.as_deref(), request.initial_comment.as_deref())
            .await?;

        let permalink_public = if request.share_publicly {
            self.share_publicly(&file_id).await
        } else {
            None
        };

        Ok(UploadOutcome { file_id, permalink, permalink_public })
    }
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
