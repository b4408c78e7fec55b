// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::http::fake::FakeHttpClient;
use crate::http::HttpResponse;
use serde_json::json;

fn ok_response(body: serde_json::Value) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse { status: 200, body: body.to_string() })
}

fn sample_request() -> UploadRequest {
    UploadRequest {
        filename: "heatmap.png".into(),
        bytes: vec![1, 2, 3],
        content_type: "image/png".into(),
        title: "Weekly heatmap".into(),
        channel_id: Some("C123".into()),
        initial_comment: None,
        share_publicly: false,
    }
}

#[tokio::test]
async fn happy_path_runs_all_three_legs_in_order() {
    let http = FakeHttpClient::new(vec![
        ok_response(json!({"ok": true, "upload_url": "https://up.example.com/x", "file_id": "F1"})),
        ok_response(json!({"ok": true})),
        ok_response(json!({"ok": true, "files": [{"permalink": "https://chat.example.com/F1"}]})),
    ]);
    let adapter = WebApiUploadAdapter::new(http, "https://slack.example.com/api", "xoxb-token");
    let outcome = adapter.upload(sample_request()).await.expect("upload");
    assert_eq!(outcome.file_id, "F1");
    assert_eq!(outcome.permalink.as_deref(), Some("https://chat.example.com/F1"));
    assert_eq!(outcome.permalink_public, None);

    let requests = adapter.http.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].url.ends_with("getUploadURLExternal"));
    assert_eq!(requests[1].url, "https://up.example.com/x");
    assert!(requests[2].url.ends_with("completeUploadExternal"));
}

#[tokio::test]
async fn leg_one_api_error_surfaces_as_api_error() {
    let http = FakeHttpClient::new(vec![ok_response(json!({"ok": false, "error": "invalid_auth"}))]);
    let adapter = WebApiUploadAdapter::new(http, "https://slack.example.com/api", "bad-token");
    let err = adapter.upload(sample_request()).await.unwrap_err();
    assert!(matches!(err, UploadError::Api(msg) if msg.contains("invalid_auth")));
}

#[tokio::test]
async fn leg_two_http_error_surfaces_as_http_error() {
    let http = FakeHttpClient::new(vec![
        ok_response(json!({"ok": true, "upload_url": "https://up.example.com/x", "file_id": "F1"})),
        Ok(HttpResponse { status: 500, body: "boom".into() }),
    ]);
    let adapter = WebApiUploadAdapter::new(http, "https://slack.example.com/api", "tok");
    let err = adapter.upload(sample_request()).await.unwrap_err();
    assert!(matches!(err, UploadError::Http(HttpError::Status { status: 500, .. })));
}

#[tokio::test]
async fn public_share_falls_back_to_files_info_when_shared_public_url_fails() {
    let http = FakeHttpClient::new(vec![
        ok_response(json!({"ok": true, "upload_url": "https://up.example.com/x", "file_id": "F1"})),
        ok_response(json!({"ok": true})),
        ok_response(json!({"ok": true, "files": [{"permalink": "https://chat.example.com/F1"}]})),
        ok_response(json!({"ok": false, "error": "already_public"})),
        ok_response(json!({"ok": true, "file": {"permalink_public": "https://public.example.com/F1"}})),
    ]);
    let adapter = WebApiUploadAdapter::new(http, "https://slack.example.com/api", "tok");
    let mut req = sample_request();
    req.share_publicly = true;
    let outcome = adapter.upload(req).await.expect("upload");
    assert_eq!(outcome.permalink_public.as_deref(), Some("https://public.example.com/F1"));
}

#[tokio::test]
async fn public_share_returns_none_rather_than_error_when_unavailable() {
    let http = FakeHttpClient::new(vec![
        ok_response(json!({"ok": true, "upload_url": "https://up.example.com/x", "file_id": "F1"})),
        ok_response(json!({"ok": true})),
        ok_response(json!({"ok": true, "files": [{"permalink": "https://chat.example.com/F1"}]})),
        ok_response(json!({"ok": false, "error": "already_public"})),
        ok_response(json!({"ok": false, "error": "file_not_found"})),
    ]);
    let adapter = WebApiUploadAdapter::new(http, "https://slack.example.com/api", "tok");
    let mut req = sample_request();
    req.share_publicly = true;
    let outcome = adapter.upload(req).await.expect("upload should still succeed");
    assert_eq!(outcome.permalink_public, None);
}
