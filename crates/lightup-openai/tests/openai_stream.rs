// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end provider tests against a wiremock server.

use std::time::Duration;

use futures::StreamExt;
use lightup_core::{ProviderAdapter, ProviderRequest, StreamChunk};
use lightup_openai::client::ChatClient;
use lightup_openai::{Flavor, OpenAiCompatProvider};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse(pieces: &[&str]) -> String {
    let mut body = String::new();
    for piece in pieces {
        let payload = serde_json::json!({"choices": [{"delta": {"content": piece}}]});
        body.push_str(&format!("data: {payload}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

async fn provider_for(server: &MockServer, flavor: Flavor) -> OpenAiCompatProvider {
    let client = ChatClient::new(
        &format!("{}/v1", server.uri()),
        Some("test-key"),
        Duration::from_secs(5),
        flavor.label(),
    )
    .unwrap();
    OpenAiCompatProvider::new(flavor, client, "grok-2-latest")
}

#[tokio::test]
async fn stream_yields_chunks_then_done() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "grok-2-latest",
            "messages": [{"role": "system", "content": "sys"}, {"role": "user", "content": "hi"}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse(&["Hello ", "world"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Flavor::Xai).await;
    let chunks: Vec<StreamChunk> = provider
        .stream(ProviderRequest::single(Some("sys".into()), "hi"))
        .await
        .unwrap()
        .map(|c| c.unwrap())
        .collect()
        .await;

    assert_eq!(
        chunks,
        vec![
            StreamChunk::text("Hello "),
            StreamChunk::text("world"),
            StreamChunk::Done
        ]
    );
}

#[tokio::test]
async fn complete_collects_stream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse(&["a", "b", "c"])),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server, Flavor::OpenAi).await;
    let response = provider
        .complete(ProviderRequest::single(None, "x"))
        .await
        .unwrap();
    assert_eq!(response.content, "abc");
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Flavor::OpenAi).await;
    let err = provider
        .complete(ProviderRequest::single(None, "x"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "OpenAI API error (401): Incorrect API key provided"
    );
}
