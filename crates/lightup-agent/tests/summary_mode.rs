// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation summaries sent through the basic proxy use plain chat mode.

use std::sync::Arc;

use futures::StreamExt;
use lightup_agent::{AnnotatedChunk, DefaultProviderFactory, EnhancedProcessor, ProcessTextRequest};
use lightup_config::{MemoryConfig, ProvidersConfig};
use lightup_core::Mode;
use lightup_memory::load_context;
use lightup_test_utils::MemoryStorage;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SSE_BODY: &str = "data: {\"content\":\"Bonjour le monde\"}\n\ndata: [DONE]\n\n";

#[tokio::test]
async fn summary_request_is_sent_in_free_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/basic/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(SSE_BODY),
        )
        .expect(2)
        .mount(&server)
        .await;

    let providers = ProvidersConfig {
        basic_url: format!("{}/api/v1/basic/generate", server.uri()),
        basic_max_attempts: 1,
        ..ProvidersConfig::default()
    };
    let storage = MemoryStorage::new();
    let processor = EnhancedProcessor::new(
        Arc::new(storage.clone()),
        Arc::new(DefaultProviderFactory::new(providers)),
        MemoryConfig {
            summary_trigger_size: 2,
            ..MemoryConfig::default()
        },
    );

    let chunks: Vec<AnnotatedChunk> = processor
        .process_text_enhanced(ProcessTextRequest::new("Hello world", Mode::Translate))
        .await
        .collect()
        .await;
    assert_eq!(
        chunks.iter().filter_map(|c| c.text()).collect::<String>(),
        "Bonjour le monde"
    );
    processor.flush_memory().await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let answer: serde_json::Value = requests[0].body_json().unwrap();
    let summary: serde_json::Value = requests[1].body_json().unwrap();
    assert_eq!(answer["mode"], "translate");
    assert_eq!(summary["mode"], "free");

    let context = load_context(&storage).await.unwrap();
    assert_eq!(context.long_term_memory.len(), 1);
}
