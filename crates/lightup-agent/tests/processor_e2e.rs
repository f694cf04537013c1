// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end processor tests over SQLite storage and a mock provider.

use std::sync::Arc;

use futures::StreamExt;
use lightup_agent::{AnnotatedChunk, EnhancedProcessor, ProcessTextRequest};
use lightup_config::{MemoryConfig, RateLimitConfig, StorageConfig};
use lightup_core::{Mode, Role, StreamChunk};
use lightup_memory::load_context;
use lightup_ratelimit::RateLimiter;
use lightup_storage::SqliteStore;
use lightup_test_utils::MockProvider;

async fn store() -> (tempfile::TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        database_path: dir.path().join("lightup.db").display().to_string(),
    };
    let store = SqliteStore::open(&config).await.unwrap();
    (dir, store)
}

fn answer_text(chunks: &[AnnotatedChunk]) -> String {
    chunks.iter().filter_map(|c| c.text()).collect()
}

#[tokio::test]
async fn streamed_answer_accumulates_and_is_remembered() {
    let (_dir, store) = store().await;
    let provider = MockProvider::with_chunks(&["Hello ", "world"]);
    let processor = EnhancedProcessor::with_provider(
        Arc::new(store.clone()),
        Arc::new(provider.clone()),
        MemoryConfig::default(),
    );

    let chunks: Vec<AnnotatedChunk> = processor
        .process_text_enhanced(ProcessTextRequest::new("Tell me about Alice Smith", Mode::Free))
        .await
        .collect()
        .await;

    assert_eq!(answer_text(&chunks), "Hello world");
    assert_eq!(chunks.last().unwrap().chunk(), &StreamChunk::Done);
    assert!(chunks.iter().all(|c| c.confidence_score.is_some()));

    processor.flush_memory().await;
    let context = load_context(&store).await.unwrap();
    let roles: Vec<Role> = context.history.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(context.history[1].content, "Hello world");
    assert!(context.entities.iter().any(|e| e.name == "Alice Smith"));

    let request = &provider.requests().await[0];
    assert_eq!(request.messages[0].role, Role::User);
    assert!(request.system_prompt.is_some());
}

#[tokio::test]
async fn basic_model_requests_stop_at_the_daily_limit() {
    let (_dir, store) = store().await;
    let limiter = RateLimiter::new(
        store.database().clone(),
        &RateLimitConfig {
            enabled: true,
            daily_limit: 2,
        },
    );
    let provider = MockProvider::new();
    let processor = EnhancedProcessor::with_provider(
        Arc::new(store.clone()),
        Arc::new(provider.clone()),
        MemoryConfig::default(),
    )
    .with_rate_limiter(limiter);

    let mut last = Vec::new();
    for _ in 0..3 {
        last = processor
            .process_text_enhanced(ProcessTextRequest::new("hi", Mode::Explain))
            .await
            .collect::<Vec<_>>()
            .await;
    }

    assert_eq!(last.len(), 1);
    match last[0].chunk() {
        StreamChunk::Error { error } => assert!(error.starts_with("Daily action limit reached")),
        other => panic!("expected error chunk, got {other:?}"),
    }
    assert_eq!(provider.call_count().await, 2);
}
