// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for buffer bounds, trimming and retrieval ordering.

use lightup_config::MemoryConfig;
use lightup_core::Message;
use lightup_memory::{
    ConversationContext, ConversationMemoryManager, intelligent_trim, retrieve_relevant_context,
};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

fn message_strategy() -> impl Strategy<Value = Message> {
    ("[A-Za-z ?]{0,40}", 0.0f64..10.0, any::<bool>()).prop_map(|(content, importance, user)| {
        let mut m = if user {
            Message::user(content)
        } else {
            Message::assistant(content)
        };
        m.importance = importance;
        m
    })
}

proptest! {
    #[test]
    fn window_never_exceeds_buffer_bound(
        contents in prop::collection::vec("[A-Za-z ?]{0,30}", 1..60),
        max_buffer in 2usize..25,
        window_frac in 0.1f64..1.0,
    ) {
        let context_window_size = ((max_buffer as f64 * window_frac) as usize).max(1);
        let config = MemoryConfig {
            max_buffer_size: max_buffer,
            context_window_size,
            summary_trigger_size: max_buffer,
            ..MemoryConfig::default()
        };
        let manager = ConversationMemoryManager::new(config);
        let mut context = ConversationContext::default();

        runtime().block_on(async {
            for content in &contents {
                manager
                    .manage_conversation_buffer(&mut context, Message::user(content.clone()))
                    .await;
            }
        });

        prop_assert!(context.context_window.len() <= max_buffer.max(context_window_size));
        prop_assert_eq!(context.history.len(), contents.len());
    }

    #[test]
    fn trim_length_is_min_of_input_and_size(
        window in prop::collection::vec(message_strategy(), 0..40),
        size in 0usize..30,
    ) {
        let window: Vec<Message> = window
            .into_iter()
            .enumerate()
            .map(|(i, mut m)| {
                m.content = format!("{i}:{}", m.content);
                m
            })
            .collect();
        let kept = intelligent_trim(&window, size);
        prop_assert_eq!(kept.len(), window.len().min(size));

        // Survivors keep their original relative order.
        let positions: Vec<usize> = kept
            .iter()
            .filter_map(|k| window.iter().position(|w| w.content == k.content))
            .collect();
        prop_assert_eq!(positions.len(), kept.len());
        prop_assert!(positions.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn retrieval_is_bounded_and_sorted(
        history in prop::collection::vec(message_strategy(), 0..30),
        query in "[a-z ]{0,30}",
    ) {
        let context = ConversationContext { history, ..Default::default() };
        let hits = retrieve_relevant_context(&query, &context, 5);
        prop_assert!(hits.len() <= 5);
        prop_assert!(hits.windows(2).all(|w| w[0].relevance >= w[1].relevance));
        prop_assert!(hits.iter().all(|h| h.relevance > 0.0 && h.relevance <= 1.0));
    }
}
