// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory-augmented text processing.
//!
//! One request runs through these steps:
//! 1. load settings, translation settings and the stored conversation context
//! 2. pick the provider (and consume a daily action for the basic model)
//! 3. retrieve memories and build prompts for the quality level
//! 4. stream the answer, scoring each chunk
//! 5. after `Done` has been emitted, record both turns in memory and save
//!    the context on a background task

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use lightup_config::{MemoryConfig, QualityLevel};
use lightup_context::{PromptBuilder, QaPair};
use lightup_core::{
    ChunkStream, LightupError, Message, Mode, ModelType, ProviderAdapter, ProviderMessage,
    ProviderRequest, StorageAdapter, StreamChunk,
};
use lightup_memory::retrieval::query_words;
use lightup_memory::{
    ConversationContext, ConversationMemoryManager, RelevantContext, load_context, save_context,
};
use lightup_ratelimit::RateLimiter;
use lightup_storage::accessors::{load_settings, load_translation_settings};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dispatch::ProviderFactory;
use crate::request::{AnnotatedChunk, AnnotatedStream, ProcessTextRequest};
use crate::scoring::{confidence_score, relevance_score};

/// Mode the summarizer is built with, so mode-aware backends treat the
/// summary prompt as plain chat.
const SUMMARY_MODE: Mode = Mode::Free;

/// Result of recording one finished exchange in conversation memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryUpdate {
    /// The request id, when the request carried one.
    pub id: Option<String>,
    /// False when the answer was empty or the context could not be saved.
    pub recorded: bool,
}

type PendingRecords = Arc<Mutex<Vec<(Option<String>, JoinHandle<bool>)>>>;

/// Runs requests against the provider selected in settings.
#[derive(Clone)]
pub struct EnhancedProcessor {
    storage: Arc<dyn StorageAdapter>,
    providers: Arc<dyn ProviderFactory>,
    memory_config: MemoryConfig,
    rate_limiter: Option<RateLimiter>,
    pending: PendingRecords,
}

impl EnhancedProcessor {
    pub fn new(
        storage: Arc<dyn StorageAdapter>,
        providers: Arc<dyn ProviderFactory>,
        memory_config: MemoryConfig,
    ) -> Self {
        Self {
            storage,
            providers,
            memory_config,
            rate_limiter: None,
            pending: PendingRecords::default(),
        }
    }

    /// A processor that sends every request to `provider`.
    pub fn with_provider(
        storage: Arc<dyn StorageAdapter>,
        provider: Arc<dyn ProviderAdapter>,
        memory_config: MemoryConfig,
    ) -> Self {
        Self::new(storage, Arc::new(provider), memory_config)
    }

    /// Requests for the basic model consume one daily action from `limiter`.
    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn storage(&self) -> &Arc<dyn StorageAdapter> {
        &self.storage
    }

    /// Waits for every memory update started so far and reports each one.
    ///
    /// Memory is recorded after the terminal `Done` chunk has been handed
    /// out, so callers that need the stored context (or exit right after a
    /// request) await this first.
    pub async fn flush_memory(&self) -> Vec<MemoryUpdate> {
        let pending = std::mem::take(&mut *self.pending.lock().await);
        let mut updates = Vec::with_capacity(pending.len());
        for (id, handle) in pending {
            let recorded = match handle.await {
                Ok(recorded) => recorded,
                Err(e) => {
                    warn!(error = %e, "memory update task failed");
                    false
                }
            };
            updates.push(MemoryUpdate { id, recorded });
        }
        updates
    }

    /// Streams the answer to `request`.
    ///
    /// The stream always ends with exactly one `Done` or `Error` chunk; a
    /// failure before the provider answers becomes that single `Error`.
    pub async fn process_text_enhanced(&self, request: ProcessTextRequest) -> AnnotatedStream {
        let id = request.id.clone();
        let is_follow_up = request.is_follow_up;

        match self.start(request).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(error = %e, "request failed before streaming");
                let chunk = AnnotatedChunk::new(StreamChunk::error(e.to_string()), id, is_follow_up);
                Box::pin(stream::once(async move { chunk }))
            }
        }
    }

    async fn start(&self, request: ProcessTextRequest) -> Result<AnnotatedStream, LightupError> {
        // The previous exchange must be in memory before this one reads it.
        self.flush_memory().await;

        let storage = self.storage.as_ref();
        let settings = load_settings(storage).await?;
        let translation = load_translation_settings(storage).await?;
        let context = load_context(storage).await?;
        let quality = settings.customization.quality_level;

        let provider = self.providers.create(&settings, request.mode)?;
        if settings.model_type == ModelType::Basic
            && let Some(limiter) = &self.rate_limiter
        {
            limiter.check_and_increment().await?;
        }

        let summarizer = if request.mode == SUMMARY_MODE {
            Arc::clone(&provider)
        } else {
            self.providers.create(&settings, SUMMARY_MODE)?
        };
        let memory = ConversationMemoryManager::new(self.memory_config.clone())
            .with_summarizer(summarizer)
            .with_customization(&settings.customization);
        let memories = match quality {
            QualityLevel::Fast => Vec::new(),
            QualityLevel::Balanced | QualityLevel::High => {
                memory.retrieve_relevant_context(&request.text, &context)
            }
        };

        let builder = PromptBuilder::new(&settings, &translation);
        let (system_prompt, user_prompt) =
            build_prompts(&builder, &request, quality, &memories, &context);

        info!(
            mode = %request.mode,
            %quality,
            provider = provider.name(),
            memories = memories.len(),
            follow_up = request.is_follow_up,
            "processing text"
        );
        let upstream = provider
            .stream(ProviderRequest {
                model: None,
                system_prompt: Some(system_prompt),
                messages: vec![ProviderMessage::user(user_prompt)],
                max_tokens: settings.max_tokens,
                temperature: settings.temperature,
            })
            .await?;

        let state = StreamState {
            upstream: Some(upstream),
            answer: String::new(),
            query_words: query_words(&request.text),
            used_memories: !memories.is_empty(),
            id: request.id,
            is_follow_up: request.is_follow_up,
            pending: Arc::clone(&self.pending),
            recorder: Some(TurnRecorder {
                storage: Arc::clone(&self.storage),
                memory,
                context,
                user_text: request.text,
            }),
        };
        Ok(Box::pin(stream::unfold(state, next_chunk)))
    }
}

/// System and user prompt for the request's quality level.
///
/// Follow-ups quote the original text and earlier answers instead of memories.
fn build_prompts(
    builder: &PromptBuilder<'_>,
    request: &ProcessTextRequest,
    quality: QualityLevel,
    memories: &[RelevantContext],
    context: &ConversationContext,
) -> (String, String) {
    let mode = request.mode;

    if request.is_follow_up
        && let Some(follow_up) = &request.follow_up
    {
        let previous: Vec<QaPair<'_>> = follow_up
            .previous
            .iter()
            .map(|qa| QaPair {
                question: &qa.question,
                answer: &qa.answer,
            })
            .collect();
        let user = builder.follow_up_prompt(
            &follow_up.original_text,
            &follow_up.main_answer,
            &previous,
            &request.text,
        );
        return (builder.follow_up_system_prompt(mode), user);
    }

    let system = match quality {
        QualityLevel::High => builder.build_enhanced_system_prompt(mode, context),
        QualityLevel::Fast | QualityLevel::Balanced => builder.system_prompt(mode),
    };
    let user = match quality {
        QualityLevel::Fast => builder.user_prompt(mode, &request.text),
        QualityLevel::Balanced | QualityLevel::High => {
            builder.build_contextual_prompt(&request.text, mode, memories)
        }
    };
    (system, user)
}

struct StreamState {
    /// `None` once a terminal chunk has been emitted.
    upstream: Option<ChunkStream>,
    answer: String,
    query_words: Vec<String>,
    used_memories: bool,
    id: Option<String>,
    is_follow_up: bool,
    pending: PendingRecords,
    recorder: Option<TurnRecorder>,
}

impl StreamState {
    fn scored(&self, chunk: StreamChunk) -> AnnotatedChunk {
        let mut annotated = AnnotatedChunk::new(chunk, self.id.clone(), self.is_follow_up);
        annotated.confidence_score = Some(confidence_score(&self.answer));
        annotated.relevance_score = Some(relevance_score(
            &self.query_words,
            &self.answer,
            self.used_memories,
        ));
        annotated
    }

    fn unscored(&self, chunk: StreamChunk) -> AnnotatedChunk {
        AnnotatedChunk::new(chunk, self.id.clone(), self.is_follow_up)
    }
}

async fn next_chunk(mut state: StreamState) -> Option<(AnnotatedChunk, StreamState)> {
    let upstream = state.upstream.as_mut()?;
    let item = upstream.next().await;

    let out = match item {
        Some(Ok(StreamChunk::Chunk { content })) => {
            state.answer.push_str(&content);
            state.scored(StreamChunk::Chunk { content })
        }
        Some(Ok(StreamChunk::Done)) | None => {
            state.upstream = None;
            if let Some(recorder) = state.recorder.take() {
                let handle = tokio::spawn(recorder.record(state.answer.clone()));
                state.pending.lock().await.push((state.id.clone(), handle));
            }
            debug!(chars = state.answer.chars().count(), "answer complete");
            state.scored(StreamChunk::Done)
        }
        Some(Ok(StreamChunk::Error { error })) => {
            state.upstream = None;
            warn!(%error, "provider reported an error mid-stream");
            state.unscored(StreamChunk::Error { error })
        }
        Some(Err(e)) => {
            state.upstream = None;
            warn!(error = %e, "provider stream failed");
            state.unscored(StreamChunk::error(e.to_string()))
        }
    };
    Some((out, state))
}

/// Feeds a finished exchange into conversation memory.
struct TurnRecorder {
    storage: Arc<dyn StorageAdapter>,
    memory: ConversationMemoryManager,
    context: ConversationContext,
    user_text: String,
}

impl TurnRecorder {
    /// Returns whether the exchange was saved.
    async fn record(mut self, answer: String) -> bool {
        if answer.trim().is_empty() {
            debug!("empty answer, memory left unchanged");
            return false;
        }
        self.memory
            .manage_conversation_buffer(&mut self.context, Message::user(self.user_text))
            .await;
        self.memory
            .manage_conversation_buffer(&mut self.context, Message::assistant(answer))
            .await;

        // Memory is best effort; the answer has already been delivered.
        match save_context(self.storage.as_ref(), &self.context).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save conversation context");
                false
            }
        }
    }
}
