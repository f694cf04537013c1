// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for LightUp integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without network access or a database file.
//!
//! # Components
//!
//! - [`MockProvider`] - scripted LLM provider that records its requests
//! - [`MemoryStorage`] - in-memory key/value store

pub mod memory_storage;
pub mod mock_provider;

pub use memory_storage::MemoryStorage;
pub use mock_provider::{MockProvider, MockReply};
