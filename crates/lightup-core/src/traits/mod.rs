// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Every adapter extends [`PluginAdapter`] and uses `#[async_trait]` so it
//! can be held as a trait object.

pub mod adapter;
pub mod provider;
pub mod storage;

pub use adapter::PluginAdapter;
pub use provider::{ChunkStream, ProviderAdapter};
pub use storage::{StorageAdapter, read_json, write_json};
