// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for LightUp.
//!
//! Provides the error type, the types that cross crate boundaries (modes,
//! messages, the uniform [`StreamChunk`]) and the adapter traits that
//! provider and storage backends implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::LightupError;
pub use types::{
    AdapterType, ChunkEnvelope, HealthStatus, Message, Mode, ModelType, ProviderMessage,
    ProviderRequest, ProviderResponse, Role, StreamChunk,
};

pub use traits::{
    ChunkStream, PluginAdapter, ProviderAdapter, StorageAdapter, read_json, write_json,
};
