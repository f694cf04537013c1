// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for LightUp.
//!
//! Provides a WAL-mode SQLite database with embedded refinery migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, a key/value
//! [`SqliteStore`] implementing `StorageAdapter`, and typed accessors for
//! the settings, mode, translation, enabled and locale keys.

pub mod accessors;
pub mod database;
pub mod migrations;
pub mod queries;
pub mod store;

pub use database::{Database, map_tr_err};
pub use store::SqliteStore;
