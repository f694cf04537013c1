// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! The SQL files under `migrations/` are compiled into the binary at build
//! time via `embed_migrations!` and run whenever a database is opened.

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Table where refinery records applied migrations.
pub const HISTORY_TABLE: &str = "refinery_schema_history";

/// Runs all pending migrations and returns how many were applied.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<usize, refinery::Error> {
    let report = embedded::migrations::runner().run(conn)?;
    Ok(report.applied_migrations().len())
}

/// Number of migrations embedded in this build.
pub fn embedded_count() -> usize {
    embedded::migrations::runner().get_migrations().len()
}
