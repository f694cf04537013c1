// SPDX-FileCopyrightText: 2026 LightUp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily action limit for the hosted basic model.
//!
//! Usage is counted per UTC day in the `rate_limit_usage` table. Each
//! increment is one conditional upsert, so concurrent callers can neither
//! exceed the limit nor lose a count.

use chrono::Utc;
use lightup_config::RateLimitConfig;
use lightup_core::LightupError;
use lightup_storage::{Database, map_tr_err};
use rusqlite::OptionalExtension;
use serde::Serialize;
use tracing::{debug, warn};

/// Snapshot of one day's usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    /// UTC date, `YYYY-MM-DD`.
    pub day: String,
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
    pub enabled: bool,
}

/// Persistent daily action counter.
#[derive(Clone)]
pub struct RateLimiter {
    db: Database,
    daily_limit: u32,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(db: Database, config: &RateLimitConfig) -> Self {
        Self {
            db,
            daily_limit: config.daily_limit,
            enabled: config.enabled,
        }
    }

    pub fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    /// Consumes one action for today and returns today's count.
    ///
    /// Fails with [`LightupError::RateLimited`] once the limit is reached; a
    /// refused call does not change the count. A disabled limiter always
    /// succeeds and records nothing.
    pub async fn check_and_increment(&self) -> Result<u32, LightupError> {
        self.check_and_increment_on(&today()).await
    }

    /// [`check_and_increment`](Self::check_and_increment) for an explicit day.
    pub async fn check_and_increment_on(&self, day: &str) -> Result<u32, LightupError> {
        if !self.enabled {
            return Ok(0);
        }
        if self.daily_limit == 0 {
            return Err(limit_reached(self.daily_limit));
        }

        let limit = self.daily_limit;
        let key = day.to_string();
        let counted = self
            .db
            .connection()
            .call(move |conn| -> Result<Option<u32>, rusqlite::Error> {
                conn.query_row(
                    "INSERT INTO rate_limit_usage (day, count) VALUES (?1, 1)
                     ON CONFLICT(day) DO UPDATE SET count = count + 1 WHERE count < ?2
                     RETURNING count",
                    rusqlite::params![key, limit],
                    |row| row.get(0),
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)?;

        let Some(used) = counted else {
            debug!(day, limit, "daily action refused");
            return Err(limit_reached(limit));
        };

        if used * 5 >= limit * 4 {
            warn!(day, used, limit, "approaching daily action limit (80%+)");
        } else {
            debug!(day, used, limit, "daily action counted");
        }
        Ok(used)
    }

    /// Actions used today.
    pub async fn usage(&self) -> Result<u32, LightupError> {
        self.usage_on(&today()).await
    }

    pub async fn usage_on(&self, day: &str) -> Result<u32, LightupError> {
        let key = day.to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<u32, rusqlite::Error> {
                let count: Option<u32> = conn
                    .query_row(
                        "SELECT count FROM rate_limit_usage WHERE day = ?1",
                        rusqlite::params![key],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(count.unwrap_or(0))
            })
            .await
            .map_err(map_tr_err)
    }

    /// Actions left today.
    pub async fn remaining(&self) -> Result<u32, LightupError> {
        Ok(self.report().await?.remaining)
    }

    /// Today's usage, limit and remainder.
    pub async fn report(&self) -> Result<UsageReport, LightupError> {
        let day = today();
        let used = self.usage_on(&day).await?;
        Ok(UsageReport {
            remaining: self.daily_limit.saturating_sub(used),
            day,
            used,
            limit: self.daily_limit,
            enabled: self.enabled,
        })
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn limit_reached(limit: u32) -> LightupError {
    LightupError::RateLimited {
        message: format!(
            "Daily action limit reached ({limit} per day). Resets at midnight UTC, or switch to your own provider in settings."
        ),
    }
}
