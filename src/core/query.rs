//! Read-only views over the event log. Every query is bounded.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult, StorageContext};
use crate::models::{HealthReport, ScanEvent, Stats};
use crate::utils::date::{self, day_bounds};
use crate::utils::time::now_seconds;
use tracing::debug;

pub struct QueryEngine<'a> {
    pool: &'a DbPool,
    max_limit: i64,
}

impl<'a> QueryEngine<'a> {
    pub fn new(pool: &'a DbPool, max_limit: i64) -> Self {
        Self {
            pool,
            max_limit: max_limit.max(1),
        }
    }

    /// `limit <= 0` is rejected; anything above the configured maximum is
    /// clamped to it.
    pub fn clamp_limit(&self, limit: i64) -> AppResult<i64> {
        if limit <= 0 {
            return Err(AppError::invalid(format!(
                "limit must be at least 1 (got {limit})"
            )));
        }
        Ok(limit.min(self.max_limit))
    }

    /// Newest first; equal timestamps order by larger id first.
    pub fn recent(&self, limit: i64) -> AppResult<Vec<ScanEvent>> {
        let limit = self.clamp_limit(limit)?;
        let rows = self
            .pool
            .with_conn(|conn| queries::load_recent(conn, limit).during("recent"))?;
        debug!(limit, returned = rows.len(), "recent");
        Ok(rows)
    }

    /// Case-insensitive substring match on uid or user.
    pub fn search(&self, term: &str, limit: i64) -> AppResult<Vec<ScanEvent>> {
        if term.is_empty() {
            return Err(AppError::invalid("search term must not be empty"));
        }
        let limit = self.clamp_limit(limit)?;
        let rows = self
            .pool
            .with_conn(|conn| queries::search(conn, term, limit).during("search"))?;
        debug!(term, limit, returned = rows.len(), "search");
        Ok(rows)
    }

    /// Events recorded on `date` (`YYYY-MM-DD`, store-local time).
    pub fn by_date(&self, date: &str, limit: i64) -> AppResult<Vec<ScanEvent>> {
        let day = date::parse_date(date).ok_or_else(|| {
            AppError::invalid(format!("invalid date '{date}', expected YYYY-MM-DD"))
        })?;
        let limit = self.clamp_limit(limit)?;
        let (start, end) = day_bounds(day);

        let rows = self.pool.with_conn(|conn| {
            queries::load_between(conn, &start, &end, limit).during("by_date")
        })?;
        debug!(%day, limit, returned = rows.len(), "by_date");
        Ok(rows)
    }

    pub fn stats(&self) -> AppResult<Stats> {
        let (start, end) = day_bounds(date::today());

        self.pool.with_conn(|conn| {
            Ok(Stats {
                total_count: queries::count_all(conn).during("stats")?,
                unique_user_count: queries::count_distinct_users(conn).during("stats")?,
                today_count: queries::count_between(conn, &start, &end).during("stats")?,
            })
        })
    }

    /// Liveness check: succeeds only if the store answers a stats query.
    pub fn health(&self) -> AppResult<HealthReport> {
        let stats = self.stats()?;
        Ok(HealthReport {
            status: "healthy",
            timestamp: now_seconds(),
            database: "connected",
            stats,
        })
    }
}
