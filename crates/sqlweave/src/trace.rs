//! Build logging via `tracing`.
//!
//! Every `build()` reports its outcome on target `sqlweave.build`. Without the
//! `tracing` feature these calls compile to nothing.

use crate::dialect::Dialect;
use crate::error::QbResult;
use crate::qb::BuiltQuery;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default SQL truncation length for build logs (in bytes).
pub const DEFAULT_MAX_LOGGED_SQL: usize = 200;

static MAX_LOGGED_SQL: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_LOGGED_SQL);

/// Set the SQL truncation length used in build logs. `0` disables truncation.
pub fn set_max_logged_sql(len: usize) {
    MAX_LOGGED_SQL.store(len, Ordering::Relaxed);
}

/// Current SQL truncation length used in build logs.
pub fn max_logged_sql() -> usize {
    MAX_LOGGED_SQL.load(Ordering::Relaxed)
}

/// Truncate `sql` to at most `max` bytes on a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql(sql: &str, max: usize) -> String {
    if max == 0 || sql.len() <= max {
        return sql.to_string();
    }
    let mut end = max;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &sql[..end])
}

#[cfg(feature = "tracing")]
pub(crate) fn log_build(kind: &'static str, dialect: &dyn Dialect, result: &QbResult<BuiltQuery>) {
    match result {
        Ok(query) => {
            if tracing::enabled!(target: "sqlweave.build", tracing::Level::DEBUG) {
                let sql = truncate_sql(&query.sql, max_logged_sql());
                tracing::debug!(
                    target: "sqlweave.build",
                    statement = kind,
                    dialect = dialect.name(),
                    param_count = query.args.len(),
                    sql = %sql,
                );
            }
        }
        Err(err) => tracing::debug!(
            target: "sqlweave.build",
            statement = kind,
            dialect = dialect.name(),
            error = %err,
            "build failed",
        ),
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn log_build(_kind: &'static str, _dialect: &dyn Dialect, _result: &QbResult<BuiltQuery>) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_sql("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql("SELECT 1", 0), "SELECT 1");
        assert_eq!(truncate_sql("SELECT 1", 6), "SELECT...");
        // 'é' is two bytes; cutting at 2 would split it.
        assert_eq!(truncate_sql("aé", 2), "a...");
    }
}
