//! Trait definitions for statement builders.

use crate::dialect::{Dialect, DialectRef, default_dialect};
use crate::error::QbResult;
use crate::qb::writer::SqlWriter;
use crate::value::Value;

/// The result of building a statement or condition.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, args: Vec<Value>) -> Self {
        Self { sql, args }
    }

    /// Split into `(sql, args)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }

    /// Arguments as references for tokio-postgres.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.args
            .iter()
            .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}

/// Base trait for everything that renders to `(sql, args)`.
///
/// Implementors only provide [`Statement::write_to`]; building is a pure
/// function of the current state and may be repeated.
pub trait Statement {
    /// Statement kind used in logs (`"select"`, `"update"`, ...).
    fn kind(&self) -> &'static str;

    /// Per-builder dialect override, if any.
    fn dialect_override(&self) -> Option<&DialectRef> {
        None
    }

    /// Render into an existing writer, continuing its numbering.
    fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()>;

    /// Build with an explicit dialect.
    fn build_with(&self, dialect: &dyn Dialect) -> QbResult<BuiltQuery> {
        let mut w = SqlWriter::new(dialect);
        let result = self.write_to(&mut w).map(|()| {
            let (sql, args) = w.finish();
            BuiltQuery::new(sql, args)
        });
        crate::trace::log_build(self.kind(), dialect, &result);
        result
    }

    /// Build with the builder's dialect, or the process default.
    fn build(&self) -> QbResult<BuiltQuery> {
        match self.dialect_override() {
            Some(dialect) => self.build_with(dialect.as_ref()),
            None => {
                let dialect = default_dialect();
                self.build_with(dialect.as_ref())
            }
        }
    }

    /// Debug helper: the built SQL, or an empty string on error.
    fn to_sql(&self) -> String {
        self.build().map(|q| q.sql).unwrap_or_default()
    }
}
