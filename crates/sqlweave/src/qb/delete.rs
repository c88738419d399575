//! DELETE statement builder.

use crate::dialect::DialectRef;
use crate::error::{QbError, QbResult};
use crate::qb::clause::{
    Order, OrderBy, require_name, write_limit_offset, write_order_by, write_returning,
};
use crate::qb::expr::Condition;
use crate::qb::traits::Statement;
use crate::qb::writer::SqlWriter;

#[derive(Debug, Clone, Default)]
pub(crate) struct DeleteState {
    pub(crate) table: String,
    pub(crate) where_cond: Option<Condition>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) returning: Vec<String>,
    pub(crate) allow_delete_all: bool,
    pub(crate) dialect: Option<DialectRef>,
}

/// DELETE builder with sticky-error chaining.
///
/// A DELETE without any WHERE condition fails to build unless
/// [`DeleteBuilder::allow_delete_all`] is set.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    pub(crate) state: QbResult<DeleteState>,
}

impl DeleteBuilder {
    /// Create a new DELETE builder for `table`.
    pub fn new(table: &str) -> Self {
        Self {
            state: Ok(DeleteState {
                table: table.to_string(),
                ..DeleteState::default()
            }),
        }
    }

    pub(crate) fn from_state(state: QbResult<DeleteState>) -> Self {
        Self { state }
    }

    fn with_state(mut self, f: impl FnOnce(&mut DeleteState) -> QbResult<()>) -> Self {
        let result = match &mut self.state {
            Ok(state) => f(state),
            Err(_) => return self,
        };
        if let Err(err) = result {
            self.state = Err(err);
        }
        self
    }

    fn fail(self, err: QbError) -> Self {
        self.with_state(|_| Err(err))
    }

    fn and_where(self, cond: Condition) -> Self {
        self.with_state(|s| {
            s.where_cond = Some(match s.where_cond.take() {
                Some(existing) => existing.and(cond),
                None => cond,
            });
            Ok(())
        })
    }

    /// The recorded error, if a chained call failed.
    pub fn error(&self) -> Option<&QbError> {
        self.state.as_ref().err()
    }

    /// Allow DELETE without WHERE conditions (dangerous!).
    pub fn allow_delete_all(self, allow: bool) -> Self {
        self.with_state(|s| {
            s.allow_delete_all = allow;
            Ok(())
        })
    }

    impl_where_methods!();

    /// Add ORDER BY item as given.
    pub fn order_by(self, expr: &str) -> Self {
        self.push_order(expr, None)
    }

    /// Add ORDER BY column ASC.
    pub fn order_by_asc(self, col: &str) -> Self {
        self.push_order(col, Some(Order::Asc))
    }

    /// Add ORDER BY column DESC.
    pub fn order_by_desc(self, col: &str) -> Self {
        self.push_order(col, Some(Order::Desc))
    }

    fn push_order(self, expr: &str, order: Option<Order>) -> Self {
        self.with_state(|s| {
            require_name("ORDER BY column", expr)?;
            s.order_by.push(OrderBy {
                expr: expr.to_string(),
                order,
            });
            Ok(())
        })
    }

    /// Set LIMIT.
    pub fn limit(self, n: u64) -> Self {
        self.with_state(|s| {
            s.limit = Some(n);
            Ok(())
        })
    }

    /// Append RETURNING columns.
    pub fn returning<S: Into<String>>(self, cols: impl IntoIterator<Item = S>) -> Self {
        self.with_state(|s| {
            for col in cols {
                let col = col.into();
                require_name("RETURNING column", &col)?;
                s.returning.push(col);
            }
            Ok(())
        })
    }

    /// Override the dialect for this builder.
    pub fn dialect(self, dialect: impl Into<DialectRef>) -> Self {
        let dialect = dialect.into();
        self.with_state(|s| {
            s.dialect = Some(dialect);
            Ok(())
        })
    }
}

impl Statement for DeleteBuilder {
    fn kind(&self) -> &'static str {
        "delete"
    }

    fn dialect_override(&self) -> Option<&DialectRef> {
        self.state.as_ref().ok().and_then(|s| s.dialect.as_ref())
    }

    fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()> {
        let s = self.state.as_ref().map_err(Clone::clone)?;

        if s.table.trim().is_empty() {
            return Err(QbError::structural("DELETE requires a table"));
        }
        if s.where_cond.is_none() && !s.allow_delete_all {
            return Err(QbError::structural(
                "DELETE without WHERE requires allow_delete_all(true)",
            ));
        }

        w.push("DELETE FROM ");
        w.push_ident(&s.table);

        if let Some(cond) = &s.where_cond {
            w.push(" WHERE ");
            cond.write_to(w)?;
        }

        write_order_by(w, &s.order_by);
        write_limit_offset(w, s.limit, None);
        write_returning(w, &s.returning);
        Ok(())
    }
}
