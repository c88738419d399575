//! SELECT statement builder.

use crate::dialect::DialectRef;
use crate::error::{QbError, QbResult};
use crate::qb::clause::{Order, OrderBy, require_name, write_limit_offset, write_order_by};
use crate::qb::expr::{Condition, IntoCondition};
use crate::qb::traits::Statement;
use crate::qb::writer::SqlWriter;

/// One projected column.
#[derive(Debug, Clone)]
pub enum Projection {
    /// Column name or expression (`id`, `u.*`, `COUNT(*)`).
    Column(String),
    /// `expr AS alias`
    Aliased { expr: String, alias: String },
    /// `(SELECT ...) AS alias`; arguments are spliced in place.
    Subquery {
        query: Box<SelectBuilder>,
        alias: String,
    },
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
        }
    }
}

/// A JOIN clause with its own ON condition.
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub on: Option<Condition>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SelectState {
    pub(crate) columns: Vec<Projection>,
    pub(crate) from: Vec<String>,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_cond: Option<Condition>,
    pub(crate) group_by: Vec<String>,
    pub(crate) having: Option<Condition>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) distinct: bool,
    pub(crate) dialect: Option<DialectRef>,
}

/// SELECT builder.
///
/// Holds either the accumulated clauses or the first error a chained call
/// ran into; once an error is recorded every further call is a no-op and
/// `build()` returns that error.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    pub(crate) state: QbResult<SelectState>,
}

impl Default for SelectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectBuilder {
    /// Create an empty SELECT builder (no columns, no FROM).
    pub fn new() -> Self {
        Self {
            state: Ok(SelectState::default()),
        }
    }

    pub(crate) fn from_state(state: QbResult<SelectState>) -> Self {
        Self { state }
    }

    fn with_state(mut self, f: impl FnOnce(&mut SelectState) -> QbResult<()>) -> Self {
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

    // ==================== Projection ====================

    /// Append projected columns.
    pub fn columns<S: Into<String>>(self, cols: impl IntoIterator<Item = S>) -> Self {
        self.with_state(|s| {
            for col in cols {
                let col = col.into();
                require_name("column", &col)?;
                s.columns.push(Projection::Column(col));
            }
            Ok(())
        })
    }

    /// Append one projected column.
    pub fn column(self, col: &str) -> Self {
        self.columns([col])
    }

    /// Append `expr AS alias`.
    pub fn column_as(self, expr: &str, alias: &str) -> Self {
        self.with_state(|s| {
            require_name("column", expr)?;
            require_name("column alias", alias)?;
            s.columns.push(Projection::Aliased {
                expr: expr.to_string(),
                alias: alias.to_string(),
            });
            Ok(())
        })
    }

    /// Append a scalar subquery column: `(SELECT ...) AS alias`.
    pub fn column_subquery(self, query: SelectBuilder, alias: &str) -> Self {
        self.with_state(|s| {
            if let Err(err) = &query.state {
                return Err(err.clone());
            }
            require_name("subquery alias", alias)?;
            s.columns.push(Projection::Subquery {
                query: Box::new(query),
                alias: alias.to_string(),
            });
            Ok(())
        })
    }

    /// Emit `SELECT DISTINCT`.
    pub fn distinct(self) -> Self {
        self.with_state(|s| {
            s.distinct = true;
            Ok(())
        })
    }

    // ==================== FROM / JOIN ====================

    /// Append a source table (several tables render comma-separated).
    pub fn from(self, table: &str) -> Self {
        self.with_state(|s| {
            require_name("table", table)?;
            s.from.push(table.to_string());
            Ok(())
        })
    }

    /// Add a JOIN of the given kind.
    pub fn join(self, kind: JoinKind, table: &str, on: impl IntoCondition) -> Self {
        self.with_state(|s| {
            require_name("join table", table)?;
            let on = on.into_condition()?;
            s.joins.push(Join {
                kind,
                table: table.to_string(),
                on: Some(on),
            });
            Ok(())
        })
    }

    /// Add INNER JOIN.
    pub fn inner_join(self, table: &str, on: impl IntoCondition) -> Self {
        self.join(JoinKind::Inner, table, on)
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: &str, on: impl IntoCondition) -> Self {
        self.join(JoinKind::Left, table, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: &str, on: impl IntoCondition) -> Self {
        self.join(JoinKind::Right, table, on)
    }

    /// Add FULL OUTER JOIN.
    pub fn full_join(self, table: &str, on: impl IntoCondition) -> Self {
        self.join(JoinKind::Full, table, on)
    }

    // ==================== WHERE ====================

    impl_where_methods!();

    // ==================== Grouping & ordering ====================

    /// Append a GROUP BY column.
    pub fn group_by(self, col: &str) -> Self {
        self.with_state(|s| {
            require_name("GROUP BY column", col)?;
            s.group_by.push(col.to_string());
            Ok(())
        })
    }

    /// AND a condition into HAVING.
    pub fn having(self, cond: impl IntoCondition) -> Self {
        self.with_state(|s| {
            let cond = cond.into_condition()?;
            s.having = Some(match s.having.take() {
                Some(existing) => existing.and(cond),
                None => cond,
            });
            Ok(())
        })
    }

    /// Add ORDER BY item as given (`created_at DESC`, `name`).
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

    // ==================== Pagination ====================

    /// Set LIMIT.
    pub fn limit(self, n: u64) -> Self {
        self.with_state(|s| {
            s.limit = Some(n);
            Ok(())
        })
    }

    /// Set OFFSET.
    pub fn offset(self, n: u64) -> Self {
        self.with_state(|s| {
            s.offset = Some(n);
            Ok(())
        })
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(self, page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        let size = per_page.max(1);
        self.limit(size).offset((page - 1).saturating_mul(size))
    }

    /// Override the dialect for this builder.
    pub fn dialect(self, dialect: impl Into<DialectRef>) -> Self {
        let dialect = dialect.into();
        self.with_state(|s| {
            s.dialect = Some(dialect);
            Ok(())
        })
    }

    fn write_projection(w: &mut SqlWriter<'_>, p: &Projection) -> QbResult<()> {
        match p {
            Projection::Column(col) => w.push_ident(col),
            Projection::Aliased { expr, alias } => {
                w.push_ident(expr);
                w.push(" AS ");
                w.push_ident(alias);
            }
            Projection::Subquery { query, alias } => {
                w.push("(");
                query.write_to(w)?;
                w.push(") AS ");
                w.push_ident(alias);
            }
        }
        Ok(())
    }
}

impl Statement for SelectBuilder {
    fn kind(&self) -> &'static str {
        "select"
    }

    fn dialect_override(&self) -> Option<&DialectRef> {
        self.state.as_ref().ok().and_then(|s| s.dialect.as_ref())
    }

    fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()> {
        let s = self.state.as_ref().map_err(Clone::clone)?;

        if s.from.is_empty() {
            return Err(QbError::structural("SELECT requires a FROM table"));
        }
        if s.columns.is_empty() {
            return Err(QbError::structural("SELECT requires at least one column"));
        }

        w.push(if s.distinct { "SELECT DISTINCT " } else { "SELECT " });
        for (i, p) in s.columns.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            Self::write_projection(w, p)?;
        }

        w.push(" FROM ");
        w.push_ident_list(&s.from);

        for join in &s.joins {
            w.push(" ");
            w.push(join.kind.as_sql());
            w.push(" ");
            w.push_ident(&join.table);
            if let Some(on) = &join.on {
                w.push(" ON ");
                on.write_to(w)?;
            }
        }

        if let Some(cond) = &s.where_cond {
            w.push(" WHERE ");
            cond.write_to(w)?;
        }

        if !s.group_by.is_empty() {
            w.push(" GROUP BY ");
            w.push_ident_list(&s.group_by);
        }

        if let Some(cond) = &s.having {
            w.push(" HAVING ");
            cond.write_to(w)?;
        }

        write_order_by(w, &s.order_by);
        write_limit_offset(w, s.limit, s.offset);
        Ok(())
    }
}
