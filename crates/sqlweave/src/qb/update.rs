//! UPDATE statement builder.

use crate::dialect::DialectRef;
use crate::error::{QbError, QbResult};
use crate::qb::clause::{
    Order, OrderBy, require_name, write_limit_offset, write_order_by, write_returning,
};
use crate::qb::expr::Condition;
use crate::qb::traits::Statement;
use crate::qb::writer::SqlWriter;
use crate::value::Value;

/// SET field value type.
#[derive(Clone, Debug)]
pub enum SetValue {
    /// Bound value
    Value(Value),
    /// Raw SQL expression
    Raw(String),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UpdateState {
    pub(crate) table: String,
    pub(crate) sets: Vec<(String, SetValue)>,
    pub(crate) where_cond: Option<Condition>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) returning: Vec<String>,
    pub(crate) dialect: Option<DialectRef>,
}

/// UPDATE builder with sticky-error chaining.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    pub(crate) state: QbResult<UpdateState>,
}

impl UpdateBuilder {
    /// Create a new UPDATE builder for `table`.
    pub fn new(table: &str) -> Self {
        Self {
            state: Ok(UpdateState {
                table: table.to_string(),
                ..UpdateState::default()
            }),
        }
    }

    pub(crate) fn from_state(state: QbResult<UpdateState>) -> Self {
        Self { state }
    }

    fn with_state(mut self, f: impl FnOnce(&mut UpdateState) -> QbResult<()>) -> Self {
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

    /// Set a column to a bound value.
    pub fn set(self, column: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.with_state(|s| {
            require_name("SET column", column)?;
            s.sets.push((column.to_string(), SetValue::Value(value)));
            Ok(())
        })
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt<V: Into<Value>>(self, column: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Set a column to a raw SQL expression (`NOW()`, `count + 1`).
    pub fn set_raw(self, column: &str, expr: &str) -> Self {
        self.with_state(|s| {
            require_name("SET column", column)?;
            s.sets
                .push((column.to_string(), SetValue::Raw(expr.to_string())));
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

impl Statement for UpdateBuilder {
    fn kind(&self) -> &'static str {
        "update"
    }

    fn dialect_override(&self) -> Option<&DialectRef> {
        self.state.as_ref().ok().and_then(|s| s.dialect.as_ref())
    }

    fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()> {
        let s = self.state.as_ref().map_err(Clone::clone)?;

        if s.table.trim().is_empty() {
            return Err(QbError::structural("UPDATE requires a table"));
        }
        if s.sets.is_empty() {
            return Err(QbError::structural(
                "UPDATE requires at least one SET assignment",
            ));
        }

        w.push("UPDATE ");
        w.push_ident(&s.table);
        w.push(" SET ");
        for (i, (col, value)) in s.sets.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push_ident(col);
            w.push(" = ");
            match value {
                SetValue::Value(v) => w.push_arg(v.clone()),
                SetValue::Raw(expr) => w.push(expr),
            }
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Postgres, Standard};

    #[test]
    fn test_simple_update() {
        let q = UpdateBuilder::new("users")
            .set("status", "inactive")
            .where_eq("id", 1)
            .build_with(&Postgres)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"UPDATE "users" SET "status" = $1 WHERE "id" = $2"#
        );
        assert_eq!(q.args, vec![Value::from("inactive"), Value::Int(1)]);
    }

    #[test]
    fn test_set_raw_binds_nothing() {
        let q = UpdateBuilder::new("posts")
            .set_raw("updated_at", "NOW()")
            .set("title", "hello")
            .where_in("id", [1, 2])
            .build_with(&Postgres)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"UPDATE "posts" SET "updated_at" = NOW(), "title" = $1 WHERE "id" IN ($2, $3)"#
        );
        assert_eq!(q.args.len(), 3);
    }

    #[test]
    fn test_set_opt() {
        let name: Option<&str> = None;
        let q = UpdateBuilder::new("users")
            .set_opt("name", name)
            .set("age", 30)
            .build_with(&Standard)
            .unwrap();
        assert_eq!(q.sql, "UPDATE users SET age = ?");
    }

    #[test]
    fn test_order_limit_returning() {
        let q = UpdateBuilder::new("jobs")
            .set("state", "claimed")
            .where_eq("state", "queued")
            .order_by_asc("id")
            .limit(1)
            .returning(["id"])
            .build_with(&Standard)
            .unwrap();
        assert_eq!(
            q.sql,
            "UPDATE jobs SET state = ? WHERE state = ? ORDER BY id ASC LIMIT 1 RETURNING id"
        );
    }

    #[test]
    fn test_update_requires_set() {
        let err = UpdateBuilder::new("users")
            .where_eq("id", 1)
            .build_with(&Standard)
            .unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_update_requires_table() {
        let err = UpdateBuilder::new(" ")
            .set("a", 1)
            .build_with(&Standard)
            .unwrap_err();
        assert!(err.is_structural());
    }
}
