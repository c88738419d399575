//! INSERT statement builder.

use crate::dialect::DialectRef;
use crate::error::{QbError, QbResult};
use crate::qb::clause::{require_name, write_returning};
use crate::qb::traits::Statement;
use crate::qb::writer::SqlWriter;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
struct InsertState {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    returning: Vec<String>,
    dialect: Option<DialectRef>,
}

/// INSERT builder.
///
/// Either declare `columns(...)` and add rows with `values(...)`, or build a
/// single row column by column with `set(...)`. Every row must carry exactly
/// one value per column.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    state: QbResult<InsertState>,
}

impl InsertBuilder {
    /// Create a new INSERT builder for `table`.
    pub fn new(table: &str) -> Self {
        Self {
            state: Ok(InsertState {
                table: table.to_string(),
                ..InsertState::default()
            }),
        }
    }

    fn with_state(mut self, f: impl FnOnce(&mut InsertState) -> QbResult<()>) -> Self {
        let result = match &mut self.state {
            Ok(state) => f(state),
            Err(_) => return self,
        };
        if let Err(err) = result {
            self.state = Err(err);
        }
        self
    }

    /// The recorded error, if a chained call failed.
    pub fn error(&self) -> Option<&QbError> {
        self.state.as_ref().err()
    }

    /// Append target columns.
    pub fn columns<S: Into<String>>(self, cols: impl IntoIterator<Item = S>) -> Self {
        self.with_state(|s| {
            for col in cols {
                let col = col.into();
                require_name("INSERT column", &col)?;
                s.columns.push(col);
            }
            Ok(())
        })
    }

    /// Append one row of values.
    pub fn values<V: Into<Value>>(self, row: impl IntoIterator<Item = V>) -> Self {
        let row: Vec<Value> = row.into_iter().map(Into::into).collect();
        self.with_state(|s| {
            s.rows.push(row);
            Ok(())
        })
    }

    /// Add one column and its value to a single-row insert.
    pub fn set(self, column: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.with_state(|s| {
            require_name("INSERT column", column)?;
            if s.rows.len() > 1 {
                return Err(QbError::structural(
                    "set() cannot be used on a multi-row INSERT",
                ));
            }
            s.columns.push(column.to_string());
            match s.rows.first_mut() {
                Some(row) => row.push(value),
                None => s.rows.push(vec![value]),
            }
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

impl Statement for InsertBuilder {
    fn kind(&self) -> &'static str {
        "insert"
    }

    fn dialect_override(&self) -> Option<&DialectRef> {
        self.state.as_ref().ok().and_then(|s| s.dialect.as_ref())
    }

    fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()> {
        let s = self.state.as_ref().map_err(Clone::clone)?;

        if s.table.trim().is_empty() {
            return Err(QbError::structural("INSERT requires a table"));
        }
        if s.columns.is_empty() {
            return Err(QbError::structural("INSERT requires at least one column"));
        }
        if s.rows.is_empty() {
            return Err(QbError::structural("INSERT requires at least one row"));
        }
        for (i, row) in s.rows.iter().enumerate() {
            if row.len() != s.columns.len() {
                return Err(QbError::arity(format!(
                    "INSERT row {} has {} values, expected {}",
                    i + 1,
                    row.len(),
                    s.columns.len()
                )));
            }
        }

        w.push("INSERT INTO ");
        w.push_ident(&s.table);
        w.push(" (");
        w.push_ident_list(&s.columns);
        w.push(") VALUES ");
        for (i, row) in s.rows.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push("(");
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    w.push(", ");
                }
                w.push_arg(value.clone());
            }
            w.push(")");
        }

        write_returning(w, &s.returning);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySql, Postgres, Standard};

    #[test]
    fn test_single_row_set() {
        let q = InsertBuilder::new("users")
            .set("username", "alice")
            .set("email", "alice@example.com")
            .returning(["id"])
            .build_with(&Postgres)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"INSERT INTO "users" ("username", "email") VALUES ($1, $2) RETURNING "id""#
        );
        assert_eq!(q.args.len(), 2);
    }

    #[test]
    fn test_multi_row_numbering() {
        let q = InsertBuilder::new("tags")
            .columns(["name", "weight"])
            .values([Value::from("a"), Value::from(1)])
            .values([Value::from("b"), Value::from(2)])
            .build_with(&Postgres)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"INSERT INTO "tags" ("name", "weight") VALUES ($1, $2), ($3, $4)"#
        );
        assert_eq!(
            q.args,
            vec![
                Value::from("a"),
                Value::Int(1),
                Value::from("b"),
                Value::Int(2)
            ]
        );
    }

    #[test]
    fn test_row_arity_mismatch() {
        let err = InsertBuilder::new("tags")
            .columns(["name", "weight"])
            .values(["only-one"])
            .build_with(&MySql)
            .unwrap_err();
        assert!(err.is_arity());
    }

    #[test]
    fn test_missing_parts() {
        assert!(InsertBuilder::new("t").build_with(&Standard).unwrap_err().is_structural());
        assert!(
            InsertBuilder::new("t")
                .columns(["a"])
                .build_with(&Standard)
                .unwrap_err()
                .is_structural()
        );
        assert!(
            InsertBuilder::new("")
                .set("a", 1)
                .build_with(&Standard)
                .unwrap_err()
                .is_structural()
        );
    }

    #[test]
    fn test_set_opt_skips_none() {
        let q = InsertBuilder::new("users")
            .set("name", "bob")
            .set_opt("nickname", None::<String>)
            .build_with(&Standard)
            .unwrap();
        assert_eq!(q.sql, "INSERT INTO users (name) VALUES (?)");
    }

    #[test]
    fn test_set_after_multi_row_is_sticky() {
        let qb = InsertBuilder::new("t")
            .columns(["a"])
            .values([1])
            .values([2])
            .set("b", 3);
        assert!(qb.error().is_some_and(QbError::is_structural));
    }
}
