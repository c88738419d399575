//! Condition expressions for WHERE/HAVING/ON and CASE.
//!
//! [`Condition`] is an immutable tree. Combinators (`and`, `or`, `not`) build a
//! new node and share their operands through `Arc`, so a condition can be
//! reused in several statements.
//!
//! Rendering walks the tree depth-first, left to right, binding one argument
//! per placeholder in that order:
//!
//! - `a.and(b)` renders `a AND b` (no added parentheses);
//! - `a.or(b)` renders `(a) OR (b)`, parenthesizing both sides even for a
//!   single comparison;
//! - an OR node directly under an AND is wrapped once more, so
//!   `a.and(b.or(c))` renders `a AND ((b) OR (c))`.

use crate::dialect::{Dialect, default_dialect};
use crate::error::{QbError, QbResult};
use crate::qb::select::SelectBuilder;
use crate::qb::traits::{BuiltQuery, Statement};
use crate::qb::writer::SqlWriter;
use crate::value::Value;
use std::sync::Arc;

/// Comparison operator of a leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
    IsNull,
    IsNotNull,
}

impl CompareOp {
    /// SQL spelling of the operator.
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Like => "LIKE",
            CompareOp::NotLike => "NOT LIKE",
            CompareOp::In => "IN",
            CompareOp::NotIn => "NOT IN",
            CompareOp::Between => "BETWEEN",
            CompareOp::NotBetween => "NOT BETWEEN",
            CompareOp::IsNull => "IS NULL",
            CompareOp::IsNotNull => "IS NOT NULL",
        }
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand (IS NULL / IS NOT NULL).
    None,
    /// One bound value.
    Value(Value),
    /// Two bound values (BETWEEN).
    Pair(Value, Value),
    /// A list of bound values (IN).
    List(Vec<Value>),
    /// Another column; nothing is bound.
    Column(String),
}

/// Subquery wrapped by EXISTS / NOT EXISTS.
#[derive(Debug, Clone)]
pub enum Subquery {
    Select(Box<SelectBuilder>),
    Raw(String),
}

impl Subquery {
    fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()> {
        match self {
            Subquery::Select(select) => select.write_to(w),
            Subquery::Raw(sql) => {
                w.push(sql);
                Ok(())
            }
        }
    }
}

impl From<SelectBuilder> for Subquery {
    fn from(select: SelectBuilder) -> Self {
        Subquery::Select(Box::new(select))
    }
}

impl From<&str> for Subquery {
    fn from(sql: &str) -> Self {
        Subquery::Raw(sql.to_string())
    }
}

impl From<String> for Subquery {
    fn from(sql: String) -> Self {
        Subquery::Raw(sql)
    }
}

/// One `WHEN cond THEN result` arm.
#[derive(Debug, Clone)]
pub struct CaseBranch {
    pub when: Condition,
    pub then: Value,
}

/// Boolean predicate tree.
#[derive(Debug, Clone)]
pub enum Condition {
    /// `column op operand`
    Compare {
        column: String,
        op: CompareOp,
        operand: Operand,
    },

    /// Raw SQL fragment, inserted verbatim with no arguments.
    Raw(String),

    /// Pre-formatted fragment with a fixed argument list. The text is not
    /// rewritten for the dialect; its args are appended in declared order.
    Template { sql: String, args: Vec<Value> },

    And(Arc<Condition>, Arc<Condition>),

    Or(Arc<Condition>, Arc<Condition>),

    Not(Arc<Condition>),

    Exists {
        negated: bool,
        subquery: Arc<Subquery>,
    },

    Case {
        branches: Arc<[CaseBranch]>,
        else_result: Option<Value>,
    },

    /// Caller-supplied predicate, rendered into the enclosing writer.
    Predicate(Predicate),
}

/// Shared handle to a caller-supplied [`Statement`] used as a predicate.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Statement + Send + Sync>);

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Predicate").field(&self.0.kind()).finish()
    }
}

impl Condition {
    fn compare(column: impl Into<String>, op: CompareOp, operand: Operand) -> Self {
        Condition::Compare {
            column: column.into(),
            op,
            operand,
        }
    }

    /// `column = value`; a NULL value renders `column IS NULL`.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Eq, Operand::Value(value.into()))
    }

    /// `column != value`; a NULL value renders `column IS NOT NULL`.
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Ne, Operand::Value(value.into()))
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Gt, Operand::Value(value.into()))
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Gte, Operand::Value(value.into()))
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Lt, Operand::Value(value.into()))
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Lte, Operand::Value(value.into()))
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Like, Operand::Value(pattern.into()))
    }

    pub fn not_like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::NotLike, Operand::Value(pattern.into()))
    }

    /// `column IN (v1, v2, ...)`. An empty list is an error at build time.
    pub fn in_list<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::compare(column, CompareOp::In, Operand::List(values))
    }

    /// `column NOT IN (v1, v2, ...)`. An empty list is an error at build time.
    pub fn not_in<V: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::compare(column, CompareOp::NotIn, Operand::List(values))
    }

    pub fn between(
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Self::compare(
            column,
            CompareOp::Between,
            Operand::Pair(from.into(), to.into()),
        )
    }

    pub fn not_between(
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Self::compare(
            column,
            CompareOp::NotBetween,
            Operand::Pair(from.into(), to.into()),
        )
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::compare(column, CompareOp::IsNull, Operand::None)
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::compare(column, CompareOp::IsNotNull, Operand::None)
    }

    /// `left = right` over two columns.
    pub fn cols_eq(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::compare(left, CompareOp::Eq, Operand::Column(right.into()))
    }

    /// Raw SQL fragment (caller-trusted).
    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::Raw(sql.into())
    }

    /// Fragment with its own argument list.
    ///
    /// # Example
    /// ```ignore
    /// Condition::template("active = ?", [true])
    /// ```
    pub fn template<V: Into<Value>>(
        sql: impl Into<String>,
        args: impl IntoIterator<Item = V>,
    ) -> Self {
        Condition::Template {
            sql: sql.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exists(subquery: impl Into<Subquery>) -> Self {
        Condition::Exists {
            negated: false,
            subquery: Arc::new(subquery.into()),
        }
    }

    pub fn not_exists(subquery: impl Into<Subquery>) -> Self {
        Condition::Exists {
            negated: true,
            subquery: Arc::new(subquery.into()),
        }
    }

    /// Wrap anything that writes itself as SQL plus args.
    ///
    /// The statement is rendered through the parent's writer, so its
    /// placeholders continue the parent's numbering.
    pub fn predicate(stmt: impl Statement + Send + Sync + 'static) -> Self {
        Condition::Predicate(Predicate(Arc::new(stmt)))
    }

    /// Start a CASE expression.
    pub fn case() -> CaseBuilder {
        CaseBuilder::default()
    }

    /// `self AND other`.
    ///
    /// An OR operand keeps its grouping: `a.and(b.or(c))` renders
    /// `a AND ((b) OR (c))`, not the bare `a AND (b) OR (c)`.
    pub fn and(self, other: Condition) -> Self {
        Condition::And(Arc::new(self), Arc::new(other))
    }

    pub fn or(self, other: Condition) -> Self {
        Condition::Or(Arc::new(self), Arc::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Condition::Not(Arc::new(self))
    }

    /// AND together all conditions, left to right. `None` if empty.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Option<Self> {
        conditions.into_iter().reduce(Condition::and)
    }

    /// OR together all conditions, left to right. `None` if empty.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Option<Self> {
        conditions.into_iter().reduce(Condition::or)
    }

    /// Render with placeholders starting at `start` (1-based).
    pub fn render(&self, dialect: &dyn Dialect, start: usize) -> QbResult<Rendered> {
        let mut w = SqlWriter::starting_at(dialect, start);
        self.write_to(&mut w)?;
        let next_index = w.next_index();
        let (sql, args) = w.finish();
        Ok(Rendered {
            sql,
            args,
            next_index,
        })
    }

    /// Render into a writer, continuing its numbering.
    pub fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()> {
        match self {
            Condition::Compare {
                column,
                op,
                operand,
            } => write_compare(w, column, *op, operand),
            Condition::Raw(sql) => {
                w.push(sql);
                Ok(())
            }
            Condition::Template { sql, args } => {
                w.push(sql);
                w.extend_args(args.iter().cloned());
                Ok(())
            }
            Condition::And(left, right) => {
                write_and_operand(w, left)?;
                w.push(" AND ");
                write_and_operand(w, right)
            }
            Condition::Or(left, right) => {
                w.push("(");
                left.write_to(w)?;
                w.push(") OR (");
                right.write_to(w)?;
                w.push(")");
                Ok(())
            }
            Condition::Not(inner) => {
                w.push("NOT (");
                inner.write_to(w)?;
                w.push(")");
                Ok(())
            }
            Condition::Exists { negated, subquery } => {
                w.push(if *negated { "NOT EXISTS (" } else { "EXISTS (" });
                subquery.write_to(w)?;
                w.push(")");
                Ok(())
            }
            Condition::Case {
                branches,
                else_result,
            } => {
                if branches.is_empty() {
                    return Err(QbError::structural(
                        "CASE expression requires at least one WHEN branch",
                    ));
                }
                w.push("CASE");
                for branch in branches.iter() {
                    w.push(" WHEN ");
                    branch.when.write_to(w)?;
                    w.push(" THEN ");
                    w.push_arg(branch.then.clone());
                }
                if let Some(result) = else_result {
                    w.push(" ELSE ");
                    w.push_arg(result.clone());
                }
                w.push(" END");
                Ok(())
            }
            Condition::Predicate(Predicate(stmt)) => stmt.write_to(w),
        }
    }
}

fn write_and_operand(w: &mut SqlWriter<'_>, cond: &Condition) -> QbResult<()> {
    if matches!(cond, Condition::Or(..)) {
        w.push("(");
        cond.write_to(w)?;
        w.push(")");
        Ok(())
    } else {
        cond.write_to(w)
    }
}

fn write_compare(
    w: &mut SqlWriter<'_>,
    column: &str,
    op: CompareOp,
    operand: &Operand,
) -> QbResult<()> {
    if column.trim().is_empty() {
        return Err(QbError::structural(format!(
            "condition column cannot be empty (operator {})",
            op.as_sql()
        )));
    }

    match op {
        CompareOp::Eq | CompareOp::Ne => match operand {
            Operand::None => write_null_check(w, column, op == CompareOp::Eq),
            Operand::Value(v) if v.is_null() => write_null_check(w, column, op == CompareOp::Eq),
            Operand::Value(v) => write_binary(w, column, op, v),
            Operand::Column(other) => write_columns(w, column, op, other),
            _ => Err(arity_mismatch(column, op, operand)),
        },
        CompareOp::Lt
        | CompareOp::Lte
        | CompareOp::Gt
        | CompareOp::Gte
        | CompareOp::Like
        | CompareOp::NotLike => match operand {
            Operand::Value(v) => write_binary(w, column, op, v),
            Operand::Column(other) => write_columns(w, column, op, other),
            _ => Err(arity_mismatch(column, op, operand)),
        },
        CompareOp::In | CompareOp::NotIn => {
            let values: &[Value] = match operand {
                Operand::List(values) => values,
                Operand::Value(v) => std::slice::from_ref(v),
                _ => return Err(arity_mismatch(column, op, operand)),
            };
            if values.is_empty() {
                return Err(QbError::arity(format!(
                    "{} list for column `{column}` is empty",
                    op.as_sql()
                )));
            }
            w.push_ident(column);
            w.push(" ");
            w.push(op.as_sql());
            w.push(" (");
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                w.push_arg(v.clone());
            }
            w.push(")");
            Ok(())
        }
        CompareOp::Between | CompareOp::NotBetween => {
            let (from, to) = match operand {
                Operand::Pair(from, to) => (from, to),
                Operand::List(values) if values.len() == 2 => (&values[0], &values[1]),
                _ => return Err(arity_mismatch(column, op, operand)),
            };
            w.push_ident(column);
            w.push(" ");
            w.push(op.as_sql());
            w.push(" ");
            w.push_arg(from.clone());
            w.push(" AND ");
            w.push_arg(to.clone());
            Ok(())
        }
        CompareOp::IsNull | CompareOp::IsNotNull => match operand {
            Operand::None => write_null_check(w, column, op == CompareOp::IsNull),
            _ => Err(arity_mismatch(column, op, operand)),
        },
    }
}

fn write_null_check(w: &mut SqlWriter<'_>, column: &str, is_null: bool) -> QbResult<()> {
    w.push_ident(column);
    w.push(if is_null { " IS NULL" } else { " IS NOT NULL" });
    Ok(())
}

fn write_binary(w: &mut SqlWriter<'_>, column: &str, op: CompareOp, value: &Value) -> QbResult<()> {
    w.push_ident(column);
    w.push(" ");
    w.push(op.as_sql());
    w.push(" ");
    w.push_arg(value.clone());
    Ok(())
}

fn write_columns(w: &mut SqlWriter<'_>, left: &str, op: CompareOp, right: &str) -> QbResult<()> {
    if right.trim().is_empty() {
        return Err(QbError::structural(format!(
            "right-hand column for `{left}` cannot be empty"
        )));
    }
    w.push_ident(left);
    w.push(" ");
    w.push(op.as_sql());
    w.push(" ");
    w.push_ident(right);
    Ok(())
}

fn arity_mismatch(column: &str, op: CompareOp, operand: &Operand) -> QbError {
    let got = match operand {
        Operand::None => "no value".to_string(),
        Operand::Value(_) => "1 value".to_string(),
        Operand::Pair(..) => "2 values".to_string(),
        Operand::List(values) => format!("a list of {}", values.len()),
        Operand::Column(_) => "a column".to_string(),
    };
    let expected = match op {
        CompareOp::In | CompareOp::NotIn => "a non-empty list",
        CompareOp::Between | CompareOp::NotBetween => "exactly 2 values",
        CompareOp::IsNull | CompareOp::IsNotNull => "no value",
        _ => "1 value or a column",
    };
    QbError::arity(format!(
        "{} on `{column}` expects {expected}, got {got}",
        op.as_sql()
    ))
}

impl Statement for Condition {
    fn kind(&self) -> &'static str {
        "condition"
    }

    fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()> {
        Condition::write_to(self, w)
    }
}

/// Output of [`Condition::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub args: Vec<Value>,
    /// Position the next placeholder after this fragment would get.
    pub next_index: usize,
}

/// Builder for [`Condition::Case`].
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder {
    branches: Vec<CaseBranch>,
    else_result: Option<Value>,
}

impl CaseBuilder {
    /// Add a `WHEN cond THEN result` arm.
    pub fn when(mut self, cond: Condition, result: impl Into<Value>) -> Self {
        self.branches.push(CaseBranch {
            when: cond,
            then: result.into(),
        });
        self
    }

    /// Set the `ELSE` result.
    pub fn otherwise(mut self, result: impl Into<Value>) -> Self {
        self.else_result = Some(result.into());
        self
    }

    /// Finish the CASE expression.
    pub fn end(self) -> Condition {
        Condition::Case {
            branches: self.branches.into(),
            else_result: self.else_result,
        }
    }
}

/// Anything that can fill a WHERE / HAVING / ON slot.
///
/// Errors are recorded on the receiving builder and surfaced by `build()`.
pub trait IntoCondition {
    fn into_condition(self) -> QbResult<Condition>;
}

impl IntoCondition for Condition {
    fn into_condition(self) -> QbResult<Condition> {
        Ok(self)
    }
}

impl IntoCondition for QbResult<Condition> {
    fn into_condition(self) -> QbResult<Condition> {
        self
    }
}

/// A raw fragment.
impl IntoCondition for &str {
    fn into_condition(self) -> QbResult<Condition> {
        Ok(Condition::raw(self))
    }
}

impl IntoCondition for String {
    fn into_condition(self) -> QbResult<Condition> {
        Ok(Condition::Raw(self))
    }
}

impl Condition {
    /// Build with the process default dialect.
    pub fn build(&self) -> QbResult<BuiltQuery> {
        let dialect = default_dialect();
        Statement::build_with(self, dialect.as_ref())
    }

    /// Build with an explicit dialect.
    pub fn build_with(&self, dialect: &dyn Dialect) -> QbResult<BuiltQuery> {
        Statement::build_with(self, dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySql, Postgres, Standard};

    fn render(cond: &Condition) -> (String, Vec<Value>) {
        cond.build_with(&Standard).unwrap().into_parts()
    }

    #[test]
    fn test_simple_eq() {
        let (sql, args) = render(&Condition::eq("name", "alice"));
        assert_eq!(sql, "name = ?");
        assert_eq!(args, vec![Value::from("alice")]);
    }

    #[test]
    fn test_eq_null_normalizes() {
        for dialect in [&Standard as &dyn Dialect, &MySql, &Postgres] {
            let q = Condition::eq("deleted_at", Value::Null)
                .build_with(dialect)
                .unwrap();
            assert!(q.sql.ends_with(" IS NULL"));
            assert!(q.args.is_empty());

            let q = Condition::ne("deleted_at", None::<i64>)
                .build_with(dialect)
                .unwrap();
            assert!(q.sql.ends_with(" IS NOT NULL"));
            assert!(q.args.is_empty());
        }
    }

    #[test]
    fn test_and_has_no_parens() {
        let cond = Condition::eq("status", "active").and(Condition::gt("age", 18));
        let (sql, args) = render(&cond);
        assert_eq!(sql, "status = ? AND age > ?");
        assert_eq!(args, vec![Value::from("active"), Value::from(18)]);
    }

    #[test]
    fn test_or_parenthesizes_each_side() {
        let cond = Condition::eq("id", 1).or(Condition::eq("id", 2));
        let (sql, _) = render(&cond);
        assert_eq!(sql, "(id = ?) OR (id = ?)");
    }

    #[test]
    fn test_or_under_and_is_grouped() {
        let cond = Condition::eq("status", "active")
            .and(Condition::eq("role", "admin").or(Condition::eq("role", "owner")));
        let (sql, args) = render(&cond);
        assert_eq!(sql, "status = ? AND ((role = ?) OR (role = ?))");
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_and_under_or() {
        let cond = Condition::eq("a", 1)
            .and(Condition::eq("b", 2))
            .or(Condition::eq("c", 3));
        let (sql, _) = render(&cond);
        assert_eq!(sql, "(a = ? AND b = ?) OR (c = ?)");
    }

    #[test]
    fn test_in_list() {
        let q = Condition::in_list("id", [1, 2, 3])
            .build_with(&Postgres)
            .unwrap();
        assert_eq!(q.sql, r#""id" IN ($1, $2, $3)"#);
        assert_eq!(q.args.len(), 3);
    }

    #[test]
    fn test_empty_in_list_is_error() {
        let err = Condition::in_list("id", Vec::<i32>::new())
            .build_with(&Standard)
            .unwrap_err();
        assert!(err.is_arity());

        let err = Condition::not_in("id", Vec::<i32>::new())
            .build_with(&Standard)
            .unwrap_err();
        assert!(err.is_arity());
    }

    #[test]
    fn test_between() {
        let q = Condition::not_between("age", 18, 65)
            .build_with(&Postgres)
            .unwrap();
        assert_eq!(q.sql, r#""age" NOT BETWEEN $1 AND $2"#);
        assert_eq!(q.args, vec![Value::Int(18), Value::Int(65)]);
    }

    #[test]
    fn test_between_wrong_arity() {
        let cond = Condition::Compare {
            column: "age".into(),
            op: CompareOp::Between,
            operand: Operand::List(vec![Value::Int(1)]),
        };
        assert!(cond.build_with(&Standard).unwrap_err().is_arity());
    }

    #[test]
    fn test_empty_column_is_error() {
        let err = Condition::eq("", 1).build_with(&Standard).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_template_is_not_rewritten() {
        let cond = Condition::template("a = ? OR b = ?", [1, 2]).and(Condition::eq("c", 3));
        let q = cond.build_with(&Postgres).unwrap();
        assert_eq!(q.sql, r#"a = ? OR b = ? AND "c" = $3"#);
        assert_eq!(q.args, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_raw_has_no_args() {
        let (sql, args) = render(&Condition::raw("1 = 1"));
        assert_eq!(sql, "1 = 1");
        assert!(args.is_empty());
    }

    #[test]
    fn test_not() {
        let (sql, args) = render(&Condition::eq("banned", true).not());
        assert_eq!(sql, "NOT (banned = ?)");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_cols_eq() {
        let q = Condition::cols_eq("u.id", "o.user_id")
            .build_with(&MySql)
            .unwrap();
        assert_eq!(q.sql, "`u`.`id` = `o`.`user_id`");
        assert!(q.args.is_empty());
    }

    #[test]
    fn test_exists_raw() {
        let (sql, _) = render(&Condition::not_exists("SELECT 1 FROM bans b WHERE b.uid = u.id"));
        assert_eq!(sql, "NOT EXISTS (SELECT 1 FROM bans b WHERE b.uid = u.id)");
    }

    #[test]
    fn test_case() {
        let cond = Condition::case()
            .when(Condition::gt("score", 90), "A")
            .when(Condition::gt("score", 75), "B")
            .otherwise("C")
            .end();
        let q = cond.build_with(&Postgres).unwrap();
        assert_eq!(
            q.sql,
            r#"CASE WHEN "score" > $1 THEN $2 WHEN "score" > $3 THEN $4 ELSE $5 END"#
        );
        assert_eq!(
            q.args,
            vec![
                Value::Int(90),
                Value::from("A"),
                Value::Int(75),
                Value::from("B"),
                Value::from("C"),
            ]
        );
    }

    #[test]
    fn test_empty_case_is_error() {
        let err = Condition::case().end().build_with(&Standard).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_render_with_start_index() {
        let r = Condition::eq("a", 1)
            .and(Condition::in_list("b", ["x", "y"]))
            .render(&Postgres, 4)
            .unwrap();
        assert_eq!(r.sql, r#""a" = $4 AND "b" IN ($5, $6)"#);
        assert_eq!(r.next_index, 7);
        assert_eq!(r.args.len(), 3);
    }

    #[test]
    fn test_all_and_any() {
        assert!(Condition::all(Vec::new()).is_none());
        let cond = Condition::all([
            Condition::eq("a", 1),
            Condition::eq("b", 2),
            Condition::eq("c", 3),
        ])
        .unwrap();
        assert_eq!(render(&cond).0, "a = ? AND b = ? AND c = ?");

        let cond = Condition::any([Condition::eq("a", 1), Condition::eq("b", 2)]).unwrap();
        assert_eq!(render(&cond).0, "(a = ?) OR (b = ?)");
    }

    #[derive(Debug)]
    struct OwnedBy(i64);

    impl Statement for OwnedBy {
        fn kind(&self) -> &'static str {
            "owned_by"
        }

        fn write_to(&self, w: &mut SqlWriter<'_>) -> QbResult<()> {
            w.push_ident("owner_id");
            w.push(" = ");
            w.push_arg(Value::Int(self.0));
            Ok(())
        }
    }

    #[test]
    fn test_predicate_continues_numbering() {
        let cond = Condition::eq("kind", "pdf")
            .and(Condition::predicate(OwnedBy(9)))
            .and(Condition::gt("size", 10));
        let q = cond.build_with(&Postgres).unwrap();
        assert_eq!(q.sql, r#""kind" = $1 AND "owner_id" = $2 AND "size" > $3"#);
        assert_eq!(q.args, vec![Value::from("pdf"), Value::Int(9), Value::Int(10)]);

        let r = Condition::predicate(OwnedBy(1)).render(&Postgres, 5).unwrap();
        assert_eq!(r.sql, r#""owner_id" = $5"#);
        assert_eq!(r.next_index, 6);
    }

    #[test]
    fn test_shared_operands_are_unchanged() {
        let base = Condition::eq("tenant_id", 7);
        let left = base.clone().and(Condition::eq("a", 1));
        let right = base.clone().or(Condition::eq("b", 2));
        assert_eq!(render(&base).0, "tenant_id = ?");
        assert_eq!(render(&left).0, "tenant_id = ? AND a = ?");
        assert_eq!(render(&right).0, "(tenant_id = ?) OR (b = ?)");
    }
}
