//! SQL text and argument accumulation with placeholder numbering.
//!
//! A single [`SqlWriter`] is threaded through every clause of a statement, so
//! placeholder positions are computed once, in render order, and never patched
//! afterwards. Subqueries render into the same writer and continue the
//! numbering of their parent.

use crate::dialect::Dialect;
use crate::ident::quote_if_plain;
use crate::value::Value;

/// Accumulates SQL text and the ordered argument list for one render.
#[derive(Debug)]
pub struct SqlWriter<'d> {
    dialect: &'d dyn Dialect,
    sql: String,
    args: Vec<Value>,
    /// Number of positions consumed before this writer started.
    offset: usize,
}

impl<'d> SqlWriter<'d> {
    /// Create a writer whose first placeholder is position 1.
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self::starting_at(dialect, 1)
    }

    /// Create a writer whose first placeholder is position `start` (1-based).
    pub fn starting_at(dialect: &'d dyn Dialect, start: usize) -> Self {
        Self {
            dialect,
            sql: String::new(),
            args: Vec::new(),
            offset: start.saturating_sub(1),
        }
    }

    /// The dialect this writer renders for.
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Append raw SQL text.
    pub fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append an identifier, quoting it when it is a plain identifier.
    pub fn push_ident(&mut self, name: &str) {
        let quoted = quote_if_plain(self.dialect, name);
        self.sql.push_str(&quoted);
    }

    /// Append identifiers separated by `, `.
    pub fn push_ident_list<S: AsRef<str>>(&mut self, names: &[S]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.push_ident(name.as_ref());
        }
    }

    /// Bind a value: append its placeholder and record the argument.
    pub fn push_arg(&mut self, value: Value) {
        self.args.push(value);
        let position = self.offset + self.args.len();
        let placeholder = self.dialect.placeholder(position);
        self.sql.push_str(&placeholder);
    }

    /// Record arguments whose markers are already part of pushed text.
    pub fn extend_args(&mut self, values: impl IntoIterator<Item = Value>) {
        self.args.extend(values);
    }

    /// Position the next bound argument would get.
    pub fn next_index(&self) -> usize {
        self.offset + self.args.len() + 1
    }

    /// Number of arguments recorded so far.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// SQL text written so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Consume the writer, returning the SQL text and arguments.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySql, Postgres};

    #[test]
    fn numbering_is_continuous() {
        let mut w = SqlWriter::new(&Postgres);
        w.push("a = ");
        w.push_arg(Value::from(1));
        w.push(" AND b = ");
        w.push_arg(Value::from(2));
        assert_eq!(w.next_index(), 3);
        let (sql, args) = w.finish();
        assert_eq!(sql, "a = $1 AND b = $2");
        assert_eq!(args, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn starting_offset() {
        let mut w = SqlWriter::starting_at(&Postgres, 4);
        w.push_arg(Value::from("x"));
        assert_eq!(w.sql(), "$4");
        assert_eq!(w.next_index(), 5);
    }

    #[test]
    fn extend_args_advances_numbering() {
        let mut w = SqlWriter::new(&Postgres);
        w.push("x = ?");
        w.extend_args([Value::from(true)]);
        w.push(" AND y = ");
        w.push_arg(Value::from(false));
        assert_eq!(w.sql(), "x = ? AND y = $2");
        assert_eq!(w.arg_count(), 2);
    }

    #[test]
    fn ident_list() {
        let mut w = SqlWriter::new(&MySql);
        w.push_ident_list(&["id", "COUNT(*)"]);
        assert_eq!(w.sql(), "`id`, COUNT(*)");
    }
}
