//! SQL dialects: placeholder syntax and quoting.
//!
//! A [`Dialect`] is a stateless strategy with exactly three capabilities. The
//! builders never look at which dialect they render for; they only call these
//! operations, so a new backend only has to implement the trait.
//!
//! # Example
//! ```ignore
//! use sqlweave::dialect::{Dialect, MySql, Postgres};
//!
//! assert_eq!(MySql.quote_ident("shop.orders"), "`shop`.`orders`");
//! assert_eq!(Postgres.placeholder(3), "$3");
//! ```

use std::fmt::Debug;
use std::sync::{Arc, LazyLock, RwLock};

/// Placeholder and quoting strategy for a target SQL engine.
pub trait Dialect: Debug + Send + Sync {
    /// Insertion text for the `position`-th argument (1-based).
    fn placeholder(&self, position: usize) -> String;

    /// Quote a possibly dotted identifier, segment by segment.
    fn quote_ident(&self, name: &str) -> String;

    /// Quote a string literal, doubling embedded single quotes.
    fn quote_string(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for ch in value.chars() {
            if ch == '\'' {
                out.push('\'');
            }
            out.push(ch);
        }
        out.push('\'');
        out
    }

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Shared handle to a dialect.
pub type DialectRef = Arc<dyn Dialect>;

/// Quote every `.`-separated segment of `name` with `quote`, doubling any
/// embedded quote character.
pub fn quote_segments(name: &str, quote: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (i, segment) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push(quote);
        for ch in segment.chars() {
            if ch == quote {
                out.push(quote);
            }
            out.push(ch);
        }
        out.push(quote);
    }
    out
}

/// No identifier quoting, `?` placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standard;

impl Dialect for Standard {
    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    fn quote_ident(&self, name: &str) -> String {
        name.to_string()
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

/// Backtick identifiers, `?` placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySql;

impl Dialect for MySql {
    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_segments(name, '`')
    }

    fn name(&self) -> &'static str {
        "mysql"
    }
}

/// Double-quoted identifiers, `$n` placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Postgres;

impl Dialect for Postgres {
    fn placeholder(&self, position: usize) -> String {
        format!("${position}")
    }

    fn quote_ident(&self, name: &str) -> String {
        quote_segments(name, '"')
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

impl From<Standard> for DialectRef {
    fn from(d: Standard) -> Self {
        Arc::new(d)
    }
}

impl From<MySql> for DialectRef {
    fn from(d: MySql) -> Self {
        Arc::new(d)
    }
}

impl From<Postgres> for DialectRef {
    fn from(d: Postgres) -> Self {
        Arc::new(d)
    }
}

static DEFAULT_DIALECT: LazyLock<RwLock<DialectRef>> =
    LazyLock::new(|| RwLock::new(Arc::new(Standard)));

/// Get the process-wide default dialect.
///
/// Builders without an explicit override read this once per build.
pub fn default_dialect() -> DialectRef {
    match DEFAULT_DIALECT.read() {
        Ok(guard) => Arc::clone(&*guard),
        Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
    }
}

/// Replace the process-wide default dialect, returning the previous one.
pub fn set_default_dialect(dialect: impl Into<DialectRef>) -> DialectRef {
    let dialect = dialect.into();
    let mut guard = match DEFAULT_DIALECT.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    std::mem::replace(&mut *guard, dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders() {
        assert_eq!(Standard.placeholder(1), "?");
        assert_eq!(MySql.placeholder(9), "?");
        assert_eq!(Postgres.placeholder(12), "$12");
    }

    #[test]
    fn quote_ident_dotted() {
        assert_eq!(Standard.quote_ident("public.users"), "public.users");
        assert_eq!(MySql.quote_ident("shop.orders"), "`shop`.`orders`");
        assert_eq!(Postgres.quote_ident("public.users"), r#""public"."users""#);
    }

    #[test]
    fn quote_ident_escapes_quote_char() {
        assert_eq!(Postgres.quote_ident(r#"we"ird"#), r#""we""ird""#);
        assert_eq!(MySql.quote_ident("a`b"), "`a``b`");
    }

    #[test]
    fn quote_string_doubles_single_quotes() {
        assert_eq!(Standard.quote_string("O'Brien"), "'O''Brien'");
        assert_eq!(Postgres.quote_string(""), "''");
    }
}
