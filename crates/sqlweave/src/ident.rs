//! Identifier classification.
//!
//! Builders accept both plain identifiers (`users`, `u.email`, `public.users`)
//! and free-form expressions (`COUNT(*)`, `created_at DESC`). Only plain
//! identifiers are passed through [`Dialect::quote_ident`]; everything else is
//! emitted verbatim and is caller-trusted.
//!
//! A plain identifier is one or more segments joined by `.`, each matching
//! `[A-Za-z_][A-Za-z0-9_$]*`. A trailing `.*` is allowed (`u.*`).

use crate::dialect::Dialect;

fn is_plain_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
}

/// Check whether `s` is a plain, possibly dotted identifier.
pub fn is_plain_ident(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_plain_segment)
}

/// Quote `s` if it is a plain identifier (optionally ending in `.*`);
/// otherwise return it unchanged.
pub fn quote_if_plain(dialect: &dyn Dialect, s: &str) -> String {
    if is_plain_ident(s) {
        return dialect.quote_ident(s);
    }
    if let Some(prefix) = s.strip_suffix(".*") {
        if is_plain_ident(prefix) {
            let mut out = dialect.quote_ident(prefix);
            out.push_str(".*");
            return out;
        }
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySql, Postgres, Standard};

    #[test]
    fn plain_identifiers() {
        assert!(is_plain_ident("users"));
        assert!(is_plain_ident("public.users"));
        assert!(is_plain_ident("_tmp$1"));
        assert!(is_plain_ident("schema.table.column"));
    }

    #[test]
    fn rejects_expressions() {
        assert!(!is_plain_ident(""));
        assert!(!is_plain_ident("*"));
        assert!(!is_plain_ident("COUNT(*)"));
        assert!(!is_plain_ident("1table"));
        assert!(!is_plain_ident("schema..table"));
        assert!(!is_plain_ident("schema."));
        assert!(!is_plain_ident("created_at DESC"));
    }

    #[test]
    fn quotes_only_plain() {
        assert_eq!(quote_if_plain(&MySql, "u.email"), "`u`.`email`");
        assert_eq!(quote_if_plain(&MySql, "COUNT(*)"), "COUNT(*)");
        assert_eq!(quote_if_plain(&Postgres, "*"), "*");
        assert_eq!(quote_if_plain(&Standard, "users"), "users");
    }

    #[test]
    fn star_suffix() {
        assert_eq!(quote_if_plain(&Postgres, "u.*"), r#""u".*"#);
    }
}
