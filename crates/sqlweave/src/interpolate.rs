//! Inline arguments into SQL text for logs and error messages.
//!
//! **Never execute the output.** Literals are rendered with
//! [`Value::to_literal`], which is good enough to read, not to defend
//! against injection.

use crate::dialect::Dialect;
use crate::error::{QbError, QbResult};
use crate::value::Value;

/// Replace the placeholders in `sql` with literal renderings of `args`.
///
/// Dialects whose placeholder text depends on the position (`$1`, `$2`) are
/// resolved by number; otherwise (`?`) markers are consumed in order.
/// Placeholders inside quoted strings or quoted identifiers are left alone.
pub fn interpolate(sql: &str, args: &[Value], dialect: &dyn Dialect) -> QbResult<String> {
    let first = dialect.placeholder(1);
    if first != dialect.placeholder(2) {
        let prefix = first.strip_suffix('1').ok_or_else(|| {
            QbError::structural(format!(
                "cannot interpolate placeholders of the form {first}"
            ))
        })?;
        interpolate_positional(sql, args, prefix, dialect)
    } else {
        interpolate_sequential(sql, args, &first, dialect)
    }
}

/// Split `sql` into spans that are inside a quoted section or not.
///
/// Calls `visit(chunk, quoted)` for each span in order.
fn for_each_span(sql: &str, mut visit: impl FnMut(&str, bool) -> QbResult<()>) -> QbResult<()> {
    let mut start = 0;
    let mut quote: Option<char> = None;
    for (i, ch) in sql.char_indices() {
        match quote {
            None if matches!(ch, '\'' | '"' | '`') => {
                visit(&sql[start..i], false)?;
                start = i;
                quote = Some(ch);
            }
            Some(q) if ch == q => {
                // a doubled quote reopens immediately, so the span stays intact
                visit(&sql[start..i + ch.len_utf8()], true)?;
                start = i + ch.len_utf8();
                quote = None;
            }
            _ => {}
        }
    }
    visit(&sql[start..], quote.is_some())
}

fn interpolate_sequential(
    sql: &str,
    args: &[Value],
    marker: &str,
    dialect: &dyn Dialect,
) -> QbResult<String> {
    let mut out = String::with_capacity(sql.len() + args.len() * 8);
    let mut next = args.iter();
    for_each_span(sql, |chunk, quoted| {
        if quoted {
            out.push_str(chunk);
            return Ok(());
        }
        let mut pieces = chunk.split(marker);
        if let Some(head) = pieces.next() {
            out.push_str(head);
        }
        for piece in pieces {
            let value = next.next().ok_or_else(|| {
                QbError::arity(format!(
                    "SQL has more placeholders than the {} arguments given",
                    args.len()
                ))
            })?;
            out.push_str(&value.to_literal(dialect));
            out.push_str(piece);
        }
        Ok(())
    })?;
    if next.next().is_some() {
        return Err(QbError::arity(format!(
            "SQL has fewer placeholders than the {} arguments given",
            args.len()
        )));
    }
    Ok(out)
}

fn interpolate_positional(
    sql: &str,
    args: &[Value],
    prefix: &str,
    dialect: &dyn Dialect,
) -> QbResult<String> {
    let mut out = String::with_capacity(sql.len() + args.len() * 8);
    for_each_span(sql, |chunk, quoted| {
        if quoted {
            out.push_str(chunk);
            return Ok(());
        }
        let mut rest = chunk;
        while let Some(pos) = rest.find(prefix) {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + prefix.len()..];
            let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                out.push_str(prefix);
                rest = after;
                continue;
            }
            let number = &after[..digits];
            let position: usize = number
                .parse()
                .map_err(|_| QbError::arity(format!("invalid placeholder {prefix}{number}")))?;
            let value = position
                .checked_sub(1)
                .and_then(|i| args.get(i))
                .ok_or_else(|| {
                    QbError::arity(format!(
                        "placeholder {prefix}{position} has no argument ({} given)",
                        args.len()
                    ))
                })?;
            out.push_str(&value.to_literal(dialect));
            rest = &after[digits..];
        }
        out.push_str(rest);
        Ok(())
    })?;
    Ok(out)
}
