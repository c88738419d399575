//! Scalar and aggregate function expressions for projections.
//!
//! The helpers produce expression text (`COUNT(*)`, `LOWER(u.email)`) to pass
//! to `column`, `column_as`, `group_by` or `order_by`. Arguments are expected
//! to be column references or simple expressions; anything that looks like a
//! smuggled statement is refused with [`QbError::UnsafeInput`].
//!
//! ```ignore
//! use sqlweave::{func, qb};
//!
//! let q = qb::select(["dept"])
//!     .column_as(&func::count("*")?, "headcount")
//!     .from("employees")
//!     .group_by("dept");
//! ```

use crate::error::{QbError, QbResult};
use crate::ident::is_plain_ident;
use regex::Regex;
use std::sync::OnceLock;

fn suspicious_re() -> &'static Regex {
    static SUSPICIOUS_RE: OnceLock<Regex> = OnceLock::new();
    SUSPICIOUS_RE.get_or_init(|| {
        Regex::new(
            r"(?i)(;|--|/\*|\*/|\b(select|insert|update|delete|drop|alter|create|truncate|union|grant|revoke|exec|execute)\b)",
        )
        .expect("invalid built-in injection regex")
    })
}

/// Check that `arg` is safe to splice into a function call.
pub fn check_arg(arg: &str) -> QbResult<&str> {
    let trimmed = arg.trim();
    if trimmed.is_empty() {
        return Err(QbError::structural("function argument cannot be empty"));
    }
    if trimmed.contains(['\'', '"', '`']) {
        return Err(QbError::unsafe_input(format!(
            "quoted text is not allowed in function argument: {trimmed}"
        )));
    }
    if let Some(m) = suspicious_re().find(trimmed) {
        return Err(QbError::unsafe_input(format!(
            "function argument contains `{}`: {trimmed}",
            m.as_str()
        )));
    }
    Ok(trimmed)
}

/// `NAME(arg, ...)` for any function name made of identifier characters.
pub fn call(name: &str, args: &[&str]) -> QbResult<String> {
    if !is_plain_ident(name) || name.contains('.') {
        return Err(QbError::unsafe_input(format!(
            "invalid function name: {name}"
        )));
    }
    let mut out = String::with_capacity(name.len() + 2 + args.len() * 8);
    out.push_str(name);
    out.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(check_arg(arg)?);
    }
    out.push(')');
    Ok(out)
}

/// `COUNT(expr)`; pass `"*"` for `COUNT(*)`.
pub fn count(expr: &str) -> QbResult<String> {
    call("COUNT", &[expr])
}

/// `COUNT(DISTINCT expr)`
pub fn count_distinct(expr: &str) -> QbResult<String> {
    Ok(format!("COUNT(DISTINCT {})", check_arg(expr)?))
}

pub fn sum(expr: &str) -> QbResult<String> {
    call("SUM", &[expr])
}

pub fn avg(expr: &str) -> QbResult<String> {
    call("AVG", &[expr])
}

pub fn min(expr: &str) -> QbResult<String> {
    call("MIN", &[expr])
}

pub fn max(expr: &str) -> QbResult<String> {
    call("MAX", &[expr])
}

pub fn lower(expr: &str) -> QbResult<String> {
    call("LOWER", &[expr])
}

pub fn upper(expr: &str) -> QbResult<String> {
    call("UPPER", &[expr])
}

/// `COALESCE(a, b, ...)`; needs at least one argument.
pub fn coalesce(exprs: &[&str]) -> QbResult<String> {
    if exprs.is_empty() {
        return Err(QbError::arity("COALESCE requires at least one argument"));
    }
    call("COALESCE", exprs)
}
