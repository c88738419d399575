//! Clause pieces shared by several statement builders.

use crate::error::{QbError, QbResult};
use crate::qb::expr::Condition;
use crate::qb::writer::SqlWriter;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// One ORDER BY item: a column or expression with an optional direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub expr: String,
    pub order: Option<Order>,
}

/// Reject empty names for required identifiers.
pub(crate) fn require_name(what: &str, name: &str) -> QbResult<()> {
    if name.trim().is_empty() {
        return Err(QbError::structural(format!("{what} cannot be empty")));
    }
    Ok(())
}

pub(crate) fn write_order_by(w: &mut SqlWriter<'_>, items: &[OrderBy]) {
    if items.is_empty() {
        return;
    }
    w.push(" ORDER BY ");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.push_ident(&item.expr);
        if let Some(order) = item.order {
            w.push(" ");
            w.push(order.as_sql());
        }
    }
}

pub(crate) fn write_limit_offset(w: &mut SqlWriter<'_>, limit: Option<u64>, offset: Option<u64>) {
    if let Some(limit) = limit {
        w.push(&format!(" LIMIT {limit}"));
    }
    if let Some(offset) = offset {
        w.push(&format!(" OFFSET {offset}"));
    }
}

pub(crate) fn write_returning(w: &mut SqlWriter<'_>, cols: &[String]) {
    if cols.is_empty() {
        return;
    }
    w.push(" RETURNING ");
    w.push_ident_list(cols);
}

/// Merge two optional conditions with AND; an absent side is skipped.
pub(crate) fn and_conditions(
    left: &Option<Condition>,
    right: &Option<Condition>,
) -> Option<Condition> {
    match (left, right) {
        (Some(l), Some(r)) => Some(l.clone().and(r.clone())),
        (Some(l), None) => Some(l.clone()),
        (None, Some(r)) => Some(r.clone()),
        (None, None) => None,
    }
}
