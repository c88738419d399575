//! Merging independently built statements.
//!
//! `compose(primary, others)` folds [`Compose::merge`] left to right and never
//! touches its inputs. List-like clauses are concatenated in input order,
//! WHERE/HAVING are AND-ed (an absent side is skipped), the primary's target
//! table wins, and for scalar settings such as LIMIT the last value set wins.
//! If any input carries an error, the first one is carried into the result.

use crate::error::QbResult;
use crate::qb::clause::and_conditions;
use crate::qb::delete::{DeleteBuilder, DeleteState};
use crate::qb::select::{SelectBuilder, SelectState};
use crate::qb::update::{UpdateBuilder, UpdateState};

/// Pairwise merge of two statements of the same kind.
pub trait Compose: Sized {
    /// Merge `other` into a copy of `self`.
    fn merge(&self, other: &Self) -> Self;
}

/// Merge `others` into `primary`, left to right.
pub fn compose<'a, S>(primary: &S, others: impl IntoIterator<Item = &'a S>) -> S
where
    S: Compose + Clone + 'a,
{
    others
        .into_iter()
        .fold(primary.clone(), |acc, next| acc.merge(next))
}

fn merge_states<T>(
    left: &QbResult<T>,
    right: &QbResult<T>,
    f: impl FnOnce(&T, &T) -> T,
) -> QbResult<T> {
    match (left, right) {
        (Ok(l), Ok(r)) => Ok(f(l, r)),
        (Err(e), _) | (_, Err(e)) => Err(e.clone()),
    }
}

fn concat<T: Clone>(left: &[T], right: &[T]) -> Vec<T> {
    left.iter().chain(right).cloned().collect()
}

impl Compose for SelectBuilder {
    fn merge(&self, other: &Self) -> Self {
        SelectBuilder::from_state(merge_states(&self.state, &other.state, |l, r| {
            SelectState {
                columns: concat(&l.columns, &r.columns),
                from: l.from.clone(),
                joins: concat(&l.joins, &r.joins),
                where_cond: and_conditions(&l.where_cond, &r.where_cond),
                group_by: concat(&l.group_by, &r.group_by),
                having: and_conditions(&l.having, &r.having),
                order_by: concat(&l.order_by, &r.order_by),
                limit: r.limit.or(l.limit),
                offset: r.offset.or(l.offset),
                distinct: l.distinct || r.distinct,
                dialect: l.dialect.clone().or_else(|| r.dialect.clone()),
            }
        }))
    }
}

impl Compose for UpdateBuilder {
    fn merge(&self, other: &Self) -> Self {
        UpdateBuilder::from_state(merge_states(&self.state, &other.state, |l, r| {
            UpdateState {
                table: l.table.clone(),
                sets: concat(&l.sets, &r.sets),
                where_cond: and_conditions(&l.where_cond, &r.where_cond),
                order_by: concat(&l.order_by, &r.order_by),
                limit: r.limit.or(l.limit),
                returning: concat(&l.returning, &r.returning),
                dialect: l.dialect.clone().or_else(|| r.dialect.clone()),
            }
        }))
    }
}

impl Compose for DeleteBuilder {
    fn merge(&self, other: &Self) -> Self {
        DeleteBuilder::from_state(merge_states(&self.state, &other.state, |l, r| {
            DeleteState {
                table: l.table.clone(),
                where_cond: and_conditions(&l.where_cond, &r.where_cond),
                order_by: concat(&l.order_by, &r.order_by),
                limit: r.limit.or(l.limit),
                returning: concat(&l.returning, &r.returning),
                allow_delete_all: l.allow_delete_all || r.allow_delete_all,
                dialect: l.dialect.clone().or_else(|| r.dialect.clone()),
            }
        }))
    }
}
