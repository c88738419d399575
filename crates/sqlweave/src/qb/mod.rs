//! Statement builders.
//!
//! Every builder renders through one [`SqlWriter`], so placeholders are
//! numbered continuously across projection subqueries, JOIN conditions,
//! WHERE and HAVING, whatever the dialect.
//!
//! # Usage
//!
//! ```ignore
//! use sqlweave::qb::{self, Condition, Statement};
//! use sqlweave::dialect::Postgres;
//!
//! // SELECT
//! let q = qb::select(["id", "email"])
//!     .from("users")
//!     .where_eq("status", "active")
//!     .filter(Condition::gt("age", 18).or(Condition::is_null("age")))
//!     .order_by_desc("created_at")
//!     .limit(20)
//!     .build_with(&Postgres)?;
//!
//! // INSERT
//! let q = qb::insert("users")
//!     .set("username", "alice")
//!     .set("email", "alice@example.com")
//!     .returning(["id"])
//!     .build()?;
//!
//! // UPDATE
//! let q = qb::update("users")
//!     .set("status", "inactive")
//!     .where_eq("id", user_id)
//!     .build()?;
//!
//! // DELETE
//! let q = qb::delete("users").where_eq("id", user_id).build()?;
//!
//! // Compose
//! let base = qb::select(["id"]).from("users").where_eq("active", true);
//! let extra = qb::select(["email"]).where_eq("verified", true);
//! let q = qb::compose(&base, [&extra]).build()?;
//! ```

#[macro_use]
mod where_macros;

mod clause;
mod compose;
mod delete;
mod expr;
mod insert;
mod select;
mod traits;
mod update;
mod writer;

pub use clause::{Order, OrderBy};
pub use compose::{Compose, compose};
pub use delete::DeleteBuilder;
pub use expr::{
    CaseBranch, CaseBuilder, CompareOp, Condition, IntoCondition, Operand, Predicate, Rendered,
    Subquery,
};
pub use insert::InsertBuilder;
pub use select::{Join, JoinKind, Projection, SelectBuilder};
pub use traits::{BuiltQuery, Statement};
pub use update::{SetValue, UpdateBuilder};
pub use writer::SqlWriter;

/// Create a SELECT builder projecting `cols`.
///
/// # Example
/// ```ignore
/// let qb = sqlweave::qb::select(["id", "name"]).from("users");
/// ```
pub fn select<S: Into<String>>(cols: impl IntoIterator<Item = S>) -> SelectBuilder {
    SelectBuilder::new().columns(cols)
}

/// Create a SELECT builder reading from `table`; add columns afterwards.
pub fn select_from(table: &str) -> SelectBuilder {
    SelectBuilder::new().from(table)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Alias for `insert`.
pub fn insert_into(table: &str) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &str) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

/// Create a DELETE builder for the given table.
///
/// # Safety
/// A DELETE without WHERE fails to build unless `allow_delete_all(true)` is
/// set.
pub fn delete(table: &str) -> DeleteBuilder {
    DeleteBuilder::new(table)
}

/// Alias for `delete`.
pub fn delete_from(table: &str) -> DeleteBuilder {
    DeleteBuilder::new(table)
}
