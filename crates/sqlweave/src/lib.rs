//! # sqlweave
//!
//! A composable SQL statement builder.
//!
//! ## Features
//!
//! - **Condition trees**: comparisons, IN/BETWEEN, NULL checks, raw and
//!   templated fragments, EXISTS subqueries and CASE, combined with AND/OR/NOT
//! - **Continuous placeholder numbering**: one writer is threaded through a
//!   whole statement, so `$n` stays correct across joins, subqueries, WHERE
//!   and HAVING
//! - **Dialects**: standard (`?`), MySQL (backticks, `?`) and Postgres
//!   (double quotes, `$n`); any [`Dialect`] implementation plugs in
//! - **Composition**: merge independently built statements with
//!   [`qb::compose`]
//! - **Safe defaults**: DELETE requires WHERE, UPDATE requires SET, errors
//!   are returned from `build()` instead of producing broken SQL
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use sqlweave::qb::{self, Condition, Statement};
//! use sqlweave::dialect::Postgres;
//!
//! let q = qb::select(["id", "email"])
//!     .from("users")
//!     .where_eq("status", "active")
//!     .filter(Condition::gt("age", 18).or(Condition::is_null("age")))
//!     .build_with(&Postgres)?;
//!
//! assert_eq!(
//!     q.sql,
//!     r#"SELECT "id", "email" FROM "users" WHERE "status" = $1 AND (("age" > $2) OR ("age" IS NULL))"#
//! );
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod func;
pub mod ident;
pub mod interpolate;
#[cfg(feature = "postgres")]
pub mod pg;
pub mod qb;
pub mod trace;
pub mod value;

pub use config::{DialectKind, Settings};
pub use dialect::{
    Dialect, DialectRef, MySql, Postgres, Standard, default_dialect, set_default_dialect,
};
pub use error::{QbError, QbResult};
pub use interpolate::interpolate;
pub use value::Value;

// Re-export qb module for easy access
pub use qb::{
    BuiltQuery, Compose, Condition, DeleteBuilder, InsertBuilder, IntoCondition, SelectBuilder,
    Statement, UpdateBuilder, compose, delete, delete_from, insert, insert_into, select,
    select_from, update,
};
