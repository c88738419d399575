/// Generate the WHERE convenience predicates for a statement builder.
///
/// The builder must provide `fn and_where(self, cond: Condition) -> Self`
/// (AND the condition into the WHERE root, or set it on first use) and
/// `fn fail(self, err: QbError) -> Self` (record a sticky error).
///
/// Usage:
/// ```ignore
/// impl SelectBuilder {
///     impl_where_methods!();
/// }
/// ```
macro_rules! impl_where_methods {
    () => {
        /// Add WHERE: column = value (a NULL value renders `IS NULL`)
        pub fn where_eq(self, column: &str, value: impl Into<$crate::value::Value>) -> Self {
            self.and_where($crate::qb::expr::Condition::eq(column, value))
        }

        /// Add WHERE: column != value (a NULL value renders `IS NOT NULL`)
        pub fn where_ne(self, column: &str, value: impl Into<$crate::value::Value>) -> Self {
            self.and_where($crate::qb::expr::Condition::ne(column, value))
        }

        /// Add WHERE: column > value
        pub fn where_gt(self, column: &str, value: impl Into<$crate::value::Value>) -> Self {
            self.and_where($crate::qb::expr::Condition::gt(column, value))
        }

        /// Add WHERE: column >= value
        pub fn where_gte(self, column: &str, value: impl Into<$crate::value::Value>) -> Self {
            self.and_where($crate::qb::expr::Condition::gte(column, value))
        }

        /// Add WHERE: column < value
        pub fn where_lt(self, column: &str, value: impl Into<$crate::value::Value>) -> Self {
            self.and_where($crate::qb::expr::Condition::lt(column, value))
        }

        /// Add WHERE: column <= value
        pub fn where_lte(self, column: &str, value: impl Into<$crate::value::Value>) -> Self {
            self.and_where($crate::qb::expr::Condition::lte(column, value))
        }

        /// Add WHERE: column LIKE pattern
        pub fn where_like(self, column: &str, pattern: impl Into<$crate::value::Value>) -> Self {
            self.and_where($crate::qb::expr::Condition::like(column, pattern))
        }

        /// Add WHERE: column NOT LIKE pattern
        pub fn where_not_like(
            self,
            column: &str,
            pattern: impl Into<$crate::value::Value>,
        ) -> Self {
            self.and_where($crate::qb::expr::Condition::not_like(column, pattern))
        }

        /// Add WHERE: column IN (values...); an empty list fails at build time
        pub fn where_in<V: Into<$crate::value::Value>>(
            self,
            column: &str,
            values: impl IntoIterator<Item = V>,
        ) -> Self {
            self.and_where($crate::qb::expr::Condition::in_list(column, values))
        }

        /// Add WHERE: column NOT IN (values...); an empty list fails at build time
        pub fn where_not_in<V: Into<$crate::value::Value>>(
            self,
            column: &str,
            values: impl IntoIterator<Item = V>,
        ) -> Self {
            self.and_where($crate::qb::expr::Condition::not_in(column, values))
        }

        /// Add WHERE: column BETWEEN from AND to
        pub fn where_between(
            self,
            column: &str,
            from: impl Into<$crate::value::Value>,
            to: impl Into<$crate::value::Value>,
        ) -> Self {
            self.and_where($crate::qb::expr::Condition::between(column, from, to))
        }

        /// Add WHERE: column NOT BETWEEN from AND to
        pub fn where_not_between(
            self,
            column: &str,
            from: impl Into<$crate::value::Value>,
            to: impl Into<$crate::value::Value>,
        ) -> Self {
            self.and_where($crate::qb::expr::Condition::not_between(column, from, to))
        }

        /// Add WHERE: column IS NULL
        pub fn where_null(self, column: &str) -> Self {
            self.and_where($crate::qb::expr::Condition::is_null(column))
        }

        /// Add WHERE: column IS NOT NULL
        pub fn where_not_null(self, column: &str) -> Self {
            self.and_where($crate::qb::expr::Condition::is_not_null(column))
        }

        /// Add WHERE: left = right (two columns, nothing bound)
        pub fn where_cols_eq(self, left: &str, right: &str) -> Self {
            self.and_where($crate::qb::expr::Condition::cols_eq(left, right))
        }

        /// Add WHERE: EXISTS (subquery)
        pub fn where_exists(self, subquery: impl Into<$crate::qb::expr::Subquery>) -> Self {
            self.and_where($crate::qb::expr::Condition::exists(subquery))
        }

        /// Add WHERE: NOT EXISTS (subquery)
        pub fn where_not_exists(self, subquery: impl Into<$crate::qb::expr::Subquery>) -> Self {
            self.and_where($crate::qb::expr::Condition::not_exists(subquery))
        }

        /// Add a raw WHERE fragment without arguments.
        pub fn where_raw(self, sql: &str) -> Self {
            self.and_where($crate::qb::expr::Condition::raw(sql))
        }

        /// Add a pre-formatted WHERE fragment carrying its own arguments.
        pub fn where_template<V: Into<$crate::value::Value>>(
            self,
            sql: &str,
            args: impl IntoIterator<Item = V>,
        ) -> Self {
            self.and_where($crate::qb::expr::Condition::template(sql, args))
        }

        /// Add WHERE if value is Some: column = value
        pub fn where_eq_opt<V: Into<$crate::value::Value>>(
            self,
            column: &str,
            value: Option<V>,
        ) -> Self {
            match value {
                Some(v) => self.where_eq(column, v),
                None => self,
            }
        }

        /// AND any condition into WHERE.
        pub fn filter(self, cond: impl $crate::qb::expr::IntoCondition) -> Self {
            match cond.into_condition() {
                Ok(cond) => self.and_where(cond),
                Err(err) => self.fail(err),
            }
        }
    };
}
