//! Compose a listing query from reusable pieces and print it per dialect.
//!
//! Run with: `cargo run -p sqlweave --example compose`

use sqlweave::qb::{Condition, Statement, compose, select};
use sqlweave::{Dialect, MySql, Postgres, Standard, interpolate};

fn main() -> Result<(), sqlweave::QbError> {
    let base = select(["u.id", "u.email"]).from("users u");

    let only_active = select(Vec::<String>::new())
        .where_eq("u.active", true)
        .where_null("u.deleted_at");

    let tenant_scope = select(["t.name"])
        .inner_join("tenants t", Condition::cols_eq("t.id", "u.tenant_id"))
        .where_eq("t.slug", "acme");

    let paging = select(Vec::<String>::new())
        .order_by_desc("u.created_at")
        .paginate(2, 25);

    let query = compose(&base, [&only_active, &tenant_scope, &paging]);

    let dialects: [&dyn Dialect; 3] = [&Standard, &MySql, &Postgres];
    for dialect in dialects {
        let built = query.build_with(dialect)?;
        println!("-- {}", dialect.name());
        println!("{}", built.sql);
        println!("args: {:?}", built.args);
        println!("debug: {}", interpolate(&built.sql, &built.args, dialect)?);
        println!();
    }

    Ok(())
}
