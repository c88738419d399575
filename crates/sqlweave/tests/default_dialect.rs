//! Tests that mutate the process-wide default dialect.
//!
//! They share one global, so each takes `GLOBAL` for its whole body.

use sqlweave::qb::{Statement, select};
use sqlweave::{MySql, Postgres, Settings, Standard, default_dialect, set_default_dialect};
use std::sync::Mutex;
use std::thread;

static GLOBAL: Mutex<()> = Mutex::new(());

fn lock() -> std::sync::MutexGuard<'static, ()> {
    GLOBAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn build_uses_current_default() {
    let _guard = lock();
    let qb = select(["id"]).from("users").where_eq("id", 1);

    let previous = set_default_dialect(Postgres);
    assert_eq!(qb.build().unwrap().sql, r#"SELECT "id" FROM "users" WHERE "id" = $1"#);

    set_default_dialect(MySql);
    assert_eq!(qb.build().unwrap().sql, "SELECT `id` FROM `users` WHERE `id` = ?");

    set_default_dialect(previous);
}

#[test]
fn builder_override_beats_default() {
    let _guard = lock();
    let previous = set_default_dialect(MySql);
    let q = select(["id"])
        .from("users")
        .dialect(Postgres)
        .build()
        .unwrap();
    assert_eq!(q.sql, r#"SELECT "id" FROM "users""#);
    set_default_dialect(previous);
}

#[test]
fn settings_apply_installs_dialect_and_log_limit() {
    let _guard = lock();
    let settings = Settings::from_toml_str(
        r#"
        dialect = "postgres"
        log_sql_max_len = 32
        "#,
    )
    .unwrap();

    let previous = settings.apply();
    assert_eq!(default_dialect().name(), "postgres");
    assert_eq!(sqlweave::trace::max_logged_sql(), 32);
    assert_eq!(select(["a"]).from("t").to_sql(), r#"SELECT "a" FROM "t""#);

    set_default_dialect(previous);
    sqlweave::trace::set_max_logged_sql(sqlweave::trace::DEFAULT_MAX_LOGGED_SQL);
}

#[test]
fn concurrent_builds_see_a_whole_dialect() {
    let _guard = lock();
    let previous = set_default_dialect(Standard);

    let writer = thread::spawn(|| {
        for i in 0..200 {
            if i % 2 == 0 {
                set_default_dialect(Postgres);
            } else {
                set_default_dialect(MySql);
            }
        }
    });

    let readers: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let qb = select(["id"]).from("t").where_eq("a", 1).where_eq("b", 2);
                for _ in 0..200 {
                    let sql = qb.build().unwrap().sql;
                    assert!(
                        [
                            "SELECT id FROM t WHERE a = ? AND b = ?",
                            r#"SELECT "id" FROM "t" WHERE "a" = $1 AND "b" = $2"#,
                            "SELECT `id` FROM `t` WHERE `a` = ? AND `b` = ?",
                        ]
                        .contains(&sql.as_str()),
                        "mixed dialect output: {sql}"
                    );
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    set_default_dialect(previous);
}
