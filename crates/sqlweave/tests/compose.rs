//! Composition of independently built statements.

use sqlweave::qb::{
    Compose, Condition, SelectBuilder, Statement, compose, delete, select, update,
};
use sqlweave::{Postgres, Standard, Value};

#[test]
fn composes_two_filtered_selects() {
    let a = select(["id"])
        .from("users")
        .filter(Condition::template("active = ?", [true]));
    let b = select(["email"])
        .from("users")
        .filter(Condition::template("verified = ?", [true]));

    let q = compose(&a, [&b]).build_with(&Standard).unwrap();
    assert_eq!(
        q.sql,
        "SELECT id, email FROM users WHERE active = ? AND verified = ?"
    );
    assert_eq!(q.args, vec![Value::Bool(true), Value::Bool(true)]);
}

#[test]
fn compose_is_a_left_fold_of_merge() {
    let a = select(["a"]).from("t").where_eq("x", 1);
    let b = select(["b"]).where_eq("y", 2).limit(10);
    let c = select(["c"]).where_eq("z", 3).limit(3);

    let folded = compose(&a, [&b, &c]).build_with(&Postgres).unwrap();
    let manual = a.merge(&b).merge(&c).build_with(&Postgres).unwrap();
    assert_eq!(folded, manual);
    assert_eq!(
        folded.sql,
        r#"SELECT "a", "b", "c" FROM "t" WHERE "x" = $1 AND "y" = $2 AND "z" = $3 LIMIT 3"#
    );
}

#[test]
fn compose_with_no_others_is_a_copy() {
    let a = select(["id"]).from("users").where_eq("id", 1);
    let q = compose(&a, std::iter::empty::<&SelectBuilder>()).build_with(&Standard).unwrap();
    assert_eq!(q, a.build_with(&Standard).unwrap());
}

#[test]
fn composed_template_placeholders_are_not_renumbered() {
    // template text is inserted verbatim, only its args are appended
    let a = select(["id"]).from("t").where_eq("k", 1);
    let b = select(Vec::<String>::new()).filter(Condition::template("v = $1", [2]));
    let q = compose(&a, [&b]).build_with(&Postgres).unwrap();
    assert_eq!(q.sql, r#"SELECT "id" FROM "t" WHERE "k" = $1 AND v = $1"#);
    assert_eq!(q.args, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn composed_or_branches_keep_their_grouping() {
    let a = select(["id"])
        .from("t")
        .filter(Condition::eq("a", 1).or(Condition::eq("b", 2)));
    let b = select(Vec::<String>::new()).filter(Condition::eq("c", 3).or(Condition::eq("d", 4)));
    let q = compose(&a, [&b]).build_with(&Standard).unwrap();
    assert_eq!(
        q.sql,
        "SELECT id FROM t WHERE ((a = ?) OR (b = ?)) AND ((c = ?) OR (d = ?))"
    );
}

#[test]
fn compose_carries_first_error() {
    let good = select(["id"]).from("t");
    let bad = select(["id"]).where_in("k", Vec::<i32>::new());
    // empty IN is detected at build time, so the merge succeeds and build fails
    let err = compose(&good, [&bad]).build_with(&Standard).unwrap_err();
    assert!(err.is_arity());

    let sticky = select(["id"]).order_by("");
    let merged = compose(&good, [&sticky]);
    assert!(merged.error().is_some_and(|e| e.is_structural()));
}

#[test]
fn compose_updates_and_deletes() {
    let base = update("users").set("name", "n").where_eq("id", 5);
    let audit = update("users").set_raw("updated_at", "NOW()").returning(["id"]);
    let q = compose(&base, [&audit]).build_with(&Postgres).unwrap();
    assert_eq!(
        q.sql,
        r#"UPDATE "users" SET "name" = $1, "updated_at" = NOW() WHERE "id" = $2 RETURNING "id""#
    );

    let scoped = delete("events").where_eq("tenant", 1);
    let expired = delete("events").where_lt("at", 100).limit(500);
    let q = compose(&scoped, [&expired]).build_with(&Standard).unwrap();
    assert_eq!(
        q.sql,
        "DELETE FROM events WHERE tenant = ? AND at < ? LIMIT 500"
    );
}
