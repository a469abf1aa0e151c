//! Behavioral scenarios driving the REPL execution path directly (parse +
//! execute against a real `Table`/file), without spawning the compiled
//! binary or piping stdin.

use rowdb::error::StatementError;
use rowdb::repl::{execute, parse_statement, Statement};
use rowdb::Table;
use tempfile::tempdir;

fn run(table: &mut Table, line: &str) -> Result<Vec<String>, String> {
    let statement = parse_statement(line).map_err(|e| e.to_string())?;
    match execute(table, statement) {
        Ok(Ok(lines)) => Ok(lines),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// S1 — basic persistence across a close/reopen cycle.
#[test]
fn s1_basic_persistence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.db");

    {
        let mut table = Table::open(&path).unwrap();
        assert_eq!(
            run(&mut table, "insert 1 user1 person1@example.com"),
            Ok(Vec::new())
        );
        table.close().unwrap();
    }

    {
        let mut table = Table::open(&path).unwrap();
        assert_eq!(
            run(&mut table, "select"),
            Ok(vec!["(1, user1, person1@example.com)".to_string()])
        );
    }
}

/// S2 — duplicate key is rejected and the first row is kept.
#[test]
fn s2_duplicate_key() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("t.db")).unwrap();

    assert_eq!(run(&mut table, "insert 1 a a@a"), Ok(Vec::new()));
    assert_eq!(
        run(&mut table, "insert 1 b b@b"),
        Err(StatementError::DuplicateKey.to_string())
    );
    assert_eq!(run(&mut table, "select"), Ok(vec!["(1, a, a@a)".to_string()]));
}

/// S3 — select returns rows sorted by key regardless of insert order.
#[test]
fn s3_sort_order_on_select() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("t.db")).unwrap();

    for line in ["insert 3 c c@c", "insert 1 a a@a", "insert 2 b b@b"] {
        assert_eq!(run(&mut table, line), Ok(Vec::new()));
    }

    assert_eq!(
        run(&mut table, "select"),
        Ok(vec![
            "(1, a, a@a)".to_string(),
            "(2, b, b@b)".to_string(),
            "(3, c, c@c)".to_string(),
        ])
    );
}

/// S4 — validation messages for malformed `insert` statements.
#[test]
fn s4_validation() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("t.db")).unwrap();

    assert_eq!(
        run(&mut table, "insert -1 x x@x"),
        Err(StatementError::NegativeId.to_string())
    );

    let long_username = "a".repeat(33);
    let line = format!("insert 1 {long_username} x@x");
    assert_eq!(
        run(&mut table, &line),
        Err(StatementError::StringTooLong.to_string())
    );

    let long_email = "a".repeat(256);
    let line = format!("insert 1 ok {long_email}");
    assert_eq!(
        run(&mut table, &line),
        Err(StatementError::StringTooLong.to_string())
    );

    assert_eq!(
        run(&mut table, "insert 1 ok"),
        Err(StatementError::SyntaxError.to_string())
    );
}

/// S5 — 14 sequential inserts produce an internal root with two leaves.
#[test]
fn s5_leaf_split_produces_internal_root() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("t.db")).unwrap();

    for id in 1..=14u32 {
        let line = format!("insert {id} user{id} person{id}@example.com");
        assert_eq!(run(&mut table, &line), Ok(Vec::new()));
    }

    let lines = table.render_tree().unwrap();
    assert!(lines[0].contains("internal (size 1)"));
    assert_eq!(lines.iter().filter(|l| l.contains("leaf (size")).count(), 2);

    let selected = run(&mut table, "select").unwrap();
    assert_eq!(selected.len(), 14);
    for (i, line) in selected.iter().enumerate() {
        assert!(line.starts_with(&format!("({}, ", i + 1)));
    }
}

/// S6 — max-length fields round-trip byte-identical.
#[test]
fn s6_max_length_fields_at_boundary() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("t.db")).unwrap();

    let username = "u".repeat(32);
    let email = "e".repeat(255);
    let line = format!("insert 1 {username} {email}");
    assert_eq!(run(&mut table, &line), Ok(Vec::new()));

    let selected = run(&mut table, "select").unwrap();
    assert_eq!(selected, vec![format!("(1, {username}, {email})")]);
}

/// Unrecognized verb produces the documented message and leaves the table
/// untouched.
#[test]
fn unrecognized_statement_verb() {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("t.db")).unwrap();

    assert_eq!(
        run(&mut table, "delete 1"),
        Err(StatementError::UnrecognizedStatement("delete 1".to_string()).to_string())
    );
    assert_eq!(run(&mut table, "select"), Ok(Vec::new()));
}

#[test]
fn matches_statement_enum_shape() {
    assert_eq!(parse_statement("select").unwrap(), Statement::Select);
}
