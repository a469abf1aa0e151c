//! Translates a parsed `Statement` into `Table` operations and the exact
//! output lines the REPL prints.

use crate::error::{Result, StatementError};
use crate::row::Row;
use crate::table::Table;

use super::parser::Statement;

/// Run one data statement. The outer `Result` is the fatal tier (I/O,
/// corruption); the inner one is the single recoverable failure an
/// `insert` can produce. On success, carries the lines to print before
/// `Executed.`
pub fn execute(table: &mut Table, statement: Statement) -> Result<std::result::Result<Vec<String>, StatementError>> {
    match statement {
        Statement::Insert(row) => match table.insert(&row)? {
            Ok(()) => Ok(Ok(Vec::new())),
            Err(e) => Ok(Err(e)),
        },
        Statement::Select => {
            let rows = table.select()?;
            Ok(Ok(rows.iter().map(format_row).collect()))
        }
    }
}

fn format_row(row: &Row) -> String {
    format!("({}, {}, {})", row.id, row.username, row.email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn insert_then_select_round_trips() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("t.db")).unwrap();

        let row = Row::new(1, "user1", "person1@example.com").unwrap();
        let out = execute(&mut table, Statement::Insert(row)).unwrap().unwrap();
        assert!(out.is_empty());

        let out = execute(&mut table, Statement::Select).unwrap().unwrap();
        assert_eq!(out, vec!["(1, user1, person1@example.com)".to_string()]);
    }

    #[test]
    fn duplicate_insert_surfaces_as_recoverable_error() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("t.db")).unwrap();

        let row = Row::new(1, "a", "a@a").unwrap();
        execute(&mut table, Statement::Insert(row.clone())).unwrap().unwrap();

        let second = execute(&mut table, Statement::Insert(row)).unwrap();
        assert_eq!(second, Err(StatementError::DuplicateKey));
    }
}
