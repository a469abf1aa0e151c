//! Statement parsing: `insert <id> <username> <email>` and `select`.
//!
//! This is the external collaborator the storage engine's own
//! documentation disclaims responsibility for — the grammar is a single
//! verb plus whitespace-delimited fields, not a general SQL dialect.

use crate::error::StatementError;
use crate::row::Row;

/// A parsed data statement, ready for `execute::execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// Parse one line of input into a `Statement`.
///
/// `line` must already have its trailing newline stripped.
pub fn parse_statement(line: &str) -> Result<Statement, StatementError> {
    if line == "select" || line.starts_with("select ") {
        return Ok(Statement::Select);
    }
    if line == "insert" || line.starts_with("insert ") {
        return parse_insert(line);
    }
    Err(StatementError::UnrecognizedStatement(line.to_string()))
}

fn parse_insert(line: &str) -> Result<Statement, StatementError> {
    let mut fields = line.split_whitespace();
    fields.next(); // the "insert" keyword itself

    let id_field = fields.next().ok_or(StatementError::SyntaxError)?;
    let username = fields.next().ok_or(StatementError::SyntaxError)?;
    let email = fields.next().ok_or(StatementError::SyntaxError)?;
    if fields.next().is_some() {
        return Err(StatementError::SyntaxError);
    }

    let id: i64 = id_field.parse().map_err(|_| StatementError::SyntaxError)?;
    if id < 0 {
        return Err(StatementError::NegativeId);
    }
    let id = id as u32;

    Ok(Statement::Insert(Row::new(id, username, email)?))
}
