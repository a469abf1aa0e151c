//! Error types for the storage engine and the statement layer above it.
//!
//! The engine distinguishes two tiers, matching the database's error
//! handling design: a `StorageError` tier is fatal (I/O, corruption,
//! invariant violations) and always terminates the process; a
//! `StatementError` tier is recoverable and is reported to the user
//! without touching tree state.

use thiserror::Error;

/// Result type alias for storage-engine operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Fatal errors from the pager, node layout, or B+tree.
///
/// None of these are meant to be handled locally; the REPL prints the
/// message and exits with a nonzero status.
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error from the underlying file system.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The database file's length is not a whole multiple of the page size.
    #[error("Db file is not a whole number of pages. Corrupt file.")]
    CorruptFileLength,

    /// A page number was requested outside the fixed page-cache bound.
    #[error("Tried to fetch page number out of bounds. {0} > {1}")]
    PageNumberOutOfBounds(u32, u32),

    /// Attempted to flush a page that was never faulted into the cache.
    #[error("Tried to flush null page.")]
    FlushNullPage,
}

/// Statement-level errors: parse errors and execution errors.
///
/// These never terminate the process. The REPL converts each variant to
/// its exact user-facing line and returns to the prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,

    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    /// The first whitespace-delimited token isn't `insert` or `select`.
    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),

    #[error("Error: Duplicate key.")]
    DuplicateKey,

    /// A non-root leaf overflowed: splitting it would require updating its
    /// parent, and internal-node split is a preserved gap (see
    /// `btree::tree::leaf_split_and_insert`). Recoverable at the statement
    /// level — the row is simply not inserted.
    #[error("Error: Table full.")]
    TableFull,
}
