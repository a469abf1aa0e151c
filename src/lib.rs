//! # rowdb
//!
//! A single-file, single-table embedded relational database engine with a
//! fixed `(id, username, email)` row schema, backed by a persistent B+tree.
//!
//! ## Architecture
//!
//! - **`storage`**: the pager — owns the backing file, demand-pages
//!   4096-byte pages into a fixed-size cache, and writes everything back
//!   on close.
//! - **`page`**: pure byte-offset accessors for the leaf and internal node
//!   layouts within a page buffer.
//! - **`btree`**: ordered keyed insert (with duplicate detection and
//!   leaf-split/root-promotion), lookup, and in-order scan; `Cursor`
//!   addresses one cell.
//! - **`row`**: the fixed-width `(id, username, email)` codec the tree
//!   treats as an opaque 293-byte value.
//! - **`table`**: the façade that opens/closes the database and translates
//!   statement-level operations into tree operations via cursors.
//! - **`repl`**: the line-oriented front end — statement parsing,
//!   meta-command dispatch, and execution glue — driven by `src/main.rs`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rowdb::{Row, Table};
//!
//! let mut table = Table::open("my_database.db")?;
//! table.insert(&Row::new(1, "alice", "alice@example.com").unwrap())?.unwrap();
//! for row in table.select()? {
//!     println!("({}, {}, {})", row.id, row.username, row.email);
//! }
//! table.close()?;
//! # Ok::<(), rowdb::StorageError>(())
//! ```

pub mod btree;
pub mod error;
pub mod page;
pub mod repl;
pub mod row;
pub mod storage;
pub mod table;

pub use error::{Result, StatementError, StorageError};
pub use row::Row;
pub use table::Table;
