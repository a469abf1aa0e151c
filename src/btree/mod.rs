//! The B+tree: ordered keyed insert (with duplicate detection and
//! leaf-split/root-promotion), lookup by key, and in-order scan.

mod cursor;
pub mod tree;

pub use cursor::Cursor;
pub use tree::InsertError;
