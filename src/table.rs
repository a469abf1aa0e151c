//! The `Table` façade: opens/closes the database and translates statement-
//! level operations into B+tree operations via cursors.

use std::path::Path;

use crate::btree::{tree, InsertError};
use crate::error::{Result, StatementError};
use crate::page::{initialize_leaf, set_is_root};
use crate::row::Row;
use crate::storage::Pager;

/// The database's single table. `root_page_num` is always `0`: the root
/// never moves, only its contents are rewritten in place on split.
pub struct Table {
    pager: Pager,
    root_page_num: u32,
}

impl Table {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut pager = Pager::open(path)?;
        if pager.num_pages() == 0 {
            let root = pager.get_page(0)?;
            initialize_leaf(root);
            set_is_root(root, true);
        }
        Ok(Self {
            pager,
            root_page_num: 0,
        })
    }

    pub fn close(&mut self) -> Result<()> {
        self.pager.close()
    }

    /// Insert `row`. The outer `Result` is the fatal tier; the inner one
    /// carries the single recoverable failure this operation can have.
    pub fn insert(&mut self, row: &Row) -> Result<std::result::Result<(), StatementError>> {
        match tree::insert(&mut self.pager, self.root_page_num, row.id, row) {
            Ok(()) => Ok(Ok(())),
            Err(InsertError::Duplicate) => Ok(Err(StatementError::DuplicateKey)),
            Err(InsertError::TableFull) => Ok(Err(StatementError::TableFull)),
            Err(InsertError::Fatal(e)) => Err(e),
        }
    }

    /// All rows in key order.
    pub fn select(&mut self) -> Result<Vec<Row>> {
        let mut cursor = tree::start(&mut self.pager, self.root_page_num)?;
        let mut rows = Vec::new();
        while !cursor.end_of_table {
            rows.push(Row::deserialize(cursor.value()?));
            cursor.advance()?;
        }
        Ok(rows)
    }

    /// A line-per-node rendering of the tree, for `.btree`.
    pub fn render_tree(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        self.render_node(self.root_page_num, 0, &mut lines)?;
        Ok(lines)
    }

    fn render_node(&mut self, page_num: u32, depth: usize, out: &mut Vec<String>) -> Result<()> {
        use crate::page::{
            internal_cell_key, internal_child, internal_num_keys, internal_right_child, leaf_key,
            leaf_num_cells, node_type, NodeType,
        };

        let indent = "  ".repeat(depth);
        let page = self.pager.get_page(page_num)?;
        match node_type(page) {
            NodeType::Leaf => {
                let n = leaf_num_cells(page);
                out.push(format!("{indent}- leaf (size {n})"));
                for i in 0..n {
                    let key = leaf_key(self.pager.get_page(page_num)?, i as usize);
                    out.push(format!("{indent}  - {i} : {key}"));
                }
            }
            NodeType::Internal => {
                let num_keys = internal_num_keys(page);
                out.push(format!("{indent}- internal (size {num_keys})"));
                for i in 0..num_keys {
                    let child = internal_child(self.pager.get_page(page_num)?, i as usize);
                    self.render_node(child, depth + 1, out)?;
                    let key = internal_cell_key(self.pager.get_page(page_num)?, i as usize);
                    out.push(format!("{indent}  - key {key}"));
                }
                let right_child = internal_right_child(self.pager.get_page(page_num)?);
                self.render_node(right_child, depth + 1, out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reopening_preserves_inserted_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.db");

        {
            let mut table = Table::open(&path).unwrap();
            table
                .insert(&Row::new(1, "user1", "person1@example.com").unwrap())
                .unwrap()
                .unwrap();
            table.close().unwrap();
        }

        {
            let mut table = Table::open(&path).unwrap();
            let rows = table.select().unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].username, "user1");
        }
    }

    #[test]
    fn select_is_sorted_by_key_regardless_of_insert_order() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("t.db")).unwrap();
        for id in [3u32, 1, 2] {
            table
                .insert(&Row::new(id, "u", "e@e").unwrap())
                .unwrap()
                .unwrap();
        }
        let ids: Vec<u32> = table.select().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_insert_leaves_first_row_intact() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("t.db")).unwrap();
        table
            .insert(&Row::new(1, "a", "a@a").unwrap())
            .unwrap()
            .unwrap();
        let second = table.insert(&Row::new(1, "b", "b@b").unwrap()).unwrap();
        assert_eq!(second, Err(StatementError::DuplicateKey));

        let rows = table.select().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "a");
    }

    #[test]
    fn render_tree_after_split_shows_internal_root_with_two_leaves() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("t.db")).unwrap();
        for id in 1..=14u32 {
            table
                .insert(&Row::new(id, "u", "e@e").unwrap())
                .unwrap()
                .unwrap();
        }
        let lines = table.render_tree().unwrap();
        assert!(lines[0].contains("internal (size 1)"));
        assert_eq!(lines.iter().filter(|l| l.contains("leaf (size")).count(), 2);
    }
}
