//! Cursor: a `(page_num, cell_num, end_of_table)` position into a leaf.
//!
//! A cursor borrows the pager for as long as it lives. It has no existence
//! beyond one statement's execution: nothing here merges cursors across
//! mutating operations, so callers must re-`find`/`start` after an insert.

use crate::error::Result;
use crate::page::{leaf_next_leaf, leaf_num_cells, leaf_value_mut};
use crate::row::ROW_SIZE;
use crate::storage::Pager;

pub struct Cursor<'a> {
    pager: &'a mut Pager,
    pub page_num: u32,
    pub cell_num: u32,
    pub end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(pager: &'a mut Pager, page_num: u32, cell_num: u32, end_of_table: bool) -> Self {
        Self {
            pager,
            page_num,
            cell_num,
            end_of_table,
        }
    }

    /// The 293-byte row slot the cursor currently addresses.
    pub fn value(&mut self) -> Result<&mut [u8; ROW_SIZE]> {
        let page = self.pager.get_page(self.page_num)?;
        Ok(leaf_value_mut(page, self.cell_num as usize))
    }

    /// Move to the next cell, following the `next_leaf` sibling pointer
    /// when the current leaf is exhausted.
    pub fn advance(&mut self) -> Result<()> {
        let page = self.pager.get_page(self.page_num)?;
        self.cell_num += 1;

        if self.cell_num >= leaf_num_cells(page) {
            let next = leaf_next_leaf(page);
            if next == 0 {
                self.end_of_table = true;
            } else {
                self.page_num = next;
                self.cell_num = 0;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btree::tree;
    use crate::row::Row;
    use tempfile::tempdir;

    #[test]
    fn advance_crosses_leaf_boundary_after_split() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(dir.path().join("t.db")).unwrap();
        pager.get_page(0).unwrap();
        crate::page::initialize_leaf(pager.get_page(0).unwrap());
        crate::page::set_is_root(pager.get_page(0).unwrap(), true);

        for id in 1..=14u32 {
            let row = Row::new(id, "u", "e@e").unwrap();
            tree::insert(&mut pager, 0, id, &row).unwrap();
        }

        let mut cursor = tree::start(&mut pager, 0).unwrap();
        let mut seen = Vec::new();
        while !cursor.end_of_table {
            let row = Row::deserialize(cursor.value().unwrap());
            seen.push(row.id);
            cursor.advance().unwrap();
        }
        assert_eq!(seen, (1..=14).collect::<Vec<_>>());
    }
}
