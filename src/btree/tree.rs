//! B+tree operations: search, insert, and leaf-split with root promotion.
//!
//! Every function here takes the pager and a `root_page_num` (always `0`
//! for the lifetime of a database, per the table layer) rather than owning
//! a tree handle — there is exactly one tree per pager, so a struct wrapper
//! would only carry the same two fields around.

use log::{debug, warn};

use crate::error::{Result, StorageError};
use crate::page::{
    initialize_internal, initialize_leaf, internal_child, internal_find_child, internal_set_num_keys,
    internal_set_right_child, is_root, leaf_key, leaf_next_leaf, leaf_num_cells, leaf_set_next_leaf,
    leaf_set_num_cells, leaf_value, node_max_key, node_type, set_internal_cell, set_is_root,
    shift_cells_right, write_cell, NodeType, LEAF_NODE_MAX_CELLS,
};
use crate::row::{Row, ROW_SIZE};
use crate::storage::Pager;

use super::cursor::Cursor;

/// Distinguishes `insert`'s two recoverable outcomes (duplicate key, table
/// full) from every other, fatal failure.
#[derive(Debug)]
pub enum InsertError {
    Duplicate,
    TableFull,
    Fatal(StorageError),
}

impl From<StorageError> for InsertError {
    fn from(e: StorageError) -> Self {
        InsertError::Fatal(e)
    }
}

/// Binary search within a leaf for `key`. Returns the cell index of an
/// exact match, or the smallest index whose key exceeds `key` (the
/// insertion point) if there is no match.
fn leaf_search(pager: &mut Pager, page_num: u32, key: u32) -> Result<u32> {
    let page = pager.get_page(page_num)?;
    let num_cells = leaf_num_cells(page);
    let mut lo = 0u32;
    let mut hi = num_cells;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let k = leaf_key(page, mid as usize);
        match k.cmp(&key) {
            std::cmp::Ordering::Equal => return Ok(mid),
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
        }
    }
    Ok(lo)
}

/// Descend from `page_num` to the leaf that would contain `key`.
fn find_leaf(pager: &mut Pager, mut page_num: u32, key: u32) -> Result<u32> {
    loop {
        let page = pager.get_page(page_num)?;
        match node_type(page) {
            NodeType::Leaf => return Ok(page_num),
            NodeType::Internal => page_num = internal_find_child(page, key),
        }
    }
}

/// Descend from `page_num` following the leftmost child at every level.
fn find_leftmost_leaf(pager: &mut Pager, mut page_num: u32) -> Result<u32> {
    loop {
        let page = pager.get_page(page_num)?;
        match node_type(page) {
            NodeType::Leaf => return Ok(page_num),
            NodeType::Internal => page_num = internal_child(page, 0),
        }
    }
}

/// `find(key) → Cursor`: a cursor at the matching cell, or at the
/// insertion point if `key` is absent.
pub fn find(pager: &mut Pager, root_page_num: u32, key: u32) -> Result<Cursor<'_>> {
    let leaf_page_num = find_leaf(pager, root_page_num, key)?;
    let cell_num = leaf_search(pager, leaf_page_num, key)?;
    Ok(Cursor::new(pager, leaf_page_num, cell_num, false))
}

/// A cursor at the first cell of the leftmost leaf, for a full-table scan.
pub fn start(pager: &mut Pager, root_page_num: u32) -> Result<Cursor<'_>> {
    let leaf_page_num = find_leftmost_leaf(pager, root_page_num)?;
    let page = pager.get_page(leaf_page_num)?;
    let end_of_table = leaf_num_cells(page) == 0;
    Ok(Cursor::new(pager, leaf_page_num, 0, end_of_table))
}

/// Insert `(key, row)`, rejecting duplicates and splitting a full leaf.
pub fn insert(
    pager: &mut Pager,
    root_page_num: u32,
    key: u32,
    row: &Row,
) -> std::result::Result<(), InsertError> {
    let leaf_page_num = find_leaf(pager, root_page_num, key)?;
    let cell_num = leaf_search(pager, leaf_page_num, key)?;

    let page = pager.get_page(leaf_page_num)?;
    if cell_num < leaf_num_cells(page) && leaf_key(page, cell_num as usize) == key {
        return Err(InsertError::Duplicate);
    }

    leaf_insert(pager, leaf_page_num, cell_num, key, row)?;
    Ok(())
}

fn leaf_insert(
    pager: &mut Pager,
    page_num: u32,
    cell_num: u32,
    key: u32,
    row: &Row,
) -> std::result::Result<(), InsertError> {
    let page = pager.get_page(page_num)?;
    let num_cells = leaf_num_cells(page);

    if (num_cells as usize) < LEAF_NODE_MAX_CELLS {
        shift_cells_right(page, cell_num as usize, num_cells as usize);
        write_cell(page, cell_num as usize, key, &row.serialize());
        leaf_set_num_cells(page, num_cells + 1);
        Ok(())
    } else {
        leaf_split_and_insert(pager, page_num, cell_num, key, row)
    }
}

/// Split a full leaf (13 existing cells + the one being inserted = 14
/// conceptual positions) into two 7-cell leaves, then promote a new root
/// if the split leaf was the root.
///
/// Splitting a non-root leaf is out of scope (see the crate's top-level
/// documentation): the parent would need to grow an extra routing entry,
/// which in turn can overflow an internal node, and internal-node split is
/// not implemented. That path is recoverable at the statement level —
/// it returns `InsertError::TableFull` rather than failing fatally or
/// silently corrupting the tree.
fn leaf_split_and_insert(
    pager: &mut Pager,
    old_page_num: u32,
    cell_num: u32,
    key: u32,
    row: &Row,
) -> std::result::Result<(), InsertError> {
    const TOTAL: usize = LEAF_NODE_MAX_CELLS + 1; // 14 conceptual positions
    const RIGHT: usize = (TOTAL + 1) / 2; // 7
    const LEFT: usize = TOTAL - RIGHT; // 7

    debug!("splitting leaf page {old_page_num} ({TOTAL} cells -> {LEFT}/{RIGHT})");

    let (old_next_leaf, old_is_root, keys, values) = {
        let old_page = pager.get_page(old_page_num)?;
        let mut keys = [0u32; TOTAL];
        let mut values = [[0u8; ROW_SIZE]; TOTAL];
        let mut src = 0usize;
        for dst in 0..TOTAL {
            if dst == cell_num as usize {
                keys[dst] = key;
                values[dst] = row.serialize();
            } else {
                keys[dst] = leaf_key(old_page, src);
                values[dst] = *leaf_value(old_page, src);
                src += 1;
            }
        }
        (leaf_next_leaf(old_page), is_root(old_page), keys, values)
    };

    let new_page_num = pager.allocate_new_page();
    {
        let new_page = pager.get_page(new_page_num)?;
        initialize_leaf(new_page);
        for i in 0..RIGHT {
            write_cell(new_page, i, keys[LEFT + i], &values[LEFT + i]);
        }
        leaf_set_num_cells(new_page, RIGHT as u32);
        leaf_set_next_leaf(new_page, old_next_leaf);
    }

    {
        let old_page = pager.get_page(old_page_num)?;
        for i in 0..LEFT {
            write_cell(old_page, i, keys[i], &values[i]);
        }
        leaf_set_num_cells(old_page, LEFT as u32);
        leaf_set_next_leaf(old_page, new_page_num);
    }

    if old_is_root {
        create_new_root(pager, old_page_num, new_page_num)?;
        Ok(())
    } else {
        warn!("leaf page {old_page_num} overflowed under a non-root parent; internal-node split is unimplemented");
        Err(InsertError::TableFull)
    }
}

/// Promote a new internal root above the split leaf pair.
///
/// The root page number never changes: external collaborators hold
/// `root_page_num = 0` for the database's lifetime, so the old root's
/// bytes are copied out to a fresh page and the root slot is
/// re-initialized in place as an internal node.
fn create_new_root(pager: &mut Pager, root_page_num: u32, right_child_page_num: u32) -> Result<()> {
    let left_page_num = pager.allocate_new_page();
    debug!("promoting new internal root over pages {left_page_num}/{right_child_page_num}");

    {
        let root_copy = *pager.get_page(root_page_num)?;
        let left_page = pager.get_page(left_page_num)?;
        *left_page = root_copy;
        set_is_root(left_page, false);
    }

    let left_max_key = node_max_key(pager.get_page(left_page_num)?);

    let root_page = pager.get_page(root_page_num)?;
    initialize_internal(root_page);
    set_is_root(root_page, true);
    internal_set_num_keys(root_page, 1);
    set_internal_cell(root_page, 0, left_page_num, left_max_key);
    internal_set_right_child(root_page, right_child_page_num);

    Ok(())
}
