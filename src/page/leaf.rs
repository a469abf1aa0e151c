//! Leaf node layout.
//!
//! ```text
//! Offset  Size  Field
//! 0       6     common header (node_type, is_root, parent_page_num)
//! 6       4     num_cells
//! 10      4     next_leaf (0 = none; sibling pointer for full-table scan)
//! 14      ...   packed cells, 297 bytes each: key(4) + row(293)
//! ```
//!
//! The `next_leaf` field has no counterpart in the upstream tutorial this
//! layout is descended from; it exists purely so `start()`/`advance()` can
//! walk across a split without re-descending from the root.

use super::{node_max_key, set_is_root, set_node_type, NodeType, Page, COMMON_NODE_HEADER_SIZE, PAGE_SIZE};
use crate::row::ROW_SIZE;

pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
const LEAF_NODE_NUM_CELLS_SIZE: usize = 4;
pub const LEAF_NODE_NEXT_LEAF_OFFSET: usize = LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE;
const LEAF_NODE_NEXT_LEAF_SIZE: usize = 4;

pub const LEAF_NODE_HEADER_SIZE: usize =
    COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE + LEAF_NODE_NEXT_LEAF_SIZE;

const LEAF_NODE_KEY_SIZE: usize = 4;
const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

fn cell_offset(cell_num: usize) -> usize {
    LEAF_NODE_HEADER_SIZE + cell_num * LEAF_NODE_CELL_SIZE
}

pub fn initialize_leaf(page: &mut Page) {
    set_node_type(page, NodeType::Leaf);
    set_is_root(page, false);
    leaf_set_num_cells(page, 0);
    leaf_set_next_leaf(page, 0);
}

pub fn leaf_num_cells(page: &Page) -> u32 {
    u32::from_le_bytes(
        page[LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + 4]
            .try_into()
            .unwrap(),
    )
}

pub fn leaf_set_num_cells(page: &mut Page, num_cells: u32) {
    page[LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + 4]
        .copy_from_slice(&num_cells.to_le_bytes());
}

pub fn leaf_next_leaf(page: &Page) -> u32 {
    u32::from_le_bytes(
        page[LEAF_NODE_NEXT_LEAF_OFFSET..LEAF_NODE_NEXT_LEAF_OFFSET + 4]
            .try_into()
            .unwrap(),
    )
}

pub fn leaf_set_next_leaf(page: &mut Page, next_leaf: u32) {
    page[LEAF_NODE_NEXT_LEAF_OFFSET..LEAF_NODE_NEXT_LEAF_OFFSET + 4]
        .copy_from_slice(&next_leaf.to_le_bytes());
}

/// The full 297-byte cell at `cell_num` (key followed by row bytes).
pub fn leaf_cell(page: &Page, cell_num: usize) -> &[u8; LEAF_NODE_CELL_SIZE] {
    let off = cell_offset(cell_num);
    page[off..off + LEAF_NODE_CELL_SIZE].try_into().unwrap()
}

pub fn leaf_key(page: &Page, cell_num: usize) -> u32 {
    let off = cell_offset(cell_num);
    u32::from_le_bytes(page[off..off + LEAF_NODE_KEY_SIZE].try_into().unwrap())
}

pub fn leaf_set_key(page: &mut Page, cell_num: usize, key: u32) {
    let off = cell_offset(cell_num);
    page[off..off + LEAF_NODE_KEY_SIZE].copy_from_slice(&key.to_le_bytes());
}

/// The 293-byte serialized row at `cell_num`.
pub fn leaf_value(page: &Page, cell_num: usize) -> &[u8; ROW_SIZE] {
    let off = cell_offset(cell_num) + LEAF_NODE_KEY_SIZE;
    page[off..off + ROW_SIZE].try_into().unwrap()
}

pub fn leaf_value_mut(page: &mut Page, cell_num: usize) -> &mut [u8; ROW_SIZE] {
    let off = cell_offset(cell_num) + LEAF_NODE_KEY_SIZE;
    (&mut page[off..off + ROW_SIZE]).try_into().unwrap()
}

/// Shift cells `[from, to_exclusive)` one slot to the right, making room to
/// write a new cell at index `from`. Implemented as a single `copy_within`
/// so overlapping ranges are handled like `memmove`.
pub fn shift_cells_right(page: &mut Page, from: usize, to_exclusive: usize) {
    if from >= to_exclusive {
        return;
    }
    let start = cell_offset(from);
    let end = cell_offset(to_exclusive);
    page.copy_within(start..end, start + LEAF_NODE_CELL_SIZE);
}

pub fn write_cell(page: &mut Page, cell_num: usize, key: u32, value: &[u8; ROW_SIZE]) {
    leaf_set_key(page, cell_num, key);
    leaf_value_mut(page, cell_num).copy_from_slice(value);
}

/// The key propagated upward for a leaf: the last cell's key (cells are
/// kept in strictly increasing order, so this is always the maximum).
pub fn leaf_max_key(page: &Page) -> u32 {
    let n = leaf_num_cells(page) as usize;
    leaf_key(page, n - 1)
}

#[allow(unused)]
fn _assert_node_max_key_delegates(page: &Page) -> u32 {
    node_max_key(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::new_page;

    #[test]
    fn layout_constants() {
        assert_eq!(LEAF_NODE_HEADER_SIZE, 14);
        assert_eq!(LEAF_NODE_CELL_SIZE, 297);
        assert_eq!(LEAF_NODE_MAX_CELLS, 13);
    }

    #[test]
    fn initialize_then_write_and_read_cell() {
        let mut page = new_page();
        initialize_leaf(&mut page);
        assert_eq!(leaf_num_cells(&page), 0);
        assert_eq!(leaf_next_leaf(&page), 0);

        let row = crate::row::Row::new(42, "bob", "bob@example.com").unwrap();
        write_cell(&mut page, 0, 42, &row.serialize());
        leaf_set_num_cells(&mut page, 1);

        assert_eq!(leaf_key(&page, 0), 42);
        assert_eq!(crate::row::Row::deserialize(leaf_value(&page, 0)), row);
        assert_eq!(leaf_max_key(&page), 42);
    }
}
