//! Internal node layout.
//!
//! ```text
//! Offset  Size  Field
//! 0       6     common header
//! 6       4     num_keys
//! 10      4     right_child_page_num
//! 14      ...   packed cells, 8 bytes each: child_page_num(4) + key(4)
//! ```
//!
//! Cell `i`'s key is the maximum key in the subtree rooted at `child(i)`;
//! `right_child` holds every key strictly greater than `key(num_keys - 1)`.

use super::{set_is_root, set_node_type, NodeType, Page, COMMON_NODE_HEADER_SIZE, PAGE_SIZE};

pub const INTERNAL_NODE_NUM_KEYS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
const INTERNAL_NODE_NUM_KEYS_SIZE: usize = 4;
pub const INTERNAL_NODE_RIGHT_CHILD_OFFSET: usize =
    INTERNAL_NODE_NUM_KEYS_OFFSET + INTERNAL_NODE_NUM_KEYS_SIZE;
const INTERNAL_NODE_RIGHT_CHILD_SIZE: usize = 4;

pub const INTERNAL_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE
    + INTERNAL_NODE_NUM_KEYS_SIZE
    + INTERNAL_NODE_RIGHT_CHILD_SIZE;

const INTERNAL_NODE_CHILD_SIZE: usize = 4;
const INTERNAL_NODE_KEY_SIZE: usize = 4;
pub const INTERNAL_NODE_CELL_SIZE: usize = INTERNAL_NODE_CHILD_SIZE + INTERNAL_NODE_KEY_SIZE;
const INTERNAL_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - INTERNAL_NODE_HEADER_SIZE;
pub const INTERNAL_NODE_MAX_CELLS: usize = INTERNAL_NODE_SPACE_FOR_CELLS / INTERNAL_NODE_CELL_SIZE;

fn cell_offset(cell_num: usize) -> usize {
    INTERNAL_NODE_HEADER_SIZE + cell_num * INTERNAL_NODE_CELL_SIZE
}

pub fn initialize_internal(page: &mut Page) {
    set_node_type(page, NodeType::Internal);
    set_is_root(page, false);
    internal_set_num_keys(page, 0);
    internal_set_right_child(page, 0);
}

pub fn internal_num_keys(page: &Page) -> u32 {
    u32::from_le_bytes(
        page[INTERNAL_NODE_NUM_KEYS_OFFSET..INTERNAL_NODE_NUM_KEYS_OFFSET + 4]
            .try_into()
            .unwrap(),
    )
}

pub fn internal_set_num_keys(page: &mut Page, num_keys: u32) {
    page[INTERNAL_NODE_NUM_KEYS_OFFSET..INTERNAL_NODE_NUM_KEYS_OFFSET + 4]
        .copy_from_slice(&num_keys.to_le_bytes());
}

pub fn internal_right_child(page: &Page) -> u32 {
    u32::from_le_bytes(
        page[INTERNAL_NODE_RIGHT_CHILD_OFFSET..INTERNAL_NODE_RIGHT_CHILD_OFFSET + 4]
            .try_into()
            .unwrap(),
    )
}

pub fn internal_set_right_child(page: &mut Page, child: u32) {
    page[INTERNAL_NODE_RIGHT_CHILD_OFFSET..INTERNAL_NODE_RIGHT_CHILD_OFFSET + 4]
        .copy_from_slice(&child.to_le_bytes());
}

pub fn internal_cell_child(page: &Page, cell_num: usize) -> u32 {
    let off = cell_offset(cell_num);
    u32::from_le_bytes(page[off..off + INTERNAL_NODE_CHILD_SIZE].try_into().unwrap())
}

pub fn internal_cell_key(page: &Page, cell_num: usize) -> u32 {
    let off = cell_offset(cell_num) + INTERNAL_NODE_CHILD_SIZE;
    u32::from_le_bytes(page[off..off + INTERNAL_NODE_KEY_SIZE].try_into().unwrap())
}

pub fn set_internal_cell(page: &mut Page, cell_num: usize, child: u32, key: u32) {
    let off = cell_offset(cell_num);
    page[off..off + INTERNAL_NODE_CHILD_SIZE].copy_from_slice(&child.to_le_bytes());
    let key_off = off + INTERNAL_NODE_CHILD_SIZE;
    page[key_off..key_off + INTERNAL_NODE_KEY_SIZE].copy_from_slice(&key.to_le_bytes());
}

/// `child(i)` for `i < num_keys`; `right_child` when `i == num_keys`.
pub fn internal_child(page: &Page, i: usize) -> u32 {
    let num_keys = internal_num_keys(page) as usize;
    if i == num_keys {
        internal_right_child(page)
    } else {
        internal_cell_child(page, i)
    }
}

/// Smallest index `i` such that `key(i) >= key`, descending into
/// `child(i)`; falls through to `right_child` if `key` exceeds every
/// listed key.
pub fn internal_find_child(page: &Page, key: u32) -> u32 {
    let num_keys = internal_num_keys(page) as usize;
    let mut lo = 0usize;
    let mut hi = num_keys;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if internal_cell_key(page, mid) >= key {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    internal_child(page, lo)
}

/// The key propagated upward for an internal node: the last cell's key.
pub fn internal_max_key(page: &Page) -> u32 {
    let n = internal_num_keys(page) as usize;
    internal_cell_key(page, n - 1)
}
