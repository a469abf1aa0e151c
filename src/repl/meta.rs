//! `.`-prefixed meta-commands: `.exit`, `.btree`, `.constants`, and the
//! catch-all "unrecognized" response.

use crate::error::Result;
use crate::page::{
    COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_SPACE_FOR_CELLS,
};
use crate::row::ROW_SIZE;
use crate::table::Table;

/// What the REPL loop should do after dispatching a meta-command.
pub enum MetaOutcome {
    /// `.exit`: the table has already been closed; the caller should stop
    /// the loop and exit with status 0.
    Exit,
    /// The command was recognized and handled; its output (if any) has
    /// already been printed.
    Handled,
    /// No command starting with `.` matched; the caller prints
    /// `Unrecognized command '<command>'`.
    Unrecognized,
}

pub fn handle_meta_command(table: &mut Table, command: &str) -> Result<MetaOutcome> {
    match command {
        ".exit" => {
            table.close()?;
            Ok(MetaOutcome::Exit)
        }
        ".btree" => {
            for line in table.render_tree()? {
                println!("{line}");
            }
            Ok(MetaOutcome::Handled)
        }
        ".constants" => {
            println!("Constants:");
            println!("ROW_SIZE: {ROW_SIZE}");
            println!("COMMON_NODE_HEADER_SIZE: {COMMON_NODE_HEADER_SIZE}");
            println!("LEAF_NODE_HEADER_SIZE: {LEAF_NODE_HEADER_SIZE}");
            println!("LEAF_NODE_CELL_SIZE: {LEAF_NODE_CELL_SIZE}");
            println!("LEAF_NODE_SPACE_FOR_CELLS: {LEAF_NODE_SPACE_FOR_CELLS}");
            println!("LEAF_NODE_MAX_CELLS: {LEAF_NODE_MAX_CELLS}");
            Ok(MetaOutcome::Handled)
        }
        _ => Ok(MetaOutcome::Unrecognized),
    }
}
