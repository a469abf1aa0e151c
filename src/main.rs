//! Entry point: argument handling, logging setup, and the REPL read loop.
//!
//! Statement parsing, meta-command dispatch, and execution all live in
//! `rowdb::repl`; this binary only owns `stdin`/`stdout` and the process
//! exit code.

use std::io::{self, Write};
use std::process::ExitCode;

use log::error;

use rowdb::repl::{execute, handle_meta_command, parse_statement, MetaOutcome};
use rowdb::Table;

fn main() -> ExitCode {
    env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            println!("Must supply a database filename.");
            return ExitCode::FAILURE;
        }
    };

    let mut table = match Table::open(&path) {
        Ok(table) => table,
        Err(e) => {
            error!("failed to open database {path}: {e}");
            println!("{e}");
            return ExitCode::FAILURE;
        }
    };

    run(&mut table)
}

fn run(table: &mut Table) -> ExitCode {
    let stdin = io::stdin();

    loop {
        print!("db > ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut line = String::new();
        let bytes_read = stdin.read_line(&mut line);
        match bytes_read {
            Ok(0) | Err(_) => {
                println!("Error reading input");
                return ExitCode::FAILURE;
            }
            Ok(_) => {}
        }
        let line = line.trim_end_matches(['\n', '\r']);

        if line.starts_with('.') {
            match handle_meta_command(table, line) {
                Ok(MetaOutcome::Exit) => return ExitCode::SUCCESS,
                Ok(MetaOutcome::Handled) => continue,
                Ok(MetaOutcome::Unrecognized) => {
                    println!("Unrecognized command '{line}'");
                    continue;
                }
                Err(e) => {
                    error!("fatal error handling meta-command {line}: {e}");
                    println!("{e}");
                    return ExitCode::FAILURE;
                }
            }
        }

        let statement = match parse_statement(line) {
            Ok(statement) => statement,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match execute(table, statement) {
            Ok(Ok(lines)) => {
                for l in lines {
                    println!("{l}");
                }
                println!("Executed.");
            }
            Ok(Err(e)) => println!("{e}"),
            Err(e) => {
                error!("fatal error executing statement: {e}");
                println!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }
}

