//! Command-line front end for Pepper-style IDL.
//!
//! Parses the given files, prints the combined AST as an indented tree,
//! and reports the total number of recovered syntax errors. Exits nonzero
//! when any file had errors.
//!
//! Usage:
//!   ppidl <file>...          - Parse files and dump the AST
//!   ppidl --errors-only <f>  - Suppress the tree, report errors only

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ppidl::ast::printer;
use ppidl::driver::parse_files;

#[derive(Parser)]
#[command(name = "ppidl", version, about = "Parse Pepper-style IDL files and dump the AST")]
struct Cli {
    /// IDL files to parse
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Report error totals without printing the tree
    #[arg(long)]
    errors_only: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (root, errors) = parse_files(&cli.files);
    if !cli.errors_only {
        println!("{}", printer::tree(&root));
    }
    if errors > 0 {
        println!("Found {errors} errors.");
    }
    // The error total is the process result, saturated to the exit-code range.
    ExitCode::from(errors.min(u8::MAX as usize) as u8)
}
