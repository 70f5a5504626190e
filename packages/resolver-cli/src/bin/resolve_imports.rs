/**
 * Import Resolver CLI - resolve-imports
 *
 * Main entry point for import canonicalization
 */
use import_resolver_cli::main_entry::main_entry;
use std::process;

fn main() {
    process::exit(main_entry(std::env::args_os()));
}
