/**
 * Declarations Module
 *
 * Scanner and serializer for import/export declarations.
 */
pub mod ast;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use parser::{parse, parse_file};
pub use serializer::unparse;
