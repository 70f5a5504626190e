//! File System Abstraction
//!
//! Every file access of the resolver goes through these traits so the engine
//! runs unchanged against the real disk and the in-memory test tree.

mod node_js_file_system;
mod types;
mod util;

pub mod testing;

pub use node_js_file_system::*;
pub use types::*;
pub use util::*;
