//! Virtual filesystem built from the backing archive.
//!
//! - `PathTable`: normalized member paths held in memory
//! - `path`: resolution of shell arguments against the current directory

mod path;
mod path_table;

pub use path::{dir_form, normalize_member, parent, resolve};
pub use path_table::{PathEntry, PathTable};
