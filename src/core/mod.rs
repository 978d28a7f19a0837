//! Documentation table pipeline
//!
//! - `walker`: finds documentation comments and dispatches them
//! - `resolver`: which declaration a comment documents, and its owner
//! - `extract`: documentation element -> plain text
//! - `escape`: plain text -> LaTeX cell text
//! - `assembler`: the handler that accumulates the tables
//! - `options`: table generation settings

pub mod assembler;
pub mod escape;
pub mod extract;
pub mod options;
pub mod resolver;
pub mod walker;

pub use assembler::{ClassMembers, DocTables, MemberTables, TableAssembler, DEFAULT_ACCESSORS};
pub use escape::escape;
pub use extract::{decode_entities, extract};
pub use options::{FieldMatch, OwnerKeyStyle, TableOptions};
pub use resolver::{ancestors_until, group_key, nearest_enclosing, resolve, OWNER_NOT_FOUND};
pub use walker::{walk, walk_with_options, DocHandler, WalkOptions};
