//! Data models: the virtual file tree and its derived attributes.

pub mod file_tree;
pub mod language;
pub mod path;

pub use file_tree::{FileTree, FileTreeError, FileView, NodeData, NodeId};
pub use language::Language;
