//! Persistence: local project store, wire records, seed project, and
//! the remote share client.

pub mod export;
pub mod record;
pub mod seed;
pub mod share;
pub mod store;

pub use export::export_project;
pub use record::{records_from_tree, tree_from_records, FileRecord, RecordKind};
pub use share::{ShareClient, ShareError, ShareReceipt, SharedInfo, DEFAULT_API_BASE};
pub use store::ProjectStore;
