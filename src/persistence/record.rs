//! Wire format for persisted and shared projects: a nested forest of
//! camelCase records, one per node.

use serde::{Deserialize, Serialize};

use crate::models::{FileTree, FileTreeError, Language, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileRecord>>,
}

pub fn records_from_tree(tree: &mut FileTree) -> Vec<FileRecord> {
    let roots: Vec<NodeId> = tree.roots().to_vec();
    roots
        .into_iter()
        .filter_map(|id| record_for(tree, id, None))
        .collect()
}

fn record_for(tree: &mut FileTree, id: NodeId, parent_stable: Option<&str>) -> Option<FileRecord> {
    let path = tree.path(id)?;
    let node = tree.get(id)?;
    let stable_id = node.stable_id().to_string();
    let name = node.name().to_string();
    let language = node.language();
    let content = node.content().map(str::to_string);
    let child_ids: Vec<NodeId> = node.children().map(<[NodeId]>::to_vec).unwrap_or_default();
    let is_file = node.is_file();

    if is_file {
        Some(FileRecord {
            id: stable_id,
            name,
            kind: RecordKind::File,
            language,
            content,
            path,
            parent_id: parent_stable.map(str::to_string),
            children: None,
        })
    } else {
        let children = child_ids
            .into_iter()
            .filter_map(|child| record_for(tree, child, Some(&stable_id)))
            .collect();
        Some(FileRecord {
            id: stable_id,
            name,
            kind: RecordKind::Folder,
            language: None,
            content: None,
            path,
            parent_id: parent_stable.map(str::to_string),
            children: Some(children),
        })
    }
}

/// Rebuilds a tree from persisted records. Paths and languages are
/// derived attributes and are recomputed from structure; stable ids
/// are preserved. The first file in flatten order becomes active.
pub fn tree_from_records(records: &[FileRecord]) -> Result<FileTree, FileTreeError> {
    let mut tree = FileTree::new();
    for record in records {
        insert_record(&mut tree, record, None)?;
    }

    let first_file = tree
        .flatten()
        .find(|&id| tree.get(id).is_some_and(|n| n.is_file()));
    if let Some(id) = first_file {
        tree.open_file(id);
    }
    Ok(tree)
}

fn insert_record(
    tree: &mut FileTree,
    record: &FileRecord,
    parent: Option<NodeId>,
) -> Result<(), FileTreeError> {
    match record.kind {
        RecordKind::File => {
            tree.restore_file(
                parent,
                &record.id,
                &record.name,
                record.content.clone().unwrap_or_default(),
            )?;
        }
        RecordKind::Folder => {
            let id = tree.restore_folder(parent, &record.id, &record.name)?;
            if let Some(children) = &record.children {
                for child in children {
                    insert_record(tree, child, Some(id))?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileTree {
        let mut tree = FileTree::new();
        let index = tree.create_file("index.html", None).unwrap();
        tree.update(index, "<html></html>");
        let empty = tree.create_file("empty.css", None).unwrap();
        tree.update(empty, "");
        let dir = tree.create_folder("src", None).unwrap();
        tree.create_file("app.js", Some(dir)).unwrap();
        tree.create_file("LICENSE", Some(dir)).unwrap();
        tree
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let mut tree = sample_tree();
        let records = records_from_tree(&mut tree);

        let mut rebuilt = tree_from_records(&records).unwrap();
        let again = records_from_tree(&mut rebuilt);
        assert_eq!(records, again);
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut tree = sample_tree();
        let records = records_from_tree(&mut tree);

        let json = serde_json::to_string_pretty(&records).unwrap();
        let parsed: Vec<FileRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records, parsed);
    }

    #[test]
    fn test_record_shape() {
        let mut tree = sample_tree();
        let records = records_from_tree(&mut tree);

        let index = &records[0];
        assert_eq!(index.kind, RecordKind::File);
        assert_eq!(index.path, "/index.html");
        assert_eq!(index.language, Some(Language::Html));
        assert_eq!(index.content.as_deref(), Some("<html></html>"));
        assert!(index.parent_id.is_none());

        // Empty content is a value, not an absence.
        assert_eq!(records[1].content.as_deref(), Some(""));

        let folder = &records[2];
        assert_eq!(folder.kind, RecordKind::Folder);
        assert!(folder.language.is_none());
        assert!(folder.content.is_none());
        let children = folder.children.as_ref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].path, "/src/app.js");
        assert_eq!(children[0].parent_id.as_deref(), Some(folder.id.as_str()));
        // No extension maps to plain text.
        assert_eq!(children[1].language, Some(Language::Plaintext));
    }

    #[test]
    fn test_camel_case_field_names() {
        let mut tree = FileTree::new();
        let dir = tree.create_folder("src", None).unwrap();
        tree.create_file("a.js", Some(dir)).unwrap();
        let records = records_from_tree(&mut tree);
        let json = serde_json::to_string(&records).unwrap();
        assert!(json.contains("\"parentId\""));
        assert!(json.contains("\"type\":\"folder\""));
    }

    #[test]
    fn test_rebuild_selects_first_file() {
        let mut tree = sample_tree();
        let records = records_from_tree(&mut tree);
        let rebuilt = tree_from_records(&records).unwrap();
        let active = rebuilt.active_file().unwrap();
        assert_eq!(rebuilt.get(active).unwrap().name(), "index.html");
    }

    #[test]
    fn test_conflicting_records_are_rejected() {
        let mut tree = sample_tree();
        let mut records = records_from_tree(&mut tree);
        let duplicate = records[0].clone();
        records.push(duplicate);
        assert!(tree_from_records(&records).is_err());
    }
}
