//! Virtual file tree: the in-memory model of the user's project.
//!
//! Nodes live in a slotmap arena and carry a stable string id that
//! survives persistence; the generational `NodeId` is the in-memory
//! handle. Logical paths are computed from position and cached.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use super::language::Language;

new_key_type! { pub struct NodeId; }

#[derive(Debug, PartialEq, Eq)]
pub enum FileTreeError {
    NameExists,
    ParentNotFolder,
    MoveIntoDescendant,
    InvalidNodeId,
}

impl fmt::Display for FileTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTreeError::NameExists => write!(f, "name already exists in parent"),
            FileTreeError::ParentNotFolder => write!(f, "parent is not a folder"),
            FileTreeError::MoveIntoDescendant => {
                write!(f, "cannot move node into its own subtree")
            }
            FileTreeError::InvalidNodeId => write!(f, "invalid node id"),
        }
    }
}

impl std::error::Error for FileTreeError {}

/// A file carries content and a derived language; a folder owns the
/// ordered list of its children. No other combination is expressible.
#[derive(Debug, Clone)]
pub enum NodeData {
    File { content: String, language: Language },
    Folder { children: Vec<NodeId> },
}

#[derive(Debug, Clone)]
pub struct Node {
    stable_id: String,
    name: String,
    parent: Option<NodeId>,
    data: NodeData,
}

impl Node {
    pub fn stable_id(&self) -> &str {
        &self.stable_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_file(&self) -> bool {
        matches!(self.data, NodeData::File { .. })
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.data, NodeData::Folder { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match &self.data {
            NodeData::File { content, .. } => Some(content),
            NodeData::Folder { .. } => None,
        }
    }

    pub fn language(&self) -> Option<Language> {
        match &self.data {
            NodeData::File { language, .. } => Some(*language),
            NodeData::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.data {
            NodeData::Folder { children } => Some(children),
            NodeData::File { .. } => None,
        }
    }
}

/// Flat, owned view of one file; the unit the preview composer and the
/// share payload work with.
#[derive(Debug, Clone, PartialEq)]
pub struct FileView {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    pub language: Language,
    pub content: String,
}

/// Stable-id generator: wall-clock nanos plus a session counter, both
/// base36. Ids are never reused within or across sessions.
#[derive(Debug, Default)]
struct IdGen {
    counter: u64,
}

impl IdGen {
    fn next(&mut self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        self.counter += 1;
        format!("{}{}", to_base36(nanos), to_base36(self.counter))
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut buf = Vec::new();
    loop {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

pub struct FileTree {
    arena: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    selected: Option<NodeId>,
    path_cache: FxHashMap<NodeId, String>,
    id_gen: IdGen,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            roots: Vec::new(),
            selected: None,
            path_cache: FxHashMap::default(),
            id_gen: IdGen::default(),
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Creates an empty file and makes it the active selection.
    pub fn create_file(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
    ) -> Result<NodeId, FileTreeError> {
        let id = self.insert(
            parent,
            None,
            name,
            NodeData::File {
                content: String::new(),
                language: Language::from_name(name),
            },
        )?;
        self.selected = Some(id);
        Ok(id)
    }

    pub fn create_folder(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
    ) -> Result<NodeId, FileTreeError> {
        self.insert(
            parent,
            None,
            name,
            NodeData::Folder {
                children: Vec::new(),
            },
        )
    }

    /// Re-inserts a file under a pre-existing stable id (store load,
    /// shared-project import). Language is re-derived from the name.
    pub fn restore_file(
        &mut self,
        parent: Option<NodeId>,
        stable_id: &str,
        name: &str,
        content: String,
    ) -> Result<NodeId, FileTreeError> {
        self.insert(
            parent,
            Some(stable_id.to_string()),
            name,
            NodeData::File {
                content,
                language: Language::from_name(name),
            },
        )
    }

    pub fn restore_folder(
        &mut self,
        parent: Option<NodeId>,
        stable_id: &str,
        name: &str,
    ) -> Result<NodeId, FileTreeError> {
        self.insert(
            parent,
            Some(stable_id.to_string()),
            name,
            NodeData::Folder {
                children: Vec::new(),
            },
        )
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        stable_id: Option<String>,
        name: &str,
        data: NodeData,
    ) -> Result<NodeId, FileTreeError> {
        if let Some(parent_id) = parent {
            let parent_node = self
                .arena
                .get(parent_id)
                .ok_or(FileTreeError::InvalidNodeId)?;
            if !parent_node.is_folder() {
                return Err(FileTreeError::ParentNotFolder);
            }
        }
        if self.has_sibling_named(parent, name, None) {
            return Err(FileTreeError::NameExists);
        }

        let stable_id = stable_id.unwrap_or_else(|| self.id_gen.next());
        let id = self.arena.insert(Node {
            stable_id,
            name: name.to_string(),
            parent,
            data,
        });

        match parent {
            Some(parent_id) => {
                if let Some(NodeData::Folder { children }) =
                    self.arena.get_mut(parent_id).map(|n| &mut n.data)
                {
                    children.push(id);
                }
            }
            None => self.roots.push(id),
        }

        Ok(id)
    }

    /// Replaces a file's content. A stale id or a folder id is a
    /// silent no-op: UI edits may race with deletion.
    pub fn update(&mut self, id: NodeId, content: &str) {
        if let Some(NodeData::File {
            content: current, ..
        }) = self.arena.get_mut(id).map(|n| &mut n.data)
        {
            current.clear();
            current.push_str(content);
        }
    }

    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), FileTreeError> {
        let (parent, old_name) = {
            let node = self.arena.get(id).ok_or(FileTreeError::InvalidNodeId)?;
            (node.parent, node.name.clone())
        };

        if old_name == new_name {
            return Ok(());
        }

        if self.has_sibling_named(parent, new_name, Some(id)) {
            return Err(FileTreeError::NameExists);
        }

        let node = self.arena.get_mut(id).ok_or(FileTreeError::InvalidNodeId)?;
        node.name = new_name.to_string();
        if let NodeData::File { language, .. } = &mut node.data {
            *language = Language::from_name(new_name);
        }

        self.invalidate_path_cache_subtree(id);
        Ok(())
    }

    /// Removes a node and its entire subtree. Deleting an id that no
    /// longer exists is a no-op. If the active file went away, the
    /// first remaining file in flatten order becomes active.
    pub fn delete(&mut self, id: NodeId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let parent = node.parent;

        match parent {
            Some(parent_id) => {
                if let Some(NodeData::Folder { children }) =
                    self.arena.get_mut(parent_id).map(|n| &mut n.data)
                {
                    children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }

        self.recursive_remove(id);
        self.ensure_selection();
    }

    fn recursive_remove(&mut self, id: NodeId) {
        if let Some(node) = self.arena.remove(id) {
            self.path_cache.remove(&id);
            if let NodeData::Folder { children } = node.data {
                for child in children {
                    self.recursive_remove(child);
                }
            }
        }
    }

    pub fn move_to(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), FileTreeError> {
        let old_parent = self
            .arena
            .get(id)
            .ok_or(FileTreeError::InvalidNodeId)?
            .parent;

        if let Some(np) = new_parent {
            let parent_node = self.arena.get(np).ok_or(FileTreeError::InvalidNodeId)?;
            if !parent_node.is_folder() {
                return Err(FileTreeError::ParentNotFolder);
            }
            if np == id || self.is_ancestor(id, np) {
                return Err(FileTreeError::MoveIntoDescendant);
            }
        }

        if old_parent == new_parent {
            return Ok(());
        }

        let name = self.arena[id].name.clone();
        if self.has_sibling_named(new_parent, &name, None) {
            return Err(FileTreeError::NameExists);
        }

        match old_parent {
            Some(op) => {
                if let Some(NodeData::Folder { children }) =
                    self.arena.get_mut(op).map(|n| &mut n.data)
                {
                    children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }

        match new_parent {
            Some(np) => {
                if let Some(NodeData::Folder { children }) =
                    self.arena.get_mut(np).map(|n| &mut n.data)
                {
                    children.push(id);
                }
            }
            None => self.roots.push(id),
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.parent = new_parent;
        }

        self.invalidate_path_cache_subtree(id);
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeId, mut descendant: NodeId) -> bool {
        while let Some(node) = self.arena.get(descendant) {
            match node.parent {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => descendant = parent,
                None => break,
            }
        }
        false
    }

    fn has_sibling_named(
        &self,
        parent: Option<NodeId>,
        name: &str,
        exclude: Option<NodeId>,
    ) -> bool {
        let siblings: &[NodeId] = match parent {
            Some(p) => self.arena.get(p).and_then(|n| n.children()).unwrap_or(&[]),
            None => &self.roots,
        };
        siblings
            .iter()
            .any(|&s| Some(s) != exclude && self.arena.get(s).is_some_and(|n| n.name == name))
    }

    /// The active file, guaranteed to resolve to a live file node.
    pub fn active_file(&self) -> Option<NodeId> {
        self.selected
            .filter(|&id| self.arena.get(id).is_some_and(Node::is_file))
    }

    /// Focuses an existing file; anything else is ignored.
    pub fn open_file(&mut self, id: NodeId) {
        if self.arena.get(id).is_some_and(Node::is_file) {
            self.selected = Some(id);
        }
    }

    fn ensure_selection(&mut self) {
        if self
            .selected
            .is_some_and(|id| self.arena.get(id).is_some_and(Node::is_file))
        {
            return;
        }
        let next = self
            .flatten()
            .find(|&id| self.arena.get(id).is_some_and(Node::is_file));
        self.selected = next;
    }

    /// Depth-first, parent-before-children traversal of every node,
    /// roots in insertion order. Lazy and restartable.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Logical `/`-separated path: always the concatenation of
    /// ancestor names, computed on demand and cached.
    pub fn path(&mut self, id: NodeId) -> Option<String> {
        if !self.arena.contains_key(id) {
            return None;
        }
        if let Some(path) = self.path_cache.get(&id) {
            return Some(path.clone());
        }

        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.arena.get(c)?;
            segments.push(node.name.clone());
            current = node.parent;
        }

        let mut path = String::new();
        for segment in segments.iter().rev() {
            path.push('/');
            path.push_str(segment);
        }

        self.path_cache.insert(id, path.clone());
        Some(path)
    }

    fn invalidate_path_cache_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            self.path_cache.remove(&node_id);
            if let Some(children) = self.arena.get(node_id).and_then(Node::children) {
                stack.extend(children.iter().copied());
            }
        }
    }

    /// Flat list of every file, in flatten order, with paths attached.
    pub fn files(&mut self) -> Vec<FileView> {
        let ids: Vec<NodeId> = self.flatten().collect();
        let mut out = Vec::new();
        for id in ids {
            let Some(path) = self.path(id) else { continue };
            let Some(node) = self.arena.get(id) else { continue };
            if let NodeData::File { content, language } = &node.data {
                out.push(FileView {
                    id,
                    name: node.name.clone(),
                    path,
                    language: *language,
                    content: content.clone(),
                });
            }
        }
        out
    }
}

pub struct Flatten<'a> {
    tree: &'a FileTree,
    stack: Vec<NodeId>,
}

impl Iterator for Flatten<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let id = self.stack.pop()?;
            let Some(node) = self.tree.arena.get(id) else {
                continue;
            };
            if let Some(children) = node.children() {
                self.stack.extend(children.iter().rev().copied());
            }
            return Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_file_sets_selection() {
        let mut tree = FileTree::new();
        let a = tree.create_file("a.js", None).unwrap();
        assert_eq!(tree.active_file(), Some(a));
        assert_eq!(tree.get(a).unwrap().language(), Some(Language::JavaScript));
        assert_eq!(tree.get(a).unwrap().content(), Some(""));
    }

    #[test]
    fn test_duplicate_name_rejected_tree_unchanged() {
        let mut tree = FileTree::new();
        let a = tree.create_file("a.js", None).unwrap();
        let err = tree.create_file("a.js", None).unwrap_err();
        assert_eq!(err, FileTreeError::NameExists);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.active_file(), Some(a));
    }

    #[test]
    fn test_duplicate_allowed_in_other_folder() {
        let mut tree = FileTree::new();
        tree.create_file("a.js", None).unwrap();
        let dir = tree.create_folder("src", None).unwrap();
        assert!(tree.create_file("a.js", Some(dir)).is_ok());
    }

    #[test]
    fn test_parent_must_be_folder() {
        let mut tree = FileTree::new();
        let a = tree.create_file("a.js", None).unwrap();
        let err = tree.create_file("b.js", Some(a)).unwrap_err();
        assert_eq!(err, FileTreeError::ParentNotFolder);
    }

    #[test]
    fn test_paths_follow_structure() {
        let mut tree = FileTree::new();
        let dir = tree.create_folder("src", None).unwrap();
        let file = tree.create_file("app.js", Some(dir)).unwrap();
        assert_eq!(tree.path(dir).as_deref(), Some("/src"));
        assert_eq!(tree.path(file).as_deref(), Some("/src/app.js"));
    }

    #[test]
    fn test_rename_recomputes_language_and_descendant_paths() {
        let mut tree = FileTree::new();
        let dir = tree.create_folder("src", None).unwrap();
        let file = tree.create_file("app.js", Some(dir)).unwrap();
        assert_eq!(tree.path(file).as_deref(), Some("/src/app.js"));

        tree.rename(dir, "lib").unwrap();
        assert_eq!(tree.path(file).as_deref(), Some("/lib/app.js"));

        tree.rename(file, "app.css").unwrap();
        assert_eq!(tree.get(file).unwrap().language(), Some(Language::Css));
        assert_eq!(tree.path(file).as_deref(), Some("/lib/app.css"));
    }

    #[test]
    fn test_rename_collision_rejected() {
        let mut tree = FileTree::new();
        tree.create_file("a.js", None).unwrap();
        let b = tree.create_file("b.js", None).unwrap();
        assert_eq!(
            tree.rename(b, "a.js").unwrap_err(),
            FileTreeError::NameExists
        );
        assert_eq!(tree.get(b).unwrap().name(), "b.js");
    }

    #[test]
    fn test_rename_to_same_name_is_ok() {
        let mut tree = FileTree::new();
        let a = tree.create_file("a.js", None).unwrap();
        assert!(tree.rename(a, "a.js").is_ok());
    }

    #[test]
    fn test_update_is_silent_on_stale_id() {
        let mut tree = FileTree::new();
        let a = tree.create_file("a.js", None).unwrap();
        tree.delete(a);
        tree.update(a, "console.log(1)");
        assert!(tree.is_empty());
    }

    #[test]
    fn test_delete_subtree_and_idempotence() {
        let mut tree = FileTree::new();
        let dir = tree.create_folder("src", None).unwrap();
        tree.create_file("a.js", Some(dir)).unwrap();
        tree.create_file("b.js", Some(dir)).unwrap();
        tree.delete(dir);
        assert!(tree.is_empty());
        tree.delete(dir);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_delete_active_file_falls_back_in_flatten_order() {
        let mut tree = FileTree::new();
        let a = tree.create_file("a.js", None).unwrap();
        let b = tree.create_file("b.js", None).unwrap();
        tree.open_file(b);
        tree.delete(b);
        assert_eq!(tree.active_file(), Some(a));
        tree.delete(a);
        assert_eq!(tree.active_file(), None);
    }

    #[test]
    fn test_delete_folder_containing_active_file_falls_back() {
        let mut tree = FileTree::new();
        let keep = tree.create_file("keep.js", None).unwrap();
        let dir = tree.create_folder("src", None).unwrap();
        let inner = tree.create_file("inner.js", Some(dir)).unwrap();
        tree.open_file(inner);
        tree.delete(dir);
        assert_eq!(tree.active_file(), Some(keep));
    }

    #[test]
    fn test_move_into_descendant_rejected() {
        let mut tree = FileTree::new();
        let outer = tree.create_folder("outer", None).unwrap();
        let inner = tree.create_folder("inner", Some(outer)).unwrap();
        assert_eq!(
            tree.move_to(outer, Some(inner)).unwrap_err(),
            FileTreeError::MoveIntoDescendant
        );
        assert_eq!(
            tree.move_to(outer, Some(outer)).unwrap_err(),
            FileTreeError::MoveIntoDescendant
        );
    }

    #[test]
    fn test_move_updates_paths() {
        let mut tree = FileTree::new();
        let dir = tree.create_folder("src", None).unwrap();
        let file = tree.create_file("app.js", None).unwrap();
        tree.move_to(file, Some(dir)).unwrap();
        assert_eq!(tree.path(file).as_deref(), Some("/src/app.js"));

        tree.move_to(file, None).unwrap();
        assert_eq!(tree.path(file).as_deref(), Some("/app.js"));
    }

    #[test]
    fn test_move_collision_rejected() {
        let mut tree = FileTree::new();
        let dir = tree.create_folder("src", None).unwrap();
        tree.create_file("app.js", Some(dir)).unwrap();
        let loose = tree.create_file("app.js", None).unwrap();
        assert_eq!(
            tree.move_to(loose, Some(dir)).unwrap_err(),
            FileTreeError::NameExists
        );
        assert_eq!(tree.path(loose).as_deref(), Some("/app.js"));
    }

    #[test]
    fn test_flatten_visits_every_node_once_parents_first() {
        let mut tree = FileTree::new();
        let a = tree.create_file("a.js", None).unwrap();
        let dir = tree.create_folder("src", None).unwrap();
        let b = tree.create_file("b.js", Some(dir)).unwrap();
        let sub = tree.create_folder("sub", Some(dir)).unwrap();
        let c = tree.create_file("c.js", Some(sub)).unwrap();

        let order: Vec<NodeId> = tree.flatten().collect();
        assert_eq!(order, vec![a, dir, b, sub, c]);
        assert_eq!(order.len(), tree.len());

        // Restartable: a fresh iterator yields the same sequence.
        let again: Vec<NodeId> = tree.flatten().collect();
        assert_eq!(order, again);
    }

    #[test]
    fn test_path_invariant_after_mutations() {
        let mut tree = FileTree::new();
        let dir = tree.create_folder("src", None).unwrap();
        let sub = tree.create_folder("nested", Some(dir)).unwrap();
        tree.create_file("a.js", Some(sub)).unwrap();
        tree.create_file("b.js", None).unwrap();
        tree.rename(dir, "lib").unwrap();
        tree.move_to(sub, None).unwrap();

        let ids: Vec<NodeId> = tree.flatten().collect();
        for id in ids {
            let expected = match tree.get(id).unwrap().parent() {
                Some(parent) => {
                    let parent_path = tree.path(parent).unwrap();
                    format!("{}/{}", parent_path, tree.get(id).unwrap().name())
                }
                None => format!("/{}", tree.get(id).unwrap().name()),
            };
            assert_eq!(tree.path(id).unwrap(), expected);
        }
    }

    #[test]
    fn test_files_skips_folders() {
        let mut tree = FileTree::new();
        let dir = tree.create_folder("src", None).unwrap();
        tree.create_file("a.js", Some(dir)).unwrap();
        let files = tree.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "/src/a.js");
    }

    #[test]
    fn test_stable_ids_are_unique() {
        let mut tree = FileTree::new();
        let a = tree.create_file("a.js", None).unwrap();
        let b = tree.create_file("b.js", None).unwrap();
        assert_ne!(
            tree.get(a).unwrap().stable_id(),
            tree.get(b).unwrap().stable_id()
        );
    }
}
