//! Playground session: the explicit top-level handle that aggregates
//! the file tree, the console log, the debounced composer, and the
//! store. Constructed from the store at startup; every successful
//! mutation is flushed back immediately.

use std::time::Instant;

use crate::console::{ConsoleLog, ConsoleRelay, FramePort, LogRecord, DEFAULT_CAPACITY};
use crate::models::{FileTree, FileTreeError, FileView, NodeId};
use crate::persistence::{records_from_tree, tree_from_records, FileRecord, ProjectStore};
use crate::preview::{DebouncedComposer, PreviewTarget};

pub struct PlaygroundSession {
    tree: FileTree,
    console: ConsoleLog,
    relay: ConsoleRelay,
    frame_port: FramePort,
    composer: DebouncedComposer,
    target: PreviewTarget,
    store: ProjectStore,
}

impl PlaygroundSession {
    pub fn new(store: ProjectStore) -> Self {
        let records = store.load();
        let tree = tree_from_records(&records).unwrap_or_else(|error| {
            tracing::warn!(%error, "stored project is inconsistent, starting empty");
            FileTree::new()
        });

        let (frame_port, relay) = ConsoleRelay::channel(DEFAULT_CAPACITY);
        let mut composer = DebouncedComposer::default();
        // Schedule the initial composition.
        composer.mark_dirty(Instant::now());

        Self {
            tree,
            console: ConsoleLog::new(),
            relay,
            frame_port,
            composer,
            target: PreviewTarget::default(),
            store,
        }
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn active_file(&self) -> Option<NodeId> {
        self.tree.active_file()
    }

    pub fn open_file(&mut self, id: NodeId) {
        self.tree.open_file(id);
    }

    pub fn files(&mut self) -> Vec<FileView> {
        self.tree.files()
    }

    /// Producer half of the console channel, for the frame bridge.
    pub fn frame_port(&self) -> FramePort {
        self.frame_port.clone()
    }

    pub fn console_records(&self) -> &[LogRecord] {
        self.console.records()
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
    }

    pub fn preview_html(&self) -> Option<&str> {
        self.target.html()
    }

    pub fn create_file(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
    ) -> Result<NodeId, FileTreeError> {
        let id = self.tree.create_file(name, parent)?;
        self.after_mutation();
        Ok(id)
    }

    pub fn create_folder(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
    ) -> Result<NodeId, FileTreeError> {
        let id = self.tree.create_folder(name, parent)?;
        self.after_mutation();
        Ok(id)
    }

    pub fn update_file(&mut self, id: NodeId, content: &str) {
        self.tree.update(id, content);
        self.after_mutation();
    }

    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), FileTreeError> {
        self.tree.rename(id, new_name)?;
        self.after_mutation();
        Ok(())
    }

    pub fn delete(&mut self, id: NodeId) {
        self.tree.delete(id);
        self.after_mutation();
    }

    pub fn move_to(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), FileTreeError> {
        self.tree.move_to(id, parent)?;
        self.after_mutation();
        Ok(())
    }

    /// Replaces the whole project with a successfully loaded shared
    /// one. A load that fails never reaches this point, so a bad slug
    /// leaves the current tree untouched.
    pub fn apply_shared(&mut self, files: &[FileRecord]) -> Result<(), FileTreeError> {
        let tree = tree_from_records(files)?;
        self.tree = tree;
        self.after_mutation();
        Ok(())
    }

    pub fn records(&mut self) -> Vec<FileRecord> {
        records_from_tree(&mut self.tree)
    }

    fn after_mutation(&mut self) {
        let records = records_from_tree(&mut self.tree);
        self.store.save(&records);
        self.composer.mark_dirty(Instant::now());
    }

    /// Drives the session: drains relayed console messages and, once
    /// the quiescence window has passed, publishes a fresh preview.
    /// Returns true when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.relay.drain_into(&mut self.console) > 0;

        if self.composer.is_due(now) {
            let files = self.tree.files();
            if let Some(output) = self.composer.poll(now, &files) {
                changed |= self.target.apply(&output);
            }
        }

        changed
    }
}
