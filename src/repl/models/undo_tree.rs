//! # Undo Tree
//!
//! Branching snapshot history. `undo`/`redo` walk parent/child links, while
//! `earlier`/`later` walk the chronological creation order regardless of
//! topology.
//!
//! Nodes live in a `Vec` in creation order, so a node's id doubles as its
//! chronological position. Adding a snapshot always creates a new child of
//! the current node, even when that node already has children; older
//! branches stay reachable through `earlier`/`later`.

use std::time::{Duration, SystemTime};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct UndoNode {
    data: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Child `redo` follows; the most recently added or undone-from one
    redo_child: Option<NodeId>,
    created_at: SystemTime,
}

impl UndoNode {
    fn new(data: String, parent: Option<NodeId>) -> Self {
        Self {
            data,
            parent,
            children: Vec::new(),
            redo_child: None,
            created_at: SystemTime::now(),
        }
    }
}

/// Snapshot tree with a current pointer
#[derive(Debug, Clone)]
pub struct UndoTree {
    nodes: Vec<UndoNode>,
    current: NodeId,
}

impl Default for UndoTree {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoTree {
    /// Tree holding only the empty root snapshot
    pub fn new() -> Self {
        Self {
            nodes: vec![UndoNode::new(String::new(), None)],
            current: ROOT,
        }
    }

    /// Snapshot `data` as a new child of the current node and move to it
    pub fn add(&mut self, data: &str) {
        let id = self.nodes.len();
        self.nodes
            .push(UndoNode::new(data.to_string(), Some(self.current)));
        let parent = &mut self.nodes[self.current];
        parent.children.push(id);
        parent.redo_child = Some(id);
        self.current = id;
        tracing::trace!("undo snapshot #{} added", id);
    }

    /// Add a snapshot unless `data` equals the current one
    pub fn add_if_changed(&mut self, data: &str) -> bool {
        if self.current_data() == data {
            return false;
        }
        self.add(data);
        true
    }

    /// Move to the parent snapshot and return its content
    pub fn undo(&mut self) -> Option<String> {
        let parent = self.nodes[self.current].parent?;
        self.nodes[parent].redo_child = Some(self.current);
        self.current = parent;
        Some(self.current_data().to_string())
    }

    /// Move to the child last left by `undo` (or last added)
    pub fn redo(&mut self) -> Option<String> {
        let node = &self.nodes[self.current];
        let child = node.redo_child.or_else(|| node.children.last().copied())?;
        self.current = child;
        Some(self.current_data().to_string())
    }

    /// Step back in creation order
    pub fn earlier(&mut self) -> Option<String> {
        if self.current == ROOT {
            return None;
        }
        self.current -= 1;
        Some(self.current_data().to_string())
    }

    /// Step forward in creation order
    pub fn later(&mut self) -> Option<String> {
        if self.current + 1 >= self.nodes.len() {
            return None;
        }
        self.current += 1;
        Some(self.current_data().to_string())
    }

    pub fn current_data(&self) -> &str {
        &self.nodes[self.current].data
    }

    /// Chronological number of the current snapshot (root is 0)
    pub fn current_seq(&self) -> usize {
        self.current
    }

    /// Number of snapshots ever created, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Time since the current snapshot was taken
    pub fn current_age(&self) -> Duration {
        self.nodes[self.current]
            .created_at
            .elapsed()
            .unwrap_or_default()
    }

    /// Drop everything back to a lone empty root
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_tree_should_walk_branches_and_chronology() {
        let mut tree = UndoTree::new();

        tree.add("s1");
        assert_eq!(tree.undo().as_deref(), Some(""));

        tree.add("s2");
        tree.add("s3");
        assert_eq!(tree.undo().as_deref(), Some("s2"));

        // new branch off "s2"; "s3" survives only chronologically
        tree.add("s2");
        assert_eq!(tree.undo().as_deref(), Some("s2"));
        assert_eq!(tree.redo().as_deref(), Some("s2"));
        assert_eq!(tree.later(), None);

        assert_eq!(tree.earlier().as_deref(), Some("s3"));
        assert_eq!(tree.earlier().as_deref(), Some("s2"));
        assert_eq!(tree.earlier().as_deref(), Some("s1"));
        assert_eq!(tree.earlier().as_deref(), Some(""));
        assert_eq!(tree.earlier(), None);
        assert_eq!(tree.current_data(), "");
    }

    #[test]
    fn undo_at_root_should_do_nothing() {
        let mut tree = UndoTree::new();
        assert_eq!(tree.undo(), None);
        assert_eq!(tree.redo(), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn redo_should_follow_the_branch_undo_came_from() {
        let mut tree = UndoTree::new();
        tree.add("a");
        tree.undo();
        tree.add("b");
        tree.undo();
        assert_eq!(tree.redo().as_deref(), Some("b"));
        assert_eq!(tree.redo(), None);
    }

    #[test]
    fn add_if_changed_should_skip_identical_snapshots() {
        let mut tree = UndoTree::new();
        assert!(!tree.add_if_changed(""));
        assert!(tree.add_if_changed("x"));
        assert!(!tree.add_if_changed("x"));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.current_seq(), 1);
    }

    #[test]
    fn reset_should_return_to_empty_root() {
        let mut tree = UndoTree::new();
        tree.add("x");
        tree.reset();
        assert_eq!(tree.current_data(), "");
        assert_eq!(tree.len(), 1);
    }
}
