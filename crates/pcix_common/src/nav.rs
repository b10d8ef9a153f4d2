//! Cursor movement over the device tree
//!
//! Four operations, no failure mode: a move that is not structurally
//! possible leaves the cursor where it is. The cursor always points at a
//! live node and never at the synthetic root.

use tracing::debug;

use crate::tree::{DeviceTree, NodeId};

/// The single selected node, shared by the tree and detail panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    current: NodeId,
}

impl Cursor {
    /// Cursor at the first top-level device; `None` on an empty tree.
    pub fn at_first_device(tree: &DeviceTree) -> Option<Cursor> {
        tree.first_device().map(|current| Cursor { current })
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Previous sibling, or the parent when already the first child.
    ///
    /// Top-level devices (direct children of the synthetic root) in first
    /// position have nowhere to go.
    pub fn move_up(&mut self, tree: &DeviceTree) {
        let Some(parent) = tree.parent(self.current) else {
            return;
        };
        let index = tree.sibling_index(self.current);
        if index == 0 {
            if tree.parent(parent).is_some() {
                debug!(?parent, "cursor climbs to parent");
                self.current = parent;
            }
            return;
        }
        self.current = tree.children(parent)[index - 1];
    }

    /// Next sibling, or the closest relative when already the last child.
    pub fn move_down(&mut self, tree: &DeviceTree) {
        let Some(parent) = tree.parent(self.current) else {
            return;
        };
        let index = tree.sibling_index(self.current);
        let siblings = tree.children(parent);
        if index + 1 < siblings.len() {
            self.current = siblings[index + 1];
            return;
        }
        match closest_relative(tree, self.current) {
            Some(next) => {
                debug!(?next, "cursor jumps to closest relative");
                self.current = next;
            }
            None => debug!("cursor at last node, down is a no-op"),
        }
    }

    /// Collapse to the parent. Top-level devices cannot collapse further.
    pub fn move_left(&mut self, tree: &DeviceTree) {
        let Some(parent) = tree.parent(self.current) else {
            return;
        };
        if tree.parent(parent).is_none() {
            return;
        }
        self.current = parent;
    }

    /// Descend to the first child, if there is one.
    pub fn move_right(&mut self, tree: &DeviceTree) {
        if let Some(&first) = tree.children(self.current).first() {
            self.current = first;
        }
    }
}

/// Walk up through ancestors until one is not the last child of its parent,
/// and return that ancestor's next sibling.
///
/// The walk stops at the synthetic root, which has no parent, so a cursor on
/// the last node in the tree yields `None` rather than cycling.
fn closest_relative(tree: &DeviceTree, start: NodeId) -> Option<NodeId> {
    let mut node = start;
    loop {
        let parent = tree.parent(node)?;
        let index = tree.sibling_index(node);
        let siblings = tree.children(parent);
        if index + 1 < siblings.len() {
            return Some(siblings[index + 1]);
        }
        node = parent;
    }
}
