//! Node storage and the start/finish lifecycle.
//!
//! `reserve` hands out a [`NodeBuilder`] for a pending slot; `finish` fills
//! the slot exactly once. Pending slots are invisible to `get`. Every finish
//! is journaled so a rollback can return slots finished during a failed
//! speculative attempt to the pending state, including slots reserved before
//! the attempt began.

use crate::errors::ContractViolation;
use crate::node::{Node, NodeData, NodeIndex};
use plait_common::{Position, SourceLocation};
use std::fmt::Write as _;

#[derive(Clone, Debug, PartialEq)]
enum Slot {
    Pending { start: u32, start_loc: Position },
    Finished(Node),
}

/// A started node. Consumed by `finish_node`, so a builder cannot be
/// finished twice through the type system; the arena still checks, since a
/// clone can be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeBuilder {
    index: NodeIndex,
    start: u32,
    start_loc: Position,
}

impl NodeBuilder {
    #[must_use]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    #[must_use]
    pub fn start_loc(&self) -> Position {
        self.start_loc
    }
}

/// Arena length and journal length, captured by parser snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaCheckpoint {
    slots: usize,
    finished: usize,
}

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    slots: Vec<Slot>,
    finish_log: Vec<u32>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            finish_log: Vec::with_capacity(capacity),
        }
    }

    /// Number of slots, pending ones included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// A finished node. Pending and out-of-range indices yield `None`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        match self.slots.get(index.index()) {
            Some(Slot::Finished(node)) => Some(node),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    /// Name of an `Identifier` node.
    #[must_use]
    pub fn identifier_name(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index) {
            Some(NodeData::Identifier { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Finished nodes with their indices, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Slot::Finished(node) => Some((NodeIndex(i as u32), node)),
                Slot::Pending { .. } => None,
            })
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Pending { .. }))
            .count()
    }

    #[must_use]
    pub fn first_pending(&self) -> Option<NodeIndex> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Slot::Pending { .. }))
            .map(|i| NodeIndex(i as u32))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub(crate) fn reserve(&mut self, start: u32, start_loc: Position) -> NodeBuilder {
        let index = NodeIndex(self.slots.len() as u32);
        self.slots.push(Slot::Pending { start, start_loc });
        NodeBuilder {
            index,
            start,
            start_loc,
        }
    }

    pub(crate) fn finish(
        &mut self,
        builder: NodeBuilder,
        data: NodeData,
        end: u32,
        end_loc: Position,
    ) -> Result<NodeIndex, ContractViolation> {
        let index = builder.index;
        match self.slots.get(index.index()) {
            None => return Err(ContractViolation::UnknownBuilder { index: index.0 }),
            Some(Slot::Finished(_)) => {
                return Err(ContractViolation::AlreadyFinished { index: index.0 });
            }
            // A stale builder from a rolled-back attempt whose slot was reused.
            Some(Slot::Pending { start, .. }) if *start != builder.start => {
                return Err(ContractViolation::UnknownBuilder { index: index.0 });
            }
            Some(Slot::Pending { .. }) => {}
        }
        if end < builder.start {
            return Err(ContractViolation::EndBeforeStart {
                index: index.0,
                start: builder.start,
                end,
            });
        }
        self.slots[index.index()] = Slot::Finished(Node {
            pos: builder.start,
            end,
            loc: SourceLocation::new(builder.start_loc, end_loc),
            data,
        });
        self.finish_log.push(index.0);
        Ok(index)
    }

    // =========================================================================
    // Speculation support
    // =========================================================================

    #[must_use]
    pub(crate) fn checkpoint(&self) -> ArenaCheckpoint {
        ArenaCheckpoint {
            slots: self.slots.len(),
            finished: self.finish_log.len(),
        }
    }

    pub(crate) fn rollback(&mut self, checkpoint: ArenaCheckpoint) {
        for &index in &self.finish_log[checkpoint.finished..] {
            let index = index as usize;
            if index >= checkpoint.slots {
                continue;
            }
            let reverted = match &self.slots[index] {
                Slot::Finished(node) => Slot::Pending {
                    start: node.pos,
                    start_loc: node.loc.start,
                },
                Slot::Pending { .. } => continue,
            };
            self.slots[index] = reverted;
        }
        self.slots.truncate(checkpoint.slots);
        self.finish_log.truncate(checkpoint.finished);
    }

    // =========================================================================
    // Dump
    // =========================================================================

    /// Indented structural dump of the tree under `root`: one line per node
    /// with its kind and distinguishing scalars, no positions. Two parses
    /// of equivalent source produce identical dumps.
    #[must_use]
    pub fn dump(&self, root: NodeIndex) -> String {
        let mut out = String::new();
        self.dump_into(root, 0, &mut out);
        out
    }

    fn dump_into(&self, index: NodeIndex, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        let Some(node) = self.get(index) else {
            let _ = writeln!(out, "<pending #{}>", index.0);
            return;
        };
        out.push_str(node.data.type_name());
        let details = node.data.details();
        if !details.is_empty() {
            out.push(' ');
            out.push_str(&details);
        }
        out.push('\n');
        for child in node.data.children() {
            self.dump_into(child, depth + 1, out);
        }
    }
}
