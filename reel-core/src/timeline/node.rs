use std::collections::BTreeSet;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A segment of a nested timeline with its own local time origin.
///
/// A child's local frame is its parent's local frame minus the child's `from`.
pub struct TimelineNode {
    /// Unique identifier within one tree.
    pub id: String,
    /// Offset of this node's local frame 0 within its parent.
    #[serde(default)]
    pub from: i64,
    /// Active length in frames; `None` stays active forever once started.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Nested segments.
    #[serde(default)]
    pub children: Vec<TimelineNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Local time of one node at a given global frame.
pub struct NodeTime {
    /// Node identifier.
    pub id: String,
    /// Frame in the node's local time; negative before the node starts.
    pub local_frame: i64,
    /// Whether the node and all its ancestors are inside their active windows.
    pub active: bool,
}

impl TimelineNode {
    /// Leaf node starting at `from` for `duration` frames.
    pub fn new(id: impl Into<String>, from: i64, duration: Option<u64>) -> Self {
        Self {
            id: id.into(),
            from,
            duration,
            children: Vec::new(),
        }
    }

    /// Append a child segment.
    pub fn with_child(mut self, child: TimelineNode) -> Self {
        self.children.push(child);
        self
    }

    /// Check ids are non-empty and unique across the tree.
    pub fn validate(&self) -> ReelResult<()> {
        let mut seen = BTreeSet::new();
        self.validate_rec(&mut seen)
    }

    fn validate_rec<'a>(&'a self, seen: &mut BTreeSet<&'a str>) -> ReelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::validation("timeline node id must be non-empty"));
        }
        if !seen.insert(self.id.as_str()) {
            return Err(ReelError::validation(format!(
                "duplicate timeline node id '{}'",
                self.id
            )));
        }
        for c in &self.children {
            c.validate_rec(seen)?;
        }
        Ok(())
    }

    /// Local frame of this node given its parent's local frame.
    pub fn local_frame(&self, parent_local: i64) -> i64 {
        parent_local.saturating_sub(self.from)
    }

    /// Whether `local` falls inside this node's active window.
    pub fn is_active_at(&self, local: i64) -> bool {
        if local < 0 {
            return false;
        }
        match self.duration {
            None => true,
            Some(d) => (local as u64) < d,
        }
    }

    /// Resolve every node's local time at `global`, parents before children.
    ///
    /// Children of an inactive node keep meaningful local frames but are reported inactive.
    pub fn resolve(&self, global: FrameIndex) -> Vec<NodeTime> {
        let mut out = Vec::new();
        self.resolve_rec(global.as_i64(), true, &mut out);
        out
    }

    fn resolve_rec(&self, parent_local: i64, parent_active: bool, out: &mut Vec<NodeTime>) {
        let local = self.local_frame(parent_local);
        let active = parent_active && self.is_active_at(local);
        out.push(NodeTime {
            id: self.id.clone(),
            local_frame: local,
            active,
        });
        for c in &self.children {
            c.resolve_rec(local, active, out);
        }
    }

    /// Local time of the node with `id`, if present.
    pub fn find(&self, id: &str, global: FrameIndex) -> Option<NodeTime> {
        self.resolve(global).into_iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/node.rs"]
mod tests;
