//! Mutation records as reported by the presentation surface.

use serde::{Deserialize, Serialize};

use crate::types::SurfaceNodeId;

/// One low-level change the surface has already made to itself.
///
/// Records arrive in batches, in the order the surface produced them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationRecord {
    /// Children of `target` were inserted or removed.
    StructuralChange {
        target: SurfaceNodeId,
        #[serde(default)]
        added_nodes: Vec<SurfaceNodeId>,
        #[serde(default)]
        removed_nodes: Vec<SurfaceNodeId>,
    },
    /// The character data of the text node `target` changed.
    TextChange {
        target: SurfaceNodeId,
        previous_value: String,
    },
}

impl MutationRecord {
    pub fn added(target: SurfaceNodeId, nodes: impl IntoIterator<Item = SurfaceNodeId>) -> Self {
        MutationRecord::StructuralChange {
            target,
            added_nodes: nodes.into_iter().collect(),
            removed_nodes: Vec::new(),
        }
    }

    pub fn removed(target: SurfaceNodeId, nodes: impl IntoIterator<Item = SurfaceNodeId>) -> Self {
        MutationRecord::StructuralChange {
            target,
            added_nodes: Vec::new(),
            removed_nodes: nodes.into_iter().collect(),
        }
    }

    pub fn text(target: SurfaceNodeId, previous_value: impl Into<String>) -> Self {
        MutationRecord::TextChange {
            target,
            previous_value: previous_value.into(),
        }
    }
}
