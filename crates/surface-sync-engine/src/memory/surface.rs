use std::collections::HashMap;

use crate::host::{SurfaceResolver, TextSnapshot};
use crate::memory::MemoryDocument;
use crate::types::{DocumentPath, SurfaceNodeId, Tag};

/// One node of a [`ScriptedSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedNode {
    Element {
        path: DocumentPath,
        tag: Tag,
    },
    Text {
        path: DocumentPath,
        /// The model's copy of the text when the batch is reconciled.
        model: String,
        /// What the surface currently shows.
        surface: String,
    },
}

/// Table-driven surface: each node id maps to a model path and, for text
/// nodes, the model and surface copies of its text.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSurface {
    nodes: HashMap<SurfaceNodeId, ScriptedNode>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(
        &mut self,
        id: SurfaceNodeId,
        path: impl Into<DocumentPath>,
        tag: impl Into<Tag>,
    ) {
        self.nodes.insert(
            id,
            ScriptedNode::Element {
                path: path.into(),
                tag: tag.into(),
            },
        );
    }

    pub fn text(
        &mut self,
        id: SurfaceNodeId,
        path: impl Into<DocumentPath>,
        model: impl Into<String>,
        surface: impl Into<String>,
    ) {
        self.nodes.insert(
            id,
            ScriptedNode::Text {
                path: path.into(),
                model: model.into(),
                surface: surface.into(),
            },
        );
    }

    /// Changes what the surface shows for a text node, as the user's IME
    /// would. Returns the previous surface text.
    pub fn edit_text(&mut self, id: SurfaceNodeId, text: impl Into<String>) -> Option<String> {
        match self.nodes.get_mut(&id)? {
            ScriptedNode::Text { surface, .. } => Some(std::mem::replace(surface, text.into())),
            ScriptedNode::Element { .. } => None,
        }
    }

    pub fn detach(&mut self, id: SurfaceNodeId) -> Option<ScriptedNode> {
        self.nodes.remove(&id)
    }

    /// Refreshes every text node's model copy from `document`.
    ///
    /// Nodes whose path no longer resolves keep their last model text.
    pub fn sync_model(&mut self, document: &MemoryDocument) {
        for node in self.nodes.values_mut() {
            if let ScriptedNode::Text { path, model, .. } = node
                && let Some(text) = document.leaf(path)
            {
                *model = text.to_string();
            }
        }
    }

    /// Rebuilds the surface from the model: every text node shows exactly
    /// what the model holds.
    pub fn remount(&mut self, document: &MemoryDocument) {
        self.sync_model(document);
        for node in self.nodes.values_mut() {
            if let ScriptedNode::Text { model, surface, .. } = node {
                surface.clone_from(model);
            }
        }
    }
}

impl SurfaceResolver for ScriptedSurface {
    fn path_of(&self, node: SurfaceNodeId) -> Option<DocumentPath> {
        match self.nodes.get(&node)? {
            ScriptedNode::Element { path, .. } | ScriptedNode::Text { path, .. } => {
                Some(path.clone())
            }
        }
    }

    fn text_of(&self, node: SurfaceNodeId) -> Option<TextSnapshot> {
        match self.nodes.get(&node)? {
            ScriptedNode::Text { model, surface, .. } => Some(TextSnapshot {
                model: model.clone(),
                surface: surface.clone(),
            }),
            ScriptedNode::Element { .. } => None,
        }
    }

    fn tag_of(&self, node: SurfaceNodeId) -> Option<Tag> {
        match self.nodes.get(&node)? {
            ScriptedNode::Element { tag, .. } => Some(tag.clone()),
            ScriptedNode::Text { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_elements_and_text() {
        let mut surface = ScriptedSurface::new();
        surface.element(SurfaceNodeId(1), [0], "P");
        surface.text(SurfaceNodeId(2), [0, 0], "a", "ab");

        assert_eq!(surface.tag_of(SurfaceNodeId(1)), Some(Tag::new("p")));
        assert_eq!(surface.tag_of(SurfaceNodeId(2)), None);
        assert_eq!(
            surface.path_of(SurfaceNodeId(2)),
            Some(DocumentPath::from([0, 0]))
        );
        assert_eq!(
            surface.text_of(SurfaceNodeId(2)),
            Some(TextSnapshot {
                model: "a".to_string(),
                surface: "ab".to_string(),
            })
        );
        assert_eq!(surface.text_of(SurfaceNodeId(1)), None);
        assert_eq!(surface.path_of(SurfaceNodeId(3)), None);
    }

    #[test]
    fn test_sync_and_remount_follow_document() {
        let document = MemoryDocument::from_blocks([("p", "model text")]);
        let mut surface = ScriptedSurface::new();
        surface.text(SurfaceNodeId(2), [0, 0], "stale", "typed");

        surface.sync_model(&document);
        assert_eq!(
            surface.text_of(SurfaceNodeId(2)).map(|t| t.model),
            Some("model text".to_string())
        );

        surface.remount(&document);
        assert_eq!(
            surface.text_of(SurfaceNodeId(2)).map(|t| t.surface),
            Some("model text".to_string())
        );
    }

    #[test]
    fn test_edit_text_returns_previous_value() {
        let mut surface = ScriptedSurface::new();
        surface.text(SurfaceNodeId(2), [0, 0], "a", "a");

        assert_eq!(surface.edit_text(SurfaceNodeId(2), "ab"), Some("a".to_string()));
        assert_eq!(surface.edit_text(SurfaceNodeId(9), "x"), None);
    }
}
