//! Seams to the host editor framework.
//!
//! The engine never owns the document model or the surface. It reads
//! through [`SurfaceResolver`] and writes through [`DocumentModel`], so it can
//! be driven by a real editor or by the in-memory implementations in
//! [`crate::memory`].

use thiserror::Error;

use crate::policy::EditCommand;
use crate::types::{DocumentPath, Selection, SurfaceNodeId, Tag};

/// Failures reported by the document model when a command cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no node at path {path}")]
    InvalidPath { path: DocumentPath },

    #[error("offset {offset} is out of range for the text at {path}")]
    OffsetOutOfRange { path: DocumentPath, offset: usize },

    #[error("the document has no selection")]
    NoSelection,

    #[error("command {command} is not supported by this document model")]
    Unsupported { command: &'static str },
}

/// Query and command interface of the document model.
pub trait DocumentModel {
    /// Current selection, if the editor has one.
    fn selection(&self) -> Option<Selection>;

    /// Tag of the immediate parent of the node at `path`, or `None` if the
    /// node has no parent that maps to a surface element.
    fn parent_tag(&self, path: &DocumentPath) -> Option<Tag>;

    /// Applies one command atomically.
    fn apply(&mut self, command: &EditCommand) -> Result<(), EditError>;
}

/// Text of one node as the model last saw it, and as the surface shows it now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
    pub model: String,
    pub surface: String,
}

/// Mapping from surface nodes to the document model.
pub trait SurfaceResolver {
    /// Path of the model node backing `node`.
    fn path_of(&self, node: SurfaceNodeId) -> Option<DocumentPath>;

    /// Text of the model node that owns the changed surface text node.
    ///
    /// Returns `None` when the node has been detached from the surface.
    fn text_of(&self, node: SurfaceNodeId) -> Option<TextSnapshot>;

    /// Tag of `node`, or `None` for text nodes.
    fn tag_of(&self, node: SurfaceNodeId) -> Option<Tag>;
}
