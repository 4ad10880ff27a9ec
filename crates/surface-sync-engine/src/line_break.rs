//! Detection of a block split the surface performed on its own.
//!
//! A line-break keystroke through an IME produces no text mutation: the
//! surface clones the caret's block element and moves the tail into the
//! clone. The only trace is an added element whose tag matches the block the
//! model's selection sits in. Nested blocks sharing a tag can fool this check;
//! it is kept as-is.

use crate::host::{DocumentModel, SurfaceResolver};
use crate::types::{SurfaceNodeId, Tag};

/// True iff there is a selection, its anchor has a parent with a tag, and
/// one of `added_nodes` carries that same tag.
pub fn is_line_break_mutation<M, R>(model: &M, resolver: &R, added_nodes: &[SurfaceNodeId]) -> bool
where
    M: DocumentModel + ?Sized,
    R: SurfaceResolver + ?Sized,
{
    let Some(selection) = model.selection() else {
        return false;
    };
    let Some(parent_tag) = model.parent_tag(&selection.anchor.path) else {
        return false;
    };
    matches_parent_tag(&parent_tag, added_nodes, |node| resolver.tag_of(node))
}

fn matches_parent_tag(
    parent_tag: &Tag,
    added_nodes: &[SurfaceNodeId],
    tag_of: impl Fn(SurfaceNodeId) -> Option<Tag>,
) -> bool {
    added_nodes
        .iter()
        .any(|&node| tag_of(node).as_ref() == Some(parent_tag))
}
