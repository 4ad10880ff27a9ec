//! Partitioning of a raw mutation batch.
//!
//! Structural records contribute their added and removed nodes in delivery
//! order. Text records are diffed against the model's copy of the text and
//! become [`TextDelta`]s, at most one per document path. When two records
//! touch the same path the first one delivered wins; the later ones are
//! dropped because the first diff already covers the node's final content.

use std::collections::HashSet;

use crate::diff::{TextRegion, diff_text, normalize_surface_text};
use crate::host::SurfaceResolver;
use crate::mutation::MutationRecord;
use crate::types::{DocumentPath, SurfaceNodeId};

/// A text replacement located in the document model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    pub path: DocumentPath,
    pub insert_start: usize,
    pub insert_end: usize,
    pub inserted_text: String,
}

impl TextDelta {
    pub fn from_region(path: DocumentPath, region: TextRegion) -> Self {
        Self {
            path,
            insert_start: region.start,
            insert_end: region.end,
            inserted_text: region.inserted_text,
        }
    }
}

/// One mutation batch, classified. Built per batch and consumed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedBatch {
    pub added_nodes: Vec<SurfaceNodeId>,
    pub removed_nodes: Vec<SurfaceNodeId>,
    pub text_deltas: Vec<TextDelta>,
}

impl ClassifiedBatch {
    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty() && self.removed_nodes.is_empty() && self.text_deltas.is_empty()
    }
}

/// Classifies `batch` in delivery order.
pub fn classify<R>(batch: &[MutationRecord], resolver: &R) -> ClassifiedBatch
where
    R: SurfaceResolver + ?Sized,
{
    let mut classified = ClassifiedBatch::default();
    let mut seen_paths: HashSet<DocumentPath> = HashSet::new();

    for record in batch {
        match record {
            MutationRecord::StructuralChange {
                added_nodes,
                removed_nodes,
                ..
            } => {
                classified.added_nodes.extend_from_slice(added_nodes);
                classified.removed_nodes.extend_from_slice(removed_nodes);
            }
            MutationRecord::TextChange { target, .. } => {
                let Some(snapshot) = resolver.text_of(*target) else {
                    log::debug!("text change on detached node {target:?}, skipping");
                    continue;
                };

                if normalize_surface_text(&snapshot.model, &snapshot.surface) == snapshot.model {
                    continue;
                }
                let Some(region) = diff_text(&snapshot.model, &snapshot.surface) else {
                    continue;
                };
                let Some(path) = resolver.path_of(*target) else {
                    log::debug!("no model path for surface node {target:?}, skipping");
                    continue;
                };

                if !seen_paths.insert(path.clone()) {
                    log::debug!("dropping later text change at already-seen path {path}");
                    continue;
                }
                classified.text_deltas.push(TextDelta::from_region(path, region));
            }
        }
    }

    classified
}

/// Inserted text of every delta, concatenated in document order.
pub fn combined_text(deltas: &[TextDelta]) -> String {
    let mut ordered: Vec<&TextDelta> = deltas.iter().collect();
    ordered.sort_by(|a, b| a.path.cmp(&b.path));
    ordered
        .into_iter()
        .map(|delta| delta.inserted_text.as_str())
        .collect()
}
