//! Mapping of a classified batch to document-model commands.
//!
//! Rules are tried in order and the first match decides:
//!
//! | Rule | Condition | Commands | Resync |
//! |------|-----------|----------|--------|
//! | [`Rule::ReplaceSelection`] | expanded selection and removed nodes | delete fragment, then insert the combined text if any | yes |
//! | [`Rule::InsertBreak`] | line-break mutation | insert break | yes |
//! | [`Rule::DeleteBackward`] | removed nodes | delete backward | yes |
//! | [`Rule::ReplaceText`] | text deltas | one path-scoped replace per delta | no |
//! | [`Rule::NoSignal`] | nothing above | none | yes |
//!
//! Only path-scoped replaces describe the edit exactly in model coordinates.
//! Every other rule approximates, so the surface is rebuilt afterwards.

use serde::{Deserialize, Serialize};

use crate::classify::{ClassifiedBatch, combined_text};
use crate::types::{DocumentPath, Selection};

/// A document-model command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditCommand {
    /// Delete everything the current selection spans.
    DeleteFragment,
    /// Insert text at the caret.
    InsertText { text: String },
    /// Split the block at the selection.
    InsertBreak,
    /// Delete one unit before the caret.
    DeleteBackward,
    /// Replace `[start, end)` of the text at `path` with `text`.
    ReplaceText {
        path: DocumentPath,
        start: usize,
        end: usize,
        text: String,
    },
}

impl EditCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::DeleteFragment => "delete_fragment",
            EditCommand::InsertText { .. } => "insert_text",
            EditCommand::InsertBreak => "insert_break",
            EditCommand::DeleteBackward => "delete_backward",
            EditCommand::ReplaceText { .. } => "replace_text",
        }
    }
}

/// Which rule decided a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    ReplaceSelection,
    InsertBreak,
    DeleteBackward,
    ReplaceText,
    NoSignal,
}

/// The decision for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub rule: Rule,
    pub commands: Vec<EditCommand>,
    pub resync: bool,
}

impl Reconciliation {
    fn approximate(rule: Rule, commands: Vec<EditCommand>) -> Self {
        Self {
            rule,
            commands,
            resync: true,
        }
    }
}

/// Picks the commands for `batch`.
///
/// `line_break` is the result of
/// [`is_line_break_mutation`](crate::line_break::is_line_break_mutation) for
/// the batch's added nodes.
pub fn decide(
    batch: &ClassifiedBatch,
    selection: Option<&Selection>,
    line_break: bool,
) -> Reconciliation {
    let expanded = selection.is_some_and(Selection::is_expanded);

    if expanded && !batch.removed_nodes.is_empty() {
        let mut commands = vec![EditCommand::DeleteFragment];
        let text = combined_text(&batch.text_deltas);
        if !text.is_empty() {
            commands.push(EditCommand::InsertText { text });
        }
        return Reconciliation::approximate(Rule::ReplaceSelection, commands);
    }

    if line_break {
        return Reconciliation::approximate(Rule::InsertBreak, vec![EditCommand::InsertBreak]);
    }

    if !batch.removed_nodes.is_empty() {
        return Reconciliation::approximate(
            Rule::DeleteBackward,
            vec![EditCommand::DeleteBackward],
        );
    }

    if !batch.text_deltas.is_empty() {
        let commands = batch
            .text_deltas
            .iter()
            .map(|delta| EditCommand::ReplaceText {
                path: delta.path.clone(),
                start: delta.insert_start,
                end: delta.insert_end,
                text: delta.inserted_text.clone(),
            })
            .collect();
        return Reconciliation {
            rule: Rule::ReplaceText,
            commands,
            resync: false,
        };
    }

    Reconciliation::approximate(Rule::NoSignal, Vec::new())
}
