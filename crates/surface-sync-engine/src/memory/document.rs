use serde::{Deserialize, Serialize};

use crate::diff::{byte_offset, utf16_len};
use crate::host::{DocumentModel, EditError};
use crate::policy::EditCommand;
use crate::types::{DocumentPath, Point, Selection, Tag};

/// Tag the surface root element carries.
pub const ROOT_TAG: &str = "div";

/// A block element holding text leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub tag: Tag,
    pub leaves: Vec<String>,
}

impl Block {
    pub fn new(tag: impl Into<Tag>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            leaves: vec![text.into()],
        }
    }

    pub fn text(&self) -> String {
        self.leaves.concat()
    }
}

/// Two-level document: blocks of text leaves, addressed as `[block, leaf]`.
///
/// Offsets are UTF-16 code units. Every successful command bumps `version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    root_tag: Tag,
    blocks: Vec<Block>,
    selection: Option<Selection>,
    version: u64,
}

/// Resolved `(block, leaf, byte offset)` of a point.
type Location = (usize, usize, usize);

impl MemoryDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            root_tag: Tag::new(ROOT_TAG),
            blocks,
            selection: None,
            version: 0,
        }
    }

    pub fn from_blocks<'a>(blocks: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            blocks
                .into_iter()
                .map(|(tag, text)| Block::new(tag, text))
                .collect(),
        )
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_text(&self, index: usize) -> Option<String> {
        self.blocks.get(index).map(Block::text)
    }

    /// Plain text, one line per block.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn leaf(&self, path: &DocumentPath) -> Option<&str> {
        match path.indices() {
            [block, leaf] => self
                .blocks
                .get(*block)
                .and_then(|b| b.leaves.get(*leaf))
                .map(String::as_str),
            _ => None,
        }
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn locate(&self, point: &Point) -> Result<Location, EditError> {
        let text = self.leaf(&point.path).ok_or_else(|| EditError::InvalidPath {
            path: point.path.clone(),
        })?;
        let byte = byte_offset(text, point.offset).ok_or_else(|| EditError::OffsetOutOfRange {
            path: point.path.clone(),
            offset: point.offset,
        })?;
        let indices = point.path.indices();
        Ok((indices[0], indices[1], byte))
    }

    fn caret_at(&mut self, block: usize, leaf: usize, byte: usize) {
        let offset = utf16_len(&self.blocks[block].leaves[leaf][..byte]);
        self.selection = Some(Selection::caret(Point::new([block, leaf], offset)));
    }

    fn current_selection(&self) -> Result<&Selection, EditError> {
        self.selection.as_ref().ok_or(EditError::NoSelection)
    }

    /// Collapses an expanded selection by deleting it, then returns the caret.
    fn collapsed_caret(&mut self) -> Result<Location, EditError> {
        if self.current_selection()?.is_expanded() {
            self.delete_fragment()?;
        }
        let caret = self.current_selection()?.anchor.clone();
        self.locate(&caret)
    }

    fn replace_text(
        &mut self,
        path: &DocumentPath,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<(), EditError> {
        let from = self.locate(&Point::new(path.clone(), start))?;
        let (block, leaf, to) = self.locate(&Point::new(path.clone(), end))?;
        if from.2 > to {
            return Err(EditError::OffsetOutOfRange {
                path: path.clone(),
                offset: start,
            });
        }
        self.blocks[block].leaves[leaf].replace_range(from.2..to, text);

        // Points on this leaf shift like the text after the replaced range.
        let inserted = utf16_len(text);
        if let Some(selection) = self.selection.as_mut() {
            for point in [&mut selection.anchor, &mut selection.focus] {
                if &point.path != path || point.offset < start {
                    continue;
                }
                point.offset = if point.offset >= end {
                    point.offset - (end - start) + inserted
                } else {
                    start + inserted
                };
            }
        }
        Ok(())
    }

    fn insert_text(&mut self, text: &str) -> Result<(), EditError> {
        let (block, leaf, byte) = self.collapsed_caret()?;
        self.blocks[block].leaves[leaf].insert_str(byte, text);
        self.caret_at(block, leaf, byte + text.len());
        Ok(())
    }

    fn delete_fragment(&mut self) -> Result<(), EditError> {
        let selection = self.current_selection()?;
        if selection.is_collapsed() {
            return Ok(());
        }
        let (start, end) = selection.ordered();
        let (start, end) = (start.clone(), end.clone());
        let (sb, sl, so) = self.locate(&start)?;
        let (eb, el, eo) = self.locate(&end)?;

        if sb == eb && sl == el {
            self.blocks[sb].leaves[sl].replace_range(so..eo, "");
        } else if sb == eb {
            let leaves = &mut self.blocks[sb].leaves;
            leaves[sl].truncate(so);
            leaves[el].replace_range(..eo, "");
            leaves.drain(sl + 1..el);
        } else {
            let mut tail: Vec<String> = self.blocks[eb].leaves.split_off(el);
            tail[0].replace_range(..eo, "");
            let head = &mut self.blocks[sb].leaves;
            head.truncate(sl + 1);
            head[sl].truncate(so);
            head.extend(tail);
            self.blocks.drain(sb + 1..=eb);
        }

        self.caret_at(sb, sl, so);
        Ok(())
    }

    fn delete_backward(&mut self) -> Result<(), EditError> {
        if self.current_selection()?.is_expanded() {
            return self.delete_fragment();
        }
        let (block, leaf, byte) = self.collapsed_caret()?;

        if byte > 0 {
            let text = &mut self.blocks[block].leaves[leaf];
            let prev = text[..byte]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            text.replace_range(prev..byte, "");
            self.caret_at(block, leaf, prev);
        } else if leaf > 0 {
            let prev_leaf = leaf - 1;
            let text = &mut self.blocks[block].leaves[prev_leaf];
            let prev = text.char_indices().next_back().map_or(0, |(i, _)| i);
            text.truncate(prev);
            self.caret_at(block, prev_leaf, prev);
        } else if block > 0 {
            // Merge into the previous block, caret at the seam. A block
            // without leaves takes over the merged leaves as they are.
            let merged = self.blocks.remove(block);
            let target = &mut self.blocks[block - 1];
            let (last, seam) = match target.leaves.last() {
                Some(text) => (target.leaves.len() - 1, text.len()),
                None => (0, 0),
            };
            target.leaves.extend(merged.leaves);
            self.caret_at(block - 1, last, seam);
        }
        Ok(())
    }

    fn insert_break(&mut self) -> Result<(), EditError> {
        let (block, leaf, byte) = self.collapsed_caret()?;
        let current = &mut self.blocks[block];
        let mut moved = current.leaves.split_off(leaf);
        let tail = moved[0].split_off(byte);
        current.leaves.push(std::mem::take(&mut moved[0]));
        moved[0] = tail;

        let split = Block {
            tag: current.tag.clone(),
            leaves: moved,
        };
        self.blocks.insert(block + 1, split);
        self.selection = Some(Selection::caret(Point::new([block + 1, 0], 0)));
        Ok(())
    }
}

impl DocumentModel for MemoryDocument {
    fn selection(&self) -> Option<Selection> {
        self.selection.clone()
    }

    fn parent_tag(&self, path: &DocumentPath) -> Option<Tag> {
        match path.indices() {
            [block] if *block < self.blocks.len() => Some(self.root_tag.clone()),
            [block, leaf] => self
                .blocks
                .get(*block)
                .filter(|b| *leaf < b.leaves.len())
                .map(|b| b.tag.clone()),
            _ => None,
        }
    }

    fn apply(&mut self, command: &EditCommand) -> Result<(), EditError> {
        let result = match command {
            EditCommand::DeleteFragment => self.delete_fragment(),
            EditCommand::InsertText { text } => self.insert_text(text),
            EditCommand::InsertBreak => self.insert_break(),
            EditCommand::DeleteBackward => self.delete_backward(),
            EditCommand::ReplaceText {
                path,
                start,
                end,
                text,
            } => self.replace_text(path, *start, *end, text),
        };
        result?;
        self.version += 1;
        Ok(())
    }
}
