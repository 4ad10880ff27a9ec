//! Scripted replay scenarios.
//!
//! A scenario is a TOML file describing a starting document, the surface
//! nodes that mirror it, and a sequence of steps the host would observe:
//!
//! ```toml
//! root = 1
//!
//! [[blocks]]
//! tag = "p"
//! leaves = ["Hello "]
//!
//! [selection]
//! anchor = { path = [0, 0], offset = 6 }
//! focus = { path = [0, 0], offset = 6 }
//!
//! [[surface]]
//! id = 3
//! path = [0, 0]
//! text = "Hello "
//!
//! [[steps]]
//! action = "signal"
//!
//! [[steps]]
//! action = "type"
//! node = 3
//! text = "Hello world"
//!
//! [[steps]]
//! action = "mutations"
//! records = [{ kind = "text_change", target = 3, previous_value = "Hello " }]
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use surface_sync_engine::memory::{Block, MemoryDocument, ScriptedSurface};
use surface_sync_engine::{DocumentPath, MutationRecord, Selection, SurfaceNodeId, Tag};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Surface root handle; omitted means the root could not be resolved.
    pub root: Option<SurfaceNodeId>,
    pub blocks: Vec<Block>,
    pub selection: Option<Selection>,
    #[serde(default)]
    pub surface: Vec<SurfaceEntry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A surface node: an element when `tag` is set, a text node otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurfaceEntry {
    pub id: SurfaceNodeId,
    pub path: DocumentPath,
    pub tag: Option<Tag>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// The platform announced upcoming input.
    Signal,
    /// A rendering frame elapsed.
    Frame,
    /// The IME rewrote a text node on the surface.
    Type { node: SurfaceNodeId, text: String },
    /// The surface reported a mutation batch.
    Mutations { records: Vec<MutationRecord> },
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        if let Some(index) = scenario.blocks.iter().position(|b| b.leaves.is_empty()) {
            bail!("block {index} needs at least one leaf");
        }
        for entry in &scenario.surface {
            if entry.tag.is_some() == entry.text.is_some() {
                bail!(
                    "surface node {} needs exactly one of `tag` or `text`",
                    entry.id.raw()
                );
            }
        }
        Ok(scenario)
    }

    pub fn document(&self) -> MemoryDocument {
        let mut document = MemoryDocument::new(self.blocks.clone());
        document.set_selection(self.selection.clone());
        document
    }

    /// Builds the surface; text nodes start out showing the model's text.
    pub fn surface(&self, document: &MemoryDocument) -> ScriptedSurface {
        let mut surface = ScriptedSurface::new();
        for entry in &self.surface {
            match (&entry.tag, &entry.text) {
                (Some(tag), _) => surface.element(entry.id, entry.path.clone(), tag.clone()),
                (None, text) => {
                    let text = text.clone().unwrap_or_default();
                    surface.text(entry.id, entry.path.clone(), text.clone(), text);
                }
            }
        }
        surface.sync_model(document);
        surface
    }
}
