//! In-memory document model and scripted surface.
//!
//! These back the engine's own tests and the replay tool. A real integration
//! implements [`DocumentModel`](crate::DocumentModel) and
//! [`SurfaceResolver`](crate::SurfaceResolver) over its editor framework.

mod document;
mod surface;

pub use document::{Block, MemoryDocument, ROOT_TAG};
pub use surface::{ScriptedNode, ScriptedSurface};
