/*!
 * # surface-sync engine
 *
 * Keeps a structured document model in step with a live editing surface
 * that the platform mutates directly (IME composition, dictation,
 * autocomplete). The surface reports what it already changed as batches of
 * [`MutationRecord`]s; the engine infers the intended edit and replays it on
 * the model as a few precise commands, or asks the host to rebuild the
 * surface when it cannot.
 *
 * ## Pipeline
 *
 * 1. [`UserInputGate`] admits a batch only if the host signalled user input
 *    since the last pass. Batches caused by the engine's own writes are
 *    dropped.
 * 2. [`classify`] splits the batch into added nodes, removed nodes and one
 *    [`TextDelta`] per document path, using [`diff_text`] on each changed
 *    text node.
 * 3. [`decide`] picks commands by ordered rules; [`is_line_break_mutation`]
 *    feeds the block-split rule.
 * 4. The [`Reconciler`] applies the commands through [`DocumentModel`] and
 *    bumps the [`ResyncFallback`] generation unless the edit was a precise
 *    path-scoped replace.
 *
 * ## Usage
 *
 * ```rust
 * use surface_sync_engine::memory::{MemoryDocument, ScriptedSurface};
 * use surface_sync_engine::*;
 *
 * let mut doc = MemoryDocument::from_blocks([("p", "Hello ")]);
 * doc.set_selection(Some(Selection::caret(Point::new([0, 0], 6))));
 *
 * let mut surface = ScriptedSurface::new();
 * surface.text(SurfaceNodeId(2), [0, 0], "Hello ", "Hello world");
 *
 * let mut reconciler =
 *     Reconciler::attach(Some(SurfaceNodeId(1)), ManualFrames::new(), Options::default())
 *         .unwrap();
 * reconciler.notify_user_input_signal();
 *
 * let outcome = reconciler.submit(
 *     &mut doc,
 *     &surface,
 *     &[MutationRecord::text(SurfaceNodeId(2), "Hello ")],
 * );
 *
 * assert_eq!(doc.text(), "Hello world");
 * assert!(!outcome.report().unwrap().resynced);
 * ```
 */

pub mod classify;
pub mod diff;
pub mod gate;
pub mod host;
pub mod line_break;
pub mod memory;
pub mod mutation;
pub mod policy;
pub mod reconciler;
pub mod resync;
pub mod types;

// Public API re-exports
pub use classify::{ClassifiedBatch, TextDelta, classify, combined_text};
pub use diff::{TextRegion, diff_text};
pub use gate::{FrameHandle, FrameScheduler, ManualFrames, UserInputGate};
pub use host::{DocumentModel, EditError, SurfaceResolver, TextSnapshot};
pub use line_break::is_line_break_mutation;
pub use mutation::MutationRecord;
pub use policy::{EditCommand, Reconciliation, Rule, decide};
pub use reconciler::{AttachError, IgnoreReason, Options, PassReport, Reconciler, SubmitOutcome};
pub use resync::ResyncFallback;
pub use types::{DocumentPath, Point, Selection, SurfaceNodeId, Tag};
