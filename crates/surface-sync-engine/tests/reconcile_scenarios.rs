//! End-to-end reconciliation passes against the in-memory document model.

use pretty_assertions::assert_eq;
use surface_sync_engine::memory::{MemoryDocument, ScriptedSurface};
use surface_sync_engine::*;

const ROOT: SurfaceNodeId = SurfaceNodeId(1);
const PARAGRAPH: SurfaceNodeId = SurfaceNodeId(2);
const TEXT: SurfaceNodeId = SurfaceNodeId(3);

struct Session {
    doc: MemoryDocument,
    surface: ScriptedSurface,
    reconciler: Reconciler<ManualFrames>,
}

impl Session {
    fn new(text: &str, selection: Selection) -> Self {
        let mut doc = MemoryDocument::from_blocks([("p", text)]);
        doc.set_selection(Some(selection));

        let mut surface = ScriptedSurface::new();
        surface.element(PARAGRAPH, [0], "P");
        surface.text(TEXT, [0, 0], text, text);

        let reconciler = Reconciler::attach(Some(ROOT), ManualFrames::new(), Options::default())
            .expect("root is present");

        Self {
            doc,
            surface,
            reconciler,
        }
    }

    /// The IME rewrites the text node, the way it would without any event.
    fn ime_writes(&mut self, text: &str) -> MutationRecord {
        let previous = self.surface.edit_text(TEXT, text).unwrap_or_default();
        MutationRecord::text(TEXT, previous)
    }

    fn submit(&mut self, batch: &[MutationRecord]) -> SubmitOutcome {
        self.surface.sync_model(&self.doc);
        let outcome = self.reconciler.submit(&mut self.doc, &self.surface, batch);
        if let Some(report) = outcome.report()
            && report.resynced
        {
            self.surface.remount(&self.doc);
        }
        outcome
    }

    fn tick(&mut self) {
        for handle in self.reconciler.scheduler_mut().tick() {
            self.reconciler.frame_elapsed(handle);
        }
    }

    fn texts(&self) -> Vec<String> {
        self.doc.blocks().iter().map(|b| b.text()).collect()
    }
}

fn caret(offset: usize) -> Selection {
    Selection::caret(Point::new([0, 0], offset))
}

// ============ Precise text edits ============

#[test]
fn test_ime_append_is_replayed_precisely() {
    let mut session = Session::new("Hello ", caret(6));
    session.reconciler.notify_user_input_signal();
    let record = session.ime_writes("Hello world");

    let outcome = session.submit(&[record]);

    let report = outcome.report().expect("reconciled");
    assert_eq!(report.rule, Rule::ReplaceText);
    assert_eq!(
        report.applied,
        vec![EditCommand::ReplaceText {
            path: DocumentPath::from([0, 0]),
            start: 6,
            end: 6,
            text: "world".to_string(),
        }]
    );
    assert!(!report.resynced);
    assert_eq!(session.reconciler.generation(), 0);
    assert_eq!(session.doc.text(), "Hello world");
}

#[test]
fn test_autocorrect_replacement() {
    let mut session = Session::new("teh cat", caret(3));
    session.reconciler.notify_user_input_signal();
    let record = session.ime_writes("the cat");

    session.submit(&[record]);

    assert_eq!(session.doc.text(), "the cat");
    assert_eq!(session.reconciler.generation(), 0);
}

#[test]
fn test_truncation_removes_tail() {
    let mut session = Session::new("Hello world", caret(11));
    session.reconciler.notify_user_input_signal();
    let record = session.ime_writes("Hello");

    session.submit(&[record]);

    assert_eq!(session.doc.text(), "Hello");
}

#[test]
fn test_repeated_text_records_apply_once() {
    let mut session = Session::new("ab", caret(2));
    session.reconciler.notify_user_input_signal();
    let first = session.ime_writes("abc");
    let second = session.ime_writes("abcd");

    let outcome = session.submit(&[first, second]);

    // Both records resolve to the same leaf; the first diff already sees the
    // node's final content.
    assert_eq!(outcome.report().map(|r| r.applied.len()), Some(1));
    assert_eq!(session.doc.text(), "abcd");
}

// ============ Approximate edits ============

#[test]
fn test_selection_replaced_by_typed_text() {
    let mut session = Session::new(
        "Hello world",
        Selection::new(Point::new([0, 0], 6), Point::new([0, 0], 11)),
    );
    session.surface.element(SurfaceNodeId(7), [0, 1], "SPAN");
    session.reconciler.notify_user_input_signal();
    let text_record = session.ime_writes("Hello X");

    let outcome = session.submit(&[
        MutationRecord::removed(PARAGRAPH, [SurfaceNodeId(7)]),
        text_record,
    ]);

    let report = outcome.report().expect("reconciled");
    assert_eq!(report.rule, Rule::ReplaceSelection);
    assert_eq!(
        report.applied,
        vec![
            EditCommand::DeleteFragment,
            EditCommand::InsertText {
                text: "X".to_string()
            },
        ]
    );
    assert!(report.resynced);
    assert_eq!(session.doc.text(), "Hello X");
    assert_eq!(session.reconciler.generation(), 1);
}

#[test]
fn test_surface_block_split_becomes_break() {
    let mut session = Session::new("Hello world", caret(5));
    session.surface.element(SurfaceNodeId(8), [1], "P");
    session.reconciler.notify_user_input_signal();

    let outcome = session.submit(&[MutationRecord::added(ROOT, [SurfaceNodeId(8)])]);

    let report = outcome.report().expect("reconciled");
    assert_eq!(report.rule, Rule::InsertBreak);
    assert!(report.resynced);
    assert_eq!(session.texts(), vec!["Hello", " world"]);
}

#[test]
fn test_removed_node_with_caret_deletes_backward() {
    let mut doc = MemoryDocument::from_blocks([("p", "one"), ("p", "two")]);
    doc.set_selection(Some(Selection::caret(Point::new([1, 0], 0))));
    let mut surface = ScriptedSurface::new();
    surface.element(SurfaceNodeId(4), [1], "P");
    let mut reconciler =
        Reconciler::attach(Some(ROOT), ManualFrames::new(), Options::default()).unwrap();
    reconciler.notify_user_input_signal();

    let outcome = reconciler.submit(
        &mut doc,
        &surface,
        &[MutationRecord::removed(ROOT, [SurfaceNodeId(4)])],
    );

    assert_eq!(outcome.report().map(|r| r.rule), Some(Rule::DeleteBackward));
    assert_eq!(doc.text(), "onetwo");
    assert_eq!(reconciler.generation(), 1);
}

// ============ Gate ============

#[test]
fn test_corrective_write_is_not_reconciled() {
    let mut session = Session::new("Hello ", caret(6));
    session.reconciler.notify_user_input_signal();
    let record = session.ime_writes("Hello world");
    session.submit(&[record]);
    let version = session.doc.version();

    // The host re-renders and the surface reports it without a user signal.
    let echo = session.ime_writes("Hello world!");
    let outcome = session.submit(&[echo]);

    assert_eq!(outcome, SubmitOutcome::Ignored(IgnoreReason::NoUserInput));
    assert_eq!(session.doc.version(), version);
    assert_eq!(session.reconciler.generation(), 0);
}

#[test]
fn test_signal_expires_after_frame() {
    let mut session = Session::new("Hello ", caret(6));
    session.reconciler.notify_user_input_signal();
    session.tick();
    let record = session.ime_writes("Hello world");

    let outcome = session.submit(&[record]);

    assert_eq!(outcome, SubmitOutcome::Ignored(IgnoreReason::NoUserInput));
    assert_eq!(session.doc.text(), "Hello ");
}

#[test]
fn test_rapid_signals_coalesce_into_one_pass() {
    let mut session = Session::new("a", caret(1));
    session.reconciler.notify_user_input_signal();
    session.reconciler.notify_user_input_signal();
    session.reconciler.notify_user_input_signal();
    let first = session.ime_writes("ab");
    let outcome = session.submit(&[first]);
    assert!(outcome.report().is_some());

    let second = session.ime_writes("abc");
    let outcome = session.submit(&[second]);

    assert_eq!(outcome, SubmitOutcome::Ignored(IgnoreReason::NoUserInput));
    assert_eq!(session.doc.text(), "ab");
}

#[test]
fn test_resync_restores_surface_from_model() {
    let mut session = Session::new("Hello", caret(5));
    session.surface.element(SurfaceNodeId(9), [0, 1], "SPAN");
    session.reconciler.notify_user_input_signal();
    // Diverged surface text that is never reported as a text change.
    session.ime_writes("Hellooo");

    // Nothing the policy can use: a bare structural change with no removal
    // and no matching tag.
    session.submit(&[MutationRecord::added(PARAGRAPH, [SurfaceNodeId(9)])]);

    assert_eq!(session.reconciler.generation(), 1);
    assert_eq!(
        session.surface.text_of(TEXT).map(|t| t.surface),
        Some("Hello".to_string())
    );
}
