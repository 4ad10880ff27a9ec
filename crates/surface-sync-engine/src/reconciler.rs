//! Host entry point tying the gate, classifier, policy and resync together.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::classify;
use crate::gate::{FrameHandle, FrameScheduler, UserInputGate};
use crate::host::{DocumentModel, SurfaceResolver};
use crate::line_break::is_line_break_mutation;
use crate::mutation::MutationRecord;
use crate::policy::{EditCommand, Rule, decide};
use crate::resync::ResyncFallback;
use crate::types::SurfaceNodeId;

/// Engine options supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Read-only editors never take over paste handling.
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("editor root node is not present")]
    MissingRoot,
}

/// Why a batch was dropped without touching the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyBatch,
    NoUserInput,
}

/// What one reconciliation pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub rule: Rule,
    /// Commands the model accepted, in order.
    pub applied: Vec<EditCommand>,
    /// Whether the model rejected a command, cutting the pass short.
    pub failed: bool,
    pub resynced: bool,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    Reconciled(PassReport),
}

impl SubmitOutcome {
    pub fn report(&self) -> Option<&PassReport> {
        match self {
            SubmitOutcome::Reconciled(report) => Some(report),
            SubmitOutcome::Ignored(_) => None,
        }
    }
}

/// Reconciles surface mutation batches into the document model.
///
/// Passes are synchronous and never interleave: `submit` takes `&mut self`
/// and runs classification, policy, edits and resync to completion.
#[derive(Debug)]
pub struct Reconciler<S> {
    root: SurfaceNodeId,
    options: Options,
    gate: UserInputGate<S>,
    resync: ResyncFallback,
}

impl<S: FrameScheduler> Reconciler<S> {
    /// Attaches to the surface rooted at `root`.
    pub fn attach(
        root: Option<SurfaceNodeId>,
        scheduler: S,
        options: Options,
    ) -> Result<Self, AttachError> {
        let root = root.ok_or(AttachError::MissingRoot)?;
        log::debug!("attached to surface root {root:?} with {options:?}");
        Ok(Self {
            root,
            options,
            gate: UserInputGate::new(scheduler),
            resync: ResyncFallback::new(),
        })
    }

    /// The host saw a pre-edit signal (e.g. `beforeinput`).
    pub fn notify_user_input_signal(&mut self) {
        self.gate.mark_user_input();
    }

    /// The host's frame clock fired `handle`.
    pub fn frame_elapsed(&mut self, handle: FrameHandle) {
        self.gate.frame_elapsed(handle);
    }

    /// Reconciles one batch of mutations the surface already applied.
    pub fn submit<M, R>(
        &mut self,
        model: &mut M,
        resolver: &R,
        batch: &[MutationRecord],
    ) -> SubmitOutcome
    where
        M: DocumentModel + ?Sized,
        R: SurfaceResolver + ?Sized,
    {
        if batch.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyBatch);
        }
        if !self.gate.consume_user_input() {
            log::debug!("ignoring {} mutation(s) without user input", batch.len());
            return SubmitOutcome::Ignored(IgnoreReason::NoUserInput);
        }

        let selection = model.selection();
        let classified = classify(batch, resolver);
        let line_break = is_line_break_mutation(&*model, resolver, &classified.added_nodes);
        let decision = decide(&classified, selection.as_ref(), line_break);
        log::debug!(
            "batch of {} record(s) resolved by {:?} with {} command(s)",
            batch.len(),
            decision.rule,
            decision.commands.len()
        );

        let mut applied = Vec::with_capacity(decision.commands.len());
        let mut failed = false;
        for command in decision.commands {
            if let Err(e) = model.apply(&command) {
                log::warn!("{} failed, falling back to resync: {e}", command.name());
                failed = true;
                break;
            }
            applied.push(command);
        }

        let resynced = decision.resync || failed;
        if resynced {
            self.resync.force_resync();
        }

        SubmitOutcome::Reconciled(PassReport {
            rule: decision.rule,
            applied,
            failed,
            resynced,
            generation: self.resync.generation(),
        })
    }

    /// Current surface generation; the host remounts when it changes.
    pub fn generation(&self) -> u64 {
        self.resync.generation()
    }

    /// Whether a native before-input event should be kept away from the
    /// framework's own input handling.
    pub fn suppresses_native_input(&self, target: SurfaceNodeId) -> bool {
        target == self.root
    }

    /// Whether the engine takes over a paste aimed at `target`.
    pub fn intercepts_paste(&self, target_editable: bool) -> bool {
        !self.options.read_only && target_editable
    }

    pub fn gate(&self) -> &UserInputGate<S> {
        &self.gate
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.gate.scheduler_mut()
    }
}
