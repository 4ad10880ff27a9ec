//! Drives a [`Scenario`] through the reconciler the way a host would.

use anyhow::{Context, Result};
use surface_sync_engine::memory::{MemoryDocument, ScriptedSurface};
use surface_sync_engine::{ManualFrames, Options, Reconciler, SubmitOutcome};

use crate::scenario::{Scenario, Step};

/// Final state after all steps ran.
#[derive(Debug)]
pub struct ReplayResult {
    pub document: MemoryDocument,
    pub generation: u64,
    pub outcomes: Vec<SubmitOutcome>,
}

pub fn replay(scenario: &Scenario, options: Options) -> Result<ReplayResult> {
    let mut document = scenario.document();
    let mut surface: ScriptedSurface = scenario.surface(&document);
    let mut reconciler = Reconciler::attach(scenario.root, ManualFrames::new(), options)
        .context("Cannot attach to the scenario's surface")?;
    let mut outcomes = Vec::new();

    for (index, step) in scenario.steps.iter().enumerate() {
        match step {
            Step::Signal => reconciler.notify_user_input_signal(),
            Step::Frame => {
                for handle in reconciler.scheduler_mut().tick() {
                    reconciler.frame_elapsed(handle);
                }
            }
            Step::Type { node, text } => {
                surface
                    .edit_text(*node, text.clone())
                    .with_context(|| format!("Step {index}: {node:?} is not a text node"))?;
            }
            Step::Mutations { records } => {
                surface.sync_model(&document);
                let outcome = reconciler.submit(&mut document, &surface, records);
                log::info!("step {index}: {outcome:?}");
                if outcome.report().is_some_and(|report| report.resynced) {
                    surface.remount(&document);
                }
                outcomes.push(outcome);
            }
        }
    }

    Ok(ReplayResult {
        document,
        generation: reconciler.generation(),
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use surface_sync_engine::{IgnoreReason, Rule};

    fn scenario(steps: &str) -> Scenario {
        let content = format!(
            r#"
root = 1

[[blocks]]
tag = "p"
leaves = ["Hello world"]

[selection]
anchor = {{ path = [0, 0], offset = 5 }}
focus = {{ path = [0, 0], offset = 5 }}

[[surface]]
id = 2
path = [0]
tag = "P"

[[surface]]
id = 3
path = [0, 0]
text = "Hello world"

[[surface]]
id = 4
path = [1]
tag = "P"

{steps}
"#
        );
        Scenario::parse(&content).unwrap()
    }

    #[test]
    fn test_replay_typing_session() {
        let scenario = scenario(
            r#"
[[steps]]
action = "signal"

[[steps]]
action = "type"
node = 3
text = "Hello, world"

[[steps]]
action = "mutations"
records = [{ kind = "text_change", target = 3, previous_value = "Hello world" }]
"#,
        );

        let result = replay(&scenario, Options::default()).unwrap();

        assert_eq!(result.document.text(), "Hello, world");
        assert_eq!(result.generation, 0);
    }

    #[test]
    fn test_replay_line_break_then_unsignalled_echo() {
        let scenario = scenario(
            r#"
[[steps]]
action = "signal"

[[steps]]
action = "mutations"
records = [{ kind = "structural_change", target = 1, added_nodes = [4] }]

[[steps]]
action = "mutations"
records = [{ kind = "structural_change", target = 1, added_nodes = [4] }]
"#,
        );

        let result = replay(&scenario, Options::default()).unwrap();

        assert_eq!(result.document.text(), "Hello\n world");
        assert_eq!(result.generation, 1);
        assert_eq!(
            result.outcomes[0].report().map(|report| report.rule),
            Some(Rule::InsertBreak)
        );
        assert_eq!(
            result.outcomes[1],
            SubmitOutcome::Ignored(IgnoreReason::NoUserInput)
        );
    }

    #[test]
    fn test_replay_frame_expires_signal() {
        let scenario = scenario(
            r#"
[[steps]]
action = "signal"

[[steps]]
action = "frame"

[[steps]]
action = "type"
node = 3
text = "Hello"

[[steps]]
action = "mutations"
records = [{ kind = "text_change", target = 3, previous_value = "Hello world" }]
"#,
        );

        let result = replay(&scenario, Options::default()).unwrap();

        assert_eq!(result.document.text(), "Hello world");
    }

    #[test]
    fn test_bundled_ime_session() {
        let path = format!("{}/scenarios/ime_session.toml", env!("CARGO_MANIFEST_DIR"));
        let scenario = Scenario::load(std::path::Path::new(&path)).unwrap();

        let result = replay(&scenario, Options::default()).unwrap();

        assert_eq!(result.document.text(), "Hello world\n");
        assert_eq!(result.generation, 1);
        let rules: Vec<_> = result
            .outcomes
            .iter()
            .map(|outcome| outcome.report().map(|report| report.rule))
            .collect();
        assert_eq!(rules, vec![Some(Rule::ReplaceText), Some(Rule::InsertBreak), None]);
    }

    #[test]
    fn test_replay_without_root_fails() {
        let scenario = Scenario::parse("blocks = []\n").unwrap();

        let err = replay(&scenario, Options::default()).unwrap_err();

        assert!(format!("{err:#}").contains("editor root node is not present"));
    }

    #[test]
    fn test_replay_typing_into_element_fails() {
        let scenario = scenario(
            r#"
[[steps]]
action = "type"
node = 2
text = "nope"
"#,
        );

        assert!(replay(&scenario, Options::default()).is_err());
    }
}
