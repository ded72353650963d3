//! Property tests for batch coalescing in the dispatch loop.

use std::fs;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use watchrun::infrastructure::{RecordingInvoker, ScriptedEvent, ScriptedNotifier};
use watchrun::{register_all, CommandSpec, DispatchLoop, LoopExit, WatchEvent};

const FILES: usize = 4;

/// One scripted batch: indexes of modified files, optionally ending in an interrupt
fn batch() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..FILES, 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Each batch with at least one change causes exactly one invocation,
    /// and each changed file is reported once per batch.
    #[test]
    fn property_one_invocation_per_batch(batches in proptest::collection::vec(batch(), 0..8)) {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<String> = (0..FILES)
            .map(|i| {
                let path = dir.path().join(format!("f{i}.txt"));
                fs::write(&path, "x").unwrap();
                path.display().to_string()
            })
            .collect();

        let mut notifier = ScriptedNotifier::new();
        let targets = register_all(&mut notifier, &paths, FILES).unwrap();
        for indexes in &batches {
            notifier.push_batch(indexes.iter().map(|&i| ScriptedEvent::modify(&paths[i])));
        }

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let mut dispatch = DispatchLoop::new(
            targets,
            CommandSpec::new("true", Vec::<String>::new()),
            notifier,
            RecordingInvoker::new(),
        );

        let exit = dispatch.run(None, move |event| sink.lock().unwrap().push(event)).unwrap();

        prop_assert_eq!(exit, LoopExit::Interrupted);
        let expected_runs = batches.iter().filter(|b| !b.is_empty()).count();
        prop_assert_eq!(dispatch.invoker().call_count(), expected_runs);

        let expected_changes: usize = batches
            .iter()
            .map(|b| {
                let mut distinct = b.clone();
                distinct.sort_unstable();
                distinct.dedup();
                distinct.len()
            })
            .sum();
        let reported = events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, WatchEvent::FileChanged { .. }))
            .count();
        prop_assert_eq!(reported, expected_changes);
    }

    /// PROPERTY: An interrupt anywhere in a batch suppresses that batch's invocation.
    #[test]
    fn property_interrupt_wins(indexes in batch(), position in 0usize..6) {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<String> = (0..FILES)
            .map(|i| {
                let path = dir.path().join(format!("f{i}.txt"));
                fs::write(&path, "x").unwrap();
                path.display().to_string()
            })
            .collect();

        let mut notifier = ScriptedNotifier::new();
        let targets = register_all(&mut notifier, &paths, FILES).unwrap();
        let mut scripted: Vec<ScriptedEvent> =
            indexes.iter().map(|&i| ScriptedEvent::modify(&paths[i])).collect();
        scripted.insert(position.min(scripted.len()), ScriptedEvent::interrupt());
        notifier.push_batch(scripted);

        let mut dispatch = DispatchLoop::new(
            targets,
            CommandSpec::new("true", Vec::<String>::new()),
            notifier,
            RecordingInvoker::new(),
        );

        let exit = dispatch.run(None, |_| {}).unwrap();

        prop_assert_eq!(exit, LoopExit::Interrupted);
        prop_assert_eq!(dispatch.invoker().call_count(), 0);
        prop_assert_eq!(dispatch.invoker().shutdowns(), 1);
    }
}
