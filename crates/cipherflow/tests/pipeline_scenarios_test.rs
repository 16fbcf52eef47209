//! End-to-end pipeline scenarios through the public API.
//!
//! Every test runs on a paused Tokio clock so delays are exact and instant.

use std::{cell::RefCell, path::PathBuf, rc::Rc, time::Duration};

use tokio::{task::LocalSet, time::Instant};

use cipherflow::{
    Credentials, FetchError, JsonFileSource, Orchestrator, PipelineKind, RunOutcome,
    SimulationSource, SvgSurface,
    config::AppConfig,
    source::parse_response,
    surface::{Surface, SvgPrimitive, Transition},
};

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn orchestrator() -> Orchestrator<SvgSurface> {
    Orchestrator::new(
        &AppConfig::default(),
        Rc::new(RefCell::new(SvgSurface::default())),
        Rc::new(RefCell::new(SvgSurface::default())),
    )
}

fn credentials() -> Credentials {
    Credentials::new("alice", "hunter2")
}

fn count_elements(surface: &SvgSurface) -> (usize, usize) {
    let shapes = surface
        .elements()
        .iter()
        .filter(|element| matches!(element, SvgPrimitive::Shape { .. }))
        .count();
    let edges = surface
        .elements()
        .iter()
        .filter(|element| matches!(element, SvgPrimitive::Edge { .. }))
        .count();
    (shapes, edges)
}

fn trace(surface: &SvgSurface) -> Vec<(usize, Transition)> {
    surface
        .journal()
        .iter()
        .map(|entry| (entry.element().index(), entry.transition()))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_typical_two_step_pipeline() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let mut orchestrator = orchestrator();
            let source = JsonFileSource::new(demos_dir().join("empty_pqc.json"));
            let start = Instant::now();

            let handles = orchestrator.submit(&source, &credentials()).await.unwrap();
            let (classical, _) = handles.join().await.unwrap();

            assert_eq!(classical, RunOutcome::Completed { steps: 2 });
            let elapsed = start.elapsed();
            assert!(
                elapsed >= Duration::from_millis(3200) && elapsed < Duration::from_millis(3210),
                "unexpected duration {elapsed:?}"
            );

            let surface = orchestrator.surface(PipelineKind::Classical).borrow();
            assert_eq!(count_elements(&surface), (2, 1));
            assert_eq!(
                trace(&surface),
                vec![
                    (0, Transition::Activate),
                    (2, Transition::Reveal),
                    (6, Transition::Draw),
                    (3, Transition::Activate),
                    (5, Transition::Reveal),
                ]
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_empty_pipeline_completes_without_delay() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let mut orchestrator = orchestrator();
            let source = JsonFileSource::new(demos_dir().join("empty_pqc.json"));

            let handles = orchestrator.submit(&source, &credentials()).await.unwrap();
            let start = Instant::now();
            let (_, pqc) = handles.join().await.unwrap();

            assert_eq!(pqc, RunOutcome::Completed { steps: 0 });
            assert!(orchestrator.surface(PipelineKind::Pqc).borrow().is_empty());
            // Joining also waited for the classical run
            assert!(start.elapsed() >= Duration::from_millis(3200));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_malformed_result_builds_nothing() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let mut orchestrator = orchestrator();
            let source = JsonFileSource::new(demos_dir().join("errors/missing_pqc_algo.json"));

            let err = orchestrator
                .submit(&source, &credentials())
                .await
                .unwrap_err();

            assert!(matches!(err, FetchError::Malformed(_)), "{err:?}");
            assert!(!orchestrator.presentation().overlay_visible());
            assert!(orchestrator.presentation().notice().is_some());
            assert!(orchestrator.presentation().table().is_none());
            for kind in PipelineKind::ALL {
                assert!(orchestrator.surface(kind).borrow().is_empty());
            }
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_rejected_and_unreadable_responses_are_failures() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let mut orchestrator = orchestrator();

            for name in ["errors/rejected.json", "errors/not_json.json"] {
                let source = JsonFileSource::new(demos_dir().join(name));
                let err = orchestrator
                    .submit(&source, &credentials())
                    .await
                    .unwrap_err();
                assert!(matches!(err, FetchError::Failure(_)), "{name}: {err:?}");
            }

            let source = JsonFileSource::new(demos_dir().join("handshake.json"));
            let err = orchestrator
                .submit(&source, &Credentials::new("", ""))
                .await
                .unwrap_err();
            assert!(matches!(err, FetchError::MissingCredentials));
            assert!(orchestrator.last_result().is_none());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_back_to_back_results_leave_only_second_run() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let mut orchestrator = orchestrator();
            let body = std::fs::read_to_string(demos_dir().join("handshake.json")).unwrap();
            let first = parse_response(&body).unwrap();
            let second = parse_response(&body).unwrap();

            // No await in between: the first runs never get polled before
            // being superseded
            let first = orchestrator.on_result(first);
            let second = orchestrator.on_result(second);

            let (c1, p1) = first.join().await.unwrap();
            let (c2, p2) = second.join().await.unwrap();

            assert_eq!(c1, RunOutcome::Superseded { step: 0 });
            assert_eq!(p1, RunOutcome::Superseded { step: 0 });
            assert_eq!(c2, RunOutcome::Completed { steps: 7 });
            assert_eq!(p2, RunOutcome::Completed { steps: 7 });

            let surface = orchestrator.surface(PipelineKind::Pqc).borrow();
            assert_eq!(surface.epoch(), 2);
            // Each element transitioned at most once
            let mut seen = trace(&surface);
            let total = seen.len();
            seen.sort_by_key(|(index, _)| *index);
            seen.dedup();
            assert_eq!(seen.len(), total);
            assert_eq!(total, 7 * 2 + 6);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_result_arriving_mid_animation_supersedes_old_run() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let mut orchestrator = orchestrator();
            let source = JsonFileSource::new(demos_dir().join("handshake.json"));

            let first = orchestrator.submit(&source, &credentials()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(2500)).await;
            let second = orchestrator.submit(&source, &credentials()).await.unwrap();

            let (old, _) = first.join().await.unwrap();
            let (new, _) = second.join().await.unwrap();

            assert!(matches!(old, RunOutcome::Superseded { .. }), "{old:?}");
            assert_eq!(new, RunOutcome::Completed { steps: 7 });

            let surface = orchestrator.surface(PipelineKind::Classical).borrow();
            assert_eq!(trace(&surface).len(), 7 * 2 + 6);
            assert!(
                surface
                    .elements()
                    .iter()
                    .filter(|element| matches!(element, SvgPrimitive::Shape { .. }))
                    .all(SvgPrimitive::is_lit)
            );
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_replay_reproduces_counts_and_order() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let mut orchestrator = orchestrator();
            let source = JsonFileSource::new(demos_dir().join("handshake.json"));

            orchestrator
                .submit(&source, &credentials())
                .await
                .unwrap()
                .join()
                .await
                .unwrap();
            let original: Vec<_> = PipelineKind::ALL
                .iter()
                .map(|&kind| {
                    let surface = orchestrator.surface(kind).borrow();
                    (count_elements(&surface), trace(&surface))
                })
                .collect();

            let (classical, pqc) = orchestrator.replay().unwrap().join().await.unwrap();
            assert!(classical.is_completed() && pqc.is_completed());

            let replayed: Vec<_> = PipelineKind::ALL
                .iter()
                .map(|&kind| {
                    let surface = orchestrator.surface(kind).borrow();
                    (count_elements(&surface), trace(&surface))
                })
                .collect();

            assert_eq!(original, replayed);
            assert_eq!(original[0].0, (7, 6));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_custom_source_drives_orchestrator() {
    struct Recorded(&'static str);

    impl SimulationSource for Recorded {
        async fn simulate(
            &self,
            credentials: &Credentials,
        ) -> Result<cipherflow::SimulationResult, FetchError> {
            credentials.validate()?;
            parse_response(self.0)
        }
    }

    let local = LocalSet::new();
    local
        .run_until(async {
            let mut orchestrator = orchestrator();
            let source = Recorded(
                r#"{
                    "classical": [{"label": "KeyGen", "data": "P-256"}],
                    "pqc": [{"label": "KeyGen", "data": "ML-KEM-768"}],
                    "comparison": {
                        "classical": {"algo": "ECDH", "pk_size": "65 Bytes", "ct_size": "-", "quantum_safe": "NO"},
                        "pqc": {"algo": "ML-KEM", "pk_size": "1184 Bytes", "ct_size": "1088 Bytes", "quantum_safe": "YES"}
                    }
                }"#,
            );

            let (classical, pqc) = orchestrator
                .submit(&source, &credentials())
                .await
                .unwrap()
                .join()
                .await
                .unwrap();

            assert_eq!(classical, RunOutcome::Completed { steps: 1 });
            assert_eq!(pqc, RunOutcome::Completed { steps: 1 });
            let table = orchestrator.presentation().table().unwrap();
            assert_eq!(table.rows()[0].pqc(), "ML-KEM");
        })
        .await;
}
