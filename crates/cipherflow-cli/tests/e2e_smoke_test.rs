use std::{fs, path::PathBuf};

use tempfile::tempdir;

use cipherflow::{CipherflowError, FetchError};
use cipherflow_cli::{Args, run};

/// Recorded simulation results live at the workspace root
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: PathBuf, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        username: "alice".to_string(),
        password: "hunter2".to_string(),
        frames: false,
        instant: true,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_results() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let results = collect_json_files(demos_dir());

    assert!(!results.is_empty(), "No simulation results found in demos/");

    let mut failed = Vec::new();

    for path in &results {
        let output = temp_dir.path().join(path.file_stem().unwrap());
        if let Err(e) = run(&args(path.clone(), output.clone())) {
            failed.push((path.clone(), e));
            continue;
        }

        for name in ["classical.svg", "pqc.svg"] {
            let svg = fs::read_to_string(output.join(name)).expect("SVG should be written");
            assert!(svg.contains("<svg"), "{}: {name} is not SVG", path.display());
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid results that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid result(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_results() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let results = collect_json_files(demos_dir().join("errors"));

    assert!(
        !results.is_empty(),
        "No error results found in demos/errors/"
    );

    for path in &results {
        let output = temp_dir.path().join(path.file_stem().unwrap());
        let err = run(&args(path.clone(), output.clone()))
            .expect_err(&format!("{} should fail", path.display()));

        assert!(err.is_fetch(), "{}: unexpected error {err}", path.display());
        // Nothing is exported for a failed fetch
        assert!(!output.exists(), "{} produced output", path.display());
    }
}

#[test]
fn e2e_final_svg_shows_completed_run() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out");

    run(&args(demos_dir().join("handshake.json"), output.clone())).unwrap();

    let svg = fs::read_to_string(output.join("pqc.svg")).unwrap();
    assert_eq!(svg.matches("node active").count(), 7);
    assert_eq!(svg.matches("data-label fade-in").count(), 7);
    assert_eq!(svg.matches("edge animate").count(), 6);
    assert!(svg.contains("Encapsulate shared secret"));
}

#[test]
fn e2e_frames_are_exported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("frames");
    let mut args = args(demos_dir().join("empty_pqc.json"), output.clone());
    args.frames = true;

    run(&args).unwrap();

    // Two nodes and one edge: five transitions plus the initial frame
    for frame in 0..=5 {
        assert!(output.join(format!("classical-frame-{frame:03}.svg")).exists());
    }
    assert!(!output.join("classical-frame-006.svg").exists());
    assert!(output.join("pqc-frame-000.svg").exists());
    assert!(!output.join("pqc-frame-001.svg").exists());
}

#[test]
fn e2e_missing_credentials_are_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = args(demos_dir().join("handshake.json"), temp_dir.path().join("out"));
    args.password = String::new();

    let err = run(&args).unwrap_err();

    assert!(matches!(
        err,
        CipherflowError::Fetch(FetchError::MissingCredentials)
    ));
}

#[test]
fn e2e_custom_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[style]\nbackground_color = \"white\"\npqc_color = \"#8e44ad\"\n",
    )
    .unwrap();

    let output = temp_dir.path().join("out");
    let mut args = args(demos_dir().join("handshake.json"), output.clone());
    args.config = Some(config_path.to_string_lossy().to_string());

    run(&args).unwrap();

    let svg = fs::read_to_string(output.join("pqc.svg")).unwrap();
    assert!(svg.contains("data-layer=\"background\""));
}
