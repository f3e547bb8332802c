use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use classgram::model::RelationshipKind;
use classgram_cli::{Args, run};

fn demos_dir() -> PathBuf {
    // Demos live at the workspace root, two levels above this crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory, sorted
fn collect_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
                })
                .collect()
        })
        .unwrap_or_default();

    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        hide: Vec::new(),
        zoom: 1.0,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_json_files(&demos_dir());

    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();

    for demo in &demos {
        let output = temp_dir
            .path()
            .join(format!("{}.svg", demo.file_stem().unwrap().to_string_lossy()));

        match run(&args_for(demo, &output)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output).unwrap();
                assert!(svg.starts_with("<svg"), "{} is not SVG", output.display());
            }
            Err(e) => failed.push((demo.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_json_files(&demos_dir().join("errors"));

    assert!(!demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo in &demos {
        let output = temp_dir.path().join(format!(
            "error_{}.svg",
            demo.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo, &output)).is_ok() {
            unexpectedly_succeeded.push(demo.clone());
        }
        assert!(!output.exists(), "{} was written", output.display());
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_hide_and_zoom() {
    let temp_dir = tempdir().unwrap();
    let input = demos_dir().join("shapes.json");

    let plain = temp_dir.path().join("plain.svg");
    run(&args_for(&input, &plain)).unwrap();
    let plain = fs::read_to_string(plain).unwrap();
    assert!(plain.contains("data-kind=\"inheritance\""));

    let filtered = temp_dir.path().join("filtered.svg");
    let mut args = args_for(&input, &filtered);
    args.hide = vec![RelationshipKind::Inheritance];
    args.zoom = 2.0;
    run(&args).unwrap();
    let filtered = fs::read_to_string(filtered).unwrap();

    assert!(!filtered.contains("data-kind=\"inheritance\""));
    assert!(filtered.contains("data-kind=\"implementation\""));
    assert_ne!(plain, filtered);
}

#[test]
fn e2e_explicit_config() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(
        &config,
        "[layout]\nengine = \"layered\"\n\n[style]\nbackground_color = \"white\"\n",
    )
    .unwrap();

    let output = temp_dir.path().join("layered.svg");
    let mut args = args_for(&demos_dir().join("library.json"), &output);
    args.config = Some(config.to_string_lossy().to_string());
    run(&args).unwrap();

    let svg = fs::read_to_string(output).unwrap();
    assert!(svg.contains("fill=\"white\""));
}

#[test]
fn e2e_invalid_config_and_zoom_fail() {
    let temp_dir = tempdir().unwrap();
    let input = demos_dir().join("minimal.json");

    let config = temp_dir.path().join("bad.toml");
    fs::write(&config, "[layout]\nspacing = -1.0\n").unwrap();
    let mut args = args_for(&input, &temp_dir.path().join("bad_config.svg"));
    args.config = Some(config.to_string_lossy().to_string());
    let err = run(&args).unwrap_err();
    assert!(err.to_string().contains("layout.spacing"));

    let mut args = args_for(&input, &temp_dir.path().join("bad_zoom.svg"));
    args.zoom = 0.0;
    assert!(run(&args).is_err());
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().unwrap();
    let args = args_for(
        &temp_dir.path().join("absent.json"),
        &temp_dir.path().join("absent.svg"),
    );

    let err = run(&args).unwrap_err();
    assert!(matches!(err, classgram::ClassgramError::Io(_)));
}
