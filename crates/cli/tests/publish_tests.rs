//! Asset publishing tests

use console_cli::config::BuildConfig;
use console_cli::publish::{PublishError, publish};

fn build_output() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/index.js"), "0123456789").unwrap();
    dir
}

#[test]
fn test_publish_replaces_previous_build() {
    let source = build_output();
    let backend = tempfile::tempdir().unwrap();
    let out_dir = backend.path().join("static/dist");
    std::fs::create_dir_all(out_dir.join("old")).unwrap();
    std::fs::write(out_dir.join("stale.js"), "stale").unwrap();

    let report = publish(
        source.path(),
        &BuildConfig {
            out_dir: out_dir.clone(),
            empty_out_dir: true,
        },
    )
    .unwrap();

    assert_eq!(report.files, 2);
    assert_eq!(report.bytes, 23);
    assert_eq!(report.removed, 2);
    assert!(out_dir.join("index.html").is_file());
    assert!(out_dir.join("assets/index.js").is_file());
    assert!(!out_dir.join("stale.js").exists());
    assert!(!out_dir.join("old").exists());
}

#[test]
fn test_publish_can_keep_existing_files() {
    let source = build_output();
    let out = tempfile::tempdir().unwrap();
    std::fs::write(out.path().join("keep.txt"), "keep").unwrap();

    let report = publish(
        source.path(),
        &BuildConfig {
            out_dir: out.path().to_path_buf(),
            empty_out_dir: false,
        },
    )
    .unwrap();

    assert_eq!(report.removed, 0);
    assert!(out.path().join("keep.txt").is_file());
    assert!(out.path().join("index.html").is_file());
}

#[test]
fn test_missing_source() {
    let out = tempfile::tempdir().unwrap();
    let err = publish(
        &out.path().join("dist"),
        &BuildConfig {
            out_dir: out.path().join("public"),
            empty_out_dir: true,
        },
    )
    .unwrap_err();
    assert!(matches!(err, PublishError::MissingSource(_)));
}

#[test]
fn test_output_inside_source_is_rejected() {
    let source = build_output();
    let err = publish(
        source.path(),
        &BuildConfig {
            out_dir: source.path().join("nested"),
            empty_out_dir: true,
        },
    )
    .unwrap_err();
    assert!(matches!(err, PublishError::Overlap { .. }));
    // Nothing was deleted
    assert!(source.path().join("index.html").is_file());
}
