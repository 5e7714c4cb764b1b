use super::common::{remaining, write_mp3};
use mp3prune::cli::OutputFormat;
use mp3prune::duplicates::{DedupeConfig, Deduplicator};
use mp3prune::error::ExitCode;
use mp3prune::output::PathReport;
use mp3prune::{normalize_inputs, process_path, run_with_writer, RunSettings};
use std::path::PathBuf;
use tempfile::tempdir;

fn settings(paths: Vec<PathBuf>) -> RunSettings {
    RunSettings {
        paths: normalize_inputs(paths),
        dedupe: DedupeConfig::default(),
        output: OutputFormat::Text,
    }
}

#[test]
fn test_directories_processed_independently() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    write_mp3(dir1.path(), "a.mp3", b"shared", 1_000);
    write_mp3(dir2.path(), "b.mp3", b"shared", 2_000);

    let settings = settings(vec![dir1.path().to_path_buf(), dir2.path().to_path_buf()]);
    let dedup = Deduplicator::new(settings.dedupe.clone());
    let mut out = Vec::new();
    let code = run_with_writer(&settings, &dedup, &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(remaining(dir1.path()), vec!["a.mp3"]);
    assert_eq!(remaining(dir2.path()), vec!["b.mp3"]);
}

#[test]
fn test_non_directory_skipped_alongside_directory() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("Album");
    std::fs::create_dir(&album).unwrap();
    write_mp3(&album, "a.mp3", b"same", 1_000);
    write_mp3(&album, "b.mp3", b"same", 2_000);
    let loose = write_mp3(dir.path(), "loose.mp3", b"same", 500);

    let settings = settings(vec![loose.clone(), album.clone()]);
    let dedup = Deduplicator::new(settings.dedupe.clone());
    let mut out = Vec::new();
    let code = run_with_writer(&settings, &dedup, &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(loose.exists());
    assert_eq!(remaining(&album), vec!["a.mp3"]);

    let text = String::from_utf8(out).unwrap();
    let saved = album.canonicalize().unwrap().join("a.mp3");
    assert_eq!(
        text,
        format!(
            "(Skipping {}: not a directory)\n\n[Album]\n{}\n\n",
            loose.display(),
            saved.display()
        )
    );
}

#[test]
fn test_missing_path_is_skipped() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone");

    let report = process_path(&Deduplicator::with_defaults(), &missing);

    assert_eq!(report, PathReport::Skipped { path: missing });
    assert!(!report.has_errors());
}

#[test]
fn test_default_input_is_current_directory() {
    let settings = settings(Vec::new());
    assert_eq!(settings.paths, vec![PathBuf::from(".")]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_gives_partial_success() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "a.mp3", b"ok", 1_000);
    std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("broken.mp3"))
        .unwrap();

    let settings = settings(vec![dir.path().to_path_buf()]);
    let dedup = Deduplicator::new(settings.dedupe.clone());
    let mut out = Vec::new();
    let code = run_with_writer(&settings, &dedup, &mut out).unwrap();

    assert_eq!(code, ExitCode::PartialSuccess);
    assert!(dir.path().join("a.mp3").exists());
}
