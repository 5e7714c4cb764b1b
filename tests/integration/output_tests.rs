use super::common::write_mp3;
use mp3prune::cli::OutputFormat;
use mp3prune::duplicates::{DedupeConfig, Deduplicator, GroupingStrategy};
use mp3prune::error::ExitCode;
use mp3prune::{run_with_writer, RunSettings};
use tempfile::tempdir;

fn run(settings: &RunSettings) -> (ExitCode, String) {
    let dedup = Deduplicator::new(settings.dedupe.clone());
    let mut out = Vec::new();
    let code = run_with_writer(settings, &dedup, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_text_lists_saved_paths_sorted() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("Best Of");
    std::fs::create_dir(&album).unwrap();
    write_mp3(&album, "03 C.mp3", b"c", 1_000);
    write_mp3(&album, "01 A.mp3", b"a", 3_000);
    write_mp3(&album, "02 B.mp3", b"b", 2_000);

    let settings = RunSettings {
        paths: vec![album.clone()],
        dedupe: DedupeConfig::default(),
        output: OutputFormat::Text,
    };
    let (code, text) = run(&settings);

    let canonical = album.canonicalize().unwrap();
    let expected = format!(
        "[Best Of]\n{}\n{}\n{}\n\n",
        canonical.join("01 A.mp3").display(),
        canonical.join("02 B.mp3").display(),
        canonical.join("03 C.mp3").display()
    );
    assert_eq!(code, ExitCode::Success);
    assert_eq!(text, expected);
}

#[test]
fn test_text_empty_directory() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("Empty");
    std::fs::create_dir(&empty).unwrap();

    let settings = RunSettings {
        paths: vec![empty],
        dedupe: DedupeConfig::default(),
        output: OutputFormat::Text,
    };
    let (_, text) = run(&settings);

    assert_eq!(text, "[Empty]\n\n");
}

#[test]
fn test_json_output() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "01 A.mp3", b"a", 1_000);
    write_mp3(dir.path(), "01 B.mp3", b"b", 2_000);
    let not_dir = write_mp3(dir.path(), "loose.txt", b"x", 0);

    let settings = RunSettings {
        paths: vec![dir.path().to_path_buf(), not_dir],
        dedupe: DedupeConfig::default()
            .with_strategy(GroupingStrategy::TrackNumber)
            .with_dry_run(true),
        output: OutputFormat::Json,
    };
    let (code, json) = run(&settings);
    assert_eq!(code, ExitCode::Success);

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let results = parsed["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["status"], "directory");
    assert_eq!(results[0]["strategy"], "track-number");
    assert_eq!(results[0]["dry_run"], true);
    assert_eq!(results[0]["saved"].as_array().unwrap().len(), 1);
    assert_eq!(results[0]["removed"].as_array().unwrap().len(), 1);
    assert_eq!(results[1]["status"], "skipped");
    assert_eq!(parsed["summary"]["exit_code_name"], "MP3000");

    assert!(dir.path().join("01 B.mp3").exists());
}
