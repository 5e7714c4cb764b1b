use super::common::{remaining, write_mp3};
use mp3prune::duplicates::{DedupeConfig, Deduplicator, GroupingStrategy};
use std::fs;
use tempfile::tempdir;

fn dedup(strategy: GroupingStrategy) -> Deduplicator {
    Deduplicator::new(DedupeConfig::default().with_strategy(strategy))
}

#[test]
fn test_identical_content_keeps_earliest() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "b.mp3", b"same audio", 2_000);
    write_mp3(dir.path(), "a.mp3", b"same audio", 3_000);
    write_mp3(dir.path(), "c.mp3", b"same audio", 1_000);

    let report = dedup(GroupingStrategy::ContentHash).run(dir.path()).unwrap();

    assert_eq!(remaining(dir.path()), vec!["c.mp3"]);
    assert_eq!(report.saved.len(), 1);
    assert_eq!(report.removed.len(), 2);
    assert!(!report.has_errors());
}

#[test]
fn test_distinct_content_untouched() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "one.mp3", b"one", 1_000);
    write_mp3(dir.path(), "two.mp3", b"two", 2_000);
    write_mp3(dir.path(), "three.mp3", b"three", 3_000);

    let report = dedup(GroupingStrategy::ContentHash).run(dir.path()).unwrap();

    assert_eq!(remaining(dir.path()), vec!["one.mp3", "three.mp3", "two.mp3"]);
    assert_eq!(report.saved.len(), 3);
    assert!(report.removed.is_empty());
}

#[test]
fn test_second_pass_is_noop() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "01 A.mp3", b"x", 1_000);
    write_mp3(dir.path(), "01 B.mp3", b"x", 2_000);
    write_mp3(dir.path(), "02 C.mp3", b"y", 3_000);

    let d = dedup(GroupingStrategy::ContentHash);
    let first = d.run(dir.path()).unwrap();
    let second = d.run(dir.path()).unwrap();

    assert_eq!(first.removed.len(), 1);
    assert!(second.removed.is_empty());
    assert_eq!(first.saved, second.saved);
}

#[test]
fn test_all_files_leaves_single_earliest() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "x.mp3", b"1", 5_000);
    write_mp3(dir.path(), "y.mp3", b"2", 4_000);
    write_mp3(dir.path(), "z.mp3", b"3", 6_000);

    let report = dedup(GroupingStrategy::AllFiles).run(dir.path()).unwrap();

    assert_eq!(remaining(dir.path()), vec!["y.mp3"]);
    assert_eq!(report.saved.len(), 1);
}

#[test]
fn test_track_number_grouping() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "01 Intro.mp3", b"a", 2_000);
    write_mp3(dir.path(), "01 Intro (copy).mp3", b"b", 1_000);
    write_mp3(dir.path(), "02 Song.mp3", b"c", 3_000);
    write_mp3(dir.path(), "Bonus.mp3", b"d", 3_000);

    dedup(GroupingStrategy::TrackNumber).run(dir.path()).unwrap();

    assert_eq!(
        remaining(dir.path()),
        vec!["01 Intro (copy).mp3", "02 Song.mp3", "Bonus.mp3"]
    );
}

#[test]
fn test_unknown_strategy_deletes_nothing() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "a.mp3", b"same", 1_000);
    write_mp3(dir.path(), "b.mp3", b"same", 2_000);

    let strategy = GroupingStrategy::from_name("fingerprint");
    assert_eq!(strategy, GroupingStrategy::Passthrough);

    let report = dedup(strategy).run(dir.path()).unwrap();

    assert_eq!(remaining(dir.path()), vec!["a.mp3", "b.mp3"]);
    assert_eq!(report.saved.len(), 2);
}

#[test]
fn test_equal_mtimes_keep_first_path() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "b.mp3", b"same", 1_000);
    write_mp3(dir.path(), "a.mp3", b"same", 1_000);

    dedup(GroupingStrategy::ContentHash).run(dir.path()).unwrap();

    assert_eq!(remaining(dir.path()), vec!["a.mp3"]);
}

#[test]
fn test_non_mp3_and_subdirectories_ignored() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "a.mp3", b"same", 1_000);
    write_mp3(dir.path(), "a.MP3", b"same", 500);
    write_mp3(dir.path(), "cover.jpg", b"same", 500);
    write_mp3(dir.path(), ".hidden.mp3", b"same", 500);
    let sub = dir.path().join("disc2");
    fs::create_dir(&sub).unwrap();
    write_mp3(&sub, "a.mp3", b"same", 100);

    let report = dedup(GroupingStrategy::AllFiles).run(dir.path()).unwrap();

    assert_eq!(report.saved.len(), 1);
    assert!(report.removed.is_empty());
    assert_eq!(
        remaining(dir.path()),
        vec![".hidden.mp3", "a.MP3", "a.mp3", "cover.jpg", "disc2"]
    );
    assert_eq!(remaining(&sub), vec!["a.mp3"]);
}

#[test]
fn test_dry_run_deletes_nothing() {
    let dir = tempdir().unwrap();
    write_mp3(dir.path(), "a.mp3", b"same", 1_000);
    write_mp3(dir.path(), "b.mp3", b"same", 2_000);

    let d = Deduplicator::new(DedupeConfig::default().with_dry_run(true));
    let report = d.run(dir.path()).unwrap();

    assert_eq!(remaining(dir.path()), vec!["a.mp3", "b.mp3"]);
    assert!(report.dry_run);
    assert_eq!(report.saved.len(), 1);
    assert_eq!(report.removed.len(), 1);
    assert_eq!(report.removed[0].size, 4);
}

#[test]
fn test_many_files_with_single_io_thread() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        let content = format!("track {}", i % 5);
        write_mp3(
            dir.path(),
            &format!("{i:02}.mp3"),
            content.as_bytes(),
            1_000 + i as i64,
        );
    }

    let d = Deduplicator::new(DedupeConfig::default().with_io_threads(1));
    let report = d.run(dir.path()).unwrap();

    assert_eq!(report.saved.len(), 5);
    assert_eq!(report.removed.len(), 15);
    assert_eq!(
        remaining(dir.path()),
        vec!["00.mp3", "01.mp3", "02.mp3", "03.mp3", "04.mp3"]
    );
}
