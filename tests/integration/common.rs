use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `content` to `dir/name` and set its mtime to `secs` past the epoch.
pub fn write_mp3(dir: &Path, name: &str, content: &[u8], secs: i64) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(secs, 0)).unwrap();
    path
}

/// Sorted file names left in `dir`.
pub fn remaining(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
