// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use tempfile::tempdir;

#[test]
fn data_root_is_nested_under_project() {
    let paths = Paths::for_project("/srv/project");
    assert_eq!(paths.data_root(), Path::new("/srv/project/.teamclaude"));
    assert_eq!(paths.state_file(), Path::new("/srv/project/.teamclaude/state.json"));
}

#[test]
fn ensure_data_root_creates_dir_and_seeds_gitignore_once() {
    let dir = tempdir().unwrap();
    let paths = Paths::for_project(dir.path());
    paths.ensure_data_root().unwrap();
    assert!(paths.data_root().is_dir());
    let gitignore = paths.data_root().join(".gitignore");
    assert!(gitignore.exists());

    fs::write(&gitignore, "custom\n").unwrap();
    paths.ensure_data_root().unwrap();
    assert_eq!(fs::read_to_string(&gitignore).unwrap(), "custom\n");
}

#[test]
fn list_sprint_history_ids_empty_when_no_history_dir() {
    let dir = tempdir().unwrap();
    let paths = Paths::for_project(dir.path());
    assert!(paths.list_sprint_history_ids().unwrap().is_empty());
}

#[test]
fn list_sprint_history_ids_sorted() {
    let dir = tempdir().unwrap();
    let paths = Paths::for_project(dir.path());
    fs::create_dir_all(paths.sprint_history_dir("sprint-b")).unwrap();
    fs::create_dir_all(paths.sprint_history_dir("sprint-a")).unwrap();
    assert_eq!(paths.list_sprint_history_ids().unwrap(), vec!["sprint-a", "sprint-b"]);
}
