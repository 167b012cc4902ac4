// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Pulls the team name or recipient name back out of a classified
//! `WatchEvent`'s path (§6's on-disk contracts). `sprintdeck_watch`
//! classifies *which* handler a path belongs to but deliberately does no
//! further parsing; that last step happens here, right before the
//! reactor hands the file off.

use std::path::Path;

/// `<root>/teams/<teamName>/config.json` -> `teamName`.
pub fn team_name_from_config_path(path: &Path) -> Option<String> {
    let team_dir = path.parent()?;
    if team_dir.parent()?.file_name()? != "teams" {
        return None;
    }
    Some(team_dir.file_name()?.to_str()?.to_string())
}

/// `<root>/teams/<teamName>/inboxes/<recipientName>.json` -> `recipientName`.
pub fn recipient_from_inbox_path(path: &Path) -> Option<String> {
    let inboxes_dir = path.parent()?;
    if inboxes_dir.file_name()? != "inboxes" {
        return None;
    }
    Some(path.file_stem()?.to_str()?.to_string())
}

/// `<root>/tasks/<teamName>/*.json` -> `teamName`.
pub fn team_name_from_task_path(path: &Path) -> Option<String> {
    let team_dir = path.parent()?;
    if team_dir.parent()?.file_name()? != "tasks" {
        return None;
    }
    Some(team_dir.file_name()?.to_str()?.to_string())
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod tests;
