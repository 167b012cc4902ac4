// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Loads `<project>/.sprint.yml`. Absence is not an error: every section
//! of [`SprintConfig`] defaults to an empty/trivial configuration.

use crate::error::{DaemonError, DaemonResult};
use sprintdeck_core::SprintConfig;
use std::path::Path;

const CONFIG_FILE_NAME: &str = ".sprint.yml";

pub fn load(project_root: &Path) -> DaemonResult<SprintConfig> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(SprintConfig::default());
    }
    let bytes = std::fs::read(&path)?;
    serde_yaml::from_slice(&bytes).map_err(|err| DaemonError::Config(format!("{}: {err}", path.display())))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
