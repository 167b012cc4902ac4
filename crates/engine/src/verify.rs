// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Verification gate: invokes configured external check commands and
//! reports per-command pass/fail plus invocation-level failures
//! separately, so callers can apply the fail-open rule that only applies
//! to the per-task scope (§4.5). No commands configured is a trivial pass.

use async_trait::async_trait;
use sprintdeck_core::CheckResult;
use tokio::process::Command;

/// Result of running one gate's configured commands.
#[derive(Debug, Clone, Default)]
pub struct GateReport {
    pub checks: Vec<CheckResult>,
    /// Commands that failed to even spawn (tooling outage), distinct
    /// from a command that ran and exited non-zero.
    pub invocation_errors: Vec<String>,
}

impl GateReport {
    /// Per-task scope: an invocation error fails *open* (treated as a
    /// pass) to avoid livelock when the toolchain itself is broken.
    pub fn passed_fail_open(&self) -> bool {
        if !self.invocation_errors.is_empty() {
            return true;
        }
        self.checks.iter().all(|c| c.passed)
    }

    /// Cycle/sprint scope: any invocation error or failing check is a
    /// real failure — the caller raises an escalation rather than
    /// silently completing.
    pub fn passed_strict(&self) -> bool {
        self.invocation_errors.is_empty() && self.checks.iter().all(|c| c.passed)
    }
}

#[async_trait]
pub trait VerificationGate: Send + Sync {
    async fn run(&self, commands: &[String]) -> GateReport;
}

/// Runs each command through `sh -c`, capturing combined stdout/stderr.
pub struct ProcessVerificationGate;

#[async_trait]
impl VerificationGate for ProcessVerificationGate {
    async fn run(&self, commands: &[String]) -> GateReport {
        let mut report = GateReport::default();
        for command in commands {
            match Command::new("sh").arg("-c").arg(command).output().await {
                Ok(output) => {
                    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                    combined.push_str(&String::from_utf8_lossy(&output.stderr));
                    report.checks.push(CheckResult {
                        command: command.clone(),
                        passed: output.status.success(),
                        output: combined,
                    });
                }
                Err(err) => {
                    tracing::warn!(command, error = %err, "verification command failed to spawn");
                    report.invocation_errors.push(command.clone());
                }
            }
        }
        report
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::*;

    /// Returns a fixed `GateReport` regardless of the configured
    /// commands, for deterministic engine tests.
    pub struct FixedVerificationGate(pub GateReport);

    #[async_trait]
    impl VerificationGate for FixedVerificationGate {
        async fn run(&self, _commands: &[String]) -> GateReport {
            self.0.clone()
        }
    }

    impl FixedVerificationGate {
        pub fn passing() -> Self {
            Self(GateReport::default())
        }

        pub fn failing(output: impl Into<String>) -> Self {
            Self(GateReport {
                checks: vec![CheckResult {
                    command: "configured-check".into(),
                    passed: false,
                    output: output.into(),
                }],
                invocation_errors: vec![],
            })
        }

        pub fn broken_tooling() -> Self {
            Self(GateReport {
                checks: vec![],
                invocation_errors: vec!["configured-check".into()],
            })
        }
    }
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
