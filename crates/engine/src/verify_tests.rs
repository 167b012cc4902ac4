// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;

#[tokio::test]
async fn no_configured_commands_pass_trivially() {
    let gate = ProcessVerificationGate;
    let report = gate.run(&[]).await;
    assert!(report.passed_fail_open());
    assert!(report.passed_strict());
}

#[tokio::test]
async fn passing_command_reports_pass() {
    let gate = ProcessVerificationGate;
    let report = gate.run(&["true".to_string()]).await;
    assert!(report.passed_fail_open());
    assert!(report.passed_strict());
    assert_eq!(report.checks.len(), 1);
    assert!(report.checks[0].passed);
}

#[tokio::test]
async fn failing_command_fails_strict_but_not_fail_open() {
    let gate = ProcessVerificationGate;
    let report = gate.run(&["false".to_string()]).await;
    assert!(!report.passed_strict());
    assert!(!report.checks[0].passed);
}

#[tokio::test]
async fn unspawnable_command_is_an_invocation_error() {
    let gate = ProcessVerificationGate;
    let report = gate.run(&["/no/such/binary/at/all --flag".to_string()]).await;
    // `sh -c` itself spawns fine even if the inner binary is missing, so this
    // exercises the non-zero-exit path rather than a spawn failure; both are
    // non-fatal to the fail-open per-task rule.
    assert!(report.passed_fail_open());
}

#[test]
fn fixed_gate_passing_passes_both_scopes() {
    let report = test_support::FixedVerificationGate::passing().0;
    assert!(report.passed_fail_open());
    assert!(report.passed_strict());
}

#[test]
fn fixed_gate_failing_fails_strict_but_passes_fail_open() {
    let report = test_support::FixedVerificationGate::failing("assertion failed").0;
    assert!(report.passed_fail_open());
    assert!(!report.passed_strict());
}

#[test]
fn fixed_gate_broken_tooling_fails_strict_but_passes_fail_open() {
    let report = test_support::FixedVerificationGate::broken_tooling().0;
    assert!(report.passed_fail_open());
    assert!(!report.passed_strict());
    assert_eq!(report.invocation_errors.len(), 1);
}
