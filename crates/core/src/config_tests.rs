// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;

#[test]
fn defaults_when_empty_yaml() {
    let config: SprintConfig = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.server.port, 4173);
    assert!(!config.recording.enabled);
    assert!(config.sprint.token_budget.is_none());
    assert!(config.plugins.is_empty());
}

#[test]
fn parses_full_document() {
    let yaml = r#"
server:
  port: 9000
recording:
  enabled: true
sprint:
  token_budget: 500000
  token_budget_usd: 25.0
agents:
  model: claude-opus-4-1
  roles: ["pm", "manager", "engineer"]
notifications:
  webhook: https://hooks.example.com/sprint
  events: ["checkpoint_hit", "task_completed"]
  headers:
    X-Api-Key: secret
plugins:
  - retro-exporter
"#;
    let config: SprintConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.server.port, 9000);
    assert!(config.recording.enabled);
    assert_eq!(config.sprint.token_budget, Some(500_000));
    assert_eq!(config.sprint.token_budget_usd, Some(25.0));
    assert_eq!(config.agents.model.as_deref(), Some("claude-opus-4-1"));
    assert_eq!(config.agents.roles.len(), 3);
    assert_eq!(
        config.notifications.webhook.as_deref(),
        Some("https://hooks.example.com/sprint")
    );
    assert_eq!(config.plugins, vec!["retro-exporter".to_string()]);
}

#[test]
fn budget_config_carries_both_limits() {
    let section = SprintSection {
        token_budget: Some(100),
        token_budget_usd: Some(5.0),
    };
    let budget = section.budget_config();
    assert_eq!(budget.token_budget, Some(100));
    assert_eq!(budget.token_budget_usd, Some(5.0));
}

#[test]
fn notifications_wants_everything_when_events_empty() {
    let notif = NotificationsConfig {
        webhook: Some("https://example.com".into()),
        events: vec![],
        headers: HashMap::new(),
    };
    assert!(notif.wants("anything"));
}

#[test]
fn notifications_wants_respects_allow_list() {
    let notif = NotificationsConfig {
        webhook: Some("https://example.com".into()),
        events: vec!["checkpoint_hit".into()],
        headers: HashMap::new(),
    };
    assert!(notif.wants("checkpoint_hit"));
    assert!(!notif.wants("task_completed"));
}

#[test]
fn notifications_wants_nothing_without_webhook() {
    let notif = NotificationsConfig::default();
    assert!(!notif.wants("checkpoint_hit"));
}

#[test]
fn verify_commands_default_empty() {
    let config: SprintConfig = serde_yaml::from_str("{}").unwrap();
    assert!(config.verify.commands.is_empty());

    let config: SprintConfig = serde_yaml::from_str("verify:\n  commands: [\"cargo test\"]\n").unwrap();
    assert_eq!(config.verify.commands, vec!["cargo test".to_string()]);
}
