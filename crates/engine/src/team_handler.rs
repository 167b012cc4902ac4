// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Team-config handler: applies a freshly-read `config.json` to
//! `SprintState`, recognizing the team, discovering its agents, and
//! emitting the one-shot initialization broadcast.

use sprintdeck_core::{Agent, AgentId, Clock, Event, IdGen, Phase, SprintState, TeamConfigFile};

/// Result of applying one team-config read: the events to broadcast plus
/// the agent names to hand the team-discovered plugin hook, populated
/// only on the first successful recognition of this team.
#[derive(Debug, Default)]
pub struct TeamConfigOutcome {
    pub events: Vec<Event>,
    pub newly_discovered_agent_names: Option<Vec<String>>,
}

/// Apply `config` to `state`. Not a sprint-shaped team: no-op. Already
/// recognized: only discovers any newly-added members, without resetting
/// phase/mode or re-broadcasting `init` (those are strictly first-time).
pub fn apply_team_config(
    state: &mut SprintState,
    config: &TeamConfigFile,
    id_gen: &impl IdGen,
    clock: &impl Clock,
) -> TeamConfigOutcome {
    let mut outcome = TeamConfigOutcome::default();
    if !config.is_sprint_team() {
        return outcome;
    }

    let first_time = state.team_name.is_none();

    for member in &config.members {
        if state.agents.contains_key(&member.name) {
            continue;
        }
        let agent_id = member
            .agent_id
            .clone()
            .map(AgentId::new)
            .unwrap_or_else(|| AgentId::new(id_gen.next()));
        state.agents.insert(
            member.name.clone(),
            Agent::discovered(&member.name, agent_id, member.agent_type.clone()),
        );
    }

    if !first_time {
        return outcome;
    }

    state.team_name = config.name.clone().or_else(|| Some("sprint-team".to_string()));
    state.mode = Some(config.mode());
    state.phase = match config.mode() {
        sprintdeck_core::Mode::Autonomous => Phase::Analyzing,
        sprintdeck_core::Mode::Manual => Phase::Sprinting,
    };

    outcome.events.push(Event::Init { state: Box::new(state.clone()) });

    let timestamp = clock.now().to_rfc3339();
    let message_id = format!("{}-0", clock.epoch_ms());
    if state.send_team_init_message(
        format!(
            "Sprint initialized for team {}",
            state.team_name.as_deref().unwrap_or("unknown")
        ),
        message_id,
        timestamp,
    ) {
        outcome
            .events
            .push(Event::MessageSent { message: state.messages.last().expect("just appended").clone() });
    }

    outcome.newly_discovered_agent_names = Some(config.member_names());
    outcome
}

#[cfg(test)]
#[path = "team_handler_tests.rs"]
mod tests;
