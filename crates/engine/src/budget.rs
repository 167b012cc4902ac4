// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Token/cost accumulation orchestration. `sprintdeck_core::token_usage`
//! owns the arithmetic and the pricing table; this module owns *when* to
//! evaluate a budget config against the running total on `SprintState`
//! and decide which events that accumulation should emit, honoring the
//! single-fire rule. There is exactly one copy of the usage totals and
//! the single-fire flags — the ones living on `SprintState` — so a
//! persist-then-resume round-trip can't diverge from what this module
//! last decided.

use sprintdeck_core::{BudgetEvaluation, ModelPrice, SprintState, TokenBudgetConfig, UsageDelta};

/// Events the tracker asks its caller to broadcast, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetOutcome {
    TokenUsageUpdated,
    TokenUsageUpdatedAndApproaching,
    /// `exceeded` implies `paused = true` on the caller's state.
    TokenUsageUpdatedAndExceeded,
}

/// Fold one usage delta into `state.token_usage`, attributed to
/// `recipient`, and report whether a budget event needs broadcasting.
/// Returns `None` when the sprint is already exceeded: the spec's
/// single-fire rule extends to the arithmetic itself once a sprint is
/// paused on budget, not just to the events.
pub fn accumulate(
    state: &mut SprintState,
    recipient: &str,
    delta: UsageDelta,
    price: ModelPrice,
    budget: Option<&TokenBudgetConfig>,
) -> Option<BudgetOutcome> {
    if state.token_budget_exceeded {
        return None;
    }
    state.token_usage.accumulate(recipient, delta, price);

    let Some(budget) = budget else {
        return Some(BudgetOutcome::TokenUsageUpdated);
    };

    match budget.evaluate(&state.token_usage) {
        BudgetEvaluation::Exceeded => {
            state.token_budget_exceeded = true;
            state.token_budget_approaching = true;
            state.paused = true;
            Some(BudgetOutcome::TokenUsageUpdatedAndExceeded)
        }
        BudgetEvaluation::Approaching if !state.token_budget_approaching => {
            state.token_budget_approaching = true;
            Some(BudgetOutcome::TokenUsageUpdatedAndApproaching)
        }
        BudgetEvaluation::Approaching | BudgetEvaluation::Ok => Some(BudgetOutcome::TokenUsageUpdated),
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;
