// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use yare::parameterized;

#[parameterized(
    haiku = { "claude-haiku-4-5", PriceTable::default().haiku },
    opus = { "claude-opus-4-1", PriceTable::default().opus },
    sonnet_exact = { "claude-sonnet-4-5", PriceTable::default().sonnet },
    unknown_defaults_sonnet = { "gpt-5", PriceTable::default().sonnet },
    absent_defaults_sonnet = { "", PriceTable::default().sonnet },
)]
fn resolve_matches_family_substring(model: &str, expected: ModelPrice) {
    let table = PriceTable::default();
    let model = if model.is_empty() { None } else { Some(model) };
    assert_eq!(table.resolve(model), expected);
}

#[test]
fn resolve_with_no_model_defaults_to_sonnet() {
    let table = PriceTable::default();
    assert_eq!(table.resolve(None), table.sonnet);
}

#[test]
fn accumulate_totals_and_per_agent_breakdown() {
    let mut usage = TokenUsage::default();
    let price = PriceTable::default().sonnet;

    usage.accumulate(
        "sprint-engineer",
        UsageDelta {
            input_tokens: 1_000,
            output_tokens: 500,
        },
        price,
    );

    assert_eq!(usage.total, 1_500);
    assert_eq!(usage.by_agent["sprint-engineer"], 1_500);
    let expected_cost = (1_000.0 * price.input_per_million + 500.0 * price.output_per_million)
        / 1_000_000.0;
    assert!((usage.estimated_cost_usd - expected_cost).abs() < f64::EPSILON);
}

#[test]
fn accumulate_is_cumulative_across_calls_and_agents() {
    let mut usage = TokenUsage::default();
    let price = PriceTable::default().sonnet;

    usage.accumulate(
        "sprint-engineer",
        UsageDelta {
            input_tokens: 100,
            output_tokens: 0,
        },
        price,
    );
    usage.accumulate(
        "sprint-manager",
        UsageDelta {
            input_tokens: 0,
            output_tokens: 50,
        },
        price,
    );

    assert_eq!(usage.total, 150);
    assert_eq!(usage.by_agent["sprint-engineer"], 100);
    assert_eq!(usage.by_agent["sprint-manager"], 50);
}

#[test]
fn evaluate_is_ok_when_unconfigured() {
    let config = TokenBudgetConfig {
        token_budget: None,
        token_budget_usd: None,
    };
    assert!(!config.is_configured());
    let usage = TokenUsage {
        total: 1_000_000,
        ..Default::default()
    };
    assert_eq!(config.evaluate(&usage), BudgetEvaluation::Ok);
}

#[parameterized(
    below_approaching = { 79, BudgetEvaluation::Ok },
    at_approaching_threshold = { 80, BudgetEvaluation::Approaching },
    just_below_exceeded = { 99, BudgetEvaluation::Approaching },
    at_exceeded_threshold = { 100, BudgetEvaluation::Exceeded },
    above_exceeded = { 150, BudgetEvaluation::Exceeded },
)]
fn evaluate_token_budget_thresholds(total: u64, expected: BudgetEvaluation) {
    let config = TokenBudgetConfig {
        token_budget: Some(100),
        token_budget_usd: None,
    };
    let usage = TokenUsage {
        total,
        ..Default::default()
    };
    assert_eq!(config.evaluate(&usage), expected);
}

#[test]
fn evaluate_checks_dollar_limit_independently_of_token_limit() {
    let config = TokenBudgetConfig {
        token_budget: None,
        token_budget_usd: Some(10.0),
    };
    let usage = TokenUsage {
        estimated_cost_usd: 10.0,
        ..Default::default()
    };
    assert_eq!(config.evaluate(&usage), BudgetEvaluation::Exceeded);
}

#[test]
fn evaluate_exceeded_if_either_limit_is_hit() {
    let config = TokenBudgetConfig {
        token_budget: Some(1_000_000),
        token_budget_usd: Some(1.0),
    };
    let usage = TokenUsage {
        total: 10,
        estimated_cost_usd: 2.0,
        ..Default::default()
    };
    assert_eq!(config.evaluate(&usage), BudgetEvaluation::Exceeded);
}
