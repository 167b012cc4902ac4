// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Token/cost accumulation and the single-fire budget thresholds.
//!
//! Folded incrementally as inbox messages carry `usage` fields; the budget
//! tracker (in `sprintdeck-engine`) owns *when* to evaluate thresholds, this
//! module owns the arithmetic and the per-model pricing lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dollars per million tokens, input and output priced separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

/// Three-entry pricing table keyed on model family. Resolved from
/// `.sprint.yml` at process-wide lifecycle start and cached thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    pub haiku: ModelPrice,
    pub sonnet: ModelPrice,
    pub opus: ModelPrice,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            haiku: ModelPrice {
                input_per_million: 0.80,
                output_per_million: 4.00,
            },
            sonnet: ModelPrice {
                input_per_million: 3.00,
                output_per_million: 15.00,
            },
            opus: ModelPrice {
                input_per_million: 15.00,
                output_per_million: 75.00,
            },
        }
    }
}

impl PriceTable {
    /// Resolve a model family name by substring match against the
    /// configured family string (`.sprint.yml`'s `agents.model`), defaulting
    /// to `sonnet` when absent or unmatched. Exact vendor-string-to-family
    /// mapping is left unspecified upstream; substring match on the three
    /// known family names is the documented observable behavior.
    pub fn resolve(&self, model: Option<&str>) -> ModelPrice {
        match model {
            Some(m) if m.to_ascii_lowercase().contains("haiku") => self.haiku,
            Some(m) if m.to_ascii_lowercase().contains("opus") => self.opus,
            _ => self.sonnet,
        }
    }
}

/// A single reported usage delta to fold into the cumulative totals.
#[derive(Debug, Clone, Copy)]
pub struct UsageDelta {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Cumulative token/cost usage for the sprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub total: u64,
    pub by_agent: HashMap<String, u64>,
    pub estimated_cost_usd: f64,
}

impl TokenUsage {
    /// Accumulate one delta attributed to `recipient`, pricing it by
    /// `price`. Returns the new running total, for the caller to evaluate
    /// budget thresholds against.
    pub fn accumulate(&mut self, recipient: &str, delta: UsageDelta, price: ModelPrice) -> u64 {
        let tokens = delta.input_tokens + delta.output_tokens;
        self.total += tokens;
        *self.by_agent.entry(recipient.to_string()).or_insert(0) += tokens;
        self.estimated_cost_usd += (delta.input_tokens as f64 * price.input_per_million
            + delta.output_tokens as f64 * price.output_per_million)
            / 1_000_000.0;
        self.total
    }
}

/// Budget limits read once from `.sprint.yml`. Absence of both fields means
/// no budget is configured and the tracker never evaluates thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenBudgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_budget: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_budget_usd: Option<f64>,
}

/// Result of evaluating usage against a configured budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetEvaluation {
    /// Below 80% of every configured limit.
    Ok,
    /// At or above 80% of a configured limit, below all limits.
    Approaching,
    /// At or above a configured limit.
    Exceeded,
}

impl TokenBudgetConfig {
    /// Evaluate `usage` against this config. `Ok` if nothing is configured.
    pub fn evaluate(&self, usage: &TokenUsage) -> BudgetEvaluation {
        let mut approaching = false;

        if let Some(limit) = self.token_budget {
            if usage.total >= limit {
                return BudgetEvaluation::Exceeded;
            }
            if usage.total as f64 >= limit as f64 * 0.8 {
                approaching = true;
            }
        }

        if let Some(limit_usd) = self.token_budget_usd {
            if usage.estimated_cost_usd >= limit_usd {
                return BudgetEvaluation::Exceeded;
            }
            if usage.estimated_cost_usd >= limit_usd * 0.8 {
                approaching = true;
            }
        }

        if approaching {
            BudgetEvaluation::Approaching
        } else {
            BudgetEvaluation::Ok
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token_budget.is_some() || self.token_budget_usd.is_some()
    }
}

#[cfg(test)]
#[path = "token_usage_tests.rs"]
mod tests;
