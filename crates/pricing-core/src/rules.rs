//! # Rule Evaluation
//!
//! Decides whether a bundle satisfies the eligibility rules attached to a
//! price rule or promotion.
//!
//! ## Fail-Closed Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule ──► well-formed? ──no──► false (logged, never an error)          │
//! │              │                                                          │
//! │             yes                                                         │
//! │              ▼                                                          │
//! │           match kind ──► predicate over BundleContext ──► bool         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A catalog entry with a broken rule simply stops applying; it can never
//! break pricing for the whole bundle.

use tracing::{trace, warn};

use crate::context::BundleContext;
use crate::types::{Rule, RuleKind, RuleParameter};

/// Stateless evaluator for [`Rule`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Evaluates a single rule against the bundle.
    pub fn evaluate(rule: &Rule, context: &BundleContext) -> bool {
        let params = &rule.parameters;

        if params.len() < rule.kind.min_parameters() {
            warn!(
                kind = ?rule.kind,
                got = params.len(),
                need = rule.kind.min_parameters(),
                "Rule has too few parameters, treating as not satisfied"
            );
            return false;
        }

        let passed = match rule.kind {
            RuleKind::HasProduct => texts(params).any(|id| context.has_product(id)),

            RuleKind::HasProductInGroup => match group_id(rule.kind, &params[0]) {
                Some(group) => context.products().iter().any(|p| p.group_id == group),
                None => false,
            },

            // Vacuously true for an empty bundle.
            RuleKind::HasOnlyProductInGroup => match group_id(rule.kind, &params[0]) {
                Some(group) => context.products().iter().all(|p| p.group_id == group),
                None => false,
            },

            RuleKind::HasOption => texts(params).any(|id| context.has_option(id)),

            RuleKind::ItemCountEquals => match parse_count(rule.kind, &params[0]) {
                Some(required) => context.products().len() == required,
                None => false,
            },

            RuleKind::ItemCountAtLeast => match parse_count(rule.kind, &params[0]) {
                Some(minimum) => {
                    let listed: Vec<&str> = match &params[1] {
                        RuleParameter::List(items) => items.iter().map(String::as_str).collect(),
                        RuleParameter::Text(_) => texts(&params[1..]).collect(),
                    };
                    let matching = context
                        .products()
                        .iter()
                        .filter(|p| listed.contains(&p.id.as_str()))
                        .count();
                    matching >= minimum
                }
                None => false,
            },

            RuleKind::Unknown => {
                warn!("Unknown rule kind, treating as not satisfied");
                false
            }
        };

        trace!(kind = ?rule.kind, ?params, passed, "Evaluated rule");
        passed
    }

    /// Evaluates a conjunction. An empty list is always satisfied.
    pub fn evaluate_all(rules: &[Rule], context: &BundleContext) -> bool {
        rules.iter().all(|rule| Self::evaluate(rule, context))
    }
}

// Nested lists never equal a single id.
fn texts(params: &[RuleParameter]) -> impl Iterator<Item = &str> {
    params.iter().filter_map(RuleParameter::as_text)
}

fn group_id(kind: RuleKind, param: &RuleParameter) -> Option<&str> {
    match param.as_text().map(str::trim) {
        Some(group) if !group.is_empty() => Some(group),
        _ => {
            warn!(?kind, ?param, "Rule group parameter is blank or not an id");
            None
        }
    }
}

fn parse_count(kind: RuleKind, param: &RuleParameter) -> Option<usize> {
    match param.as_text().and_then(|raw| raw.trim().parse::<usize>().ok()) {
        Some(count) => Some(count),
        None => {
            warn!(?kind, ?param, "Rule count parameter is not a number");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
