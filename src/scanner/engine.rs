use std::sync::Arc;

use crate::models::Profile;

use super::contraindications::evaluate_contraindications;
use super::interactions::detect_pair_interactions;
use super::knowledge::KnowledgeBase;
use super::resolver::resolve_medicine;
use super::risk::{Escalation, RiskAggregator, ScoredFinding};
use super::types::{Finding, InteractionScanner, ScanResult};

/// Default scanner over a shared, immutable knowledge base.
#[derive(Debug, Clone)]
pub struct DefaultScanner {
    knowledge: Arc<KnowledgeBase>,
}

impl DefaultScanner {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }
}

impl InteractionScanner for DefaultScanner {
    fn scan(&self, name1: &str, name2: &str, profile: Option<&Profile>) -> ScanResult {
        scan(&self.knowledge, name1, name2, profile)
    }
}

/// Evaluate two medicine names against the knowledge base and an optional
/// profile.
///
/// Findings are emitted in a fixed order: unknown names (argument order),
/// the interaction rule, the duplicate ingredient, then contraindications
/// for position 1 followed by position 2.
pub fn scan(
    knowledge: &KnowledgeBase,
    name1: &str,
    name2: &str,
    profile: Option<&Profile>,
) -> ScanResult {
    let positions = [
        (name1, resolve_medicine(name1, knowledge)),
        (name2, resolve_medicine(name2, knowledge)),
    ];

    let mut scored: Vec<ScoredFinding> = positions
        .iter()
        .filter(|(_, resolved)| resolved.is_none())
        .map(|(name, _)| {
            ScoredFinding::new(
                Finding::Unknown {
                    name: name.to_string(),
                },
                Escalation::None,
            )
        })
        .collect();

    if let [(_, Some(med1)), (_, Some(med2))] = positions {
        scored.extend(detect_pair_interactions(med1, med2, knowledge));
    }

    if let Some(profile) = profile {
        for med in positions.iter().filter_map(|(_, resolved)| *resolved) {
            scored.extend(evaluate_contraindications(med, profile, knowledge));
        }
    }

    let mut aggregator = RiskAggregator::new();
    let findings = scored
        .into_iter()
        .map(|ScoredFinding { finding, escalation }| {
            aggregator.apply(escalation);
            finding
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        risk = aggregator.level().as_str(),
        forced = aggregator.is_forced(),
        findings = findings.len(),
        with_profile = profile.is_some(),
        "Interaction scan complete"
    );

    ScanResult {
        risk_level: aggregator.level(),
        findings,
    }
}
