use crate::models::enums::ContraindicationReason;
use crate::models::Profile;

use super::knowledge::{CatalogEntry, KnowledgeBase};
use super::messages::MessageTemplates;
use super::risk::{Escalation, ScoredFinding};
use super::types::{Finding, RiskLevel};

/// Condition tag for the pregnancy table.
pub const PREGNANT_TAG: &str = "pregnant";
/// Condition tag for the stomach sensitivity table.
pub const STOMACH_SENSITIVE_TAG: &str = "stomach_sensitive";

/// Evaluate pregnancy, stomach sensitivity and allergy, in that order, for
/// one resolved medicine.
pub fn evaluate_contraindications(
    med: &CatalogEntry,
    profile: &Profile,
    knowledge: &KnowledgeBase,
) -> Vec<ScoredFinding> {
    [
        check_pregnancy(med, profile, knowledge),
        check_stomach(med, profile, knowledge),
        check_allergy(med, profile),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Category entry first, then the medicine name.
fn check_pregnancy(
    med: &CatalogEntry,
    profile: &Profile,
    knowledge: &KnowledgeBase,
) -> Option<ScoredFinding> {
    if !profile.pregnant {
        return None;
    }

    let entry = knowledge
        .contraindication(PREGNANT_TAG, med.category)
        .or_else(|| knowledge.contraindication(PREGNANT_TAG, med.name))?;

    let escalation = if entry.forces_unsafe() {
        Escalation::Forced
    } else {
        Escalation::Bounded(RiskLevel::Caution)
    };

    Some(ScoredFinding::new(
        contraindication(med, ContraindicationReason::Pregnancy, entry.warning.clone()),
        escalation,
    ))
}

/// Category entry only.
fn check_stomach(
    med: &CatalogEntry,
    profile: &Profile,
    knowledge: &KnowledgeBase,
) -> Option<ScoredFinding> {
    if !profile.stomach_sensitive {
        return None;
    }

    let entry = knowledge.contraindication(STOMACH_SENSITIVE_TAG, med.category)?;

    Some(ScoredFinding::new(
        contraindication(
            med,
            ContraindicationReason::StomachSensitivity,
            entry.warning.clone(),
        ),
        Escalation::Bounded(RiskLevel::Caution),
    ))
}

/// Substring match of the name or active ingredient inside the free-text
/// allergy list.
fn check_allergy(med: &CatalogEntry, profile: &Profile) -> Option<ScoredFinding> {
    if !profile.has_allergies() {
        return None;
    }

    let allergies = profile.allergies.to_lowercase();
    if !allergies.contains(&med.name_lower) && !allergies.contains(&med.ingredient_lower) {
        return None;
    }

    Some(ScoredFinding::new(
        contraindication(
            med,
            ContraindicationReason::Allergy,
            MessageTemplates::allergy(&med.record.name),
        ),
        Escalation::Forced,
    ))
}

fn contraindication(med: &CatalogEntry, reason: ContraindicationReason, warning: String) -> Finding {
    Finding::Contraindication {
        medicine_name: med.record.name.clone(),
        reason,
        warning,
    }
}
