use super::helpers::UnorderedPair;
use super::knowledge::{CatalogEntry, KnowledgeBase};
use super::risk::{Escalation, ScoredFinding};
use super::types::{Finding, InteractionRule};

// ---------------------------------------------------------------------------
// Pairwise rule match
// ---------------------------------------------------------------------------

/// Find the rule whose participants are `{med1.name, med2.name}` or
/// `{med1.category, med2.category}`.
pub fn match_rule<'a>(
    med1: &CatalogEntry,
    med2: &CatalogEntry,
    knowledge: &'a KnowledgeBase,
) -> Option<&'a InteractionRule> {
    let names = UnorderedPair::new(med1.name, med2.name);
    let categories = UnorderedPair::new(med1.category, med2.category);
    knowledge.rule_for_pair(names, categories)
}

// ---------------------------------------------------------------------------
// Duplicate active ingredient
// ---------------------------------------------------------------------------

/// Exact (case-sensitive) active ingredient equality.
pub fn duplicate_ingredient(med1: &CatalogEntry, med2: &CatalogEntry) -> bool {
    med1.record.active_ingredient == med2.record.active_ingredient
}

/// Run the rule match and the duplicate check for a resolved pair, in that
/// order.
pub fn detect_pair_interactions(
    med1: &CatalogEntry,
    med2: &CatalogEntry,
    knowledge: &KnowledgeBase,
) -> Vec<ScoredFinding> {
    let mut scored = Vec::new();

    if let Some(rule) = match_rule(med1, med2, knowledge) {
        let escalation = rule
            .proposed_level()
            .map(Escalation::Bounded)
            .unwrap_or(Escalation::None);
        scored.push(ScoredFinding::new(
            Finding::Interaction { rule: rule.clone() },
            escalation,
        ));
    }

    if duplicate_ingredient(med1, med2) {
        scored.push(ScoredFinding::new(
            Finding::DuplicateIngredient {
                ingredient: med1.record.active_ingredient.clone(),
            },
            Escalation::Forced,
        ));
    }

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::InteractionSeverity;
    use crate::models::MedicineRecord;
    use crate::scanner::knowledge::ContraindicationTables;
    use crate::scanner::resolver::resolve_medicine;
    use crate::scanner::types::RiskLevel;

    fn rule(a: &str, b: &str, severity: InteractionSeverity) -> InteractionRule {
        InteractionRule {
            participants: [a.into(), b.into()],
            severity,
            description: Some(format!("{a} with {b}")),
            recommendation: None,
        }
    }

    /// Small catalog where categories and names are easy to tell apart.
    fn kb_with_rules(rules: Vec<InteractionRule>) -> KnowledgeBase {
        KnowledgeBase::from_parts(
            vec![
                MedicineRecord::new("1", "Alpha", "CatA", "alphaine"),
                MedicineRecord::new("2", "Beta", "CatB", "betaine"),
                MedicineRecord::new("3", "Gamma", "CatB", "gammaine"),
                MedicineRecord::new("4", "AlphaPlus", "CatA", "alphaine"),
            ],
            rules,
            ContraindicationTables::new(),
        )
        .unwrap()
    }

    fn pair<'a>(kb: &'a KnowledgeBase, a: &str, b: &str) -> (&'a CatalogEntry, &'a CatalogEntry) {
        (
            resolve_medicine(a, kb).unwrap(),
            resolve_medicine(b, kb).unwrap(),
        )
    }

    #[test]
    fn name_rule_matches_in_either_order() {
        let kb = kb_with_rules(vec![rule("Alpha", "Beta", InteractionSeverity::Severe)]);
        let (a, b) = pair(&kb, "Alpha", "Beta");
        assert!(match_rule(a, b, &kb).is_some());
        assert!(match_rule(b, a, &kb).is_some());
    }

    #[test]
    fn category_rule_matches() {
        let kb = kb_with_rules(vec![rule("CatB", "CatA", InteractionSeverity::Moderate)]);
        let (a, g) = pair(&kb, "Alpha", "Gamma");
        let found = match_rule(a, g, &kb).unwrap();
        assert_eq!(found.severity, InteractionSeverity::Moderate);
    }

    #[test]
    fn mixed_name_category_never_matches() {
        let kb = kb_with_rules(vec![rule("Alpha", "CatB", InteractionSeverity::Severe)]);
        let (a, b) = pair(&kb, "Alpha", "Beta");
        assert!(match_rule(a, b, &kb).is_none());
    }

    #[test]
    fn same_medicine_does_not_match_rule_with_other_participant() {
        let kb = kb_with_rules(vec![rule("Alpha", "Beta", InteractionSeverity::Severe)]);
        let (a1, a2) = pair(&kb, "Alpha", "alpha");
        assert!(match_rule(a1, a2, &kb).is_none());
    }

    #[test]
    fn first_rule_in_load_order_wins() {
        let kb = kb_with_rules(vec![
            rule("CatA", "CatB", InteractionSeverity::Mild),
            rule("Alpha", "Beta", InteractionSeverity::Severe),
        ]);
        let (a, b) = pair(&kb, "Alpha", "Beta");
        assert_eq!(
            match_rule(a, b, &kb).unwrap().severity,
            InteractionSeverity::Mild
        );
    }

    #[test]
    fn duplicate_ingredient_is_exact() {
        let kb = kb_with_rules(vec![]);
        let (a, ap) = pair(&kb, "Alpha", "AlphaPlus");
        let (a2, b) = pair(&kb, "Alpha", "Beta");
        assert!(duplicate_ingredient(a, ap));
        assert!(!duplicate_ingredient(a2, b));
    }

    #[test]
    fn detect_orders_rule_before_duplicate() {
        let kb = kb_with_rules(vec![rule("Alpha", "AlphaPlus", InteractionSeverity::Mild)]);
        let (a, ap) = pair(&kb, "Alpha", "AlphaPlus");
        let scored = detect_pair_interactions(a, ap, &kb);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].finding.kind(), "interaction");
        assert_eq!(scored[0].escalation, Escalation::None);
        assert_eq!(scored[1].finding.kind(), "duplicate_ingredient");
        assert_eq!(scored[1].escalation, Escalation::Forced);
    }

    #[test]
    fn severity_escalation_is_bounded() {
        let kb = kb_with_rules(vec![rule("Alpha", "Beta", InteractionSeverity::Severe)]);
        let (a, b) = pair(&kb, "Alpha", "Beta");
        let scored = detect_pair_interactions(a, b, &kb);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].escalation, Escalation::Bounded(RiskLevel::Unsafe));
    }
}
