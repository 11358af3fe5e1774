use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::enums::WarningSeverity;
use crate::models::MedicineRecord;

use super::contraindications::PREGNANT_TAG;
use super::helpers::{Interner, Symbol, UnorderedPair};
use super::types::{InteractionRule, KnowledgeError};

pub const MEDICINES_FILE: &str = "medicines.json";
pub const INTERACTIONS_FILE: &str = "interactions.json";
pub const CONTRAINDICATIONS_FILE: &str = "contraindications.json";

/// Word in a warning text that forces an Unsafe classification.
pub const UNSAFE_SENTINEL: &str = "Unsafe";

const BUNDLED_MEDICINES: &str = include_str!("../../resources/knowledge/medicines.json");
const BUNDLED_INTERACTIONS: &str = include_str!("../../resources/knowledge/interactions.json");
const BUNDLED_CONTRAINDICATIONS: &str =
    include_str!("../../resources/knowledge/contraindications.json");

// ---------------------------------------------------------------------------
// Contraindication entries
// ---------------------------------------------------------------------------

/// Warning attached to a category or medicine name under a condition tag.
///
/// Accepts either a bare string or `{ "warning": ..., "severity": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawContraindication")]
pub struct ContraindicationEntry {
    pub warning: String,
    pub severity: Option<WarningSeverity>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContraindication {
    Text(String),
    Structured {
        warning: String,
        #[serde(default)]
        severity: Option<WarningSeverity>,
    },
}

impl From<RawContraindication> for ContraindicationEntry {
    fn from(raw: RawContraindication) -> Self {
        match raw {
            RawContraindication::Text(warning) => Self {
                warning,
                severity: None,
            },
            RawContraindication::Structured { warning, severity } => Self { warning, severity },
        }
    }
}

impl ContraindicationEntry {
    pub fn text(warning: &str) -> Self {
        Self {
            warning: warning.into(),
            severity: None,
        }
    }

    /// True when the structured severity says unsafe, or when the warning
    /// text carries the `Unsafe` sentinel word.
    pub fn forces_unsafe(&self) -> bool {
        self.severity == Some(WarningSeverity::Unsafe) || self.warning.contains(UNSAFE_SENTINEL)
    }
}

/// Load format: condition tag -> category-or-name -> warning.
pub type ContraindicationTables = BTreeMap<String, BTreeMap<String, ContraindicationEntry>>;

/// `(tag, key)` of entries whose structured severity is never consulted.
/// Only pregnancy warnings can force Unsafe; other tables stay at Caution.
pub fn unread_severities(tables: &ContraindicationTables) -> Vec<(&str, &str)> {
    tables
        .iter()
        .filter(|(tag, _)| tag.as_str() != PREGNANT_TAG)
        .flat_map(|(tag, entries)| {
            entries
                .iter()
                .filter(|(_, entry)| entry.severity.is_some())
                .map(move |(key, _)| (tag.as_str(), key.as_str()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Interned catalog and rules
// ---------------------------------------------------------------------------

/// A catalog record with its interned lookup keys.
#[derive(Debug)]
pub struct CatalogEntry {
    pub record: MedicineRecord,
    pub(crate) name: Symbol,
    pub(crate) category: Symbol,
    pub(crate) name_lower: String,
    pub(crate) ingredient_lower: String,
}

#[derive(Debug)]
struct CompiledRule {
    rule: InteractionRule,
    tokens: UnorderedPair,
    reachable: bool,
}

/// Immutable medicine catalog, interaction rules and contraindication tables.
///
/// Built once at startup and shared read-only (usually behind an `Arc`).
#[derive(Debug)]
pub struct KnowledgeBase {
    catalog: Vec<CatalogEntry>,
    by_name: HashMap<Symbol, usize>,
    rules: Vec<CompiledRule>,
    contraindications: BTreeMap<String, HashMap<Symbol, ContraindicationEntry>>,
    interner: Interner,
}

impl KnowledgeBase {
    /// Validate and intern the three collections.
    pub fn from_parts(
        medicines: Vec<MedicineRecord>,
        rules: Vec<InteractionRule>,
        contraindications: ContraindicationTables,
    ) -> Result<Self, KnowledgeError> {
        let mut interner = Interner::default();
        let mut catalog = Vec::with_capacity(medicines.len());
        let mut by_name = HashMap::new();
        let mut category_symbols = HashSet::new();

        for record in medicines {
            if record.name.trim().is_empty() {
                return Err(KnowledgeError::EmptyField {
                    id: record.id,
                    field: "name",
                });
            }
            if record.active_ingredient.trim().is_empty() {
                return Err(KnowledgeError::EmptyField {
                    id: record.id,
                    field: "active_ingredient",
                });
            }

            let name = interner.intern(&record.name);
            let category = interner.intern(&record.category);
            if by_name.insert(name, catalog.len()).is_some() {
                return Err(KnowledgeError::DuplicateMedicine(record.name));
            }
            category_symbols.insert(category);

            catalog.push(CatalogEntry {
                name_lower: record.name.to_lowercase(),
                ingredient_lower: record.active_ingredient.to_lowercase(),
                record,
                name,
                category,
            });
        }

        let compiled: Vec<CompiledRule> = rules
            .into_iter()
            .map(|rule| {
                let a = interner.intern(&rule.participants[0]);
                let b = interner.intern(&rule.participants[1]);
                let both_names = by_name.contains_key(&a) && by_name.contains_key(&b);
                let both_categories =
                    category_symbols.contains(&a) && category_symbols.contains(&b);
                let reachable = both_names || both_categories;
                if !reachable {
                    tracing::warn!(
                        participants = ?rule.participants,
                        "Interaction rule references tokens outside the catalog and can never match"
                    );
                }
                CompiledRule {
                    rule,
                    tokens: UnorderedPair::new(a, b),
                    reachable,
                }
            })
            .collect();

        for (tag, key) in unread_severities(&contraindications) {
            tracing::warn!(
                tag,
                key,
                "Structured severity is only read for the pregnancy table and will be ignored"
            );
        }

        let tables = contraindications
            .into_iter()
            .map(|(tag, entries)| {
                let interned = entries
                    .into_iter()
                    .map(|(key, entry)| (interner.intern(&key), entry))
                    .collect();
                (tag, interned)
            })
            .collect();

        let kb = Self {
            catalog,
            by_name,
            rules: compiled,
            contraindications: tables,
            interner,
        };

        tracing::info!(
            medicines = kb.catalog.len(),
            rules = kb.rules.len(),
            unreachable_rules = kb.unreachable_rules().len(),
            condition_tags = kb.contraindications.len(),
            "Knowledge base loaded"
        );

        Ok(kb)
    }

    /// Parse the three JSON documents and build the knowledge base.
    pub fn from_json(
        medicines_json: &str,
        interactions_json: &str,
        contraindications_json: &str,
    ) -> Result<Self, KnowledgeError> {
        let medicines: Vec<MedicineRecord> = serde_json::from_str(medicines_json)
            .map_err(|e| KnowledgeError::Parse(MEDICINES_FILE.into(), e.to_string()))?;
        let rules: Vec<InteractionRule> = serde_json::from_str(interactions_json)
            .map_err(|e| KnowledgeError::Parse(INTERACTIONS_FILE.into(), e.to_string()))?;
        let contraindications: ContraindicationTables =
            serde_json::from_str(contraindications_json).map_err(|e| {
                KnowledgeError::Parse(CONTRAINDICATIONS_FILE.into(), e.to_string())
            })?;

        Self::from_parts(medicines, rules, contraindications)
    }

    /// Load the knowledge base from JSON files in a directory.
    pub fn load(dir: &Path) -> Result<Self, KnowledgeError> {
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path)
                .map_err(|e| KnowledgeError::Load(path.display().to_string(), e.to_string()))
        };

        let medicines = read(MEDICINES_FILE)?;
        let interactions = read(INTERACTIONS_FILE)?;
        let contraindications = read(CONTRAINDICATIONS_FILE)?;

        Self::from_json(&medicines, &interactions, &contraindications)
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, KnowledgeError> {
        Self::from_json(
            BUNDLED_MEDICINES,
            BUNDLED_INTERACTIONS,
            BUNDLED_CONTRAINDICATIONS,
        )
    }

    /// Catalog records in load order.
    pub fn medicines(&self) -> impl Iterator<Item = &MedicineRecord> {
        self.catalog.iter().map(|entry| &entry.record)
    }

    pub fn rules(&self) -> impl Iterator<Item = &InteractionRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Rules whose participants are neither both catalog names nor both
    /// catalog categories. They are kept but never fire.
    pub fn unreachable_rules(&self) -> Vec<&InteractionRule> {
        self.rules
            .iter()
            .filter(|compiled| !compiled.reachable)
            .map(|compiled| &compiled.rule)
            .collect()
    }

    pub fn condition_tags(&self) -> Vec<&str> {
        self.contraindications.keys().map(String::as_str).collect()
    }

    // -- lookups used by the engines ----------------------------------------

    pub(crate) fn entry_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        let symbol = self.interner.get(name)?;
        self.by_name.get(&symbol).map(|&idx| &self.catalog[idx])
    }

    /// First rule, in load order, whose participants equal either the name
    /// pair or the category pair. Mixed name/category pairs never match.
    pub(crate) fn rule_for_pair(
        &self,
        names: UnorderedPair,
        categories: UnorderedPair,
    ) -> Option<&InteractionRule> {
        self.rules
            .iter()
            .find(|compiled| {
                compiled.reachable && (compiled.tokens == names || compiled.tokens == categories)
            })
            .map(|compiled| &compiled.rule)
    }

    pub(crate) fn contraindication(&self, tag: &str, key: Symbol) -> Option<&ContraindicationEntry> {
        self.contraindications.get(tag)?.get(&key)
    }
}
