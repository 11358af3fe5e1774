use super::knowledge::{CatalogEntry, KnowledgeBase};

/// Resolve free text to a catalog entry.
///
/// Trimmed, case-insensitive exact match only. Empty input or an unknown
/// name yields `None`.
pub fn resolve_medicine<'a>(name: &str, knowledge: &'a KnowledgeBase) -> Option<&'a CatalogEntry> {
    if name.trim().is_empty() {
        return None;
    }
    knowledge.entry_by_name(name)
}
