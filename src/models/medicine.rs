use serde::{Deserialize, Serialize};

/// One entry of the medicine catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(alias = "activeIngredient")]
    pub active_ingredient: String,
}

impl MedicineRecord {
    pub fn new(id: &str, name: &str, category: &str, active_ingredient: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            active_ingredient: active_ingredient.into(),
        }
    }
}
