/// Fixed texts carried in finding payloads and rendered views.
pub struct MessageTemplates;

impl MessageTemplates {
    pub const DEFAULT_DESCRIPTION: &'static str = "Unknown";
    pub const DEFAULT_RECOMMENDATION: &'static str = "Consult a doctor.";
    pub const DUPLICATE_RECOMMENDATION: &'static str =
        "Do NOT take together. High risk of overdose.";
    pub const NO_FINDINGS: &'static str =
        "No known interactions found in our database for this combination.";

    /// UNKNOWN medicine description.
    pub fn unknown_medicine(name: &str) -> String {
        format!(
            "Medicine \"{}\" not found in database. Effectiveness unknown.",
            name,
        )
    }

    /// DUPLICATE active ingredient description.
    pub fn duplicate_ingredient(ingredient: &str) -> String {
        format!("Duplicate active ingredient: {}.", ingredient)
    }

    /// ALLERGY warning.
    pub fn allergy(medicine: &str) -> String {
        format!(
            "You have listed an allergy that matches this medicine ({}).",
            medicine,
        )
    }
}
