use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::Profile;

/// Canonical form of a phone number used as the account key. Every
/// repository lookup and write goes through this.
pub fn normalize_phone(raw: &str) -> &str {
    raw.trim()
}

/// A user account. The phone number is the account key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub phone: String,
    pub name: String,
    pub email: String,
    pub profiles: Vec<StoredProfile>,
}

/// A profile as persisted under an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub id: Uuid,
    /// RFC 3339 timestamp.
    pub created_at: String,
    #[serde(flatten)]
    pub profile: Profile,
}

/// The currently selected account and profile, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phone: Option<String>,
    pub profile_id: Option<Uuid>,
}
