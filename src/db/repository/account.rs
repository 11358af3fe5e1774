use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{normalize_phone, Account, Profile, StoredProfile};

/// Create an account or overwrite its name and email (last write wins).
pub fn save_account(
    conn: &Connection,
    phone: &str,
    name: &str,
    email: &str,
) -> Result<Account, DatabaseError> {
    let phone = normalize_phone(phone);
    conn.execute(
        "INSERT INTO accounts (phone, name, email, updated_at)
         VALUES (?1, ?2, ?3, datetime('now'))
         ON CONFLICT(phone) DO UPDATE SET name = ?2, email = ?3, updated_at = datetime('now')",
        params![phone, name, email],
    )?;

    get_account(conn, phone)?.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "Account".into(),
        id: phone.into(),
    })
}

/// Fetch an account with its profiles in creation order.
pub fn get_account(conn: &Connection, phone: &str) -> Result<Option<Account>, DatabaseError> {
    let phone = normalize_phone(phone);
    let row = conn
        .query_row(
            "SELECT phone, name, email FROM accounts WHERE phone = ?1",
            [phone],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((phone, name, email)) => {
            let profiles = get_profiles(conn, &phone)?;
            Ok(Some(Account {
                phone,
                name,
                email,
                profiles,
            }))
        }
        None => Ok(None),
    }
}

pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT phone FROM accounts ORDER BY phone")?;
    let phones = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut accounts = Vec::with_capacity(phones.len());
    for phone in phones {
        if let Some(account) = get_account(conn, &phone)? {
            accounts.push(account);
        }
    }
    Ok(accounts)
}

/// Append a profile to an account. Returns `None` if the account is unknown.
pub fn add_profile(
    conn: &Connection,
    phone: &str,
    profile: &Profile,
) -> Result<Option<StoredProfile>, DatabaseError> {
    let phone = normalize_phone(phone);
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM accounts WHERE phone = ?1)",
        [phone],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(None);
    }

    let stored = StoredProfile {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now().to_rfc3339(),
        profile: profile.clone(),
    };
    let data = serde_json::to_string(&stored.profile).map_err(|e| DatabaseError::CorruptValue {
        field: "profiles.data".into(),
        reason: e.to_string(),
    })?;

    conn.execute(
        "INSERT INTO profiles (id, phone, created_at, seq, data)
         VALUES (?1, ?2, ?3,
                 (SELECT COALESCE(MAX(seq), 0) + 1 FROM profiles WHERE phone = ?2),
                 ?4)",
        params![stored.id.to_string(), phone, stored.created_at, data],
    )?;

    tracing::debug!(profile_id = %stored.id, "Profile stored");
    Ok(Some(stored))
}

pub fn get_profile(
    conn: &Connection,
    phone: &str,
    profile_id: &Uuid,
) -> Result<Option<StoredProfile>, DatabaseError> {
    let phone = normalize_phone(phone);
    let row = conn
        .query_row(
            "SELECT id, created_at, data FROM profiles WHERE phone = ?1 AND id = ?2",
            params![phone, profile_id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    row.map(|(id, created_at, data)| stored_profile_from_row(id, created_at, data))
        .transpose()
}

fn get_profiles(conn: &Connection, phone: &str) -> Result<Vec<StoredProfile>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, data FROM profiles WHERE phone = ?1 ORDER BY seq",
    )?;

    let rows = stmt.query_map([phone], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut profiles = Vec::new();
    for row in rows {
        let (id, created_at, data) = row?;
        profiles.push(stored_profile_from_row(id, created_at, data)?);
    }
    Ok(profiles)
}

fn stored_profile_from_row(
    id: String,
    created_at: String,
    data: String,
) -> Result<StoredProfile, DatabaseError> {
    Ok(StoredProfile {
        id: Uuid::parse_str(&id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        created_at,
        profile: serde_json::from_str(&data).map_err(|e| DatabaseError::CorruptValue {
            field: "profiles.data".into(),
            reason: e.to_string(),
        })?,
    })
}
