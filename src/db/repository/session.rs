use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{normalize_phone, Session};

/// Select the current account, and optionally one of its profiles.
pub fn set_current_session(
    conn: &Connection,
    phone: &str,
    profile_id: Option<&Uuid>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE current_session SET phone = ?1, profile_id = ?2 WHERE id = 1",
        params![normalize_phone(phone), profile_id.map(|id| id.to_string())],
    )?;
    Ok(())
}

pub fn get_current_session(conn: &Connection) -> Result<Session, DatabaseError> {
    let (phone, profile_id) = conn.query_row(
        "SELECT phone, profile_id FROM current_session WHERE id = 1",
        [],
        |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, Option<String>>(1)?,
            ))
        },
    )?;

    Ok(Session {
        phone,
        profile_id: profile_id
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
    })
}

pub fn clear_session(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE current_session SET phone = NULL, profile_id = NULL WHERE id = 1",
        [],
    )?;
    Ok(())
}
