use rusqlite::{params, Connection};

use crate::error::{CircleError, CircleResult};
use crate::model::{Circle, Id, Principal};

/// Appends `member` at the end of the circle's member list and bumps the
/// circle's stored member count. Run it inside a transaction so both land.
pub fn insert(conn: &Connection, circle_id: Id<Circle>, member: &Principal) -> CircleResult<()> {
    conn.execute(
        "INSERT INTO circle_members (circle_id, position, member)
         VALUES (?1, (SELECT COALESCE(MAX(position) + 1, 0) FROM circle_members WHERE circle_id = ?1), ?2)",
        params![circle_id.value as i64, member.as_str()],
    )?;
    conn.execute(
        "UPDATE circles SET member_count = member_count + 1 WHERE id = ?1",
        params![circle_id.value as i64],
    )?;
    Ok(())
}

/// Members in insertion order.
pub fn find_members(conn: &Connection, circle_id: Id<Circle>) -> CircleResult<Vec<Principal>> {
    let mut stmt = conn.prepare(
        "SELECT member FROM circle_members WHERE circle_id = ?1 ORDER BY position",
    )?;

    let raw = stmt
        .query_map(params![circle_id.value as i64], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|s| {
            Principal::try_from(s)
                .map_err(|e| CircleError::Other(format!("Stored member is malformed: {}", e)))
        })
        .collect()
}

pub fn is_member(conn: &Connection, circle_id: Id<Circle>, member: &Principal) -> CircleResult<bool> {
    let found: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM circle_members WHERE circle_id = ?1 AND member = ?2)",
        params![circle_id.value as i64, member.as_str()],
        |row| row.get(0),
    )?;
    Ok(found)
}

pub fn count(conn: &Connection, circle_id: Id<Circle>) -> CircleResult<u32> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM circle_members WHERE circle_id = ?1",
        params![circle_id.value as i64],
        |row| row.get(0),
    )?;
    Ok(n as u32)
}
