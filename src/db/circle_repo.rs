use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{CircleError, CircleResult};
use crate::model::{BlockHeight, Circle, Id, Principal};

const SELECT_CIRCLE: &str = "
    SELECT c.id, c.name, c.creator, c.created_at, c.is_active, c.member_count
    FROM circles c";

type CircleRow = (i64, String, String, i64, i32, i64);

pub fn next_circle_id(conn: &Connection) -> CircleResult<Id<Circle>> {
    let value: i64 = conn.query_row(
        "SELECT value FROM registry_meta WHERE key = 'next_circle_id'",
        [],
        |row| row.get(0),
    )?;
    Ok(Id::new(value as u64))
}

pub fn set_next_circle_id(conn: &Connection, id: Id<Circle>) -> CircleResult<()> {
    conn.execute(
        "UPDATE registry_meta SET value = ?1 WHERE key = 'next_circle_id'",
        params![id.value as i64],
    )?;
    Ok(())
}

/// Inserts the circle record with a member count of zero. The count is
/// kept by [`member_repo::insert`](super::member_repo::insert).
pub fn insert(conn: &Connection, circle: &Circle) -> CircleResult<()> {
    conn.execute(
        "INSERT INTO circles (id, name, creator, created_at, member_count, is_active)
         VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        params![
            circle.id.value as i64,
            circle.name,
            circle.creator.as_str(),
            circle.created_at.value() as i64,
            circle.is_active as i32,
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Circle>) -> CircleResult<Option<Circle>> {
    let mut stmt = conn.prepare(&format!("{} WHERE c.id = ?1", SELECT_CIRCLE))?;

    let row = stmt
        .query_row(params![id.value as i64], read_row)
        .optional()?;

    row.map(into_circle).transpose()
}

/// Circles whose member list contains `member`, by id ascending.
pub fn find_for_member(conn: &Connection, member: &Principal) -> CircleResult<Vec<Circle>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE c.id IN (SELECT circle_id FROM circle_members WHERE member = ?1) ORDER BY c.id",
        SELECT_CIRCLE
    ))?;

    let rows: Vec<CircleRow> = stmt
        .query_map(params![member.as_str()], read_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(into_circle).collect()
}

pub fn find_all(conn: &Connection) -> CircleResult<Vec<Circle>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY c.id", SELECT_CIRCLE))?;

    let rows: Vec<CircleRow> = stmt
        .query_map([], read_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(into_circle).collect()
}

pub fn count(conn: &Connection) -> CircleResult<u64> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM circles", [], |row| row.get(0))?;
    Ok(n as u64)
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CircleRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_circle(row: CircleRow) -> CircleResult<Circle> {
    let (id, name, creator, created_at, is_active, member_count) = row;
    let creator = Principal::try_from(creator).map_err(|e| {
        CircleError::Other(format!("Stored creator of circle {} is malformed: {}", id, e))
    })?;
    Ok(Circle {
        id: Id::new(id as u64),
        name,
        creator,
        created_at: BlockHeight(created_at as u64),
        member_count: member_count as u32,
        is_active: is_active != 0,
    })
}
