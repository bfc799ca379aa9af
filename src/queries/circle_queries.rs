use rusqlite::Connection;

use crate::db::{circle_repo, member_repo};
use crate::error::{CircleError, CircleResult};
use crate::model::{Circle, CircleView, Id, Principal};
use crate::validation;

/// Full circle record, including its id.
pub fn get_circle_info(conn: &Connection, circle_id: Id<Circle>) -> CircleResult<Circle> {
    validation::circle_id(circle_id.value)?;
    circle_repo::find_by_id(conn, circle_id)?
        .ok_or_else(|| CircleError::circle_not_found(circle_id))
}

pub fn get_circle(conn: &Connection, circle_id: Id<Circle>) -> CircleResult<CircleView> {
    get_circle_info(conn, circle_id).map(|c| c.view())
}

/// `Ok(false)` for a non-member; `NotFound` only when the circle itself is unknown.
pub fn is_circle_member(
    conn: &Connection,
    circle_id: Id<Circle>,
    identity: &Principal,
) -> CircleResult<bool> {
    ensure_exists(conn, circle_id)?;
    member_repo::is_member(conn, circle_id, identity)
}

pub fn get_circle_members(conn: &Connection, circle_id: Id<Circle>) -> CircleResult<Vec<Principal>> {
    ensure_exists(conn, circle_id)?;
    member_repo::find_members(conn, circle_id)
}

/// Number of circles ever created. Equals the next id to be assigned minus one.
pub fn get_total_circles(conn: &Connection) -> CircleResult<u64> {
    Ok(circle_repo::next_circle_id(conn)?.value - 1)
}

/// Circles `identity` belongs to, ordered by id.
pub fn get_user_circles(conn: &Connection, identity: &Principal) -> CircleResult<Vec<Circle>> {
    circle_repo::find_for_member(conn, identity)
}

fn ensure_exists(conn: &Connection, circle_id: Id<Circle>) -> CircleResult<()> {
    get_circle_info(conn, circle_id).map(|_| ())
}
