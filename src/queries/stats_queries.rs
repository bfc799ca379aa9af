use std::collections::HashSet;

use rusqlite::Connection;

use crate::db::{circle_repo, member_repo};
use crate::error::CircleResult;
use crate::queries::circle_queries;
use crate::validation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_circles: u64,
    pub active_circles: usize,
    pub distinct_members: usize,
    pub distinct_creators: usize,
    /// The most recently created circle's name and creation height.
    pub latest: Option<(String, u64)>,
}

pub fn stats(conn: &Connection) -> CircleResult<RegistryStats> {
    let circles = circle_repo::find_all(conn)?;

    let mut members = HashSet::new();
    for circle in &circles {
        members.extend(member_repo::find_members(conn, circle.id)?);
    }
    let creators: HashSet<_> = circles.iter().map(|c| c.creator.clone()).collect();

    Ok(RegistryStats {
        total_circles: circle_queries::get_total_circles(conn)?,
        active_circles: circles.iter().filter(|c| c.is_active).count(),
        distinct_members: members.len(),
        distinct_creators: creators.len(),
        latest: circles
            .last()
            .map(|c| (c.name.clone(), c.created_at.value())),
    })
}

/// Checks every registry invariant against the stored state and returns a
/// description of each violation. An empty list means the registry is consistent.
pub fn verify_invariants(conn: &Connection) -> CircleResult<Vec<String>> {
    let mut violations = Vec::new();
    let circles = circle_repo::find_all(conn)?;
    let total = circle_queries::get_total_circles(conn)?;

    if circles.len() as u64 != total {
        violations.push(format!(
            "counter reports {} circles but {} are stored",
            total,
            circles.len()
        ));
    }

    for (expected, circle) in (1u64..).zip(&circles) {
        if circle.id.value != expected {
            violations.push(format!("expected circle id {}, found {}", expected, circle.id));
        }

        let members = member_repo::find_members(conn, circle.id)?;
        if circle.member_count as usize != members.len() {
            violations.push(format!(
                "circle {} reports {} members but lists {}",
                circle.id,
                circle.member_count,
                members.len()
            ));
        }
        if !members.contains(&circle.creator) {
            violations.push(format!("creator of circle {} is not a member", circle.id));
        }
        if validation::circle_name(&circle.name).is_err() {
            violations.push(format!("circle {} has an invalid name", circle.id));
        }
    }

    Ok(violations)
}
