use rusqlite::{Connection, Transaction};
use tracing::{debug, info};

use crate::db::{circle_repo, member_repo};
use crate::error::CircleResult;
use crate::model::{Circle, Id, TxContext};
use crate::validation;

/// Creates a circle named `name` owned by the transaction sender, who becomes
/// its first and only member. The circle record, the membership row and the
/// counter bump commit together or not at all.
pub fn create_circle(conn: &mut Connection, name: &str, ctx: &TxContext) -> CircleResult<Id<Circle>> {
    let tx = conn.transaction()?;
    let id = create_circle_in(&tx, name, ctx)?;
    tx.commit()?;

    info!(
        circle_id = id.value,
        creator = %ctx.sender,
        block_height = ctx.block_height.value(),
        "circle created"
    );
    Ok(id)
}

/// Stages a circle inside `tx` without committing, so callers can make more
/// writes in the same transaction. Inputs are validated before any write.
pub fn create_circle_in(tx: &Transaction<'_>, name: &str, ctx: &TxContext) -> CircleResult<Id<Circle>> {
    let checked = validation::circle_name(name)
        .and_then(|n| validation::block_height(ctx.block_height).map(|_| n));
    let valid_name = match checked {
        Ok(n) => n,
        Err(e) => {
            debug!(sender = %ctx.sender, error = %e, "rejected create-circle");
            return Err(e);
        }
    };

    let id = circle_repo::next_circle_id(tx)?;
    let circle = Circle::create(id, valid_name.to_string(), ctx);

    circle_repo::insert(tx, &circle)?;
    member_repo::insert(tx, id, &ctx.sender)?;
    circle_repo::set_next_circle_id(tx, id.next())?;

    Ok(id)
}
