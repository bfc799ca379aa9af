use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::tx_repo;
use crate::error::{CircleError, CircleResult};
use crate::model::{BlockHeight, Principal, Receipt, TxContext, TxResult};
use crate::ops::circle_ops;
use crate::registry::CircleRegistry;
use crate::validation;

pub const CREATE_CIRCLE: &str = "create-circle";

/// Ledger-style execution environment around a registry.
///
/// Every public call is a transaction mined into its own block: the height
/// advances by one, the call runs to completion at that height, and a receipt
/// is recorded. Failed calls still consume their block but leave the
/// registry untouched. Read-only calls go straight to [`Chain::registry`].
pub struct Chain {
    registry: CircleRegistry,
    height: BlockHeight,
}

impl Chain {
    /// Wraps `registry`. A file-backed store remembers its height, including
    /// empty blocks, and the chain resumes from there.
    pub fn new(registry: CircleRegistry, genesis_height: BlockHeight) -> CircleResult<Self> {
        let genesis_height = validation::block_height(genesis_height)?;
        let height = tip(registry.connection(), genesis_height)?;
        debug!(height = height.value(), "chain ready");
        Ok(Self { registry, height })
    }

    pub fn in_memory() -> CircleResult<Self> {
        Self::new(CircleRegistry::open_in_memory()?, BlockHeight::default())
    }

    pub fn registry(&self) -> &CircleRegistry {
        &self.registry
    }

    pub fn block_height(&self) -> BlockHeight {
        self.height
    }

    /// Advances the chain by `count` empty blocks. Fails, leaving the height
    /// unchanged, if that would pass [`BlockHeight::MAX`].
    pub fn mine_empty_blocks(&mut self, count: u64) -> CircleResult<BlockHeight> {
        let conn = self.registry.connection();
        let height = tip(conn, self.height)?.checked_add(count)?;
        tx_repo::set_chain_height(conn, height)?;

        self.height = height;
        debug!(height = height.value(), count, "mined empty blocks");
        Ok(height)
    }

    /// Submits `create-circle` as `sender`. Registry failures are reported in
    /// the receipt; only storage failures and an exhausted height come back
    /// as `Err`, in which case nothing was written.
    pub fn call_create_circle(&mut self, name: &str, sender: &Principal) -> CircleResult<Receipt> {
        let tx = self.registry.transaction()?;
        let ctx = TxContext::new(sender.clone(), tip(&tx, self.height)?.next()?);

        let result = match circle_ops::create_circle_in(&tx, name, &ctx) {
            Ok(id) => TxResult::Ok { value: id.value },
            Err(e) => match e.error_code() {
                Some(code) => TxResult::Err { code },
                None => return Err(e),
            },
        };

        let receipt = record(&tx, ctx, CREATE_CIRCLE, vec![name.to_string()], result)?;
        tx.commit()?;

        self.height = receipt.block_height;
        info!(
            tx_id = %receipt.tx_id,
            function = CREATE_CIRCLE,
            block_height = receipt.block_height.value(),
            ok = receipt.result.is_ok(),
            "transaction mined"
        );
        Ok(receipt)
    }

    pub fn receipts(&self) -> CircleResult<Vec<Receipt>> {
        tx_repo::find_all(self.registry.connection())
    }

    pub fn receipt(&self, tx_id: Uuid) -> CircleResult<Receipt> {
        tx_repo::find_by_id(self.registry.connection(), tx_id)?.ok_or_else(|| {
            CircleError::NotFound {
                entity_type: "Transaction".into(),
                id: tx_id.to_string(),
            }
        })
    }
}

/// The highest of `local` and the height stored by any handle on this database.
fn tip(conn: &Connection, local: BlockHeight) -> CircleResult<BlockHeight> {
    Ok(tx_repo::chain_height(conn)?.map_or(local, |stored| stored.max(local)))
}

/// Writes the receipt and the new chain height. Callers commit.
fn record(
    conn: &Connection,
    ctx: TxContext,
    function: &str,
    args: Vec<String>,
    result: TxResult,
) -> CircleResult<Receipt> {
    let receipt = Receipt {
        tx_id: Uuid::new_v4(),
        seq: tx_repo::last_seq(conn)? + 1,
        block_height: ctx.block_height,
        sender: ctx.sender,
        function: function.to_string(),
        args,
        result,
        submitted_at: Utc::now(),
    };
    tx_repo::insert(conn, &receipt)?;
    tx_repo::set_chain_height(conn, receipt.block_height)?;
    Ok(receipt)
}
