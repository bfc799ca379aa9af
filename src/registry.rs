use std::path::Path;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::debug;

use crate::config::StorageConfig;
use crate::db::schema;
use crate::error::CircleResult;
use crate::model::{Circle, CircleView, Id, Principal, TxContext};
use crate::ops::circle_ops;
use crate::queries::circle_queries;

/// The circle registry: sole owner of all circle records, memberships and
/// the circle counter.
///
/// Writes take `&mut self`, so a single instance applies them one at a time.
/// To share a registry between threads, wrap it in a `Mutex`.
pub struct CircleRegistry {
    conn: Connection,
}

impl CircleRegistry {
    pub fn open_in_memory() -> CircleResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Open (or create) a registry backed by the database file at `path`.
    pub fn open(path: &Path) -> CircleResult<Self> {
        debug!(path = %path.display(), "opening registry database");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_with(storage: &StorageConfig) -> CircleResult<Self> {
        match storage {
            StorageConfig::Memory => Self::open_in_memory(),
            StorageConfig::File { path } => Self::open(path),
        }
    }

    pub fn from_connection(conn: Connection) -> CircleResult<Self> {
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Starts a write transaction. It takes the database write lock up front,
    /// so two handles on one file cannot interleave their writes.
    pub fn transaction(&mut self) -> CircleResult<Transaction<'_>> {
        Ok(self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    pub fn create_circle(&mut self, name: &str, ctx: &TxContext) -> CircleResult<Id<Circle>> {
        circle_ops::create_circle(&mut self.conn, name, ctx)
    }

    pub fn get_circle(&self, circle_id: Id<Circle>) -> CircleResult<CircleView> {
        circle_queries::get_circle(&self.conn, circle_id)
    }

    pub fn get_circle_info(&self, circle_id: Id<Circle>) -> CircleResult<Circle> {
        circle_queries::get_circle_info(&self.conn, circle_id)
    }

    pub fn is_circle_member(&self, circle_id: Id<Circle>, identity: &Principal) -> CircleResult<bool> {
        circle_queries::is_circle_member(&self.conn, circle_id, identity)
    }

    pub fn get_circle_members(&self, circle_id: Id<Circle>) -> CircleResult<Vec<Principal>> {
        circle_queries::get_circle_members(&self.conn, circle_id)
    }

    pub fn get_total_circles(&self) -> CircleResult<u64> {
        circle_queries::get_total_circles(&self.conn)
    }

    pub fn get_user_circles(&self, identity: &Principal) -> CircleResult<Vec<Circle>> {
        circle_queries::get_user_circles(&self.conn, identity)
    }
}
