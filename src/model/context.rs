use serde::{Deserialize, Serialize};
use std::fmt;

use super::principal::Principal;
use crate::error::{CircleError, CircleResult};

/// Logical time: the height of the block a transaction executes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// Heights are stored as SQLite integers, which are signed 64-bit.
    pub const MAX: BlockHeight = BlockHeight(i64::MAX as u64);

    pub fn value(self) -> u64 {
        self.0
    }

    /// The height `blocks` blocks later. Fails instead of passing [`BlockHeight::MAX`].
    pub fn checked_add(self, blocks: u64) -> CircleResult<Self> {
        match self.0.checked_add(blocks) {
            Some(h) if h <= Self::MAX.0 => Ok(Self(h)),
            _ => Err(CircleError::invalid(
                "block height",
                format!("{} + {} exceeds the maximum height {}", self, blocks, Self::MAX),
            )),
        }
    }

    pub fn next(self) -> CircleResult<Self> {
        self.checked_add(1)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The execution context of a state-changing call: who sent it, and at
/// which block height it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxContext {
    pub sender: Principal,
    pub block_height: BlockHeight,
}

impl TxContext {
    pub fn new(sender: Principal, block_height: BlockHeight) -> Self {
        Self {
            sender,
            block_height,
        }
    }
}
