use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::BlockHeight;
use super::principal::Principal;
use crate::error::ErrorCode;

/// Outcome of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TxResult {
    Ok { value: u64 },
    Err { code: ErrorCode },
}

impl TxResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, TxResult::Ok { .. })
    }

    pub fn ok_value(&self) -> Option<u64> {
        match self {
            TxResult::Ok { value } => Some(*value),
            TxResult::Err { .. } => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            TxResult::Ok { .. } => None,
            TxResult::Err { code } => Some(*code),
        }
    }
}

/// Record of one submitted public call, mined into its own block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_id: Uuid,
    /// Position in the chain's total order of submissions, starting at 1.
    pub seq: u64,
    pub block_height: BlockHeight,
    pub sender: Principal,
    pub function: String,
    pub args: Vec<String>,
    pub result: TxResult,
    pub submitted_at: DateTime<Utc>,
}
