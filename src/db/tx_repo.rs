use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::{CircleError, CircleResult, ErrorCode};
use crate::model::{BlockHeight, Principal, Receipt, TxResult};
use crate::validation;

type ReceiptRow = (String, i64, i64, String, String, String, Option<i64>, Option<String>, String);

const SELECT_RECEIPT: &str = "
    SELECT tx_id, seq, block_height, sender, function, args, ok_value, error_code, submitted_at
    FROM transactions";

pub fn insert(conn: &Connection, receipt: &Receipt) -> CircleResult<()> {
    let block_height = validation::block_height(receipt.block_height)?;
    let (ok_value, error_code) = match receipt.result {
        TxResult::Ok { value } => (Some(value as i64), None),
        TxResult::Err { code } => (None, Some(code.as_str())),
    };

    conn.execute(
        "INSERT INTO transactions (tx_id, seq, block_height, sender, function, args, ok_value, error_code, submitted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            receipt.tx_id.to_string(),
            receipt.seq as i64,
            block_height.value() as i64,
            receipt.sender.as_str(),
            receipt.function,
            serde_json::to_string(&receipt.args)?,
            ok_value,
            error_code,
            receipt.submitted_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, tx_id: Uuid) -> CircleResult<Option<Receipt>> {
    let mut stmt = conn.prepare(&format!("{} WHERE tx_id = ?1", SELECT_RECEIPT))?;
    let row = stmt
        .query_row(params![tx_id.to_string()], read_row)
        .optional()?;
    row.map(into_receipt).transpose()
}

/// All receipts in submission order.
pub fn find_all(conn: &Connection) -> CircleResult<Vec<Receipt>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY seq", SELECT_RECEIPT))?;
    let rows: Vec<ReceiptRow> = stmt
        .query_map([], read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(into_receipt).collect()
}

pub fn last_seq(conn: &Connection) -> CircleResult<u64> {
    let seq: i64 = conn.query_row("SELECT COALESCE(MAX(seq), 0) FROM transactions", [], |row| {
        row.get(0)
    })?;
    Ok(seq as u64)
}

/// The chain height last written by [`set_chain_height`], if any block was mined.
pub fn chain_height(conn: &Connection) -> CircleResult<Option<BlockHeight>> {
    let height: Option<i64> = conn
        .query_row(
            "SELECT value FROM registry_meta WHERE key = 'block_height'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(height.map(|h| BlockHeight(h as u64)))
}

pub fn set_chain_height(conn: &Connection, height: BlockHeight) -> CircleResult<()> {
    let height = validation::block_height(height)?;
    conn.execute(
        "INSERT OR REPLACE INTO registry_meta (key, value) VALUES ('block_height', ?1)",
        params![height.value() as i64],
    )?;
    Ok(())
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReceiptRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn into_receipt(row: ReceiptRow) -> CircleResult<Receipt> {
    let (tx_id, seq, block_height, sender, function, args, ok_value, error_code, submitted_at) = row;

    let tx_id = Uuid::parse_str(&tx_id)
        .map_err(|e| CircleError::Other(format!("Invalid UUID: {}", e)))?;
    let sender = Principal::try_from(sender)
        .map_err(|e| CircleError::Other(format!("Stored sender is malformed: {}", e)))?;
    let submitted_at = DateTime::parse_from_rfc3339(&submitted_at)
        .map_err(|e| CircleError::Other(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc);

    let result = match (ok_value, error_code.as_deref()) {
        (Some(value), None) => TxResult::Ok { value: value as u64 },
        (None, Some("ERR_NOT_FOUND")) => TxResult::Err { code: ErrorCode::NotFound },
        (None, Some("ERR_INVALID_INPUT")) => TxResult::Err { code: ErrorCode::InvalidInput },
        other => {
            return Err(CircleError::Other(format!(
                "Transaction {} has an invalid result: {:?}",
                tx_id, other
            )))
        }
    };

    Ok(Receipt {
        tx_id,
        seq: seq as u64,
        block_height: BlockHeight(block_height as u64),
        sender,
        function,
        args: serde_json::from_str(&args)?,
        result,
        submitted_at,
    })
}
