use crate::error::{CircleError, CircleResult};
use crate::model::BlockHeight;

pub const MAX_CIRCLE_NAME_LEN: usize = 50;
pub const MAX_PRINCIPAL_LEN: usize = 128;

/// Validates a circle name: 1 to 50 printable ASCII characters.
/// The name is returned untouched; surrounding spaces are part of the name.
pub fn circle_name(value: &str) -> CircleResult<&str> {
    if value.is_empty() {
        return Err(CircleError::invalid("name", "must not be empty"));
    }
    if !value.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return Err(CircleError::invalid(
            "name",
            "must contain only printable ASCII characters",
        ));
    }
    if value.len() > MAX_CIRCLE_NAME_LEN {
        return Err(CircleError::invalid(
            "name",
            format!("must be at most {} characters", MAX_CIRCLE_NAME_LEN),
        ));
    }
    Ok(value)
}

/// Validates a caller identity: non-empty, bounded, ASCII graphic characters only.
pub fn principal(value: &str) -> CircleResult<&str> {
    if value.is_empty() {
        return Err(CircleError::invalid("principal", "must not be empty"));
    }
    if value.len() > MAX_PRINCIPAL_LEN {
        return Err(CircleError::invalid(
            "principal",
            format!("must be at most {} characters", MAX_PRINCIPAL_LEN),
        ));
    }
    if !value.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(CircleError::invalid(
            "principal",
            "must not contain whitespace or non-ASCII characters",
        ));
    }
    Ok(value)
}

/// Validates that a circle id can refer to an allocated circle (ids start at 1).
pub fn circle_id(value: u64) -> CircleResult<u64> {
    if value == 0 {
        Err(CircleError::circle_not_found(value))
    } else {
        Ok(value)
    }
}

/// Validates that a block height fits the stored integer range.
pub fn block_height(value: BlockHeight) -> CircleResult<BlockHeight> {
    if value > BlockHeight::MAX {
        return Err(CircleError::invalid(
            "block height",
            format!("must be at most {}", BlockHeight::MAX),
        ));
    }
    Ok(value)
}
