use std::num::IntErrorKind;

use crate::error::InputError;
use crate::game::{MAX_WIDTH, MIN_WIDTH};

fn parse_number(text: &str) -> Result<i64, InputError> {
    let trimmed = text.trim();
    match trimmed.parse::<i64>() {
        Ok(value) => Ok(value),
        // Still a number, just too large; the range checks reject it.
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(i64::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Ok(i64::MIN),
        Err(_) => Err(InputError::NotANumber(trimmed.to_string())),
    }
}

/// Parse a typed board width.
pub fn parse_width(text: &str) -> Result<usize, InputError> {
    let value = parse_number(text)?;
    if value < MIN_WIDTH as i64 || value > MAX_WIDTH as i64 {
        return Err(InputError::SizeOutOfRange {
            value,
            min: MIN_WIDTH,
            max: MAX_WIDTH,
        });
    }
    Ok(value as usize)
}

/// Parse a typed 1-based column number into a 0-based column index.
pub fn parse_column(text: &str, width: usize) -> Result<usize, InputError> {
    let value = parse_number(text)?;
    if value < 1 || value > width as i64 {
        return Err(InputError::ColumnOutOfRange { value, max: width });
    }
    Ok(value as usize - 1)
}
