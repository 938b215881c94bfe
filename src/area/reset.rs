//! Reset instruction extraction.
//!
//! One reset per line: a single-letter type code, a run of arguments, and
//! sometimes a trailing `*` comment. The argument columns vary per type
//! code and the old engine never validated them, so they are carried as
//! tagged tokens instead of being forced into one shape.

use uuid::Uuid;

use crate::area::errors::AreaError;
use crate::area::types::{ResetRecord, TokenValue};
use crate::logutil::preview;

pub fn extract_reset(line: &str, id: Uuid, area_id: Uuid) -> Result<ResetRecord, AreaError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(AreaError::InvalidShape {
            entity: "reset",
            reason: format!("{} token(s) in: {}", tokens.len(), preview(line)),
        });
    }

    // The final token is a comment only when it carries the `*` marker;
    // otherwise it is trailing noise the old loaders ignored too.
    let last = tokens[tokens.len() - 1];
    let comment = if last.starts_with('*') {
        last.to_string()
    } else {
        String::new()
    };

    Ok(ResetRecord {
        id,
        area_id,
        reset_type: tokens[0].to_string(),
        args: tokens[1..tokens.len() - 1]
            .iter()
            .map(|t| TokenValue::coerce(t))
            .collect(),
        comment,
    })
}
