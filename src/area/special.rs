//! Special-function binding extraction.
//!
//! One binding per line: a leading type letter (always `M` in surviving
//! files), the owning mobile's VNUM, the engine hook name, and an optional
//! `*` comment.

use log::warn;
use uuid::Uuid;

use crate::area::errors::AreaError;
use crate::area::types::SpecialRecord;
use crate::logutil::preview;

pub fn extract_special(line: &str, id: Uuid, area_id: Uuid) -> Result<SpecialRecord, AreaError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(AreaError::InvalidShape {
            entity: "special",
            reason: format!("{} token(s) in: {}", tokens.len(), preview(line)),
        });
    }

    let mob_vnum = match tokens[1].parse::<i64>() {
        Ok(vnum) => Some(vnum),
        Err(_) => {
            warn!(
                "special: non-numeric mobile vnum '{}' in: {}",
                tokens[1],
                preview(line)
            );
            None
        }
    };

    Ok(SpecialRecord {
        id,
        area_id,
        mob_vnum,
        function: tokens[2].to_string(),
        comment: tokens[3..]
            .join(" ")
            .trim_start_matches('*')
            .trim()
            .to_string(),
    })
}
