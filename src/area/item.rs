//! Item (object) field extraction.
//!
//! Block shape: `#<vnum>`, four tilde-terminated text fields, one
//! type/extra-flags/wear-flags line, then a free-order tail of `A` affect
//! lines, `E` extra-description blocks, and exactly one plain
//! value/weight/level line.

use log::{debug, warn};
use uuid::Uuid;

use crate::area::errors::AreaError;
use crate::area::scan::{vnum_of, Cursor};
use crate::area::types::{ExtraDescription, ItemRecord, TokenValue};
use crate::logutil::preview;

pub fn extract_item(group: &[String], id: Uuid, area_id: Uuid) -> Result<ItemRecord, AreaError> {
    let mut cursor = Cursor::new(group);

    let vnum = cursor
        .next()
        .and_then(vnum_of)
        .ok_or(AreaError::MissingVnum { entity: "item" })?;

    let mut text = |field: &'static str| -> Result<String, AreaError> {
        cursor.read_tilde_block().ok_or(AreaError::Truncated {
            entity: "item",
            vnum,
            field,
        })
    };
    let name = text("name")?;
    let short_descr = text("short description")?;
    let long_descr = text("long description")?;
    let description = text("description")?;

    let mut record = ItemRecord {
        id,
        area_id,
        vnum,
        name,
        short_descr,
        long_descr,
        description,
        item_type: TokenValue::Word("unknown".to_string()),
        extra_flags: TokenValue::Int(0),
        wear_flags: TokenValue::Int(0),
        value: None,
        weight: None,
        level: None,
        affect_data: Vec::new(),
        extra_descr: Vec::new(),
    };

    if let Some(line) = cursor.next() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 3 {
            record.item_type = TokenValue::coerce(tokens[0]);
            record.extra_flags = TokenValue::coerce(tokens[1]);
            record.wear_flags = TokenValue::coerce(tokens[2]);
        } else {
            warn!(
                "item #{}: invalid type/flags line, using defaults: {}",
                vnum,
                preview(line)
            );
        }
    }

    // Tail: affects, extra descriptions, and the single stats line, in
    // whatever order the original builder left them.
    while let Some(line) = cursor.next() {
        if line.starts_with('A') {
            record.affect_data.push(line.to_string());
        } else if line.starts_with('E') {
            let keyword = cursor.read_tilde_block().ok_or(AreaError::Truncated {
                entity: "item",
                vnum,
                field: "extra description keyword",
            })?;
            let description = cursor.read_tilde_block().ok_or(AreaError::Truncated {
                entity: "item",
                vnum,
                field: "extra description text",
            })?;
            record.extra_descr.push(ExtraDescription {
                keyword,
                description,
            });
        } else {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() >= 3 {
                if record.value.is_none() {
                    record.value = Some(TokenValue::coerce(tokens[0]));
                    record.weight = Some(TokenValue::coerce(tokens[1]));
                    record.level = Some(TokenValue::coerce(tokens[2]));
                } else {
                    debug!("item #{}: extra stats line ignored: {}", vnum, preview(line));
                }
            }
            // A short plain line leaves the stats unset rather than
            // half-written.
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    fn extract(raw: &[&str]) -> Result<ItemRecord, AreaError> {
        extract_item(&group(raw), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn item_with_stats_affects_and_extras() {
        let item = extract(&[
            "#3050",
            "sword long~",
            "a long sword~",
            "A long sword lies here.~",
            "~",
            "5 AB 1",
            "1 8 0",
            "A",
            "E",
            "sword~",
            "It has seen better days.~",
        ])
        .unwrap();
        assert_eq!(item.vnum, 3050);
        assert_eq!(item.item_type, TokenValue::Int(5));
        assert_eq!(item.extra_flags, TokenValue::Word("AB".into()));
        assert_eq!(item.value, Some(TokenValue::Int(1)));
        assert_eq!(item.weight, Some(TokenValue::Int(8)));
        assert_eq!(item.level, Some(TokenValue::Int(0)));
        assert_eq!(item.affect_data, vec!["A".to_string()]);
        assert_eq!(item.extra_descr.len(), 1);
    }

    #[test]
    fn only_first_stats_line_counts() {
        let item = extract(&[
            "#1", "n~", "s~", "l~", "d~", "5 0 0", "10 20 30", "40 50 60",
        ])
        .unwrap();
        assert_eq!(item.value, Some(TokenValue::Int(10)));
        assert_eq!(item.weight, Some(TokenValue::Int(20)));
    }

    #[test]
    fn short_stats_line_leaves_fields_unset() {
        let item = extract(&["#1", "n~", "s~", "l~", "d~", "5 0 0", "10 20"]).unwrap();
        assert_eq!(item.value, None);
        assert_eq!(item.weight, None);
        assert_eq!(item.level, None);
    }

    #[test]
    fn short_type_line_defaults() {
        let item = extract(&["#1", "n~", "s~", "l~", "d~", "5"]).unwrap();
        assert_eq!(item.item_type, TokenValue::Word("unknown".into()));
        assert_eq!(item.extra_flags, TokenValue::Int(0));
        assert_eq!(item.wear_flags, TokenValue::Int(0));
    }

    #[test]
    fn unterminated_field_drops_the_item() {
        let err = extract(&["#1", "n~", "s~", "l~", "dangling"]).unwrap_err();
        assert!(matches!(err, AreaError::Truncated { entity: "item", .. }));
    }
}
