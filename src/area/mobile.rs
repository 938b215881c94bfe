//! Mobile (NPC) field extraction.
//!
//! Block shape: `#<vnum>`, four tilde-terminated text fields (name, short,
//! long, full description; the latter two usually span lines), one
//! act/affect/alignment line, one nine-token attributes line.

use log::warn;
use uuid::Uuid;

use crate::area::errors::AreaError;
use crate::area::scan::{parse_signed_or, vnum_of, Cursor};
use crate::area::types::MobileRecord;
use crate::logutil::preview;

pub fn extract_mobile(group: &[String], id: Uuid, area_id: Uuid) -> Result<MobileRecord, AreaError> {
    let mut cursor = Cursor::new(group);

    let vnum = cursor
        .next()
        .and_then(vnum_of)
        .ok_or(AreaError::MissingVnum { entity: "mobile" })?;

    let mut text = |field: &'static str| -> Result<String, AreaError> {
        cursor.read_tilde_block().ok_or(AreaError::Truncated {
            entity: "mobile",
            vnum,
            field,
        })
    };
    let name = text("name")?;
    let short_descr = text("short description")?;
    let long_descr = text("long description")?;
    let description = text("description")?;

    let mut record = MobileRecord {
        id,
        area_id,
        vnum,
        name,
        short_descr,
        long_descr,
        description,
        act_flags: 0,
        affect_flags: 0,
        alignment: 0,
        level: 0,
        hitroll: 0,
        damage: "0d0+0".to_string(),
        race: "unknown".to_string(),
        sex: 0,
        gold: 0,
        start_pos: 0,
        default_pos: 0,
        flags: 0,
    };

    // Act flags, affect flags, alignment. A short line or a non-numeric
    // first token means some ancient variant wrote letter flags here;
    // those collapse to 0/0/0.
    if let Some(line) = cursor.next() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 3 && tokens[0].bytes().all(|b| b.is_ascii_digit()) {
            record.act_flags = parse_signed_or(tokens[0], 0);
            record.affect_flags = parse_signed_or(tokens[1], 0);
            record.alignment = parse_signed_or(tokens[2], 0);
        } else {
            warn!(
                "mobile #{}: invalid flags line, using defaults: {}",
                vnum,
                preview(line)
            );
        }
    }

    // Level, hitroll, damage, race, sex, gold, start_pos, default_pos,
    // flags. Exactly nine tokens or the whole line defaults; a partial
    // write would be worse than none.
    if let Some(line) = cursor.next() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() == 9 {
            record.level = parse_signed_or(tokens[0], 0);
            record.hitroll = parse_signed_or(tokens[1], 0);
            record.damage = tokens[2].to_string();
            record.race = tokens[3].to_string();
            record.sex = parse_signed_or(tokens[4], 0);
            record.gold = parse_signed_or(tokens[5], 0);
            record.start_pos = parse_signed_or(tokens[6], 0);
            record.default_pos = parse_signed_or(tokens[7], 0);
            record.flags = parse_signed_or(tokens[8], 0);
        } else {
            warn!(
                "mobile #{}: invalid attributes line, using defaults: {}",
                vnum,
                preview(line)
            );
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

    fn extract(raw: &[&str]) -> Result<MobileRecord, AreaError> {
        extract_mobile(&group(raw), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn full_mobile_block() {
        let mob = extract(&[
            "#3000",
            "wizard mage~",
            "the wizard~",
            "A wizard walks around behind the counter.",
            "~",
            "The wizard looks old and senile.",
            "~",
            "64 0 -200",
            "20 15 4d8+40 human 1 12000 8 8 0",
        ])
        .unwrap();
        assert_eq!(mob.vnum, 3000);
        assert_eq!(mob.name, "wizard mage");
        assert_eq!(mob.act_flags, 64);
        assert_eq!(mob.alignment, -200);
        assert_eq!(mob.level, 20);
        assert_eq!(mob.damage, "4d8+40");
        assert_eq!(mob.race, "human");
        assert_eq!(mob.gold, 12000);
    }

    #[test]
    fn letter_act_flags_default_to_zero() {
        let mob = extract(&[
            "#1", "n~", "s~", "l", "~", "f", "~", "AGH 0 0", "1 1 1d1+0 elf 0 0 8 8 0",
        ])
        .unwrap();
        assert_eq!(mob.act_flags, 0);
        assert_eq!(mob.affect_flags, 0);
        assert_eq!(mob.alignment, 0);
        assert_eq!(mob.level, 1);
    }

    #[test]
    fn wrong_attribute_count_defaults_whole_line() {
        let mob = extract(&[
            "#1", "n~", "s~", "l", "~", "f", "~", "0 0 0", "5 3 2d6+1 dwarf",
        ])
        .unwrap();
        assert_eq!(mob.level, 0);
        assert_eq!(mob.damage, "0d0+0");
        assert_eq!(mob.race, "unknown");
    }

    #[test]
    fn missing_trailing_lines_keep_defaults() {
        let mob = extract(&["#1", "n~", "s~", "l", "~", "f", "~"]).unwrap();
        assert_eq!(mob.act_flags, 0);
        assert_eq!(mob.level, 0);
    }

    #[test]
    fn unterminated_description_drops_the_mobile() {
        let err = extract(&["#1", "n~", "s~", "no tilde ever"]).unwrap_err();
        assert!(matches!(err, AreaError::Truncated { entity: "mobile", .. }));
    }
}
