//! Room field extraction.
//!
//! A room block reads as: `#<vnum>`, tilde-terminated name, tilde-terminated
//! description, one flags line (`<tele_delay> <room_flags> <sector_type>`),
//! then any number of `D<n>` exit blocks and `E` extra-description blocks,
//! closed by `S`. Thirty years of hand-edited files means every field has a
//! malformed variant in the wild; everything degrades to a default except a
//! missing tilde terminator, which drops the one room.

use log::{debug, warn};
use std::collections::HashMap;
use uuid::Uuid;

use crate::area::errors::AreaError;
use crate::area::scan::{parse_signed_or, parse_unsigned_or, vnum_of, Cursor};
use crate::area::types::{Direction, ExitRecord, ExtraDescription, RoomRecord, SectorType};
use crate::logutil::preview;

/// Extract one room from its line group. The id comes from the allocation
/// pass so that exits elsewhere in the file can already refer to it.
pub fn extract_room(group: &[String], id: Uuid, area_id: Uuid) -> Result<RoomRecord, AreaError> {
    let mut cursor = Cursor::new(group);

    let vnum = cursor
        .next()
        .and_then(vnum_of)
        .ok_or(AreaError::MissingVnum { entity: "room" })?;

    let name = cursor.read_tilde_block().ok_or(AreaError::Truncated {
        entity: "room",
        vnum,
        field: "name",
    })?;
    let description = cursor.read_tilde_block().ok_or(AreaError::Truncated {
        entity: "room",
        vnum,
        field: "description",
    })?;

    let flags_line = cursor.next().ok_or(AreaError::Truncated {
        entity: "room",
        vnum,
        field: "flags line",
    })?;
    let (tele_delay, room_flags, sector_type) = parse_flags_line(flags_line, vnum);

    let mut exits: HashMap<Direction, ExitRecord> = HashMap::new();
    let mut extra_descr: Vec<ExtraDescription> = Vec::new();

    while let Some(line) = cursor.next() {
        if line == "S" {
            break;
        }
        if let Some(code) = exit_code(line) {
            let exit = parse_exit(&mut cursor, vnum)?;
            match Direction::from_code(code) {
                Some(direction) => {
                    exits.insert(direction, exit);
                }
                None => warn!("room #{}: ignoring exit with direction code {}", vnum, code),
            }
        } else if line == "E" {
            let keyword = cursor.read_tilde_block().ok_or(AreaError::Truncated {
                entity: "room",
                vnum,
                field: "extra description keyword",
            })?;
            let description = cursor.read_tilde_block().ok_or(AreaError::Truncated {
                entity: "room",
                vnum,
                field: "extra description text",
            })?;
            extra_descr.push(ExtraDescription {
                keyword,
                description,
            });
        } else {
            // Unknown legacy tokens (old door states, stray blanks) never
            // abort a room.
            debug!("room #{}: skipping line: {}", vnum, preview(line));
        }
    }

    Ok(RoomRecord {
        id,
        area_id,
        vnum,
        name,
        description,
        tele_delay,
        room_flags,
        sector_type,
        exits,
        extra_descr,
    })
}

/// `D<digit>` opens an exit block; the digit is the direction code.
fn exit_code(line: &str) -> Option<u32> {
    let rest = line.strip_prefix('D')?;
    rest.chars().next().filter(|c| c.is_ascii_digit())?.to_digit(10)
}

fn parse_flags_line(line: &str, vnum: i64) -> (i64, u32, SectorType) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        warn!(
            "room #{}: invalid flags line, using defaults: {}",
            vnum,
            preview(line)
        );
        return (0, 0, SectorType::Inside);
    }
    let tele_delay = parse_unsigned_or(tokens[0], 0);
    let room_flags = parse_room_flags(tokens[1], vnum);
    let sector_type = parse_sector_type(tokens[2], vnum);
    (tele_delay, room_flags, sector_type)
}

/// Decode a room-flags token: a numeric token is taken literally, otherwise
/// each letter A-Z sets its bit (`1 << (letter - 'A')`). The separators
/// `-`, `,` and `'` appear in hand-edited files and mean nothing.
pub(crate) fn parse_room_flags(token: &str, vnum: i64) -> u32 {
    if token.bytes().all(|b| b.is_ascii_digit()) && !token.is_empty() {
        return token.parse().unwrap_or_else(|_| {
            warn!("room #{}: room flags out of range: {}", vnum, token);
            0
        });
    }
    let mut flags = 0u32;
    for ch in token.chars() {
        match ch {
            '-' | ',' | '\'' => {}
            c if c.is_ascii_alphabetic() => {
                let letter = c.to_ascii_uppercase();
                flags |= 1 << (letter as u32 - 'A' as u32);
            }
            c => warn!("room #{}: ignoring unknown room flag '{}'", vnum, c),
        }
    }
    flags
}

pub(crate) fn parse_sector_type(token: &str, vnum: i64) -> SectorType {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(sector) = token.parse().ok().and_then(SectorType::from_code) {
            return sector;
        }
    } else if let Some(sector) = SectorType::from_name(token) {
        return sector;
    }
    warn!(
        "room #{}: unknown sector type '{}', defaulting to inside",
        vnum, token
    );
    SectorType::Inside
}

/// An exit block is a tilde description, a tilde keyword, then one line of
/// `<flags> <key_vnum> <dest_vnum>`. A missing info line degrades to the
/// all-default exit; a missing tilde is a truncation like any other.
fn parse_exit(cursor: &mut Cursor<'_>, vnum: i64) -> Result<ExitRecord, AreaError> {
    let description = cursor.read_tilde_block().ok_or(AreaError::Truncated {
        entity: "room",
        vnum,
        field: "exit description",
    })?;
    let keyword = cursor.read_tilde_block().ok_or(AreaError::Truncated {
        entity: "room",
        vnum,
        field: "exit keyword",
    })?;

    let mut exit = ExitRecord {
        description,
        keyword,
        ..ExitRecord::default()
    };

    match cursor.next() {
        Some(info) => {
            let tokens: Vec<&str> = info.split_whitespace().collect();
            if tokens.len() >= 3 {
                exit.flags = parse_exit_flags(tokens[0], vnum);
                exit.key_vnum = parse_signed_or(tokens[1], -1);
                exit.to_vnum = parse_signed_or(tokens[2], -1);
            } else {
                warn!(
                    "room #{}: invalid exit info line, using defaults: {}",
                    vnum,
                    preview(info)
                );
            }
        }
        None => warn!("room #{}: exit block ends before its info line", vnum),
    }
    Ok(exit)
}

/// Exit flags are written in hex; a token that is not even alphanumeric
/// (or does not parse as hex) is 0.
fn parse_exit_flags(token: &str, vnum: i64) -> u32 {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return 0;
    }
    u32::from_str_radix(token, 16).unwrap_or_else(|_| {
        warn!("room #{}: invalid exit flags '{}', using 0", vnum, token);
        0
    })
}
