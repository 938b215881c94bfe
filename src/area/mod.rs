//! Legacy area-file parsing and assembly.
//!
//! One [`Area`] aggregate is built per file: section splitting, entity
//! segmentation, per-kind field extraction, then the VNUM-to-id rewrite
//! that turns legacy room numbers into stable identifiers. Parsing is
//! tolerant by design; a malformed entity is logged and dropped, and only
//! an unreadable file fails the whole pass.
//!
//! Forward references are the reason for the two-pass shape: a room's exit
//! may name a room that appears later in the file, so every room VNUM gets
//! its stable id allocated before any room's fields are extracted.

pub mod errors;
pub mod item;
pub mod mobile;
pub mod reset;
pub mod room;
mod scan;
pub mod sections;
pub mod shop;
pub mod special;
pub mod types;

use log::{info, warn};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::sink::RecordSink;
use errors::AreaError;
use scan::vnum_of;
use types::{
    AreaRecord, ItemRecord, MobileRecord, ResetRecord, RoomRecord, ShopRecord, SpecialRecord,
};

/// `{ 5 35 } Merc    The Mud School~` -- level range in braces, author,
/// then the area name running to the tilde.
static AREA_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*([\d\s-]+)\s*\}\s*(\S+)\s+(.*?)~").expect("valid regex")
});

/// Everything parsed out of one area file, ready for the sink.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub area: AreaRecord,
    pub rooms: Vec<RoomRecord>,
    pub mobiles: Vec<MobileRecord>,
    pub items: Vec<ItemRecord>,
    pub shops: Vec<ShopRecord>,
    pub resets: Vec<ResetRecord>,
    pub specials: Vec<SpecialRecord>,
}

impl Area {
    /// Read and parse one area file. The only error here is failing to
    /// read the file; everything past that point degrades per entity.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Area, AreaError> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        let lines: Vec<String> = contents.lines().map(|l| l.trim().to_string()).collect();
        Ok(Area::from_lines(&lines))
    }

    /// Parse an in-memory file. Infallible: a file full of garbage
    /// produces an empty area, not an error.
    pub fn from_lines(lines: &[String]) -> Area {
        // The area id exists before any child is built: resets carry it
        // immediately, and rooms need their peers' ids pre-allocated.
        let area_id = Uuid::new_v4();

        let sections = sections::split_sections(lines);
        let room_groups = sections::split_rooms(&sections.rooms);
        let mobile_groups = sections::split_entities(&sections.mobiles);
        let object_groups = sections::split_entities(&sections.objects);
        let shop_groups = sections::split_entities(&sections.shops);

        // Pass 1: allocate a stable id for every room VNUM up front.
        // Duplicate headers are not deduplicated; the later allocation
        // wins the map slot and both rooms keep their own id.
        let mut room_ids: Vec<Option<(i64, Uuid)>> = Vec::with_capacity(room_groups.len());
        let mut vnum_map: HashMap<i64, Uuid> = HashMap::new();
        for group in &room_groups {
            match group.first().map(|l| l.as_str()).and_then(vnum_of) {
                Some(vnum) => {
                    let id = Uuid::new_v4();
                    if vnum_map.insert(vnum, id).is_some() {
                        warn!("duplicate room vnum {}; later definition wins the id map", vnum);
                    }
                    room_ids.push(Some((vnum, id)));
                }
                None => room_ids.push(None),
            }
        }

        let mut rooms: Vec<RoomRecord> = Vec::new();
        for (group, alloc) in room_groups.iter().zip(&room_ids) {
            let Some((_, id)) = alloc else {
                warn!("room block without vnum header dropped");
                continue;
            };
            match room::extract_room(group, *id, area_id) {
                Ok(room) => rooms.push(room),
                Err(e) => warn!("dropping room: {}", e),
            }
        }

        // Pass 2: rewrite exit destinations from VNUMs to stable ids. A
        // VNUM with no room in this file is a dangling exit, not an error.
        for room in &mut rooms {
            for exit in room.exits.values_mut() {
                exit.destination_id = vnum_map.get(&exit.to_vnum).copied();
            }
        }

        let mut mobiles = Vec::new();
        for group in &mobile_groups {
            match mobile::extract_mobile(group, Uuid::new_v4(), area_id) {
                Ok(mob) => mobiles.push(mob),
                Err(e) => warn!("dropping mobile: {}", e),
            }
        }

        let mut items = Vec::new();
        for group in &object_groups {
            match item::extract_item(group, Uuid::new_v4(), area_id) {
                Ok(item) => items.push(item),
                Err(e) => warn!("dropping item: {}", e),
            }
        }

        let mut shops = Vec::new();
        for group in &shop_groups {
            match shop::extract_shop(group, Uuid::new_v4(), area_id) {
                Ok(Some(shop)) => shops.push(shop),
                Ok(None) => {}
                Err(e) => warn!("dropping shop: {}", e),
            }
        }

        let mut resets = Vec::new();
        for line in &sections.resets {
            if line.is_empty() {
                continue;
            }
            match reset::extract_reset(line, Uuid::new_v4(), area_id) {
                Ok(reset) => resets.push(reset),
                Err(e) => warn!("dropping reset: {}", e),
            }
        }

        let mut specials = Vec::new();
        for line in &sections.specials {
            if line.is_empty() {
                continue;
            }
            match special::extract_special(line, Uuid::new_v4(), area_id) {
                Ok(special) => specials.push(special),
                Err(e) => warn!("dropping special: {}", e),
            }
        }

        let (name, author, suggested_level_range) = parse_header(lines);
        let area = AreaRecord {
            id: area_id,
            name,
            author,
            suggested_level_range,
            total_rooms: rooms.len(),
        };

        info!(
            "parsed area '{}': {} rooms, {} mobiles, {} items, {} shops, {} resets, {} specials",
            area.name.as_deref().unwrap_or("<unnamed>"),
            rooms.len(),
            mobiles.len(),
            items.len(),
            shops.len(),
            resets.len(),
            specials.len()
        );

        Area {
            area,
            rooms,
            mobiles,
            items,
            shops,
            resets,
            specials,
        }
    }

    /// Hand every record to the sink in dependency order: the area first
    /// so children can carry its id as a foreign key, then rooms,
    /// mobiles, items, shops, resets, specials. A failed record is
    /// logged and skipped; the rest still go out.
    pub async fn deliver(&self, sink: &dyn RecordSink) -> usize {
        let mut failures = 0usize;

        if let Err(e) = sink.put_area(&self.area).await {
            warn!("sink rejected area {}: {}", self.area.id, e);
            failures += 1;
        }
        for room in &self.rooms {
            if let Err(e) = sink.put_room(room).await {
                warn!("sink rejected room #{}: {}", room.vnum, e);
                failures += 1;
            }
        }
        for mobile in &self.mobiles {
            if let Err(e) = sink.put_mobile(mobile).await {
                warn!("sink rejected mobile #{}: {}", mobile.vnum, e);
                failures += 1;
            }
        }
        for item in &self.items {
            if let Err(e) = sink.put_item(item).await {
                warn!("sink rejected item #{}: {}", item.vnum, e);
                failures += 1;
            }
        }
        for shop in &self.shops {
            if let Err(e) = sink.put_shop(shop).await {
                warn!("sink rejected shop #{}: {}", shop.vnum, e);
                failures += 1;
            }
        }
        for reset in &self.resets {
            if let Err(e) = sink.put_reset(reset).await {
                warn!("sink rejected reset {}: {}", reset.id, e);
                failures += 1;
            }
        }
        for special in &self.specials {
            if let Err(e) = sink.put_special(special).await {
                warn!("sink rejected special {}: {}", special.id, e);
                failures += 1;
            }
        }
        failures
    }
}

/// Pull area metadata from the first line matching the bracketed header
/// pattern. Old files spell this a dozen ways; any field can be absent.
fn parse_header(lines: &[String]) -> (Option<String>, Option<String>, Option<String>) {
    for line in lines {
        if let Some(caps) = AREA_HEADER.captures(line) {
            let range = caps.get(1).map(|m| m.as_str().trim().to_string());
            let author = caps.get(2).map(|m| m.as_str().to_string());
            let name = caps.get(3).map(|m| m.as_str().trim().to_string());
            return (name, author, range);
        }
    }
    (None, None, None)
}
