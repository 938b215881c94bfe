//! Section splitting and entity segmentation.
//!
//! An area file is a flat list of lines partitioned by `#SECTION`
//! sentinels. `#0` (the legacy list terminator) or the next sentinel closes
//! whatever section is open; lines outside any section are discarded.
//! Within a section, entities are delimited by `#<vnum>` header lines, and
//! room blocks additionally end at a bare `S` line.

use log::{debug, warn};

use crate::area::scan::vnum_of;
use crate::logutil::preview;

/// The six recognized section bodies of one area file, in file-format order.
#[derive(Debug, Default)]
pub struct Sections {
    pub rooms: Vec<String>,
    pub mobiles: Vec<String>,
    pub objects: Vec<String>,
    pub shops: Vec<String>,
    pub resets: Vec<String>,
    pub specials: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Rooms,
    Mobiles,
    Objects,
    Shops,
    Resets,
    Specials,
}

fn sentinel_of(line: &str) -> Option<SectionKind> {
    match line {
        "#ROOMS" => Some(SectionKind::Rooms),
        "#MOBILES" => Some(SectionKind::Mobiles),
        "#OBJECTS" => Some(SectionKind::Objects),
        "#SHOPS" => Some(SectionKind::Shops),
        "#RESETS" => Some(SectionKind::Resets),
        "#SPECIALS" => Some(SectionKind::Specials),
        _ => None,
    }
}

/// Partition a file's lines into the six named sections.
///
/// Sentinel lines land in their own section's body, except for RESETS and
/// SPECIALS: those two sections are raw one-line-per-entity, so their
/// sentinel is dropped here rather than asking the segmenter to skip it.
pub fn split_sections(lines: &[String]) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<SectionKind> = None;

    for line in lines {
        if let Some(kind) = sentinel_of(line) {
            current = Some(kind);
        } else if line == "#0" || line == "#AREAS" {
            current = None;
            continue;
        }
        match current {
            Some(SectionKind::Rooms) => sections.rooms.push(line.clone()),
            Some(SectionKind::Mobiles) => sections.mobiles.push(line.clone()),
            Some(SectionKind::Objects) => sections.objects.push(line.clone()),
            Some(SectionKind::Shops) => sections.shops.push(line.clone()),
            Some(SectionKind::Resets) => sections.resets.push(line.clone()),
            Some(SectionKind::Specials) => sections.specials.push(line.clone()),
            None => {}
        }
    }

    // The one-line-per-entity sections keep no sentinel. Both may be
    // entirely absent from the file, so the drop has to tolerate empty.
    if !sections.resets.is_empty() {
        sections.resets.remove(0);
    }
    if !sections.specials.is_empty() {
        sections.specials.remove(0);
    }

    sections
}

/// Split a VNUM-delimited section body into per-entity line groups.
///
/// A group runs from its `#<vnum>` header to the next header (or section
/// end). Lines before the first header form a headerless leading group:
/// each extractor decides whether that is fatal to the record. Shops never
/// carry a `#` header at all, so for them the leading group IS the entity;
/// for mobiles and items the extractor rejects it as lacking a VNUM.
pub fn split_entities(lines: &[String]) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        if sentinel_of(line).is_some() {
            continue;
        }
        if vnum_of(line).is_some() && !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
        current.push(line.clone());
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Room variant: a bare `S` line also terminates the current group, as a
/// boundary independent of the next `#<vnum>` header. The `S` stays in
/// the group so the room extractor sees its own terminator. Unlike
/// [`split_entities`], lines between `S` and the next header (or before
/// the first) belong to no room and are dropped here.
pub fn split_rooms(lines: &[String]) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut current: Option<Vec<String>> = None;
    let mut orphaned = 0usize;

    for line in lines {
        if sentinel_of(line).is_some() {
            continue;
        }
        if vnum_of(line).is_some() {
            if let Some(group) = current.take() {
                groups.push(group);
            }
            current = Some(vec![line.clone()]);
            continue;
        }
        match current.as_mut() {
            Some(group) => {
                group.push(line.clone());
                if line == "S" {
                    groups.push(current.take().unwrap_or_default());
                }
            }
            None => {
                if !line.is_empty() {
                    debug!("dropping line outside any room block: {}", preview(line));
                    orphaned += 1;
                }
            }
        }
    }
    if let Some(group) = current.take() {
        groups.push(group);
    }
    if orphaned > 0 {
        warn!("dropped {} line(s) outside any room block", orphaned);
    }
    groups
}
