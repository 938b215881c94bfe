use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The six cardinal exits a legacy room can carry, in legacy code order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl Direction {
    /// Map a legacy `D<n>` digit to a direction. Anything outside 0..=5 is
    /// not a door the old engine ever wrote.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Direction::North),
            1 => Some(Direction::East),
            2 => Some(Direction::South),
            3 => Some(Direction::West),
            4 => Some(Direction::Up),
            5 => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Terrain classification carried on every room.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectorType {
    Inside,
    City,
    Field,
    Forest,
    Hills,
    Mountain,
    WaterSwim,
    WaterNoswim,
    Underwater,
    Air,
    Desert,
}

impl SectorType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(SectorType::Inside),
            1 => Some(SectorType::City),
            2 => Some(SectorType::Field),
            3 => Some(SectorType::Forest),
            4 => Some(SectorType::Hills),
            5 => Some(SectorType::Mountain),
            6 => Some(SectorType::WaterSwim),
            7 => Some(SectorType::WaterNoswim),
            8 => Some(SectorType::Underwater),
            9 => Some(SectorType::Air),
            10 => Some(SectorType::Desert),
            _ => None,
        }
    }

    /// Symbolic names as they appear in later-era area files
    /// (`WATER_SWIM`, `water_noswim`, ...). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "INSIDE" => Some(SectorType::Inside),
            "CITY" => Some(SectorType::City),
            "FIELD" => Some(SectorType::Field),
            "FOREST" => Some(SectorType::Forest),
            "HILLS" => Some(SectorType::Hills),
            "MOUNTAIN" => Some(SectorType::Mountain),
            "WATER_SWIM" => Some(SectorType::WaterSwim),
            "WATER_NOSWIM" => Some(SectorType::WaterNoswim),
            "UNDERWATER" => Some(SectorType::Underwater),
            "AIR" => Some(SectorType::Air),
            "DESERT" => Some(SectorType::Desert),
            _ => None,
        }
    }
}

/// A token from a loosely-typed legacy field: a run of digits becomes an
/// integer, anything else stays a word. The old files never agreed on
/// which of these columns were numeric, so the distinction is kept
/// explicit instead of guessed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Int(i64),
    Word(String),
}

impl TokenValue {
    pub fn coerce(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            match token.parse::<i64>() {
                Ok(n) => TokenValue::Int(n),
                Err(_) => TokenValue::Word(token.to_string()),
            }
        } else {
            TokenValue::Word(token.to_string())
        }
    }
}

/// A keyword/text pair attached to rooms and items (`E` blocks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraDescription {
    pub keyword: String,
    pub description: String,
}

/// One directional doorway out of a room.
///
/// `to_vnum` keeps the legacy room number for auditing; `destination_id`
/// is the resolved stable id, `None` when the VNUM matched nothing in the
/// same file (dangling exits are common in old areas and are not errors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitRecord {
    pub flags: u32,
    pub key_vnum: i64,
    pub to_vnum: i64,
    pub destination_id: Option<Uuid>,
    pub description: String,
    pub keyword: String,
}

impl Default for ExitRecord {
    fn default() -> Self {
        Self {
            flags: 0,
            key_vnum: -1,
            to_vnum: -1,
            destination_id: None,
            description: String::new(),
            keyword: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub author: Option<String>,
    pub suggested_level_range: Option<String>,
    pub total_rooms: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub id: Uuid,
    pub area_id: Uuid,
    pub vnum: i64,
    pub name: String,
    pub description: String,
    pub tele_delay: i64,
    pub room_flags: u32,
    pub sector_type: SectorType,
    pub exits: HashMap<Direction, ExitRecord>,
    pub extra_descr: Vec<ExtraDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileRecord {
    pub id: Uuid,
    pub area_id: Uuid,
    pub vnum: i64,
    pub name: String,
    pub short_descr: String,
    pub long_descr: String,
    pub description: String,
    pub act_flags: i64,
    pub affect_flags: i64,
    pub alignment: i64,
    pub level: i64,
    pub hitroll: i64,
    /// Damage dice as written, usually `XdY+Z`.
    pub damage: String,
    pub race: String,
    pub sex: i64,
    pub gold: i64,
    pub start_pos: i64,
    pub default_pos: i64,
    pub flags: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: Uuid,
    pub area_id: Uuid,
    pub vnum: i64,
    pub name: String,
    pub short_descr: String,
    pub long_descr: String,
    pub description: String,
    pub item_type: TokenValue,
    pub extra_flags: TokenValue,
    pub wear_flags: TokenValue,
    pub value: Option<TokenValue>,
    pub weight: Option<TokenValue>,
    pub level: Option<TokenValue>,
    /// Raw `A` affect lines, carried opaquely for the backend to decode.
    pub affect_data: Vec<String>,
    pub extra_descr: Vec<ExtraDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecord {
    pub id: Uuid,
    pub area_id: Uuid,
    pub vnum: i64,
    pub trade_items: Vec<i64>,
    pub profit_buy: i64,
    pub profit_sell: i64,
    pub open_hour: i64,
    pub close_hour: i64,
    pub owner_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRecord {
    pub id: Uuid,
    pub area_id: Uuid,
    pub reset_type: String,
    pub args: Vec<TokenValue>,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialRecord {
    pub id: Uuid,
    pub area_id: Uuid,
    /// Owning mobile VNUM; absent when the legacy line carried something
    /// non-numeric in that column.
    pub mob_vnum: Option<i64>,
    pub function: String,
    pub comment: String,
}
