//! Tileset parser: raw text in, validated [`TilesetDefinition`] out.
//!
//! The parser performs no I/O; callers hand it text they have already read.
//! Both the XML (`.tsx`) and JSON exports go through the same validation:
//!
//! - `tilewidth`, `tileheight`, `tilecount` and `columns` are required
//!   positive integers.
//! - Tile IDs are required, non-negative, below `tilecount`, and unique.
//! - A `type` outside the known vocabulary becomes [`Category::Unknown`];
//!   a tile with no `type` is [`Category::PLAIN`].
//! - The `name` property is optional. Other properties are kept as strings.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Deserialize;
use tilemeta_core::category::Category;
use tilemeta_core::id::TileId;
use tilemeta_core::tileset::{
    ImageRef, TileDefinition, TilesetBuilder, TilesetDefinition, TilesetError,
};

use crate::schema::{XmlTile, XmlTileset};

/// Property whose value is the tile's name.
const NAME_PROPERTY: &str = "name";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while parsing a tileset. Each one aborts the load of
/// that tileset only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The markup itself is malformed.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A required attribute is absent.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A numeric attribute is not an integer in its allowed range.
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidNumber { field: &'static str, value: String },

    /// Two tiles share an ID.
    #[error("duplicate tile id {id}")]
    DuplicateTileId { id: TileId },

    /// A tile ID is negative or not below the tile count.
    #[error("tile id {id} out of range (tile count {tile_count})")]
    TileIdOutOfRange { id: i64, tile_count: u32 },
}

impl From<TilesetError> for ParseError {
    fn from(err: TilesetError) -> Self {
        match err {
            TilesetError::DuplicateTileId { id } => ParseError::DuplicateTileId { id },
            TilesetError::TileIdOutOfRange { id, tile_count } => ParseError::TileIdOutOfRange {
                id: i64::from(id.0),
                tile_count,
            },
            TilesetError::InvalidDimension { field } => ParseError::InvalidNumber {
                field,
                value: "0".to_string(),
            },
        }
    }
}

// ===========================================================================
// Field helpers
// ===========================================================================

fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ParseError> {
    value.ok_or(ParseError::MissingField(field))
}

fn integer(field: &'static str, raw: &str) -> Result<i64, ParseError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn positive(field: &'static str, value: i64) -> Result<u32, ParseError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or(ParseError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn non_negative(field: &'static str, value: i64) -> Result<u32, ParseError> {
    u32::try_from(value).map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn tile_id(raw: i64, tile_count: u32) -> Result<TileId, ParseError> {
    u32::try_from(raw)
        .ok()
        .filter(|id| *id < tile_count)
        .map(TileId)
        .ok_or(ParseError::TileIdOutOfRange {
            id: raw,
            tile_count,
        })
}

/// `type` wins over `class` when a tile carries both.
fn category(id: TileId, kind: Option<&str>, class: Option<&str>) -> Category {
    let Some(raw) = kind.or(class) else {
        return Category::PLAIN;
    };
    let category = Category::from_type(raw);
    if category == Category::Unknown && raw != Category::Unknown.as_str() {
        log::warn!("tile {id} has unrecognized type '{raw}'; treating as unknown");
    }
    category
}

/// Split raw `(name, value)` property pairs into the tile name and the
/// remaining custom properties. An empty name counts as no name. A property
/// repeated on one tile keeps its first value.
fn split_properties(
    id: TileId,
    properties: impl IntoIterator<Item = (Option<String>, String)>,
) -> Result<(Option<String>, BTreeMap<String, String>), ParseError> {
    let mut name: Option<Option<String>> = None;
    let mut rest = BTreeMap::new();
    for (key, value) in properties {
        let key = require("property name", key)?;
        if key == NAME_PROPERTY {
            match &name {
                None => name = Some(Some(value).filter(|v| !v.is_empty())),
                Some(first) => log::warn!(
                    "tile {id} repeats property '{key}'; keeping '{}', ignoring '{value}'",
                    first.as_deref().unwrap_or_default()
                ),
            }
            continue;
        }
        match rest.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(first) => log::warn!(
                "tile {id} repeats property '{}'; keeping '{}', ignoring '{value}'",
                first.key(),
                first.get()
            ),
        }
    }
    Ok((name.flatten(), rest))
}

// ===========================================================================
// XML
// ===========================================================================

/// Parse a `.tsx` tileset document.
///
/// `<tile>` elements need not be adjacent: editors may interleave them with
/// `<wangsets>`, `<grid>` and other siblings, which are skipped.
pub fn parse(source: &str) -> Result<TilesetDefinition, ParseError> {
    let mut de = serde_xml_rs::Deserializer::new_from_reader(source.as_bytes())
        .non_contiguous_seq_elements(true);
    let raw = XmlTileset::deserialize(&mut de).map_err(|e| ParseError::Syntax(e.to_string()))?;
    resolve_xml(raw)
}

fn xml_integer(field: &'static str, raw: Option<&str>) -> Result<i64, ParseError> {
    integer(field, require(field, raw)?)
}

fn xml_optional(field: &'static str, raw: Option<&str>) -> Result<u32, ParseError> {
    match raw {
        Some(raw) => non_negative(field, integer(field, raw)?),
        None => Ok(0),
    }
}

fn resolve_xml(raw: XmlTileset) -> Result<TilesetDefinition, ParseError> {
    let tile_width = positive("tilewidth", xml_integer("tilewidth", raw.tilewidth.as_deref())?)?;
    let tile_height = positive(
        "tileheight",
        xml_integer("tileheight", raw.tileheight.as_deref())?,
    )?;
    let tile_count = positive("tilecount", xml_integer("tilecount", raw.tilecount.as_deref())?)?;
    let columns = positive("columns", xml_integer("columns", raw.columns.as_deref())?)?;

    let mut builder = TilesetBuilder::new(tile_width, tile_height, tile_count, columns)?;
    builder
        .set_spacing(xml_optional("spacing", raw.spacing.as_deref())?)
        .set_margin(xml_optional("margin", raw.margin.as_deref())?);
    if let Some(name) = raw.name {
        builder.set_name(name);
    }
    if let Some(image) = raw.image {
        let width = image
            .width
            .as_deref()
            .map(|w| non_negative("width", integer("width", w)?))
            .transpose()?;
        let height = image
            .height
            .as_deref()
            .map(|h| non_negative("height", integer("height", h)?))
            .transpose()?;
        builder.set_image(ImageRef {
            source: require("source", image.source)?,
            width,
            height,
        });
    }

    for tile in raw.tiles {
        builder.add_tile(resolve_xml_tile(tile, tile_count)?)?;
    }

    Ok(builder.build())
}

fn resolve_xml_tile(tile: XmlTile, tile_count: u32) -> Result<TileDefinition, ParseError> {
    let id = tile_id(xml_integer("id", tile.id.as_deref())?, tile_count)?;
    let category = category(id, tile.kind.as_deref(), tile.class.as_deref());
    let (name, properties) = split_properties(
        id,
        tile.properties
            .into_iter()
            .flat_map(|p| p.items)
            .map(|p| (p.name, p.value.unwrap_or_default())),
    )?;
    Ok(TileDefinition {
        id,
        category,
        name,
        properties,
    })
}

// ===========================================================================
// JSON
// ===========================================================================

/// Parse a JSON tileset export.
#[cfg(feature = "json")]
pub fn parse_json(source: &str) -> Result<TilesetDefinition, ParseError> {
    let raw: crate::schema::JsonTileset =
        serde_json::from_str(source).map_err(|e| ParseError::Syntax(e.to_string()))?;
    resolve_json(raw)
}

#[cfg(feature = "json")]
fn json_property_value(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(feature = "json")]
fn resolve_json(raw: crate::schema::JsonTileset) -> Result<TilesetDefinition, ParseError> {
    let tile_width = positive("tilewidth", require("tilewidth", raw.tilewidth)?)?;
    let tile_height = positive("tileheight", require("tileheight", raw.tileheight)?)?;
    let tile_count = positive("tilecount", require("tilecount", raw.tilecount)?)?;
    let columns = positive("columns", require("columns", raw.columns)?)?;

    let mut builder = TilesetBuilder::new(tile_width, tile_height, tile_count, columns)?;
    builder
        .set_spacing(non_negative("spacing", raw.spacing.unwrap_or(0))?)
        .set_margin(non_negative("margin", raw.margin.unwrap_or(0))?);
    if let Some(name) = raw.name {
        builder.set_name(name);
    }
    if let Some(source) = raw.image {
        builder.set_image(ImageRef {
            source,
            width: raw
                .imagewidth
                .map(|w| non_negative("imagewidth", w))
                .transpose()?,
            height: raw
                .imageheight
                .map(|h| non_negative("imageheight", h))
                .transpose()?,
        });
    }

    for tile in raw.tiles {
        let id = tile_id(require("id", tile.id)?, tile_count)?;
        let category = category(id, tile.kind.as_deref(), tile.class.as_deref());
        let (name, properties) = split_properties(
            id,
            tile.properties
                .into_iter()
                .map(|p| (p.name, json_property_value(p.value))),
        )?;
        builder.add_tile(TileDefinition {
            id,
            category,
            name,
            properties,
        })?;
    }

    Ok(builder.build())
}
