//! Serde structs for on-disk tileset descriptions.
//!
//! These mirror the level editor's `.tsx` (XML) and JSON tileset exports
//! one to one. Every field is optional at this layer; the parser decides what
//! is required and reports it by name, rather than surfacing a generic
//! deserialization failure.

use serde::Deserialize;

// ===========================================================================
// XML (.tsx)
// ===========================================================================

/// The `<tileset>` root element. Numeric attributes stay as raw strings so the
/// parser can tell a missing attribute from a malformed one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct XmlTileset {
    pub name: Option<String>,
    pub tilewidth: Option<String>,
    pub tileheight: Option<String>,
    pub tilecount: Option<String>,
    pub columns: Option<String>,
    pub spacing: Option<String>,
    pub margin: Option<String>,
    pub image: Option<XmlImage>,
    #[serde(rename = "tile", default)]
    pub tiles: Vec<XmlTile>,
}

/// The `<image>` child of `<tileset>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct XmlImage {
    pub source: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// A `<tile>` element. Newer editor versions write `class` where older ones
/// write `type`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct XmlTile {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub class: Option<String>,
    pub properties: Option<XmlProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct XmlProperties {
    #[serde(rename = "property", default)]
    pub items: Vec<XmlProperty>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct XmlProperty {
    pub name: Option<String>,
    pub value: Option<String>,
}

// ===========================================================================
// JSON
// ===========================================================================

/// A JSON tileset export.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonTileset {
    pub name: Option<String>,
    pub tilewidth: Option<i64>,
    pub tileheight: Option<i64>,
    pub tilecount: Option<i64>,
    pub columns: Option<i64>,
    pub spacing: Option<i64>,
    pub margin: Option<i64>,
    pub image: Option<String>,
    pub imagewidth: Option<i64>,
    pub imageheight: Option<i64>,
    #[serde(default)]
    pub tiles: Vec<JsonTile>,
}

#[cfg(feature = "json")]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonTile {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub class: Option<String>,
    #[serde(default)]
    pub properties: Vec<JsonProperty>,
}

/// A custom property. Values may be strings, numbers or booleans.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonProperty {
    pub name: Option<String>,
    #[serde(default)]
    pub value: serde_json::Value,
}
