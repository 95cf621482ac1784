//! Tilemeta Data -- reads level-editor tileset files into
//! [`tilemeta_core::tileset::TilesetDefinition`]s.
//!
//! [`parse`] takes `.tsx` XML text, [`parse_json`] takes the JSON export, and
//! [`load_tileset`] / [`load_registry`] read a file and pick the format from
//! its extension.

pub mod loader;
pub mod parser;
pub mod schema;

pub use loader::{LoadError, load_registry, load_tileset};
#[cfg(feature = "json")]
pub use parser::parse_json;
pub use parser::{ParseError, parse};
