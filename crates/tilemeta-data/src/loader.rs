//! File loading: reads a tileset file, detects its format from the extension,
//! and hands the text to the parser.
//!
//! This is the only place in the workspace that touches the filesystem.

use std::path::{Path, PathBuf};

use tilemeta_core::registry::TileRegistry;
use tilemeta_core::tileset::TilesetDefinition;

use crate::parser::{self, ParseError};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a tileset file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// The file was read but its contents are not a valid tileset.
    #[error("parse error in {file}: {source}")]
    Parse { file: PathBuf, source: ParseError },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported tileset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, LoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tsx" | "xml") => Ok(Format::Xml),
        Some("json" | "tsj") => Ok(Format::Json),
        _ => Err(LoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Parse already-read text in the given format.
pub fn parse_as(source: &str, format: Format) -> Result<TilesetDefinition, ParseError> {
    match format {
        Format::Xml => parser::parse(source),
        #[cfg(feature = "json")]
        Format::Json => parser::parse_json(source),
        #[cfg(not(feature = "json"))]
        Format::Json => Err(ParseError::Syntax(
            "JSON tilesets require the `json` feature".to_string(),
        )),
    }
}

/// Read and parse a tileset file.
pub fn load_tileset(path: &Path) -> Result<TilesetDefinition, LoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let def = parse_as(&content, format).map_err(|source| LoadError::Parse {
        file: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "loaded {:?} tileset {} ({} tiles, {} declared)",
        format,
        path.display(),
        def.tile_count(),
        def.declared_count()
    );
    Ok(def)
}

/// Read, parse, and index a tileset file in one step.
pub fn load_registry(path: &Path) -> Result<TileRegistry, LoadError> {
    load_tileset(path).map(TileRegistry::new)
}

// ===========================================================================
// Tests
// ===========================================================================
