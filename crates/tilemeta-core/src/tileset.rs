//! Validated in-memory tileset definitions.
//!
//! A [`TilesetDefinition`] is assembled once at load time through a
//! [`TilesetBuilder`], which enforces the ID invariants, and is immutable
//! afterwards. The tile mapping is sparse: IDs in `[0, tile_count)` that the
//! source never declares are plain tiles (see [`Category::PLAIN`]).

use crate::category::Category;
use crate::id::TileId;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling a tileset definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TilesetError {
    /// Two tiles were declared with the same ID.
    #[error("duplicate tile id {id}")]
    DuplicateTileId { id: TileId },

    /// A tile was declared outside `[0, tile_count)`.
    #[error("tile id {id} out of range (tile count {tile_count})")]
    TileIdOutOfRange { id: TileId, tile_count: u32 },

    /// A geometry value that must be positive was zero.
    #[error("{field} must be positive")]
    InvalidDimension { field: &'static str },
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Metadata declared for a single tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDefinition {
    pub id: TileId,
    pub category: Category,
    pub name: Option<String>,
    /// Custom properties other than `name`, as raw strings.
    pub properties: BTreeMap<String, String>,
}

impl TileDefinition {
    pub fn new(id: TileId, category: Category, name: Option<&str>) -> Self {
        Self {
            id,
            category,
            name: name.map(str::to_string),
            properties: BTreeMap::new(),
        }
    }
}

/// Reference to the atlas image. The source is an opaque handle resolved by
/// the asset loader; dimensions are in pixels when the tileset records them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub source: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A pixel rectangle within the atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing an immutable [`TilesetDefinition`].
///
/// Geometry is fixed up front; tiles are then added one by one and checked
/// against it, so a built definition always satisfies the ID invariants.
#[derive(Debug)]
pub struct TilesetBuilder {
    def: TilesetDefinition,
}

impl TilesetBuilder {
    /// Start a tileset with the given tile size, tile count and column count.
    /// All four must be positive.
    pub fn new(
        tile_width: u32,
        tile_height: u32,
        tile_count: u32,
        columns: u32,
    ) -> Result<Self, TilesetError> {
        for (field, value) in [
            ("tilewidth", tile_width),
            ("tileheight", tile_height),
            ("tilecount", tile_count),
            ("columns", columns),
        ] {
            if value == 0 {
                return Err(TilesetError::InvalidDimension { field });
            }
        }

        Ok(Self {
            def: TilesetDefinition {
                name: None,
                tile_width,
                tile_height,
                tile_count,
                columns,
                spacing: 0,
                margin: 0,
                image: None,
                tiles: BTreeMap::new(),
            },
        })
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.def.name = Some(name.into());
        self
    }

    pub fn set_image(&mut self, image: ImageRef) -> &mut Self {
        self.def.image = Some(image);
        self
    }

    /// Pixels between adjacent tiles in the atlas.
    pub fn set_spacing(&mut self, spacing: u32) -> &mut Self {
        self.def.spacing = spacing;
        self
    }

    /// Pixels between the atlas edge and the first tile.
    pub fn set_margin(&mut self, margin: u32) -> &mut Self {
        self.def.margin = margin;
        self
    }

    /// Declare a tile. Rejects IDs outside the tileset and repeated IDs;
    /// an earlier declaration is never overwritten.
    pub fn add_tile(&mut self, tile: TileDefinition) -> Result<(), TilesetError> {
        if tile.id.0 >= self.def.tile_count {
            return Err(TilesetError::TileIdOutOfRange {
                id: tile.id,
                tile_count: self.def.tile_count,
            });
        }
        if self.def.tiles.contains_key(&tile.id) {
            return Err(TilesetError::DuplicateTileId { id: tile.id });
        }
        self.def.tiles.insert(tile.id, tile);
        Ok(())
    }

    pub fn build(self) -> TilesetDefinition {
        self.def
    }
}

// ---------------------------------------------------------------------------
// Definition
// ---------------------------------------------------------------------------

/// A parsed, validated tileset. Frozen after [`TilesetBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetDefinition {
    name: Option<String>,
    tile_width: u32,
    tile_height: u32,
    tile_count: u32,
    columns: u32,
    spacing: u32,
    margin: u32,
    image: Option<ImageRef>,
    tiles: BTreeMap<TileId, TileDefinition>,
}

impl TilesetDefinition {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn tile_count(&self) -> u32 {
        self.tile_count
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    /// Whether `id` addresses a tile of this tileset.
    pub fn contains(&self, id: TileId) -> bool {
        id.0 < self.tile_count
    }

    /// The declared metadata for `id`, if the source declared it.
    pub fn tile(&self, id: TileId) -> Option<&TileDefinition> {
        self.tiles.get(&id)
    }

    /// Declared tiles in ascending ID order.
    pub fn tiles(&self) -> impl Iterator<Item = &TileDefinition> {
        self.tiles.values()
    }

    pub fn declared_count(&self) -> usize {
        self.tiles.len()
    }

    /// Atlas row count derived from the image height, when the image
    /// records one.
    pub fn rows(&self) -> Option<u32> {
        let height = self.image.as_ref()?.height?;
        let usable = height
            .saturating_sub(self.margin.saturating_mul(2))
            .saturating_add(self.spacing);
        Some(usable / self.tile_height.saturating_add(self.spacing))
    }

    /// Whether `columns * rows == tile_count`. `None` when the row count is
    /// unknown. Informational only; a mismatch is never an error here.
    pub fn grid_consistent(&self) -> Option<bool> {
        self.rows()
            .map(|rows| u64::from(self.columns) * u64::from(rows) == u64::from(self.tile_count))
    }

    /// Pixel rectangle of `id` within the atlas, or `None` if `id` is out of
    /// range. Tiles are laid out row-major, `columns` per row.
    pub fn source_rect(&self, id: TileId) -> Option<TileRect> {
        if !self.contains(id) {
            return None;
        }
        let col = id.0 % self.columns;
        let row = id.0 / self.columns;
        let step_x = self.tile_width.saturating_add(self.spacing);
        let step_y = self.tile_height.saturating_add(self.spacing);
        Some(TileRect {
            x: self.margin.saturating_add(col.saturating_mul(step_x)),
            y: self.margin.saturating_add(row.saturating_mul(step_y)),
            width: self.tile_width,
            height: self.tile_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> TilesetBuilder {
        TilesetBuilder::new(16, 16, 72, 9).unwrap()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            TilesetBuilder::new(0, 16, 72, 9).unwrap_err(),
            TilesetError::InvalidDimension { field: "tilewidth" }
        );
        assert_eq!(
            TilesetBuilder::new(16, 0, 72, 9).unwrap_err(),
            TilesetError::InvalidDimension {
                field: "tileheight"
            }
        );
        assert_eq!(
            TilesetBuilder::new(16, 16, 0, 9).unwrap_err(),
            TilesetError::InvalidDimension { field: "tilecount" }
        );
        assert_eq!(
            TilesetBuilder::new(16, 16, 72, 0).unwrap_err(),
            TilesetError::InvalidDimension { field: "columns" }
        );
    }

    #[test]
    fn add_and_lookup_tile() {
        let mut b = builder();
        b.add_tile(TileDefinition::new(TileId(5), Category::Usable, Some("key")))
            .unwrap();
        let def = b.build();

        let key = def.tile(TileId(5)).unwrap();
        assert_eq!(key.category, Category::Usable);
        assert_eq!(key.name.as_deref(), Some("key"));
        assert!(def.tile(TileId(6)).is_none());
        assert_eq!(def.declared_count(), 1);
    }

    #[test]
    fn duplicate_id_is_rejected_without_overwriting() {
        let mut b = builder();
        b.add_tile(TileDefinition::new(TileId(1), Category::Decor, Some("barrel")))
            .unwrap();
        let err = b
            .add_tile(TileDefinition::new(TileId(1), Category::Walls, None))
            .unwrap_err();
        assert_eq!(err, TilesetError::DuplicateTileId { id: TileId(1) });

        let def = b.build();
        assert_eq!(def.tile(TileId(1)).unwrap().category, Category::Decor);
    }

    #[test]
    fn id_at_tile_count_is_out_of_range() {
        let mut b = builder();
        let err = b
            .add_tile(TileDefinition::new(TileId(72), Category::Floor, None))
            .unwrap_err();
        assert_eq!(
            err,
            TilesetError::TileIdOutOfRange {
                id: TileId(72),
                tile_count: 72
            }
        );
        assert!(b.add_tile(TileDefinition::new(TileId(71), Category::Floor, None)).is_ok());
    }

    #[test]
    fn tiles_iterate_in_ascending_order() {
        let mut b = builder();
        for id in [30, 2, 17, 0] {
            b.add_tile(TileDefinition::new(TileId(id), Category::Floor, None))
                .unwrap();
        }
        let ids: Vec<u32> = b.build().tiles().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![0, 2, 17, 30]);
    }

    #[test]
    fn source_rect_is_row_major() {
        let def = builder().build();
        assert_eq!(
            def.source_rect(TileId(0)),
            Some(TileRect {
                x: 0,
                y: 0,
                width: 16,
                height: 16
            })
        );
        // id 28 -> column 1, row 3
        assert_eq!(
            def.source_rect(TileId(28)),
            Some(TileRect {
                x: 16,
                y: 48,
                width: 16,
                height: 16
            })
        );
        assert_eq!(def.source_rect(TileId(72)), None);
    }

    #[test]
    fn source_rect_honors_spacing_and_margin() {
        let mut b = TilesetBuilder::new(8, 8, 4, 2).unwrap();
        b.set_spacing(2).set_margin(1);
        let def = b.build();
        assert_eq!(
            def.source_rect(TileId(3)),
            Some(TileRect {
                x: 11,
                y: 11,
                width: 8,
                height: 8
            })
        );
    }

    #[test]
    fn rows_derive_from_image_height() {
        let mut b = builder();
        b.set_image(ImageRef {
            source: "full tilemap.png".to_string(),
            width: Some(144),
            height: Some(128),
        });
        let def = b.build();
        assert_eq!(def.rows(), Some(8));
        assert_eq!(def.grid_consistent(), Some(true));
    }

    #[test]
    fn inconsistent_geometry_is_reported_not_enforced() {
        let mut b = builder();
        b.set_image(ImageRef {
            source: "short.png".to_string(),
            width: Some(144),
            height: Some(20),
        });
        let def = b.build();
        assert_eq!(def.rows(), Some(1));
        assert_eq!(def.grid_consistent(), Some(false));
        // Still addressable.
        assert!(def.source_rect(TileId(71)).is_some());
    }

    #[test]
    fn rows_unknown_without_image() {
        let def = builder().build();
        assert_eq!(def.rows(), None);
        assert_eq!(def.grid_consistent(), None);
    }

    #[test]
    fn error_display_messages() {
        let e = TilesetError::DuplicateTileId { id: TileId(3) };
        assert!(format!("{e}").contains('3'));

        let e = TilesetError::TileIdOutOfRange {
            id: TileId(99),
            tile_count: 72,
        };
        let msg = format!("{e}");
        assert!(msg.contains("99"));
        assert!(msg.contains("72"));

        let e = TilesetError::InvalidDimension { field: "columns" };
        assert!(format!("{e}").contains("columns"));
    }
}
