//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::category::Category;
use crate::id::TileId;
use crate::tileset::{ImageRef, TileDefinition, TilesetBuilder, TilesetDefinition};

// ===========================================================================
// Tile constructors
// ===========================================================================

pub fn tile(id: u32, category: Category, name: Option<&str>) -> TileDefinition {
    TileDefinition::new(TileId(id), category, name)
}

// ===========================================================================
// Tileset constructors
// ===========================================================================

/// Build a 16x16-pixel tileset from `(id, category, name)` triples.
///
/// Panics on invalid input; meant for fixtures only.
pub fn tileset(
    tile_count: u32,
    columns: u32,
    tiles: &[(u32, Category, Option<&str>)],
) -> TilesetDefinition {
    tileset_with(
        tile_count,
        columns,
        tiles
            .iter()
            .map(|&(id, category, name)| tile(id, category, name))
            .collect(),
    )
}

/// Like [`tileset`], but takes fully formed definitions.
pub fn tileset_with(tile_count: u32, columns: u32, tiles: Vec<TileDefinition>) -> TilesetDefinition {
    let mut b = TilesetBuilder::new(16, 16, tile_count, columns).expect("valid fixture geometry");
    for t in tiles {
        b.add_tile(t).expect("valid fixture tile");
    }
    b.build()
}

/// The 72-tile dungeon tileset: 9 columns by 8 rows of 16x16 tiles.
pub fn dungeon_tileset() -> TilesetDefinition {
    let mut b = TilesetBuilder::new(16, 16, 72, 9).expect("valid fixture geometry");
    b.set_name("tile").set_image(ImageRef {
        source: "full tilemap.png".to_string(),
        width: Some(144),
        height: Some(128),
    });
    for t in dungeon_tiles() {
        b.add_tile(t).expect("valid fixture tile");
    }
    b.build()
}

fn dungeon_tiles() -> Vec<TileDefinition> {
    use Category::*;
    let named = [
        (0, Decor, "thing"),
        (1, Decor, "barrel"),
        (2, Decor, "shelves"),
        (3, Decor, "flag0"),
        (4, Decor, "flag1"),
        (5, Usable, "key"),
        (6, Usable, "potion0"),
        (7, Usable, "potion1"),
        (8, Usable, "potion2"),
        (9, Decor, "table0"),
        (10, Decor, "table1"),
        (11, Floor, "bricks"),
        (12, Floor, "tile"),
        (13, Decor, "skelet"),
        (14, Decor, "table3"),
        (18, Walls, "wall0"),
        (19, Walls, "wall1"),
        (23, Floor, "dirty0"),
        (27, Floor, "wooden_floor"),
        (28, Floor, "downstairs"),
        (32, Floor, "dirty1"),
    ];
    let unnamed = [
        (15, Floor),
        (16, Floor),
        (17, Floor),
        (20, Floor),
        (21, Floor),
        (22, Floor),
        (24, Floor),
        (26, Floor),
        (29, Floor),
        (30, Floor),
        (31, Floor),
        (33, Floor),
        (35, Floor),
        (42, Walls),
        (43, Walls),
        (44, Walls),
        (51, Walls),
        (52, Walls),
        (53, Walls),
    ];

    let mut tiles: Vec<TileDefinition> = named
        .iter()
        .map(|&(id, category, name)| tile(id, category, Some(name)))
        .chain(
            unnamed
                .iter()
                .map(|&(id, category)| tile(id, category, None)),
        )
        .collect();
    tiles.sort_by_key(|t| t.id);
    tiles
}
