use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse behavioral class of a tile, consumed by collision and interaction.
///
/// The authoring tool's vocabulary grows faster than consumers do, so any type
/// string outside the known set maps to [`Category::Unknown`] instead of
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Decor,
    Usable,
    Floor,
    Walls,
    Unknown,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 5;

    /// Every category, in index order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Decor,
        Category::Usable,
        Category::Floor,
        Category::Walls,
        Category::Unknown,
    ];

    /// Category of a tile that carries no type: either an in-range ID the
    /// tileset never declares, or a declared tile without a `type` attribute.
    /// Such tiles are plain floor with no name.
    pub const PLAIN: Category = Category::Floor;

    /// Map a tileset `type` string to a category. Never fails.
    pub fn from_type(raw: &str) -> Category {
        match raw {
            "decor" => Category::Decor,
            "usable" => Category::Usable,
            "floor" => Category::Floor,
            "walls" => Category::Walls,
            _ => Category::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Decor => "decor",
            Category::Usable => "usable",
            Category::Floor => "floor",
            Category::Walls => "walls",
            Category::Unknown => "unknown",
        }
    }

    /// Position of this category in [`Category::ALL`]. Used to index
    /// per-category tables.
    pub fn index(self) -> usize {
        match self {
            Category::Decor => 0,
            Category::Usable => 1,
            Category::Floor => 2,
            Category::Walls => 3,
            Category::Unknown => 4,
        }
    }

    /// Whether actors may walk over tiles of this category.
    pub fn is_passable(self) -> bool {
        !matches!(self, Category::Walls)
    }

    /// Whether stepping on or activating the tile triggers an interaction.
    pub fn is_interactive(self) -> bool {
        matches!(self, Category::Usable)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::PLAIN
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
