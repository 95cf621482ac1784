//! Tilemeta Core -- tile metadata for tile-based levels.
//!
//! This crate holds the validated in-memory form of a tileset definition and
//! the read-only registry that engine subsystems query at runtime. It performs
//! no I/O and knows nothing about markup; see `tilemeta-data` for parsing.
//!
//! # Lifecycle
//!
//! 1. **Assemble** -- A [`tileset::TilesetBuilder`] receives the geometry and
//!    the declared tiles, rejecting duplicate and out-of-range IDs.
//! 2. **Freeze** -- [`tileset::TilesetBuilder::build`] yields an immutable
//!    [`tileset::TilesetDefinition`].
//! 3. **Index** -- [`registry::TileRegistry::new`] builds the lookup tables.
//!    The registry lives as long as the level that loaded it and is dropped on
//!    unload.
//!
//! ```rust,ignore
//! let reg = TileRegistry::new(def);
//! let category = reg.category_of(TileId(5))?;
//! let stairs = reg.find_by_name(Category::Floor, "downstairs");
//! ```
//!
//! # Plain tiles
//!
//! The tile mapping is sparse. Every in-range ID the tileset does not declare
//! is a plain tile: category [`category::Category::PLAIN`] (floor) and no name.
//!
//! # Key Types
//!
//! - [`id::TileId`] -- Tileset-local tile identifier.
//! - [`category::Category`] -- Decor, usable, floor, walls, or unknown.
//! - [`tileset::TilesetDefinition`] -- Geometry, atlas reference, and the
//!   sparse tile mapping.
//! - [`registry::TileRegistry`] -- O(1) queries by ID and by
//!   `(category, name)`; shareable across threads without locking.

pub mod category;
pub mod id;
pub mod registry;
pub mod tileset;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
