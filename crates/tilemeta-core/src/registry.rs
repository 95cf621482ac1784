use crate::category::Category;
use crate::id::TileId;
use crate::tileset::{TileDefinition, TileRect, TilesetDefinition};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Errors returned by registry queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The ID is negative or not below the tileset's tile count. Callers
    /// typically substitute a fallback category and carry on.
    #[error("tile id {id} out of range (tile count {tile_count})")]
    OutOfRange { id: i64, tile_count: u32 },
}

/// Immutable tile metadata index. Frozen at construction. Thread-safe to share.
///
/// Storage is proportional to the declared tiles, not to the tile count, so a
/// sparse tileset with a huge `tilecount` costs no more than a small one.
/// Lookups by ID go through a hash map of declared categories; reverse lookups
/// by `(category, name)` go through per-category hash maps. IDs the tileset
/// never declares report [`Category::PLAIN`] and no name.
#[derive(Debug)]
pub struct TileRegistry {
    def: TilesetDefinition,
    categories: HashMap<TileId, Category>,
    by_category: [Vec<TileId>; Category::COUNT],
    by_name: [HashMap<String, TileId>; Category::COUNT],
}

impl TileRegistry {
    /// Index a tileset in one pass over the declared tiles in ascending ID
    /// order, so when several tiles share a `(category, name)` pair the lowest
    /// ID is the one recorded.
    pub fn new(def: TilesetDefinition) -> Self {
        let mut categories = HashMap::with_capacity(def.declared_count());
        let mut by_category: [Vec<TileId>; Category::COUNT] =
            std::array::from_fn(|_| Vec::new());
        let mut by_name: [HashMap<String, TileId>; Category::COUNT] =
            std::array::from_fn(|_| HashMap::new());

        for tile in def.tiles() {
            categories.insert(tile.id, tile.category);
            by_category[tile.category.index()].push(tile.id);
            let Some(name) = &tile.name else { continue };
            match by_name[tile.category.index()].entry(name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(tile.id);
                }
                Entry::Occupied(first) => {
                    log::warn!(
                        "tiles {} and {} share {} name '{}'; lookups resolve to {}",
                        first.get(),
                        tile.id,
                        tile.category,
                        name,
                        first.get()
                    );
                }
            }
        }

        log::debug!(
            "indexed tileset {}: {} declared of {} tiles",
            def.name().unwrap_or("<unnamed>"),
            def.declared_count(),
            def.tile_count()
        );

        Self {
            def,
            categories,
            by_category,
            by_name,
        }
    }

    /// Validate a raw ID from a map layer or save file.
    pub fn resolve(&self, raw: i64) -> Result<TileId, RegistryError> {
        u32::try_from(raw)
            .ok()
            .map(TileId)
            .filter(|id| self.def.contains(*id))
            .ok_or(RegistryError::OutOfRange {
                id: raw,
                tile_count: self.def.tile_count(),
            })
    }

    fn check(&self, id: TileId) -> Result<(), RegistryError> {
        if self.def.contains(id) {
            Ok(())
        } else {
            Err(RegistryError::OutOfRange {
                id: i64::from(id.0),
                tile_count: self.def.tile_count(),
            })
        }
    }

    /// Category of `id`; [`Category::PLAIN`] for undeclared in-range IDs.
    pub fn category_of(&self, id: TileId) -> Result<Category, RegistryError> {
        self.check(id)?;
        Ok(self.categories.get(&id).copied().unwrap_or(Category::PLAIN))
    }

    /// Declared name of `id`, or `None` if it has none.
    pub fn name_of(&self, id: TileId) -> Result<Option<&str>, RegistryError> {
        self.check(id)?;
        Ok(self.def.tile(id).and_then(|t| t.name.as_deref()))
    }

    /// A custom property declared on `id`.
    pub fn property(&self, id: TileId, key: &str) -> Result<Option<&str>, RegistryError> {
        self.check(id)?;
        Ok(self
            .def
            .tile(id)
            .and_then(|t| t.properties.get(key))
            .map(String::as_str))
    }

    /// Full declared metadata of `id`, if the tileset declares it.
    pub fn tile(&self, id: TileId) -> Result<Option<&TileDefinition>, RegistryError> {
        self.check(id)?;
        Ok(self.def.tile(id))
    }

    /// Atlas rectangle the renderer should draw for `id`.
    pub fn source_rect(&self, id: TileId) -> Result<TileRect, RegistryError> {
        self.check(id)?;
        self.def.source_rect(id).ok_or(RegistryError::OutOfRange {
            id: i64::from(id.0),
            tile_count: self.def.tile_count(),
        })
    }

    /// Reverse lookup. If several tiles share the pair, the lowest ID wins.
    pub fn find_by_name(&self, category: Category, name: &str) -> Option<TileId> {
        self.by_name[category.index()].get(name).copied()
    }

    /// All in-range IDs whose category is `category`, ascending. Undeclared
    /// IDs count as [`Category::PLAIN`], so the plain listing walks the whole
    /// ID range lazily. The iterator can be cloned and re-requested; every
    /// pass yields the same sequence.
    pub fn all_of_category(&self, category: Category) -> CategoryIter<'_> {
        let inner = if category == Category::PLAIN {
            Listing::Plain {
                ids: 0..self.def.tile_count(),
                categories: &self.categories,
            }
        } else {
            Listing::Declared(self.by_category[category.index()].iter())
        };
        CategoryIter { inner }
    }

    pub fn tile_count(&self) -> u32 {
        self.def.tile_count()
    }

    pub fn declared_count(&self) -> usize {
        self.def.declared_count()
    }

    pub fn definition(&self) -> &TilesetDefinition {
        &self.def
    }
}

/// Ascending tile IDs of one category. See [`TileRegistry::all_of_category`].
#[derive(Debug, Clone)]
pub struct CategoryIter<'a> {
    inner: Listing<'a>,
}

#[derive(Debug, Clone)]
enum Listing<'a> {
    Declared(std::slice::Iter<'a, TileId>),
    /// Every ID in range that is undeclared or declared plain.
    Plain {
        ids: std::ops::Range<u32>,
        categories: &'a HashMap<TileId, Category>,
    },
}

impl Iterator for CategoryIter<'_> {
    type Item = TileId;

    fn next(&mut self) -> Option<TileId> {
        match &mut self.inner {
            Listing::Declared(ids) => ids.next().copied(),
            Listing::Plain { ids, categories } => ids.map(TileId).find(|id| {
                categories
                    .get(id)
                    .is_none_or(|category| *category == Category::PLAIN)
            }),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Listing::Declared(ids) => ids.size_hint(),
            Listing::Plain { ids, .. } => (0, ids.size_hint().1),
        }
    }
}
