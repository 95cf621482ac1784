//! Property-based tests for the tile registry.
//!
//! Uses proptest to generate random sparse tilesets, then verify the query
//! contract holds for every ID in and around the tileset.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tilemeta_core::category::Category;
use tilemeta_core::id::TileId;
use tilemeta_core::registry::{RegistryError, TileRegistry};
use tilemeta_core::test_utils::*;
use tilemeta_core::tileset::TilesetDefinition;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Decor),
        Just(Category::Usable),
        Just(Category::Floor),
        Just(Category::Walls),
        Just(Category::Unknown),
    ]
}

/// Names drawn from a small pool so that duplicates within a category occur.
fn arb_name() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("key".to_string()),
        Just("potion".to_string()),
        Just("barrel".to_string()),
        Just("wall".to_string()),
    ])
}

type Declared = BTreeMap<u32, (Category, Option<String>)>;

/// Generate a tileset with up to `max_tiles` tiles and a random sparse subset
/// of declared IDs.
fn arb_tileset(max_tiles: u32) -> impl Strategy<Value = (TilesetDefinition, Declared)> {
    (1..=max_tiles, 1..=16u32).prop_flat_map(|(tile_count, columns)| {
        proptest::collection::btree_map(
            0..tile_count,
            (arb_category(), arb_name()),
            0..=tile_count as usize,
        )
        .prop_map(move |declared| {
            let tiles = declared
                .iter()
                .map(|(&id, (category, name))| tile(id, *category, name.as_deref()))
                .collect();
            (tileset_with(tile_count, columns, tiles), declared)
        })
    })
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Declared tiles reproduce exactly what was declared.
    #[test]
    fn declared_round_trip((def, declared) in arb_tileset(200)) {
        let reg = TileRegistry::new(def);
        for (&id, (category, name)) in &declared {
            prop_assert_eq!(reg.category_of(TileId(id)).unwrap(), *category);
            prop_assert_eq!(reg.name_of(TileId(id)).unwrap(), name.as_deref());
        }
    }

    /// Undeclared in-range IDs are plain and unnamed.
    #[test]
    fn undeclared_are_plain((def, declared) in arb_tileset(200)) {
        let reg = TileRegistry::new(def);
        for id in (0..reg.tile_count()).filter(|id| !declared.contains_key(id)) {
            prop_assert_eq!(reg.category_of(TileId(id)).unwrap(), Category::PLAIN);
            prop_assert_eq!(reg.name_of(TileId(id)).unwrap(), None);
        }
    }

    /// Out-of-range IDs are always rejected, never defaulted.
    #[test]
    fn out_of_range_rejected((def, _declared) in arb_tileset(200), past in 0..1000u32, neg in 1..1000i64) {
        let reg = TileRegistry::new(def);
        let id = reg.tile_count() + past;
        let is_out_of_range = matches!(
            reg.category_of(TileId(id)),
            Err(RegistryError::OutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
        prop_assert!(reg.name_of(TileId(id)).is_err());
        prop_assert!(reg.resolve(i64::from(id)).is_err());
        prop_assert!(reg.resolve(-neg).is_err());
    }

    /// `find_by_name` returns the lowest declared ID with that pair.
    #[test]
    fn find_by_name_lowest_wins((def, declared) in arb_tileset(200)) {
        let reg = TileRegistry::new(def);
        for category in Category::ALL {
            for name in ["key", "potion", "barrel", "wall"] {
                let expected = declared
                    .iter()
                    .find(|(_, (c, n))| *c == category && n.as_deref() == Some(name))
                    .map(|(&id, _)| TileId(id));
                prop_assert_eq!(reg.find_by_name(category, name), expected);
            }
        }
    }

    /// Category listings partition the ID range in ascending order and agree
    /// with `category_of`.
    #[test]
    fn all_of_category_partitions_range((def, _declared) in arb_tileset(200)) {
        let reg = TileRegistry::new(def);
        let mut seen = 0usize;
        for category in Category::ALL {
            let ids: Vec<TileId> = reg.all_of_category(category).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            for id in &ids {
                prop_assert_eq!(reg.category_of(*id).unwrap(), category);
            }
            let again: Vec<TileId> = reg.all_of_category(category).collect();
            prop_assert_eq!(&ids, &again);
            seen += ids.len();
        }
        prop_assert_eq!(seen, reg.tile_count() as usize);
    }
}
