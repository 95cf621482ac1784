use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a tile within a single tileset. Cheap to copy and compare.
///
/// IDs are local to their tileset and index the atlas row-major, starting at
/// zero. Serializes as a bare integer so save files persist only the number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TileId {
    fn from(raw: u32) -> Self {
        TileId(raw)
    }
}
