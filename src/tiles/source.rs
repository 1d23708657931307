use crate::core::constants::TILE_SIZE;

/// Describes a tile set: its name, zoom range and tile size
pub trait TileSource: Send + Sync {
    fn name(&self) -> &str;
    fn min_zoom(&self) -> u32;
    fn max_zoom(&self) -> u32;
    /// Edge length of a square tile in pixels
    fn tile_size(&self) -> u32;
}

/// Plain XYZ tile set description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XyzTileSource {
    name: String,
    min_zoom: u32,
    max_zoom: u32,
    tile_size: u32,
}

impl XyzTileSource {
    pub fn new(name: impl Into<String>, min_zoom: u32, max_zoom: u32, tile_size: u32) -> Self {
        Self {
            name: name.into(),
            min_zoom,
            max_zoom,
            tile_size,
        }
    }

    /// The default OpenStreetMap tile set
    pub fn openstreetmap() -> Self {
        Self::new("Mapnik", 0, 19, TILE_SIZE)
    }
}

impl Default for XyzTileSource {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

impl TileSource for XyzTileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_zoom(&self) -> u32 {
        self.min_zoom
    }

    fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    fn tile_size(&self) -> u32 {
        self.tile_size
    }
}
