//! Tile value objects and archetype palettes.

use serde::{Deserialize, Serialize};

/// A named surface type with a display colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub name: String,
    pub rgb: [u8; 3],
    /// True for liquid-covered tiles.
    pub water: bool,
}

impl Tile {
    pub fn new(name: &str, hex: &str, water: bool) -> Self {
        Self {
            name: name.to_string(),
            rgb: parse_hex(hex),
            water,
        }
    }

    /// Colour shaded by `shade` in the range -1.0 (darker) to 1.0 (lighter).
    pub fn shaded(&self, shade: f32) -> [u8; 3] {
        let shade = shade.clamp(-1.0, 1.0);
        self.rgb.map(|c| {
            let c = c as f32;
            let v = if shade >= 0.0 {
                c + (255.0 - c) * shade * 0.5
            } else {
                c * (1.0 + shade * 0.5)
            };
            v.round().clamp(0.0, 255.0) as u8
        })
    }
}

fn parse_hex(hex: &str) -> [u8; 3] {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    [channel(0), channel(2), channel(4)]
}

/// The role a cell plays on the surface. The palette turns it into a [`Tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    /// Low-lying baseline of a dry world.
    Base,
    /// Raised ground.
    Land,
    Mountains,
    Sea,
    /// Former sea floor left dry when the water receded.
    Seabed,
    Ice,
    /// Dry crater floor.
    Crater,
    /// Crater floor below sea level, flooded.
    CraterLake,
    /// Cloud band, indexed into the palette's band list.
    Band(u8),
}

/// Tiles used by an archetype for each [`TileKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub base: Tile,
    pub land: Tile,
    pub mountains: Tile,
    pub sea: Tile,
    pub seabed: Tile,
    pub ice: Tile,
    pub crater: Tile,
    pub crater_lake: Tile,
    pub bands: Vec<Tile>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: Tile::new("Base", "#777766", false),
            land: Tile::new("Land", "#999988", false),
            mountains: Tile::new("Mountains", "#aaaa99", false),
            sea: Tile::new("Sea", "#4444aa", true),
            seabed: Tile::new("Seabed", "#777766", false),
            ice: Tile::new("Ice", "#f0f0f0", false),
            crater: Tile::new("Crater", "#888877", false),
            crater_lake: Tile::new("Crater Lake", "#5555bb", true),
            bands: Vec::new(),
        }
    }
}

impl Palette {
    /// Rocky palette for worlds without surface water.
    pub fn rocky(base: &str, land: &str, mountains: &str, crater: &str) -> Self {
        Self {
            base: Tile::new("Base", base, false),
            land: Tile::new("Crust", land, false),
            mountains: Tile::new("Mountains", mountains, false),
            crater: Tile::new("Crater", crater, false),
            ..Default::default()
        }
    }

    /// Palette made only of cloud bands.
    pub fn banded(bands: &[(&str, &str)]) -> Self {
        Self {
            bands: bands
                .iter()
                .map(|(name, hex)| Tile::new(name, hex, false))
                .collect(),
            ..Default::default()
        }
    }

    /// Resolves a kind to its tile.
    pub fn tile(&self, kind: TileKind) -> &Tile {
        match kind {
            TileKind::Base => &self.base,
            TileKind::Land => &self.land,
            TileKind::Mountains => &self.mountains,
            TileKind::Sea => &self.sea,
            TileKind::Seabed => &self.seabed,
            TileKind::Ice => &self.ice,
            TileKind::Crater => &self.crater,
            TileKind::CraterLake => &self.crater_lake,
            TileKind::Band(i) => {
                if self.bands.is_empty() {
                    &self.base
                } else {
                    &self.bands[i as usize % self.bands.len()]
                }
            }
        }
    }

    pub fn is_water(&self, kind: TileKind) -> bool {
        self.tile(kind).water
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Tile::new("Sea", "#4444aa", true).rgb, [0x44, 0x44, 0xaa]);
        assert_eq!(Tile::new("Odd", "zz", false).rgb, [0, 0, 0]);
    }

    #[test]
    fn test_shading_bounds() {
        let t = Tile::new("Grey", "#808080", false);
        assert_eq!(t.shaded(0.0), [128, 128, 128]);
        assert!(t.shaded(1.0)[0] > 128);
        assert!(t.shaded(-1.0)[0] < 128);
    }

    #[test]
    fn test_band_lookup_wraps() {
        let p = Palette::banded(&[("Dark", "#999977"), ("Light", "#cccc99")]);
        assert_eq!(p.tile(TileKind::Band(0)).name, "Dark");
        assert_eq!(p.tile(TileKind::Band(3)).name, "Light");
    }

    #[test]
    fn test_water_flags() {
        let p = Palette::default();
        assert!(p.is_water(TileKind::Sea));
        assert!(p.is_water(TileKind::CraterLake));
        assert!(!p.is_water(TileKind::Seabed));
        assert!(!p.is_water(TileKind::Land));
    }
}
