//! Planet archetypes: the data that selects and parameterises a terrain
//! strategy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tile::{Palette, Tile};

/// Broad physical category of a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Belt,
    Dwarf,
    Terrestrial,
    Jovian,
}

/// Which sequence of terrain passes builds the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainStrategy {
    /// Airless rock: continents and craters, no water.
    Barren,
    /// Rock with seas that have partly dried out.
    Wet,
    /// Earth-like: equatorial continents, polar ice, seas.
    Gaian,
    /// Gas giant cloud bands.
    Jovian,
    /// Scattered rubble.
    Belt,
}

/// Named planet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetArchetype {
    /// Mercury-like.
    Hermian,
    /// Iron-rich dwarf.
    Ferrinian,
    /// Bare planetary core.
    Hadean,
    /// Venus-like.
    Cytherean,
    /// Mars-like.
    Arean,
    /// A Mars that kept its seas for longer.
    MesoArean,
    /// Earth-like.
    Gaian,
    /// Ice-shelled ocean moon.
    Europan,
    /// Jupiter-like.
    EuJovian,
    /// Saturn-like.
    SubJovian,
    /// Ice giant.
    CryoJovian,
    AsteroidBelt,
}

impl PlanetArchetype {
    pub const fn all() -> [PlanetArchetype; 12] {
        use PlanetArchetype::*;
        [
            Hermian,
            Ferrinian,
            Hadean,
            Cytherean,
            Arean,
            MesoArean,
            Gaian,
            Europan,
            EuJovian,
            SubJovian,
            CryoJovian,
            AsteroidBelt,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            PlanetArchetype::Hermian => "Hermian",
            PlanetArchetype::Ferrinian => "Ferrinian",
            PlanetArchetype::Hadean => "Hadean",
            PlanetArchetype::Cytherean => "Cytherean",
            PlanetArchetype::Arean => "Arean",
            PlanetArchetype::MesoArean => "MesoArean",
            PlanetArchetype::Gaian => "Gaian",
            PlanetArchetype::Europan => "Europan",
            PlanetArchetype::EuJovian => "EuJovian",
            PlanetArchetype::SubJovian => "SubJovian",
            PlanetArchetype::CryoJovian => "CryoJovian",
            PlanetArchetype::AsteroidBelt => "AsteroidBelt",
        }
    }

    pub fn category(self) -> Category {
        use PlanetArchetype::*;
        match self {
            AsteroidBelt => Category::Belt,
            Ferrinian | Hadean | Europan => Category::Dwarf,
            Hermian | Cytherean | Arean | MesoArean | Gaian => Category::Terrestrial,
            EuJovian | SubJovian | CryoJovian => Category::Jovian,
        }
    }

    pub fn strategy(self) -> TerrainStrategy {
        use PlanetArchetype::*;
        match self {
            Hermian | Ferrinian | Hadean | Cytherean | Europan => TerrainStrategy::Barren,
            Arean | MesoArean => TerrainStrategy::Wet,
            Gaian => TerrainStrategy::Gaian,
            EuJovian | SubJovian | CryoJovian => TerrainStrategy::Jovian,
            AsteroidBelt => TerrainStrategy::Belt,
        }
    }

    pub fn is_jovian(self) -> bool {
        self.category() == Category::Jovian
    }

    /// Typical radius in km (belt width in Mkm for belts).
    pub fn base_radius(self) -> u32 {
        match self {
            PlanetArchetype::Hermian => 2500,
            PlanetArchetype::Ferrinian => 1800,
            PlanetArchetype::Hadean => 500,
            PlanetArchetype::Cytherean => 6200,
            PlanetArchetype::Arean | PlanetArchetype::MesoArean => 3500,
            PlanetArchetype::Gaian => 6500,
            PlanetArchetype::Europan => 1500,
            PlanetArchetype::EuJovian => 90_000,
            PlanetArchetype::SubJovian => 70_000,
            PlanetArchetype::CryoJovian => 50_000,
            PlanetArchetype::AsteroidBelt => 4,
        }
    }

    /// Tiles used to draw this archetype.
    pub fn palette(self) -> Palette {
        match self {
            PlanetArchetype::Hermian => Palette::rocky("#908070", "#a09080", "#c0b0b0", "#887767"),
            PlanetArchetype::Ferrinian => {
                Palette::rocky("#706050", "#907060", "#c0b0b0", "#807060")
            }
            PlanetArchetype::Hadean => Palette::rocky("#303030", "#504030", "#100000", "#282828"),
            PlanetArchetype::Cytherean => {
                Palette::rocky("#c0a060", "#d0b070", "#b0b0b0", "#a09050")
            }
            PlanetArchetype::Europan => Palette::rocky("#d0d8e0", "#b8c0c8", "#e8f0f8", "#a0a8b0"),
            PlanetArchetype::Arean => Palette {
                base: Tile::new("Base", "#3c3b36", false),
                land: Tile::new("Crust", "#d8b476", false),
                mountains: Tile::new("Mountains", "#e9be7a", false),
                seabed: Tile::new("Seabed", "#b89456", false),
                crater: Tile::new("Crater", "#a88446", false),
                ..Default::default()
            },
            PlanetArchetype::MesoArean => Palette::default(),
            PlanetArchetype::Gaian => Palette {
                land: Tile::new("Land", "#77aa33", false),
                mountains: Tile::new("Mountains", "#b0b0b0", false),
                ..Default::default()
            },
            PlanetArchetype::EuJovian => {
                Palette::banded(&[("Dark", "#999977"), ("Light", "#cccc99")])
            }
            PlanetArchetype::SubJovian => Palette::banded(&[
                ("Dark", "#bbbb99"),
                ("Light", "#dddddd"),
                ("White", "#f0f0f0"),
                ("Yellow", "#aaaa77"),
            ]),
            PlanetArchetype::CryoJovian => Palette::banded(&[
                ("Dark", "#008899"),
                ("Light", "#0099bb"),
                ("White", "#55ddff"),
                ("Banding", "#0077aa"),
            ]),
            PlanetArchetype::AsteroidBelt => {
                Palette::rocky("#202020", "#505048", "#707068", "#303030")
            }
        }
    }
}

impl fmt::Display for PlanetArchetype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PlanetArchetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanetArchetype::all()
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown archetype '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jovians_use_banded_palettes() {
        for a in PlanetArchetype::all() {
            if a.is_jovian() {
                assert_eq!(a.strategy(), TerrainStrategy::Jovian);
                assert!(a.palette().bands.len() >= 2);
            }
        }
    }

    #[test]
    fn test_archetype_parse() {
        assert_eq!("gaian".parse::<PlanetArchetype>().unwrap(), PlanetArchetype::Gaian);
        assert!("Vulcan".parse::<PlanetArchetype>().is_err());
    }

    #[test]
    fn test_dry_palettes_have_no_water_baseline() {
        for a in PlanetArchetype::all() {
            assert!(!a.palette().base.water, "{}", a);
        }
    }
}
