//! Resource tables per archetype and per life type.

use crate::astro::{AtmosphereType, LifeType};
use crate::stellar::Temperature;
use crate::terrain::PlanetArchetype;

use super::rules::{branch, one_in, roll, rule, Amount, Condition, Entry};

static HERMIAN: &[Entry] = &[
    roll("Silicate Ore", 30, 3, 20),
    one_in(2, "Silicate Crystals", 10, 2, 10),
    roll("Ferric Ore", 25, 2, 20),
    roll("Heavy Metals", 15, 2, 12),
    roll("Radioactives", 10, 2, 6),
    one_in(4, "Rare Metals", 5, 1, 6),
    roll("Helium 3", 0, 2, 4),
];

static FERRINIAN: &[Entry] = &[
    roll("Silicate Ore", 20, 2, 10),
    roll("Ferric Ore", 45, 2, 20),
    roll("Heavy Metals", 30, 2, 20),
    roll("Radioactives", 10, 2, 8),
    one_in(3, "Rare Metals", 5, 1, 8),
];

static HADEAN: &[Entry] = &[
    roll("Silicate Ore", 15, 2, 8),
    roll("Ferric Ore", 65, 2, 20),
    roll("Heavy Metals", 45, 2, 20),
    roll("Radioactives", 10, 3, 8),
];

static CYTHEREAN: &[Entry] = &[
    roll("Silicate Ore", 30, 2, 20),
    roll("Ferric Ore", 20, 2, 12),
    roll("Carbonic Ore", 20, 3, 10),
    roll("Heavy Metals", 10, 2, 8),
    rule(
        "Sulphur Compounds",
        Amount::PressureScaled(20),
        Condition::AtmosphereIs(AtmosphereType::SulphurCompounds),
    ),
];

static AREAN: &[Entry] = &[
    roll("Silicate Ore", 30, 3, 12),
    roll("Ferric Ore", 30, 2, 20),
    one_in(2, "Carbonic Ore", 10, 2, 10),
    rule("Water", Amount::Hydrographics, Condition::MinHydrographics(1)),
    one_in(4, "Radioactives", 5, 2, 6),
    rule(
        "Water Ice",
        Amount::Roll {
            base: 5,
            dice: 2,
            sides: 10,
        },
        Condition::NoWarmerThan(Temperature::Cold),
    ),
];

static MESO_AREAN: &[Entry] = &[
    roll("Silicate Ore", 25, 3, 12),
    roll("Ferric Ore", 25, 2, 20),
    roll("Carbonic Ore", 15, 2, 10),
    rule("Water", Amount::Hydrographics, Condition::MinHydrographics(1)),
    rule(
        "Organic Chemicals",
        Amount::Roll {
            base: 0,
            dice: 1,
            sides: 20,
        },
        Condition::LifeAtLeast(LifeType::Organic),
    ),
];

static GAIAN: &[Entry] = &[
    rule("Water", Amount::Hydrographics, Condition::Always),
    rule(
        "Oxygen",
        Amount::PressureScaled(20),
        Condition::AtmosphereIs(AtmosphereType::LowOxygen),
    ),
    rule(
        "Oxygen",
        Amount::PressureScaled(40),
        Condition::AtmosphereIsNot(AtmosphereType::LowOxygen),
    ),
    roll("Silicate Ore", 20, 3, 10),
    roll("Ferric Ore", 10, 3, 8),
    roll("Carbonic Ore", 10, 3, 10),
    roll("Natural Oil", 30, 3, 10),
];

static EUROPAN: &[Entry] = &[roll("Water", 20, 4, 20), one_in(3, "Silicate Ore", 5, 2, 6)];

static EU_JOVIAN: &[Entry] = &[roll("Hydrogen", 60, 2, 20), one_in(3, "Helium 3", 0, 2, 6)];

static SUB_JOVIAN: &[Entry] = &[roll("Hydrogen", 50, 2, 20), roll("Helium 3", 0, 2, 4)];

static CRYO_JOVIAN: &[Entry] = &[
    roll("Hydrogen", 40, 2, 20),
    roll("Water", 10, 2, 10),
    one_in(2, "Methane", 10, 2, 10),
];

static ASTEROID_BELT: &[Entry] = &[
    roll("Silicate Ore", 20, 2, 20),
    roll("Ferric Ore", 20, 2, 20),
    roll("Heavy Metals", 5, 2, 10),
    one_in(4, "Rare Metals", 0, 1, 6),
    one_in(3, "Water", 0, 2, 10),
];

/// Base resource table for an archetype.
pub fn archetype_table(archetype: PlanetArchetype) -> &'static [Entry] {
    match archetype {
        PlanetArchetype::Hermian => HERMIAN,
        PlanetArchetype::Ferrinian => FERRINIAN,
        PlanetArchetype::Hadean => HADEAN,
        PlanetArchetype::Cytherean => CYTHEREAN,
        PlanetArchetype::Arean => AREAN,
        PlanetArchetype::MesoArean => MESO_AREAN,
        PlanetArchetype::Gaian => GAIAN,
        PlanetArchetype::Europan => EUROPAN,
        PlanetArchetype::EuJovian => EU_JOVIAN,
        PlanetArchetype::SubJovian => SUB_JOVIAN,
        PlanetArchetype::CryoJovian => CRYO_JOVIAN,
        PlanetArchetype::AsteroidBelt => ASTEROID_BELT,
    }
}

static LIFE_NONE: &[Entry] = &[roll("Protobionts", 0, 1, 10)];

static LIFE_ORGANIC: &[Entry] = &[Entry::Pick {
    dice: 1,
    sides: 2,
    branches: &[
        branch(1, 1, &[roll("Protobionts", 0, 4, 20)]),
        branch(2, 2, &[roll("Prokaryotes", 0, 5, 10)]),
    ],
}];

static LIFE_ARCHAEAN: &[Entry] = &[
    roll("Cyanobacteria", 20, 3, 20),
    one_in(3, "Algae", 0, 3, 12),
];

static LIFE_AEROBIC: &[Entry] = &[
    roll("Cyanobacteria", 0, 4, 12),
    roll("Algae", 0, 3, 12),
    Entry::Pick {
        dice: 1,
        sides: 3,
        branches: &[
            branch(1, 1, &[roll("Cnidarians", 30, 3, 20)]),
            branch(
                2,
                3,
                &[
                    roll("Cnidarians", 20, 2, 20),
                    roll("Echinoderms", 30, 3, 20),
                    one_in(2, "Marine Arthropods", 0, 2, 12),
                ],
            ),
        ],
    },
];

static LIFE_COMPLEX_OCEAN: &[Entry] = &[
    roll("Algae", 0, 3, 6),
    roll("Cnidarians", 5, 3, 8),
    roll("Echinoderms", 10, 4, 8),
    roll("Marine Arthropods", 20, 3, 20),
    roll("Fish", 20, 3, 20),
];

static LIFE_SIMPLE_LAND: &[Entry] = &[
    roll("Algae", 0, 3, 6),
    roll("Cnidarians", 5, 3, 8),
    roll("Echinoderms", 10, 4, 8),
    roll("Marine Arthropods", 10, 4, 12),
    roll("Fish", 20, 3, 20),
    Entry::Pick {
        dice: 2,
        sides: 6,
        branches: &[
            branch(2, 2, &[roll("Fungi", 0, 3, 8)]),
            branch(3, 3, &[roll("Moss", 5, 3, 10)]),
            branch(
                4,
                5,
                &[
                    roll("Fungi", 0, 2, 6),
                    roll("Moss", 10, 3, 10),
                    roll("Arthropods", 0, 2, 10),
                ],
            ),
            branch(
                6,
                7,
                &[
                    roll("Moss", 10, 3, 10),
                    roll("Ferns", 20, 3, 10),
                    roll("Arthropods", 0, 2, 8),
                    one_in(2, "Aquafauna", 5, 2, 10),
                ],
            ),
            branch(
                8,
                9,
                &[
                    roll("Moss", 0, 2, 10),
                    roll("Ferns", 20, 3, 20),
                    roll("Arthropods", 0, 2, 20),
                    roll("Aquafauna", 10, 2, 12),
                    roll("Microfauna", 10, 3, 6),
                ],
            ),
            branch(
                10,
                11,
                &[
                    roll("Ferns", 30, 3, 20),
                    roll("Arthropods", 0, 2, 12),
                    roll("Aquafauna", 10, 2, 6),
                    roll("Microfauna", 20, 3, 8),
                    roll("Mesofauna", 0, 2, 6),
                ],
            ),
            branch(
                12,
                12,
                &[
                    roll("Ferns", 30, 3, 20),
                    roll("Trees", 0, 2, 10),
                    roll("Arthropods", 0, 2, 4),
                    roll("Aquafauna", 5, 2, 6),
                    roll("Microfauna", 30, 3, 8),
                    roll("Mesofauna", 10, 2, 10),
                ],
            ),
        ],
    },
];

static LIFE_COMPLEX_LAND: &[Entry] = &[
    roll("Algae", 0, 2, 6),
    roll("Cnidarians", 5, 2, 8),
    roll("Echinoderms", 10, 3, 8),
    roll("Marine Arthropods", 10, 4, 12),
    roll("Fish", 30, 3, 20),
    roll("Trees", 40, 4, 12),
    roll("Grasses", 40, 4, 12),
    roll("Arthropods", 0, 2, 4),
    roll("Aquafauna", 5, 2, 6),
    roll("Microfauna", 20, 3, 10),
    roll("Mesofauna", 20, 4, 10),
];

static LIFE_EXTENSIVE: &[Entry] = &[
    roll("Algae", 0, 2, 6),
    roll("Cnidarians", 5, 2, 8),
    roll("Echinoderms", 10, 3, 8),
    roll("Marine Arthropods", 10, 4, 12),
    roll("Fish", 30, 3, 20),
    roll("Trees", 40, 4, 12),
    roll("Grasses", 40, 4, 12),
    roll("Arthropods", 0, 2, 4),
    roll("Aquafauna", 5, 2, 6),
    roll("Microfauna", 20, 3, 10),
    Entry::Pick {
        dice: 1,
        sides: 6,
        branches: &[
            branch(
                1,
                1,
                &[roll("Mesofauna", 10, 2, 10), roll("Megafauna", 30, 5, 12)],
            ),
            branch(
                2,
                6,
                &[roll("Mesofauna", 30, 4, 12), roll("Megafauna", 0, 2, 4)],
            ),
        ],
    },
];

/// Ecology of a world with surface seas, keyed by its life.
pub fn surface_ecology(life: LifeType) -> &'static [Entry] {
    match life {
        LifeType::None => LIFE_NONE,
        LifeType::Organic => LIFE_ORGANIC,
        LifeType::Archaean => LIFE_ARCHAEAN,
        LifeType::Aerobic => LIFE_AEROBIC,
        LifeType::ComplexOcean => LIFE_COMPLEX_OCEAN,
        LifeType::SimpleLand => LIFE_SIMPLE_LAND,
        LifeType::ComplexLand => LIFE_COMPLEX_LAND,
        LifeType::Extensive => LIFE_EXTENSIVE,
    }
}

static UNDER_ICE_ORGANIC: &[Entry] = &[roll("Organic Chemicals", 0, 1, 20)];

static UNDER_ICE_ARCHAEAN: &[Entry] = &[
    roll("Organic Chemicals", 10, 1, 10),
    Entry::Pick {
        dice: 1,
        sides: 3,
        branches: &[
            branch(1, 1, &[roll("Protobionts", 1, 1, 10)]),
            branch(
                2,
                2,
                &[roll("Protobionts", 5, 1, 5), roll("Cyanobacteria", 3, 1, 4)],
            ),
            branch(
                3,
                3,
                &[roll("Protobionts", 5, 1, 5), roll("Cyanobacteria", 10, 2, 8)],
            ),
        ],
    },
];

static UNDER_ICE_AEROBIC: &[Entry] = &[
    roll("Cyanobacteria", 12, 4, 6),
    roll("Algae", 10, 3, 6),
    roll("Cnidarians", 3, 3, 6),
];

/// Ecology of an ocean sealed under ice, keyed by its life.
pub fn subglacial_ecology(life: LifeType) -> &'static [Entry] {
    match life {
        LifeType::None => &[],
        LifeType::Organic => UNDER_ICE_ORGANIC,
        LifeType::Archaean => UNDER_ICE_ARCHAEAN,
        _ => UNDER_ICE_AEROBIC,
    }
}

/// Ecology table that applies to an archetype, if any.
pub fn ecology_table(archetype: PlanetArchetype, life: LifeType) -> &'static [Entry] {
    match archetype {
        PlanetArchetype::Gaian => surface_ecology(life),
        PlanetArchetype::Europan => subglacial_ecology(life),
        PlanetArchetype::MesoArean if life > LifeType::Organic => LIFE_ARCHAEAN,
        _ => &[],
    }
}
