//! Sectorgen CLI - procedural sector, star system and planet generator.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use sectorgen::astro::{
    format_sector_codes, HierarchyBuilder, MemoryStore, NameList, NameSource, Numbered,
    PersistenceSink, SectorConfig,
};
use sectorgen::export::{
    export_height_png, export_surface_png, export_tile_grid_png, HeightPngOptions,
    SurfaceMapOptions,
};
use sectorgen::geometry::{ROW_WIDTHS, TILE_COUNT};
use sectorgen::pipeline::build_pipeline;
use sectorgen::random::Dice;
use sectorgen::stellar::{
    cold_point, earth_equivalent_distance, inner_limit, orbit_period, orbit_temperature,
    solar_constant, Classification,
};
use sectorgen::terrain::{PlanetArchetype, Surface, TerrainConfig};

/// Procedural sector, star system and planet generator.
#[derive(Parser)]
#[command(name = "sectorgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a sector and fill it with random star systems.
    Sector {
        #[arg(long, default_value = "Test")]
        name: String,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: i32,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y: i32,

        /// Space separated sector codes, e.g. "Sp Ba Lo".
        #[arg(long, default_value = "")]
        codes: String,

        #[arg(long, default_value = "Un")]
        allegiance: String,

        /// Percent chance of a star system in each cell.
        #[arg(long, default_value = "5")]
        chance: u32,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// File of system names, one per line.
        #[arg(long)]
        names: Option<PathBuf>,

        /// Terrain raster size per geodesic tile.
        #[arg(long, default_value = "4")]
        tile_size: usize,
    },

    /// Create a single star system and list its stars and planets.
    System {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        sector_x: i32,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        sector_y: i32,

        /// Cell column, 1 to 32; 0 picks a free cell.
        #[arg(long, default_value = "0")]
        x: u32,

        /// Cell row, 1 to 40; 0 picks a free cell.
        #[arg(long, default_value = "0")]
        y: u32,

        #[arg(long, default_value = "Tau")]
        name: String,

        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(long, default_value = "8")]
        tile_size: usize,

        /// Write each planet's tile map to this directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Synthesise one planet surface and write it as PNG.
    Planet {
        /// Archetype name, e.g. Gaian, Hermian, EuJovian.
        #[arg(short, long, default_value = "Gaian")]
        archetype: String,

        #[arg(short, long)]
        seed: Option<u64>,

        /// Raster size per geodesic tile.
        #[arg(short, long, default_value = "16")]
        tile_size: usize,

        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "planet")]
        name: String,

        /// Water coverage before drying, percent.
        #[arg(long)]
        start_hydro: Option<u32>,

        /// Water coverage after drying, percent.
        #[arg(long)]
        end_hydro: Option<u32>,
    },

    /// Display the grid layout and the stellar model for a G2 V star.
    Info,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sector {
            name,
            x,
            y,
            codes,
            allegiance,
            chance,
            seed,
            names,
            tile_size,
        } => run_sector(name, x, y, codes, allegiance, chance, seed, names, tile_size),
        Commands::System {
            sector_x,
            sector_y,
            x,
            y,
            name,
            seed,
            tile_size,
            output,
        } => run_system(sector_x, sector_y, x, y, name, seed, tile_size, output),
        Commands::Planet {
            archetype,
            seed,
            tile_size,
            output,
            name,
            start_hydro,
            end_hydro,
        } => run_planet(archetype, seed, tile_size, output, name, start_hydro, end_hydro),
        Commands::Info => run_info(),
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    })
}

fn check_tile_size(tile_size: usize) {
    if !(1..=64).contains(&tile_size) {
        eprintln!("Error: Tile size must be between 1 and 64");
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_sector(
    name: String,
    x: i32,
    y: i32,
    codes: String,
    allegiance: String,
    chance: u32,
    seed: Option<u64>,
    names: Option<PathBuf>,
    tile_size: usize,
) {
    if chance > 100 {
        eprintln!("Error: Chance must be between 0 and 100");
        std::process::exit(1);
    }
    check_tile_size(tile_size);
    let seed = resolve_seed(seed);

    let mut source: Box<dyn NameSource> = match names {
        Some(path) => match NameList::from_file(&path) {
            Ok(list) => Box::new(list),
            Err(e) => {
                eprintln!("Error reading names from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(Numbered::new(&name)),
    };

    println!("Sectorgen - Sector Generator");
    println!("============================");
    println!("Sector: {} at {},{}", name, x, y);
    println!("Seed: {}", seed);

    let config = SectorConfig {
        tile_size,
        ..SectorConfig::with_seed(seed)
    };
    let mut builder = HierarchyBuilder::new(MemoryStore::new(), config);
    let start = Instant::now();

    let sector_id = match builder.create_empty_sector(&name, x, y, &codes, &allegiance) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error creating sector: {}", e);
            std::process::exit(1);
        }
    };
    let created = match builder.fill_random_sector(sector_id, chance, source.as_mut()) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error filling sector: {}", e);
            std::process::exit(1);
        }
    };
    println!("Created {} star systems in {:.2?}", created, start.elapsed());

    let store = builder.store();
    if let Ok(sector) = store.sector(sector_id) {
        println!(
            "\n{} [{}] {}",
            sector.name,
            format_sector_codes(&sector.codes),
            sector.allegiance
        );
    }
    for system in store.systems_in(sector_id) {
        let stars = store.stars_in(system.id);
        let planets = store.planets_in(system.id);
        let primary = stars
            .first()
            .map(|s| format!("{}{}", s.classification.spectral, s.classification.class))
            .unwrap_or_default();
        println!(
            "  {:02}{:02} {:<20} {:<6} {} stars, {} planets",
            system.x,
            system.y,
            system.name,
            primary,
            stars.len(),
            planets.len()
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn run_system(
    sector_x: i32,
    sector_y: i32,
    x: u32,
    y: u32,
    name: String,
    seed: Option<u64>,
    tile_size: usize,
    output: Option<PathBuf>,
) {
    check_tile_size(tile_size);
    let seed = resolve_seed(seed);
    let config = SectorConfig {
        tile_size,
        ..SectorConfig::with_seed(seed)
    };
    let mut builder = HierarchyBuilder::new(MemoryStore::new(), config);

    let result = builder
        .create_empty_sector("Local", sector_x, sector_y, "", "Un")
        .and_then(|sector| builder.create_star_system(sector, x, y, &name));
    let system_id = match result {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error creating star system: {}", e);
            std::process::exit(1);
        }
    };

    let store = builder.store();
    let Ok(system) = store.system(system_id) else {
        eprintln!("Error: star system {} was not saved", system_id);
        std::process::exit(1);
    };
    println!("{} at {:02}{:02} (seed {})", system.name, system.x, system.y, seed);
    for star in store.stars_in(system_id) {
        println!(
            "  {} {}{} {} at {:.0} Mkm",
            star.name,
            star.classification.spectral,
            star.classification.class,
            star.classification.form,
            star.distance
        );
    }
    for planet in store.planets_in(system_id) {
        let indent = if planet.is_moon() { "      " } else { "    " };
        let resources: Vec<String> = planet
            .resources
            .iter()
            .map(|r| format!("{} {}", r.commodity, r.density))
            .collect();
        println!(
            "{}{} ({}) {} km, {:?}, {:?} {:?}, water {}%, life {:?}",
            indent,
            planet.name,
            planet.archetype,
            planet.radius,
            planet.temperature,
            planet.pressure,
            planet.atmosphere,
            planet.hydrographics,
            planet.life
        );
        if !resources.is_empty() {
            println!("{}  {}", indent, resources.join(", "));
        }
    }

    if let Some(dir) = output {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("Error creating output directory: {}", e);
            std::process::exit(1);
        }
        for planet in store.planets_in(system_id) {
            let file = dir.join(format!("{}.png", planet.name.replace(['/', ' '], "_")));
            if let Err(e) =
                export_tile_grid_png(&planet.surface, 8, &file, &SurfaceMapOptions::default())
            {
                eprintln!("Error exporting {}: {}", planet.name, e);
                std::process::exit(1);
            }
        }
        println!("Tile maps written to {}", dir.display());
    }
}

fn run_planet(
    archetype: String,
    seed: Option<u64>,
    tile_size: usize,
    output: PathBuf,
    name: String,
    start_hydro: Option<u32>,
    end_hydro: Option<u32>,
) {
    let archetype: PlanetArchetype = match archetype.parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    check_tile_size(tile_size);
    let seed = resolve_seed(seed);

    let mut config = TerrainConfig::for_archetype(archetype).with_tile_size(tile_size);
    if start_hydro.is_some() || end_hydro.is_some() {
        let start = start_hydro.or(end_hydro).unwrap_or(0);
        let end = end_hydro.unwrap_or(start);
        if let Err(e) = config.set_hydrographics(start, end) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    println!("Sectorgen - Planet Surface");
    println!("==========================");
    println!("Archetype: {} ({:?})", archetype, archetype.strategy());
    println!("Tile size: {}", tile_size);
    println!("Seed: {}", seed);

    let pipeline = build_pipeline(archetype.strategy(), config);
    println!("Stages: {}", pipeline.stage_count());
    let mut surface = Surface::new(archetype);
    let start = Instant::now();
    let result = pipeline.run_with_callbacks(
        &mut surface,
        &mut Dice::seeded(seed),
        |stage, i, total| println!("  [{}/{}] Starting: {}", i + 1, total, stage),
        |stage, i, total| println!("  [{}/{}] Completed: {}", i + 1, total, stage),
    );
    if let Err(e) = result {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    }
    println!("Generation completed in {:.2?}", start.elapsed());
    println!("Water: {:.1}%", surface.water_fraction() * 100.0);
    if let Some(level) = surface.sea_level {
        println!("Sea level: {}", level);
    }

    if let Err(e) = std::fs::create_dir_all(&output) {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    }
    let tiles_path = output.join(format!("{}_tiles.png", name));
    let height_path = output.join(format!("{}_height.png", name));
    if let Err(e) = export_surface_png(&surface, &tiles_path, &SurfaceMapOptions::default()) {
        eprintln!("Error exporting PNG: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = export_height_png(&surface, &height_path, &HeightPngOptions::default()) {
        eprintln!("Error exporting PNG: {}", e);
        std::process::exit(1);
    }
    println!("  Exported {}", tiles_path.display());
    println!("  Exported {}", height_path.display());
}

fn run_info() {
    println!("Geodesic grid");
    println!("=============");
    for (row, width) in ROW_WIDTHS.iter().enumerate() {
        println!("  Row {:2}: {:2} tiles", row, width);
    }
    println!("  Total: {} tiles", TILE_COUNT);

    let sol = Classification::sol();
    println!("\nStellar model ({}{})", sol.spectral, sol.class);
    println!("=================");
    println!("  Solar constant: {:.3}", solar_constant(&sol));
    println!("  Inner limit: {:.1} Mkm", inner_limit(&sol));
    println!("  Earth equivalent: {:.1} Mkm", earth_equivalent_distance(&sol));
    println!("  Cold point: {:.1} Mkm", cold_point(&sol));
    for distance in [20.0, 60.0, 108.0, 150.0, 228.0, 778.0, 4500.0] {
        println!(
            "  {:>6.0} Mkm: {:?}, period {:.1} days",
            distance,
            orbit_temperature(&sol, distance),
            orbit_period(&sol, distance)
        );
    }
}
