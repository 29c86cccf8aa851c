//! Altitude normalisation by percentile bucketing.

use std::collections::BTreeMap;

use crate::random::RandomSource;
use crate::terrain::{Surface, TerrainConfig, TerrainState, TileKind};

use super::stage::{split_fine, GenerationStage, PipelineError, StageId};

/// Share of the highest pixels, in thousandths, that form the open tail
/// above the top bucket.
const TAIL_PER_MILLE: usize = 10;

/// Builds the raw height to altitude table.
///
/// Distinct heights are ranked by the position of their first occurrence
/// in sorted order. Ranks below the tail cutoff fall into `buckets` equal
/// percentile buckets, bucket `i` mapping to `i * 100 / buckets`, so 20
/// buckets give altitudes 0, 5, ... 95.
/// The `k`-th distinct height in the tail maps to `100 + sqrt(k)`.
pub fn altitude_table(heights: &[i32], buckets: usize) -> BTreeMap<i32, i32> {
    let mut sorted = heights.to_vec();
    sorted.sort_unstable();
    let buckets = buckets.max(1);
    let n = sorted.len();
    let cutoff = (n - n * TAIL_PER_MILLE / 1000).max(1);

    let mut table = BTreeMap::new();
    let mut tail = 0usize;
    for (rank, &h) in sorted.iter().enumerate() {
        if table.contains_key(&h) {
            continue;
        }
        let altitude = if rank < cutoff {
            let bucket = rank * buckets / cutoff;
            (bucket * 100 / buckets) as i32
        } else {
            tail += 1;
            100 + (tail as f64).sqrt() as i32
        };
        table.insert(h, altitude);
    }
    table
}

/// Replaces raw raster heights with bucketed altitudes and raises
/// mountains on high ground.
pub struct NormalizeStage;

impl GenerationStage for NormalizeStage {
    fn id(&self) -> StageId {
        StageId::Normalize
    }

    fn name(&self) -> &str {
        "Altitude Normalisation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Upscale]
    }

    fn advances_to(&self) -> TerrainState {
        TerrainState::Normalized
    }

    fn execute(
        &self,
        surface: &mut Surface,
        config: &TerrainConfig,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), PipelineError> {
        let (_, map) = split_fine(surface, self.name())?;
        let heights: Vec<i32> = map.iter().map(|(_, _, c)| c.height).collect();
        let table = altitude_table(&heights, config.buckets);

        for cell in map.cells_mut().iter_mut().flatten() {
            cell.height = table.get(&cell.height).copied().unwrap_or(cell.height);
            if matches!(cell.kind, TileKind::Land | TileKind::Base)
                && cell.height >= config.mountain_altitude
            {
                cell.kind = TileKind::Mountains;
            }
        }
        Ok(())
    }
}
