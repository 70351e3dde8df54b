use alloc::vec::Vec;
use ndarray::Array3;

use super::*;

/// Uniform placement: shuffles every coordinate once and hands out hazards first, then rewards.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleGenerator {
    seed: u64,
}

impl ShuffleGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for ShuffleGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        use rand::prelude::*;

        config.validate()?;

        let side = config.side;
        let mut positions: Vec<Coord3> = Vec::with_capacity(config.total_cells().into());
        for x in 0..side {
            for y in 0..side {
                for z in 0..side {
                    positions.push((x, y, z));
                }
            }
        }

        // Fisher-Yates
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in (1..positions.len()).rev() {
            let j = rng.random_range(0..=i);
            positions.swap(i, j);
        }

        let hazards = usize::from(config.hazards);
        let rewards = usize::from(config.rewards);
        let dim = usize::from(side);
        let mut kinds: Array3<CellKind> = Array3::default([dim, dim, dim]);
        for &coords in &positions[..hazards] {
            kinds[coords.to_nd_index()] = CellKind::Hazard;
        }
        for &coords in &positions[hazards..hazards + rewards] {
            kinds[coords.to_nd_index()] = CellKind::Reward;
        }

        let grid = Grid::from_kinds(&kinds);

        // double check counts
        if grid.hazard_count() != config.hazards || grid.reward_count() != config.rewards {
            log::warn!(
                "Generated grid count mismatch, hazards: {}/{}, rewards: {}/{}",
                grid.hazard_count(),
                config.hazards,
                grid.reward_count(),
                config.rewards
            );
        }
        log::debug!(
            "Generated {}^3 grid with seed {}, {} hazards, {} rewards",
            side,
            self.seed,
            config.hazards,
            config.rewards
        );

        Ok(grid)
    }
}
