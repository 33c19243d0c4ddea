use lumen_grid::{Seed, SeedField};
use rand::Rng;

use crate::config::Fill;

/// Fills every cell inside the opaque shell with random seeds drawn per `params`.
pub fn fill_random<R: Rng>(seed: &mut SeedField, params: &Fill, rng: &mut R) {
    let n = seed.dims().side();
    let range = params.range.max(1);
    for z in 1..n - 1 {
        for y in 1..n - 1 {
            for x in 1..n - 1 {
                let r = rng.gen_range(0..range);
                let s = if r < params.emitter_weight {
                    match rng.gen_range(0..=params.max_strength) {
                        0 => Seed::DARK,
                        v => Seed::Emitter(v),
                    }
                } else if r < params.emitter_weight.saturating_add(params.dense_weight) {
                    Seed::Medium(params.dense_cost)
                } else {
                    Seed::Medium(params.medium_cost)
                };
                seed.set(x, y, z, s);
            }
        }
    }
}
