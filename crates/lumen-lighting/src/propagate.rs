use lumen_grid::{Light, LightField, Seed, SeedField};

use crate::{EmitterSeeding, LightError, LightQueue, PropagationStats, Worklist};

/// Clears `queue` and enqueues every emitter. Returns the number of seeds.
///
/// With [`EmitterSeeding::Prime`] each emitter's strength is also written into
/// `dest`; [`EmitterSeeding::Literal`] leaves `dest` as the caller zeroed it, so
/// an emitter expands with whatever value has reached it so far.
pub fn scan_seeds<Q: LightQueue>(
    seed: &SeedField,
    dest: &mut LightField,
    queue: &mut Q,
    emitters: EmitterSeeding,
) -> Result<usize, LightError> {
    queue.clear();
    let mut seeds = 0;
    for (i, s) in seed.as_slice().iter().enumerate() {
        let Seed::Emitter(strength) = *s else { continue };
        if strength == 0 {
            continue;
        }
        if emitters == EmitterSeeding::Prime {
            dest[i] = dest[i].max(strength as Light);
        }
        queue.push_cell(i, dest[i])?;
        seeds += 1;
    }
    Ok(seeds)
}

/// Relaxes one neighbor with the light arriving from the cell being expanded.
///
/// Returns `true` when `dest[index]` strictly improved and the cell was queued.
#[inline]
pub fn probe<Q: LightQueue>(
    seed: &SeedField,
    dest: &mut LightField,
    queue: &mut Q,
    index: usize,
    incoming: Light,
) -> Result<bool, LightError> {
    let candidate = match seed[index] {
        Seed::Opaque => return Ok(false),
        Seed::Medium(cost) => incoming - cost as Light,
        // An emitter keeps its own strength; light never flows in below it.
        Seed::Emitter(strength) => strength as Light,
    };
    if candidate <= dest[index] {
        return Ok(false);
    }
    queue.push_cell(index, candidate)?;
    dest[index] = candidate;
    Ok(true)
}

/// Probes the six axis neighbors of `index` with its current value.
/// Returns how many of them improved.
#[inline]
pub fn expand<Q: LightQueue>(
    seed: &SeedField,
    dest: &mut LightField,
    queue: &mut Q,
    index: usize,
) -> Result<usize, LightError> {
    let value = dest[index];
    let mut improved = 0;
    for off in seed.dims().neighbor_offsets() {
        let n = index.wrapping_add_signed(off);
        if probe(seed, dest, queue, n, value)? {
            improved += 1;
        }
    }
    Ok(improved)
}

/// Drains `list` front to back. The end grows as expansions queue improved
/// cells; the drain stops once the cursor catches up with it.
pub fn propagate(
    seed: &SeedField,
    dest: &mut LightField,
    list: &mut Worklist,
) -> Result<PropagationStats, LightError> {
    let seeds = list.len();
    let mut cursor = 0;
    let mut improvements = 0;
    while let Some(index) = list.get(cursor) {
        improvements += expand(seed, dest, list, index)?;
        cursor += 1;
    }
    Ok(PropagationStats {
        seeds,
        pushes: list.len(),
        expansions: cursor,
        improvements,
        stale: 0,
    })
}

/// Seeds and drains in FIFO order. `dest` must be zeroed by the caller.
pub fn run_propagation(
    seed: &SeedField,
    dest: &mut LightField,
    list: &mut Worklist,
    emitters: EmitterSeeding,
) -> Result<PropagationStats, LightError> {
    debug_assert!(seed.border_is_opaque(), "seed field border is not opaque");
    debug_assert_eq!(seed.dims(), dest.dims());
    let start = std::time::Instant::now();
    scan_seeds(seed, dest, list, emitters)?;
    let stats = propagate(seed, dest, list)?;
    log::debug!(
        target: "perf",
        "us={} lighting_fifo side={} seeds={} pushes={} expansions={}",
        start.elapsed().as_micros(),
        seed.dims().side(),
        stats.seeds,
        stats.pushes,
        stats.expansions
    );
    Ok(stats)
}
